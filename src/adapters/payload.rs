//! Engine response payloads.
//!
//! Every reply is first normalized by [`check_reply`]: a non-success status or
//! a body beginning with [`ERROR_PREFIX`] is a failure, even on a 200.
//! Output replies are then decoded against a fixed schema:
//!
//! ```text
//! SDR:    { "type": "SDR(d1,d2,...)", "data": [i1, i2, ...] }
//! scalar: { "data": [x, ...] }
//! ```

use serde::Deserialize;

use crate::core::Sdr;
use crate::ports::{EngineError, EngineResult};

/// Prefix the engine puts in front of error messages
pub const ERROR_PREFIX: &str = "ERROR:";

/// Reply body of commands that have no result
pub const OK_REPLY: &str = "OK";

/// SDR-shaped output payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SdrPayload {
    #[serde(rename = "type")]
    pub sdr_type: String,
    pub data: Vec<usize>,
}

impl SdrPayload {
    /// Parse from a reply body
    pub fn parse(body: &str) -> EngineResult<Self> {
        serde_json::from_str(body.trim())
            .map_err(|e| EngineError::MalformedPayload(format!("SDR payload: {}", e)))
    }

    /// Dimensions declared in the `type` field
    pub fn shape(&self) -> EngineResult<Vec<usize>> {
        parse_sdr_type(&self.sdr_type)
    }

    /// Build the SDR described by this payload
    pub fn into_sdr(self) -> EngineResult<Sdr> {
        let shape = self.shape()?;
        Ok(Sdr::from_sparse(&shape, &self.data)?)
    }
}

/// Scalar output payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScalarPayload {
    pub data: Vec<f64>,
}

impl ScalarPayload {
    /// Parse from a reply body
    pub fn parse(body: &str) -> EngineResult<Self> {
        serde_json::from_str(body.trim())
            .map_err(|e| EngineError::MalformedPayload(format!("scalar payload: {}", e)))
    }

    /// The first (and usually only) value
    pub fn value(&self) -> EngineResult<f64> {
        self.data
            .first()
            .copied()
            .ok_or_else(|| EngineError::MalformedPayload("scalar payload has no data".to_string()))
    }
}

/// Parse `SDR(d1,d2,...)` into its dimensions
pub fn parse_sdr_type(sdr_type: &str) -> EngineResult<Vec<usize>> {
    let malformed = || EngineError::MalformedPayload(format!("bad SDR type {:?}", sdr_type));

    let dims = sdr_type
        .trim()
        .strip_prefix("SDR")
        .map(str::trim)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    dims.split(',')
        .map(|dim| dim.trim().parse::<usize>().map_err(|_| malformed()))
        .collect()
}

/// Normalize a raw reply: reject failures, trim the body
pub fn check_reply(status: u16, body: &str) -> EngineResult<String> {
    if !(200..300).contains(&status) {
        return Err(EngineError::Status {
            status,
            body: body.to_string(),
        });
    }
    if body.starts_with(ERROR_PREFIX) {
        return Err(EngineError::Remote(body.trim().to_string()));
    }
    Ok(body.trim().to_string())
}

/// Require the `OK` reply of a command
pub fn expect_ok(operation: &'static str, body: &str) -> EngineResult<()> {
    if body.trim() == OK_REPLY {
        Ok(())
    } else {
        Err(EngineError::Unexpected {
            operation,
            body: body.trim().to_string(),
        })
    }
}
