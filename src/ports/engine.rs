//! # Engine Port
//!
//! Trait for driving a remote NetworkAPI engine.
//!
//! The engine owns the network (regions, links, learning state). The client
//! only pushes scalars in, steps the network and pulls outputs back:
//! `create -> (set_input -> run -> read outputs)* -> delete`.
//!
//! Implemented by transport adapters (REST) and by in-memory fakes in tests.

use std::fmt;

use crate::core::{Sdr, SdrError};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Parameter that receives the encoder input value
pub const SENSED_VALUE_PARAM: &str = "sensedValue";

/// Region output names
pub mod outputs {
    pub const ENCODED: &str = "encoded";
    pub const ACTIVE_CELLS: &str = "activeCells";
    /// The engine exposes a TM's winner cells under this name
    pub const WINNER_CELLS: &str = "predictedActiveCells";
    pub const PREDICTIVE_CELLS: &str = "predictiveCells";
    pub const ANOMALY: &str = "anomaly";
}

/// Opaque identifier of a network living on the engine
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors reported while talking to the engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status} => {body}")]
    Status { status: u16, body: String },

    /// The engine answered with its error prefix
    #[error("{0}")]
    Remote(String),

    #[error("{operation} failed: unexpected reply {body:?}")]
    Unexpected { operation: &'static str, body: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid SDR payload: {0}")]
    Sdr(#[from] SdrError),
}

/// Remote network control surface
pub trait Engine {
    /// Create and configure a network from opaque topology JSON
    fn create_network(&self, config_json: &str) -> EngineResult<NetworkId>;

    /// Push a scalar into a region's sensed-value parameter
    fn set_input(&self, network: &NetworkId, region: &str, value: f64) -> EngineResult<()>;

    /// Execute one step of every region in the network
    fn run(&self, network: &NetworkId) -> EngineResult<()>;

    /// Fetch a region output as an SDR
    fn sdr_output(&self, network: &NetworkId, region: &str, output: &str) -> EngineResult<Sdr>;

    /// Fetch a region output as a single scalar
    fn scalar_output(&self, network: &NetworkId, region: &str, output: &str) -> EngineResult<f64>;

    /// Delete the network and everything in it
    fn delete_network(&self, network: &NetworkId) -> EngineResult<()>;

    /// Encoder output
    fn encoded(&self, network: &NetworkId, region: &str) -> EngineResult<Sdr> {
        self.sdr_output(network, region, outputs::ENCODED)
    }

    /// Active cells of a Temporal Memory region
    fn active_cells(&self, network: &NetworkId, region: &str) -> EngineResult<Sdr> {
        self.sdr_output(network, region, outputs::ACTIVE_CELLS)
    }

    /// Winner cells of a Temporal Memory region
    fn winner_cells(&self, network: &NetworkId, region: &str) -> EngineResult<Sdr> {
        self.sdr_output(network, region, outputs::WINNER_CELLS)
    }

    /// Predictive cells of a Temporal Memory region
    fn predictive_cells(&self, network: &NetworkId, region: &str) -> EngineResult<Sdr> {
        self.sdr_output(network, region, outputs::PREDICTIVE_CELLS)
    }

    /// Anomaly score of a Temporal Memory region
    fn anomaly(&self, network: &NetworkId, region: &str) -> EngineResult<f64> {
        self.scalar_output(network, region, outputs::ANOMALY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use crate::core::OutOfRange;

    /// Records which output names the provided methods ask for
    #[derive(Default)]
    struct OutputRecorder {
        requested: RefCell<Vec<String>>,
    }

    impl Engine for OutputRecorder {
        fn create_network(&self, _config_json: &str) -> EngineResult<NetworkId> {
            Ok(NetworkId::new("0"))
        }

        fn set_input(&self, _network: &NetworkId, _region: &str, _value: f64) -> EngineResult<()> {
            Ok(())
        }

        fn run(&self, _network: &NetworkId) -> EngineResult<()> {
            Ok(())
        }

        fn sdr_output(&self, _network: &NetworkId, region: &str, output: &str) -> EngineResult<Sdr> {
            self.requested.borrow_mut().push(format!("{}.{}", region, output));
            Ok(Sdr::new(&[4])?)
        }

        fn scalar_output(&self, _network: &NetworkId, region: &str, output: &str) -> EngineResult<f64> {
            self.requested.borrow_mut().push(format!("{}.{}", region, output));
            Ok(0.5)
        }

        fn delete_network(&self, _network: &NetworkId) -> EngineResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_network_id_display() {
        let id = NetworkId::new("42");
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_provided_outputs_use_engine_names() {
        let engine = OutputRecorder::default();
        let network = NetworkId::new("0");

        engine.encoded(&network, "encoder").unwrap();
        engine.active_cells(&network, "tm").unwrap();
        engine.winner_cells(&network, "tm").unwrap();
        engine.predictive_cells(&network, "tm").unwrap();
        assert_eq!(engine.anomaly(&network, "tm").unwrap(), 0.5);

        assert_eq!(
            *engine.requested.borrow(),
            vec![
                "encoder.encoded",
                "tm.activeCells",
                "tm.predictedActiveCells",
                "tm.predictiveCells",
                "tm.anomaly",
            ]
        );
    }

    #[test]
    fn test_sdr_error_converts() {
        let err: EngineError = SdrError::IndexOutOfRange(OutOfRange::Index { index: 9, size: 8 }).into();
        assert!(matches!(err, EngineError::Sdr(_)));
        assert!(err.to_string().contains("Index 9 out of range"));
    }
}
