//! REST Engine
//!
//! Client for the htm.core NetworkAPI REST server, providing:
//! - Network creation and deletion
//! - Scalar input and stepping
//! - SDR and scalar output retrieval
//!
//! # Example
//! ```rust,ignore
//! let engine = RestEngine::new(EngineConfig::default())?;
//! let network = engine.create_network(topology_json)?;
//! engine.set_input(&network, "encoder", 0.5)?;
//! engine.run(&network)?;
//! let active = engine.active_cells(&network, "tm")?;
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::payload::{check_reply, expect_ok, ScalarPayload, SdrPayload};
use crate::core::{EngineConfig, Sdr};
use crate::ports::{Engine, EngineError, EngineResult, NetworkId, SENSED_VALUE_PARAM};

/// Blocking HTTP client for one engine endpoint
pub struct RestEngine {
    config: EngineConfig,
    client: Client,
}

impl RestEngine {
    /// Create a client for the configured endpoint
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create with the default endpoint (localhost:8050)
    pub fn local() -> EngineResult<Self> {
        Self::new(EngineConfig::default())
    }

    /// Get the base network URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// URL of a network-relative resource
    fn network_url(&self, network: &NetworkId, path: &str) -> String {
        format!("{}/{}/{}", self.config.base_url, network, path)
    }

    fn output_url(&self, network: &NetworkId, region: &str, output: &str) -> String {
        self.network_url(network, &format!("region/{}/output/{}", region, output))
    }

    /// Send a request and return the normalized reply body
    fn send(&self, operation: &'static str, request: RequestBuilder) -> EngineResult<String> {
        let response = request.send().map_err(|e| {
            if e.is_connect() {
                EngineError::Connection(format!(
                    "Cannot connect to engine at {}. Is the REST server running?",
                    self.config.base_url
                ))
            } else if e.is_timeout() {
                EngineError::Timeout(timeout_millis(self.config.timeout))
            } else {
                EngineError::Request(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| EngineError::Request(format!("{}: unreadable reply: {}", operation, e)))?;
        debug!(operation, status, bytes = body.len(), "engine reply");

        check_reply(status, &body)
    }
}

/// Timeout in whole milliseconds, saturating at `u64::MAX`
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

impl Engine for RestEngine {
    fn create_network(&self, config_json: &str) -> EngineResult<NetworkId> {
        debug!(url = %self.config.base_url, "creating network");
        let request = self
            .client
            .post(&self.config.base_url)
            .header(CONTENT_TYPE, "application/json")
            .body(config_json.to_string());

        let id = self.send("create network", request)?;
        if id.is_empty() {
            return Err(EngineError::Unexpected {
                operation: "create network",
                body: id,
            });
        }
        Ok(NetworkId::new(id))
    }

    fn set_input(&self, network: &NetworkId, region: &str, value: f64) -> EngineResult<()> {
        let url = self.network_url(network, &format!("region/{}/param/{}", region, SENSED_VALUE_PARAM));
        debug!(%url, value, "setting input");
        let request = self.client.put(url).form(&[("data", value.to_string())]);

        let body = self.send("set input", request)?;
        expect_ok("set input", &body)
    }

    fn run(&self, network: &NetworkId) -> EngineResult<()> {
        let request = self.client.get(self.network_url(network, "run"));
        let body = self.send("run", request)?;
        expect_ok("run", &body)
    }

    fn sdr_output(&self, network: &NetworkId, region: &str, output: &str) -> EngineResult<Sdr> {
        let request = self.client.get(self.output_url(network, region, output));
        let body = self.send("read output", request)?;
        SdrPayload::parse(&body)?.into_sdr()
    }

    fn scalar_output(&self, network: &NetworkId, region: &str, output: &str) -> EngineResult<f64> {
        let request = self.client.get(self.output_url(network, region, output));
        let body = self.send("read output", request)?;
        ScalarPayload::parse(&body)?.value()
    }

    fn delete_network(&self, network: &NetworkId) -> EngineResult<()> {
        debug!(%network, "deleting network");
        let request = self.client.delete(self.network_url(network, "ALL"));
        let body = self.send("delete network", request)?;
        expect_ok("delete network", &body)
    }
}
