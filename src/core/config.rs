//! # Configuration
//!
//! Where the engine lives and how long to wait for it.
//!
//! Defaults target a local htm.core REST server. Values can be overridden
//! with the builder methods or loaded from the environment:
//!
//! | variable | meaning |
//! |---|---|
//! | `HTM_REST_URL` | base network URL |
//! | `HTM_REST_TIMEOUT_SECS` | per-request timeout in seconds |

use std::time::Duration;

/// Default base URL of the NetworkAPI REST endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:8050/network";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENV_BASE_URL: &str = "HTM_REST_URL";
pub const ENV_TIMEOUT_SECS: &str = "HTM_REST_TIMEOUT_SECS";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Engine connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Base network URL, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl EngineConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from process environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (env-style)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_BASE_URL,
                    value: url.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            config = Self::new(url).with_timeout(config.timeout);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
