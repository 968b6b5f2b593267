//! Client configuration.
//!
//! Two layers: built-in defaults, optionally overridden by a TOML file.
//! Every field has a default so a config file only needs the values it
//! changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default MacNet TCP port.
pub const DEFAULT_PORT: u16 = 57570;

/// Default receive buffer size in bytes. Responses are assumed to fit in
/// one receive of this size.
pub const DEFAULT_BUF_SIZE: usize = 10000;

/// Default bound on validated-transaction attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration load failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Instrument hostname or IP address.
    pub host: String,
    /// Instrument TCP port.
    pub port: u16,
    /// Receive buffer size in bytes.
    pub buf_size: usize,
    /// Attempts allowed per validated transaction.
    pub max_retries: u32,
    /// TCP connect timeout in seconds.
    pub connect_timeout_seconds: u64,
    /// Receive timeout in seconds; `None` blocks indefinitely.
    pub read_timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            buf_size: DEFAULT_BUF_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            connect_timeout_seconds: 30,
            read_timeout_seconds: Some(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file over the built-in defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Read timeout as a `Duration`, if bounded.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_seconds.map(Duration::from_secs)
    }
}
