//! Configuration for quorum-counter components
//!
//! Values come from an optional TOML file, then `QUORUM__*` environment
//! variables, and finally command-line flags applied by the binaries.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::common::{parse_vault_list, Result};

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Coordinator-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlConfig>,

    /// Vault-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultConfig>,
}

impl Config {
    /// Load configuration from `path` (if given and present) and the environment.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("QUORUM")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("control.vaults"),
        );
        let config: Config = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Bind address for the HTTP API
    #[serde(default = "default_control_addr")]
    pub bind_addr: SocketAddr,

    /// Vault addresses (`host:port`), fixed for the coordinator's lifetime
    #[serde(default)]
    pub vaults: Vec<String>,

    /// Per-vault request timeout
    #[serde(default = "default_replica_timeout")]
    pub replica_timeout_ms: u64,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_control_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}
fn default_replica_timeout() -> u64 {
    1000
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_control_addr(),
            vaults: Vec::new(),
            replica_timeout_ms: default_replica_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl ControlConfig {
    pub fn replica_timeout(&self) -> Duration {
        Duration::from_millis(self.replica_timeout_ms)
    }

    /// Vault list with empty and unparseable entries removed.
    pub fn vault_addrs(&self) -> Vec<String> {
        parse_vault_list(&self.vaults.join(","))
    }

    pub fn validate(&self) -> Result<()> {
        if self.replica_timeout_ms == 0 {
            return Err(crate::Error::InvalidConfig(
                "replica_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Vault configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Bind address for the HTTP API
    #[serde(default = "default_vault_addr")]
    pub bind_addr: SocketAddr,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_vault_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8001))
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_vault_addr(),
            log_level: default_log_level(),
        }
    }
}
