// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the registry, its telemetry, and the node binary.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Selects the time zone used when rendering history timestamps.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampZone {
    /// The process-local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

/// Behavioral settings for the registry service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// The zone used to render `Timestamp` fields in history output.
    #[serde(default)]
    pub timestamp_zone: TimestampZone,
    /// Whether the caller identity is decoded and logged before each invocation.
    #[serde(default = "default_inspect_identity")]
    pub inspect_identity: bool,
}

fn default_inspect_identity() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            timestamp_zone: TimestampZone::default(),
            inspect_identity: default_inspect_identity(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, single-line records.
    #[default]
    Pretty,
    /// Structured JSON records.
    Json,
}

/// Settings for the global tracing subscriber.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// The log record format.
    #[serde(default)]
    pub format: LogFormat,
    /// The filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// The caller identity the node's in-memory host presents to the registry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// The membership service provider identifier.
    pub msp_id: String,
    /// Path to the PEM-encoded certificate of the caller.
    pub certificate_pem: PathBuf,
}

/// Top-level configuration for the `asset-registry-node` binary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct NodeConfig {
    /// Registry behavior.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging setup.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Optional caller identity; when absent the host presents an empty identity.
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
}

impl NodeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.telemetry.filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "telemetry.filter must not be empty".to_string(),
            ));
        }
        if let Some(identity) = &self.identity {
            if identity.msp_id.is_empty() {
                return Err(ConfigError::Invalid(
                    "identity.msp_id must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
