//! CLI configuration with TOML file support.

use dao_governance::GovernanceParams;
use dao_token::DEFAULT_SUPPLY;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::logging::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Settings for a scenario run.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; every field
/// has a default so an empty file is valid.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Tokens minted to the deployer (`seed:0`).
    #[serde(default = "default_token_supply")]
    pub token_supply: u64,

    /// Clock value (Unix seconds) when the scenario starts.
    #[serde(default)]
    pub genesis_time: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub governance: GovernanceParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_token_supply() -> u64 {
    DEFAULT_SUPPLY
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            token_supply: default_token_supply(),
            genesis_time: 0,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            governance: GovernanceParams::default(),
        }
    }
}
