//! Logging configuration read from the process environment.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the `EnvFilter` directives.
pub const FILTER_VAR: &str = "RUST_LOG";

/// Environment variable selecting the output format (`json` or `pretty`).
pub const FORMAT_VAR: &str = "WAREHOUSE_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
    UnknownLogFormat(String),
}

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ConfigError::UnknownLogFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `info` or `warehouse_inventory=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(filter) = lookup(FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(format) = lookup(FORMAT_VAR) {
            config.format = format.parse()?;
        }

        Ok(config)
    }
}
