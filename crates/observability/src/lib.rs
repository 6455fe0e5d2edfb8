//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide logging from the environment.
///
/// An invalid configuration falls back to the defaults and is reported once the
/// subscriber is installed. This is safe to call multiple times; subsequent
/// calls become no-ops.
pub fn init() {
    match config::ObservabilityConfig::try_from_env() {
        Ok(config) => tracing::init(&config),
        Err(err) => {
            tracing::init(&config::ObservabilityConfig::default());
            ::tracing::warn!(error = %err, "invalid logging configuration; using defaults");
        }
    }
}

/// Environment-driven logging configuration.
pub mod config;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};
