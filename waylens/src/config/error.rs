//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading configuration.
///
/// These indicate programming or deployment mistakes and are reported at
/// construction time rather than degrading frames at runtime.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown performance mode '{0}' (expected high, balanced or battery)")]
    UnknownPerformanceMode(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Shorthand for an [`InvalidValue`](Self::InvalidValue) error.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
