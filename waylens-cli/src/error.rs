//! CLI error types.

use std::fmt;
use std::path::PathBuf;

use waylens::config::ConfigError;
use waylens::logging::LoggingError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    Config(String),

    /// Logging could not be initialised.
    Logging(LoggingError),

    /// Scene file could not be read.
    SceneRead { path: PathBuf, source: std::io::Error },

    /// Scene file is not valid JSON for a scene.
    SceneParse { path: PathBuf, source: serde_json::Error },

    /// Output could not be serialized.
    Output(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(e) => write!(f, "Failed to initialise logging: {}", e),
            CliError::SceneRead { path, source } => {
                write!(f, "Failed to read scene {}: {}", path.display(), source)
            }
            CliError::SceneParse { path, source } => {
                write!(f, "Invalid scene file {}: {}", path.display(), source)
            }
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Logging(e) => Some(e),
            CliError::SceneRead { source, .. } => Some(source),
            CliError::SceneParse { source, .. } => Some(source),
            CliError::Output(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}
