//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::ValueEnum;
use waylens::config::ConfigFile;
use waylens::PerformanceMode;

use crate::error::CliError;

/// Performance mode selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum ModeArg {
    /// 60 Hz, up to 15 elements
    High,
    /// 30 Hz, up to 10 elements
    Balanced,
    /// 15 Hz, up to 5 elements
    Battery,
}

impl From<ModeArg> for PerformanceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::High => PerformanceMode::High,
            ModeArg::Balanced => PerformanceMode::Balanced,
            ModeArg::Battery => PerformanceMode::Battery,
        }
    }
}

/// Load config from an explicit path, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Resolve the mode: CLI takes precedence, then config.
pub fn resolve_mode(cli_mode: Option<ModeArg>, config: &ConfigFile) -> PerformanceMode {
    cli_mode.map(PerformanceMode::from).unwrap_or(config.mode)
}
