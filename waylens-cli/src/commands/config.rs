//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::PathBuf;

use clap::Subcommand;
use waylens::config::{config_file_path, ConfigFile};

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration as INI
    Show {
        /// Read this file instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a configuration file with all defaults
    Init {
        /// Write here instead of the default location
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show { config } => run_show(config),
        ConfigCommands::Init { path, force } => run_init(path, force),
    }
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show(path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(path.as_deref())?;
    let mut out = Vec::new();
    config
        .to_ini()
        .write_to(&mut out)
        .map_err(|e| CliError::Config(e.to_string()))?;
    print!("{}", String::from_utf8_lossy(&out));
    Ok(())
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
