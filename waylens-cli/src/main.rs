//! Waylens CLI - compose AR overlay frames from scene files.
//!
//! # Usage
//!
//! ```bash
//! # Compose one frame and print it as JSON
//! waylens compose --scene scene.json --mode battery
//!
//! # Show the performance budget table
//! waylens settings
//!
//! # Configuration management
//! waylens config path
//! waylens config init
//! ```

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use waylens::logging::init_logging;

use commands::common::{load_config, ModeArg};
use commands::compose::ComposeArgs;
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Parser)]
#[command(name = "waylens")]
#[command(version, about = "AR spatial overlay composer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose one frame over a scene file and print it as JSON
    Compose {
        /// Scene JSON file (pose, catalogue, optional viewport)
        #[arg(long)]
        scene: PathBuf,

        /// Performance mode (overrides config)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Viewport width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height in pixels
        #[arg(long)]
        height: Option<f64>,

        /// Configuration file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print frame rate and element budgets per performance mode
    Settings {
        /// Only show this mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Configuration file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration file path
    ConfigPath,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Logging settings come from the same file the command reads.
    let config_path = match &cli.command {
        Commands::Compose { config, .. } | Commands::Settings { config, .. } => config.clone(),
        _ => None,
    };
    let logging = load_config(config_path.as_deref())
        .map(|c| c.logging)
        .unwrap_or_default();
    let _guard = init_logging(&logging)?;

    match cli.command {
        Commands::Compose {
            scene,
            mode,
            width,
            height,
            config,
        } => commands::compose::run(ComposeArgs {
            scene,
            mode,
            width,
            height,
            config,
        }),
        Commands::Settings { mode, config } => commands::settings::run(mode, config),
        Commands::ConfigPath => commands::config::run(ConfigCommands::Path),
        Commands::Config { command } => commands::config::run(command),
    }
}
