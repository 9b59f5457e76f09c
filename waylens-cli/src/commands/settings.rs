//! Settings command - print performance budgets.

use std::path::PathBuf;

use waylens::PerformanceMode;

use super::common::{load_config, ModeArg};
use crate::error::CliError;

/// Print the budget table, or one mode's budget.
pub fn run(mode: Option<ModeArg>, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let budgets = &config.overlay.budgets;

    let modes: Vec<PerformanceMode> = match mode {
        Some(mode) => vec![mode.into()],
        None => PerformanceMode::ALL.to_vec(),
    };

    println!("{:<10} {:>8} {:>13} {:>10}", "mode", "rate", "max elements", "frame");
    for mode in modes {
        let budget = budgets.settings_for(mode);
        let marker = if mode == config.mode { "*" } else { "" };
        println!(
            "{:<10} {:>6}Hz {:>13} {:>8.1}ms",
            format!("{}{}", mode, marker),
            budget.target_frame_rate_hz,
            budget.max_elements,
            budget.frame_interval().as_secs_f64() * 1000.0
        );
    }
    Ok(())
}
