//! Performance modes and per-frame work budgets.
//!
//! Each [`PerformanceMode`] is bound to a [`PerformanceBudget`]: the frame
//! rate the host loop should target and the maximum number of elements the
//! composer may emit per frame.
//!
//! | Mode | Target rate | Max elements |
//! |------|-------------|--------------|
//! | High | 60 Hz | 15 |
//! | Balanced | 30 Hz | 10 |
//! | Battery | 15 Hz | 5 |
//!
//! The active mode is process-wide and may be changed by the user while a
//! frame is being composed. [`SharedPerformanceMode`] stores it atomically;
//! the composer reads it once per call so a frame never mixes two budgets.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Quality/throughput tradeoff for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    High,
    #[default]
    Balanced,
    Battery,
}

impl PerformanceMode {
    pub const ALL: [PerformanceMode; 3] = [
        PerformanceMode::High,
        PerformanceMode::Balanced,
        PerformanceMode::Battery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceMode::High => "high",
            PerformanceMode::Balanced => "balanced",
            PerformanceMode::Battery => "battery",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            PerformanceMode::High => 0,
            PerformanceMode::Balanced => 1,
            PerformanceMode::Battery => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => PerformanceMode::High,
            2 => PerformanceMode::Battery,
            _ => PerformanceMode::Balanced,
        }
    }
}

impl std::fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PerformanceMode {
    type Err = ConfigError;

    /// Unknown names are rejected; a silently wrong budget has visible
    /// performance consequences.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "balanced" => Ok(Self::Balanced),
            "battery" => Ok(Self::Battery),
            _ => Err(ConfigError::UnknownPerformanceMode(s.to_string())),
        }
    }
}

/// Work budget bound to a performance mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceBudget {
    /// Frame rate the host loop should tick at.
    pub target_frame_rate_hz: u32,
    /// Maximum elements emitted per frame.
    pub max_elements: usize,
}

impl PerformanceBudget {
    pub const fn new(target_frame_rate_hz: u32, max_elements: usize) -> Self {
        Self {
            target_frame_rate_hz,
            max_elements,
        }
    }

    /// Time available for one frame at the target rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_frame_rate_hz.max(1) as f64)
    }

    fn validate(&self, mode: PerformanceMode) -> Result<(), ConfigError> {
        if self.target_frame_rate_hz == 0 {
            return Err(ConfigError::invalid(
                format!("performance.{}", mode),
                "target frame rate must be positive",
            ));
        }
        if self.max_elements == 0 {
            return Err(ConfigError::invalid(
                format!("performance.{}", mode),
                "max elements must be positive",
            ));
        }
        Ok(())
    }
}

/// Maps performance modes to budgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceModeController {
    high: PerformanceBudget,
    balanced: PerformanceBudget,
    battery: PerformanceBudget,
}

impl Default for PerformanceModeController {
    fn default() -> Self {
        Self {
            high: PerformanceBudget::new(60, 15),
            balanced: PerformanceBudget::new(30, 10),
            battery: PerformanceBudget::new(15, 5),
        }
    }
}

impl PerformanceModeController {
    /// Controller with the standard budget table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with custom budgets. Every budget must be non-zero.
    pub fn with_budgets(
        high: PerformanceBudget,
        balanced: PerformanceBudget,
        battery: PerformanceBudget,
    ) -> Result<Self, ConfigError> {
        let controller = Self {
            high,
            balanced,
            battery,
        };
        for mode in PerformanceMode::ALL {
            controller.settings_for(mode).validate(mode)?;
        }
        Ok(controller)
    }

    /// Budget for a mode.
    #[inline]
    pub fn settings_for(&self, mode: PerformanceMode) -> PerformanceBudget {
        match mode {
            PerformanceMode::High => self.high,
            PerformanceMode::Balanced => self.balanced,
            PerformanceMode::Battery => self.battery,
        }
    }

    /// Smallest element budget across all modes.
    pub fn min_max_elements(&self) -> usize {
        PerformanceMode::ALL
            .iter()
            .map(|mode| self.settings_for(*mode).max_elements)
            .min()
            .unwrap_or(0)
    }
}

/// Process-wide performance mode setting.
///
/// Lock-free; safe to share between the UI and the render loop.
#[derive(Debug)]
pub struct SharedPerformanceMode {
    mode: AtomicU8,
}

impl Default for SharedPerformanceMode {
    fn default() -> Self {
        Self::new(PerformanceMode::default())
    }
}

impl SharedPerformanceMode {
    pub fn new(mode: PerformanceMode) -> Self {
        Self {
            mode: AtomicU8::new(mode.to_u8()),
        }
    }

    /// Current mode.
    pub fn get(&self) -> PerformanceMode {
        PerformanceMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Change the mode. Takes effect from the next composed frame.
    pub fn set(&self, mode: PerformanceMode) {
        let previous = PerformanceMode::from_u8(self.mode.swap(mode.to_u8(), Ordering::AcqRel));
        if previous != mode {
            tracing::info!(from = %previous, to = %mode, "Performance mode changed");
        }
    }
}
