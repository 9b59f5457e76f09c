//! Configuration loading and validation.
//!
//! The overlay is configured in code through
//! [`OverlayConfig`](crate::overlay::OverlayConfig) or from an INI file via
//! [`ConfigFile`]. Either way, invalid values surface as [`ConfigError`] when
//! the composer is built, never as degraded frames.

mod error;
mod file;

pub use error::ConfigError;
pub use file::{config_file_path, ConfigFile};
