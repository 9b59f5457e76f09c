//! CLI subcommands.

pub mod common;
pub mod compose;
pub mod config;
pub mod settings;
