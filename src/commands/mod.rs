//! Command handlers for the wlast CLI.
//!
//! Each submodule handles one subcommand. Dispatch stays in main.rs.

pub mod boottime;
pub mod completions;
pub mod config;
pub mod last;

use std::path::PathBuf;

use wlast::Config;

/// The history file: `-f` when given, the configured store otherwise.
pub fn store_path(file: Option<PathBuf>, config: &Config) -> PathBuf {
    file.unwrap_or_else(|| config.store_path())
}
