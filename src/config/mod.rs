//! Configuration management for wlast

mod io;
mod types;

pub use io::CONFIG_ENV;
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/wlast/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Parse a TOML document, filling in defaults for missing keys
    pub fn from_toml(contents: &str) -> Result<Self> {
        io::parse(contents)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Expand ~ in the store path
    pub fn store_path(&self) -> PathBuf {
        let path = &self.store.path;
        if let Some(stripped) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(path)
    }
}
