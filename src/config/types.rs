//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::format::TimeStyle;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the login history lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

pub fn default_store_path() -> String {
    "/var/lib/wtmpdb/wtmp.jsonl".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Defaults for `wlast last`; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `notime`, `short`, `full`, `iso` or `compact`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeStyle>,
    #[serde(default)]
    pub legacy: bool,
    #[serde(default)]
    pub fullnames: bool,
    #[serde(default)]
    pub hostlast: bool,
    #[serde(default)]
    pub nohostname: bool,
    #[serde(default)]
    pub service: bool,
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.hostlast && self.nohostname {
            return Err("display.hostlast and display.nohostname cannot both be set".to_string());
        }
        Ok(())
    }
}
