//! Engine configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Homepage URL
    pub homepage: String,
    /// Search engine URL template (%s replaced with the encoded query)
    pub search_engine: String,
    /// Enable tracking protection for new sessions
    pub tracking_protection: bool,
    /// Rule list to load; the embedded defaults are used when unset
    pub rules_path: Option<PathBuf>,
    /// Capacity of the per-session ledger op queue
    pub queue_capacity: usize,
}

impl Config {
    /// Parse a config from JSON, falling back to defaults for absent keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            homepage: "https://www.mozilla.org".to_string(),
            search_engine: "https://duckduckgo.com/?q=%s".to_string(),
            tracking_protection: true,
            rules_path: None,
            queue_capacity: 256,
        }
    }
}
