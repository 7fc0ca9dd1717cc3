//! JSON configuration for the command-line tool.
//!
//! ```json
//! {
//!   "observe": { "mode": "extrapolate", "max_step_aa": 5.0, "weighting": "photon_counting" },
//!   "system": "ab",
//!   "reference_band": "johnson_v"
//! }
//! ```
//!
//! Every field is optional; command-line flags override file values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::photometry::ObserveOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub observe: ObserveOptions,
    /// Photometric system name: vega, ab or st
    pub system: String,
    pub reference_band: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            observe: ObserveOptions::default(),
            system: "vega".to_string(),
            reference_band: "johnson_v".to_string(),
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
