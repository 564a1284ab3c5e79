//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process-level configuration, separate from the user's timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub version: String,
    /// Where settings and stats are kept; the platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    /// Whether desktop notifications may be shown
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            )));
        }

        if let Some(ref dir) = self.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::Validation("Data directory cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            data_dir: None,
            log_level: "info".to_string(),
            notifications: true,
        }
    }
}

fn default_true() -> bool {
    true
}
