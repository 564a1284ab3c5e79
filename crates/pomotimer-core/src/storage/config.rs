//! Application config storage (`config.json` in the config directory)

use crate::{models::AppConfig, Result};
use std::path::PathBuf;

pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Load `config.json`, writing the defaults first when it is missing or
    /// blank. A present file must parse and validate.
    pub fn load(&self) -> Result<AppConfig> {
        match self.read_contents()? {
            Some(content) => {
                let config: AppConfig = serde_json::from_str(&content)?;
                config.validate()?;
                Ok(config)
            }
            None => {
                let config = AppConfig::default();
                self.save(&config)?;
                Ok(config)
            }
        }
    }

    fn read_contents(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(self.config_path()) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(self.config_path(), content)?;

        Ok(())
    }
}
