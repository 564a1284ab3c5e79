//! Settings persistence under the `pomodoroSettings` key

use crate::{models::Settings, Result};
use serde_json::Value;

use super::KeyValueStore;

pub const SETTINGS_KEY: &str = "pomodoroSettings";

pub struct SettingsStorage<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load settings, substituting defaults for anything missing or malformed.
    pub fn load(&self) -> Settings {
        let content = match self.store.get(SETTINGS_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return Settings::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings, using defaults: {}", e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) if value.is_object() => Settings::from_stored(&value),
            Ok(_) | Err(_) => {
                tracing::debug!("Stored settings are malformed, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &content)
    }
}
