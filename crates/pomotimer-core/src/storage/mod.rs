pub mod config;
pub mod file;
pub mod memory;
pub mod settings;
pub mod stats;

pub use config::ConfigStorage;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use settings::{SettingsStorage, SETTINGS_KEY};
pub use stats::{StatsStorage, STATS_KEY};

use std::path::PathBuf;

/// String key-value storage that outlives the process.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> crate::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> crate::Result<()>;
}

pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pomotimer")
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pomotimer")
}

pub fn init_data_dir() -> crate::Result<PathBuf> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

pub fn init_config_dir() -> crate::Result<PathBuf> {
    let config_dir = get_config_dir();
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}
