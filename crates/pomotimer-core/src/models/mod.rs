pub mod config;
pub mod display;
pub mod mode;
pub mod settings;
pub mod stats;
pub mod timer;

pub use config::AppConfig;
pub use display::{format_clock, format_focus_time, DisplayState};
pub use mode::{Mode, ModeConfig, ModeTable};
pub use settings::{parse_minutes, Settings, SettingsField};
pub use stats::{PersistedStats, SessionCounters};
pub use timer::{RunState, TimerState};
