//! Pomodoro modes and their configured durations

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Work Session",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Short name used on mode selectors.
    pub fn short_name(&self) -> &'static str {
        match self {
            Mode::Work => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_work(&self) -> bool {
        matches!(self, Mode::Work)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three fixed mode entries. Only the duration changes at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    pub mode: Mode,
    pub duration_minutes: u32,
    pub label: &'static str,
}

impl ModeConfig {
    fn new(mode: Mode, duration_minutes: u32) -> Self {
        Self {
            mode,
            duration_minutes,
            label: mode.label(),
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.duration_minutes) * 60
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTable {
    work: ModeConfig,
    short_break: ModeConfig,
    long_break: ModeConfig,
}

impl ModeTable {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            work: ModeConfig::new(Mode::Work, settings.work_duration),
            short_break: ModeConfig::new(Mode::ShortBreak, settings.short_break_duration),
            long_break: ModeConfig::new(Mode::LongBreak, settings.long_break_duration),
        }
    }

    pub fn get(&self, mode: Mode) -> &ModeConfig {
        match mode {
            Mode::Work => &self.work,
            Mode::ShortBreak => &self.short_break,
            Mode::LongBreak => &self.long_break,
        }
    }

    pub fn duration_seconds(&self, mode: Mode) -> u64 {
        self.get(mode).duration_seconds()
    }

    pub fn update_durations(&mut self, settings: &Settings) {
        self.work.duration_minutes = settings.work_duration;
        self.short_break.duration_minutes = settings.short_break_duration;
        self.long_break.duration_minutes = settings.long_break_duration;
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Work.label(), "Work Session");
        assert_eq!(Mode::ShortBreak.label(), "Short Break");
        assert_eq!(Mode::LongBreak.label(), "Long Break");

        assert!(Mode::Work.is_work());
        assert!(!Mode::ShortBreak.is_work());
        assert!(!Mode::LongBreak.is_work());
    }

    #[test]
    fn test_default_table_durations() {
        let table = ModeTable::default();
        assert_eq!(table.duration_seconds(Mode::Work), 1500);
        assert_eq!(table.duration_seconds(Mode::ShortBreak), 300);
        assert_eq!(table.duration_seconds(Mode::LongBreak), 900);
        assert_eq!(table.get(Mode::ShortBreak).label, "Short Break");
    }

    #[test]
    fn test_update_durations_keeps_labels() {
        let mut table = ModeTable::default();
        let settings = Settings {
            work_duration: 50,
            short_break_duration: 10,
            long_break_duration: 30,
            ..Settings::default()
        };

        table.update_durations(&settings);

        assert_eq!(table.get(Mode::Work).duration_minutes, 50);
        assert_eq!(table.duration_seconds(Mode::LongBreak), 1800);
        assert_eq!(table.get(Mode::Work).label, "Work Session");
    }
}
