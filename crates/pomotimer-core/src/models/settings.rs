//! User-editable timer settings

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Mode;

pub const MIN_DURATION_MINUTES: u32 = 1;
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Settings as persisted under the `pomodoroSettings` key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub work_duration: u32,
    pub short_break_duration: u32,
    pub long_break_duration: u32,
    pub auto_start: bool,
    pub sound_enabled: bool,
}

/// Addressable settings fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    WorkDuration,
    ShortBreakDuration,
    LongBreakDuration,
    AutoStart,
    SoundEnabled,
}

impl SettingsField {
    pub const ALL: [Self; 5] = [
        Self::WorkDuration,
        Self::ShortBreakDuration,
        Self::LongBreakDuration,
        Self::AutoStart,
        Self::SoundEnabled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WorkDuration => "Work Duration",
            Self::ShortBreakDuration => "Short Break",
            Self::LongBreakDuration => "Long Break",
            Self::AutoStart => "Auto-start Next Session",
            Self::SoundEnabled => "Sound Notifications",
        }
    }

    pub fn is_duration(&self) -> bool {
        matches!(
            self,
            Self::WorkDuration | Self::ShortBreakDuration | Self::LongBreakDuration
        )
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        for field in SettingsField::ALL.iter().filter(|f| f.is_duration()) {
            let minutes = self.minutes(*field);
            if minutes < MIN_DURATION_MINUTES {
                return Err(Error::Validation(format!(
                    "{} must be at least {} minute",
                    field.label(),
                    MIN_DURATION_MINUTES
                )));
            }
            if minutes > MAX_DURATION_MINUTES {
                return Err(Error::Validation(format!(
                    "{} too long (max {} minutes)",
                    field.label(),
                    MAX_DURATION_MINUTES
                )));
            }
        }
        Ok(())
    }

    /// Copy with every duration forced into the accepted range.
    pub fn clamped(self) -> Self {
        Self {
            work_duration: clamp_minutes(u64::from(self.work_duration)),
            short_break_duration: clamp_minutes(u64::from(self.short_break_duration)),
            long_break_duration: clamp_minutes(u64::from(self.long_break_duration)),
            ..self
        }
    }

    /// Configured duration of a mode, in minutes
    pub fn duration(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::ShortBreak => self.short_break_duration,
            Mode::LongBreak => self.long_break_duration,
        }
    }

    fn minutes(&self, field: SettingsField) -> u32 {
        match field {
            SettingsField::WorkDuration => self.work_duration,
            SettingsField::ShortBreakDuration => self.short_break_duration,
            SettingsField::LongBreakDuration => self.long_break_duration,
            SettingsField::AutoStart | SettingsField::SoundEnabled => 0,
        }
    }

    fn minutes_mut(&mut self, field: SettingsField) -> Option<&mut u32> {
        match field {
            SettingsField::WorkDuration => Some(&mut self.work_duration),
            SettingsField::ShortBreakDuration => Some(&mut self.short_break_duration),
            SettingsField::LongBreakDuration => Some(&mut self.long_break_duration),
            SettingsField::AutoStart | SettingsField::SoundEnabled => None,
        }
    }

    fn flag_mut(&mut self, field: SettingsField) -> Option<&mut bool> {
        match field {
            SettingsField::AutoStart => Some(&mut self.auto_start),
            SettingsField::SoundEnabled => Some(&mut self.sound_enabled),
            _ => None,
        }
    }

    /// Human-readable value of a field
    pub fn display_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::AutoStart => on_off(self.auto_start).to_string(),
            SettingsField::SoundEnabled => on_off(self.sound_enabled).to_string(),
            _ => format!("{} minutes", self.minutes(field)),
        }
    }

    /// Set a field from raw user text. Durations must be whole numbers and are
    /// clamped; flags accept true/false, on/off, yes/no.
    pub fn set_field(&mut self, field: SettingsField, raw: &str) -> Result<()> {
        if let Some(minutes) = self.minutes_mut(field) {
            *minutes = parse_minutes(raw)?;
            return Ok(());
        }

        let value = parse_flag(raw)?;
        if let Some(flag) = self.flag_mut(field) {
            *flag = value;
        }
        Ok(())
    }

    /// Step a duration by `delta` minutes (clamped) or flip a flag.
    pub fn adjust(&mut self, field: SettingsField, delta: i64) {
        if let Some(minutes) = self.minutes_mut(field) {
            let next = i64::from(*minutes).saturating_add(delta).max(0) as u64;
            *minutes = clamp_minutes(next);
        } else if let Some(flag) = self.flag_mut(field) {
            *flag = !*flag;
        }
    }

    /// Decode stored settings field by field. Missing, zero or non-numeric
    /// durations fall back to defaults; `autoStart` is only on when stored as
    /// `true`, `soundEnabled` is only off when stored as `false`.
    pub fn from_stored(value: &Value) -> Self {
        let defaults = Self::default();
        Self {
            work_duration: stored_minutes(value, "workDuration", defaults.work_duration),
            short_break_duration: stored_minutes(
                value,
                "shortBreakDuration",
                defaults.short_break_duration,
            ),
            long_break_duration: stored_minutes(
                value,
                "longBreakDuration",
                defaults.long_break_duration,
            ),
            auto_start: value.get("autoStart").and_then(Value::as_bool) == Some(true),
            sound_enabled: value.get("soundEnabled").and_then(Value::as_bool) != Some(false),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            auto_start: false,
            sound_enabled: true,
        }
    }
}

/// Parse a duration typed by the user. Non-numeric input is rejected, numbers
/// are clamped to the accepted range.
pub fn parse_minutes(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let minutes: i64 = trimmed.parse().map_err(|_| {
        Error::Validation(format!("'{}' is not a whole number of minutes", trimmed))
    })?;
    Ok(clamp_minutes(minutes.max(0) as u64))
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(Error::Validation(format!("'{}' is not on or off", other))),
    }
}

fn clamp_minutes(minutes: u64) -> u32 {
    minutes.clamp(
        u64::from(MIN_DURATION_MINUTES),
        u64::from(MAX_DURATION_MINUTES),
    ) as u32
}

fn stored_minutes(value: &Value, key: &str, default: u32) -> u32 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .filter(|minutes| *minutes > 0)
        .map(clamp_minutes)
        .unwrap_or(default)
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On" } else { "Off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.work_duration, 25);
        assert_eq!(settings.short_break_duration, 5);
        assert_eq!(settings.long_break_duration, 15);
        assert!(!settings.auto_start);
        assert!(settings.sound_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_serializes_with_stored_field_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "workDuration": 25,
                "shortBreakDuration": 5,
                "longBreakDuration": 15,
                "autoStart": false,
                "soundEnabled": true
            })
        );
    }

    #[test]
    fn test_validation_bounds() {
        let mut settings = Settings {
            work_duration: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        settings.work_duration = 500;
        assert!(settings.validate().is_err());

        let clamped = settings.clamped();
        assert_eq!(clamped.work_duration, MAX_DURATION_MINUTES);
        assert!(clamped.validate().is_ok());
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("30").unwrap(), 30);
        assert_eq!(parse_minutes(" 45 ").unwrap(), 45);
        assert_eq!(parse_minutes("0").unwrap(), 1);
        assert_eq!(parse_minutes("-10").unwrap(), 1);
        assert_eq!(parse_minutes("9999").unwrap(), MAX_DURATION_MINUTES);
        assert!(parse_minutes("abc").is_err());
        assert!(parse_minutes("").is_err());
        assert!(parse_minutes("12.5").is_err());
    }

    #[test]
    fn test_set_field_rejects_non_numeric() {
        let mut settings = Settings::default();
        assert!(settings.set_field(SettingsField::WorkDuration, "soon").is_err());
        assert_eq!(settings.work_duration, 25);

        settings.set_field(SettingsField::WorkDuration, "50").unwrap();
        assert_eq!(settings.work_duration, 50);

        settings.set_field(SettingsField::AutoStart, "on").unwrap();
        assert!(settings.auto_start);
        assert!(settings.set_field(SettingsField::SoundEnabled, "maybe").is_err());
    }

    #[test]
    fn test_adjust() {
        let mut settings = Settings::default();
        settings.adjust(SettingsField::ShortBreakDuration, -10);
        assert_eq!(settings.short_break_duration, 1);

        settings.adjust(SettingsField::LongBreakDuration, 5);
        assert_eq!(settings.long_break_duration, 20);

        settings.adjust(SettingsField::SoundEnabled, 1);
        assert!(!settings.sound_enabled);
    }

    #[test]
    fn test_from_stored_is_lenient() {
        let settings = Settings::from_stored(&json!({
            "workDuration": 0,
            "shortBreakDuration": "ten",
            "longBreakDuration": 20,
            "autoStart": "yes"
        }));

        assert_eq!(settings.work_duration, 25);
        assert_eq!(settings.short_break_duration, 5);
        assert_eq!(settings.long_break_duration, 20);
        assert!(!settings.auto_start);
        assert!(settings.sound_enabled);

        let settings = Settings::from_stored(&json!({ "soundEnabled": false, "autoStart": true }));
        assert!(!settings.sound_enabled);
        assert!(settings.auto_start);
    }

    #[test]
    fn test_display_value() {
        let settings = Settings::default();
        assert_eq!(settings.display_value(SettingsField::WorkDuration), "25 minutes");
        assert_eq!(settings.display_value(SettingsField::SoundEnabled), "On");
        assert_eq!(settings.display_value(SettingsField::AutoStart), "Off");
    }
}
