//! Session counters and their persisted daily form

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Mode;

/// Every fourth completed work session is followed by a long break.
pub const SESSIONS_UNTIL_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    /// Current work/break cycle, starting at 1
    pub session_number: u32,
    pub completed_work_sessions: u32,
    pub total_focus_minutes: u32,
    pub current_streak: u32,
}

impl SessionCounters {
    /// Restore counters from today's stats. The cycle number always starts at 1.
    pub fn from_persisted(stats: &PersistedStats) -> Self {
        Self {
            session_number: 1,
            completed_work_sessions: stats.completed_sessions,
            total_focus_minutes: stats.total_focus_time,
            current_streak: stats.current_streak,
        }
    }

    /// Count a finished work session and pick the break that follows it.
    pub fn record_work_session(&mut self, work_minutes: u32) -> Mode {
        self.completed_work_sessions = self.completed_work_sessions.saturating_add(1);
        self.total_focus_minutes = self.total_focus_minutes.saturating_add(work_minutes);
        self.current_streak = self.current_streak.saturating_add(1);

        if self.completed_work_sessions % SESSIONS_UNTIL_LONG_BREAK == 0 {
            Mode::LongBreak
        } else {
            Mode::ShortBreak
        }
    }

    /// Count a finished break; the next session is always work.
    pub fn record_break(&mut self) -> Mode {
        self.session_number = self.session_number.saturating_add(1);
        Mode::Work
    }
}

impl Default for SessionCounters {
    fn default() -> Self {
        Self {
            session_number: 1,
            completed_work_sessions: 0,
            total_focus_minutes: 0,
            current_streak: 0,
        }
    }
}

/// Stats as persisted under the `pomodoroStats` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStats {
    pub completed_sessions: u32,
    /// Minutes of completed focus time
    pub total_focus_time: u32,
    pub current_streak: u32,
    pub date: String,
}

impl PersistedStats {
    pub fn from_counters(counters: &SessionCounters, date: String) -> Self {
        Self {
            completed_sessions: counters.completed_work_sessions,
            total_focus_time: counters.total_focus_minutes,
            current_streak: counters.current_streak,
            date,
        }
    }

    pub fn empty(date: String) -> Self {
        Self {
            completed_sessions: 0,
            total_focus_time: 0,
            current_streak: 0,
            date,
        }
    }

    /// Decode stored stats for `today`. A record from another day yields zeroes;
    /// missing or non-numeric counters read as 0.
    pub fn from_stored(value: &Value, today: &str) -> Self {
        let stored_date = value.get("date").and_then(Value::as_str);
        if stored_date != Some(today) {
            return Self::empty(today.to_string());
        }

        Self {
            completed_sessions: stored_count(value, "completedSessions"),
            total_focus_time: stored_count(value, "totalFocusTime"),
            current_streak: stored_count(value, "currentStreak"),
            date: today.to_string(),
        }
    }
}

fn stored_count(value: &Value, key: &str) -> u32 {
    value
        .get(key)
        .and_then(Value::as_u64)
        .map(|n| n.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}
