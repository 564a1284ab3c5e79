//! Render-ready projection of engine state

use serde::{Deserialize, Serialize};

use super::{Mode, SessionCounters, TimerState};

/// Window title shown while no countdown is running.
pub const IDLE_TITLE: &str = "Pomodoro Timer";

/// Everything a frontend needs to draw the timer. Recomputed from scratch after
/// every engine mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// `MM:SS`
    pub time: String,
    pub label: String,
    /// Active mode, for highlighting the mode selector
    pub mode: Mode,
    pub session_number: u32,
    /// Elapsed fraction in `[0, 1]`
    pub progress: f64,
    pub is_running: bool,
    pub title: String,
    pub completed_sessions: u32,
    /// Focus time as `<h>h <m>m`
    pub total_focus: String,
    pub current_streak: u32,
}

impl DisplayState {
    pub fn project(timer: &TimerState, label: &str, counters: &SessionCounters) -> Self {
        let time = format_clock(timer.seconds_remaining);
        let title = if timer.is_running() {
            format!("{} - {}", time, label)
        } else {
            IDLE_TITLE.to_string()
        };

        Self {
            time,
            label: label.to_string(),
            mode: timer.mode,
            session_number: counters.session_number,
            progress: timer.progress(),
            is_running: timer.is_running(),
            title,
            completed_sessions: counters.completed_work_sessions,
            total_focus: format_focus_time(counters.total_focus_minutes),
            current_streak: counters.current_streak,
        }
    }
}

/// Format remaining seconds as `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format focus minutes as `<h>h <m>m`.
pub fn format_focus_time(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
