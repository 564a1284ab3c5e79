use serde::{Deserialize, Serialize};

use super::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// Countdown state of the current session.
///
/// `seconds_remaining` never exceeds `total_seconds`, and `total_seconds` is
/// never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub seconds_remaining: u64,
    pub total_seconds: u64,
    pub state: RunState,
}

impl TimerState {
    pub fn new(mode: Mode, total_seconds: u64) -> Self {
        let total_seconds = total_seconds.max(1);
        Self {
            mode,
            seconds_remaining: total_seconds,
            total_seconds,
            state: RunState::Idle,
        }
    }

    /// Load a fresh countdown for `mode`. Run state is left alone.
    pub fn restart(&mut self, mode: Mode, total_seconds: u64) {
        let total_seconds = total_seconds.max(1);
        self.mode = mode;
        self.total_seconds = total_seconds;
        self.seconds_remaining = total_seconds;
    }

    /// Take one second off the countdown. Returns true once it is exhausted.
    pub fn count_down(&mut self) -> bool {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining == 0
    }

    /// Elapsed fraction of the current session, within `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let elapsed = self.total_seconds.saturating_sub(self.seconds_remaining);
        (elapsed as f64 / self.total_seconds as f64).clamp(0.0, 1.0)
    }

    pub fn set_running(&mut self, running: bool) {
        self.state = if running {
            RunState::Running
        } else {
            RunState::Idle
        };
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_idle(&self) -> bool {
        self.state == RunState::Idle
    }
}
