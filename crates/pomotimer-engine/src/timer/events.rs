//! Engine events

use chrono::{DateTime, Utc};
use pomotimer_core::models::{DisplayState, Mode, Settings};
use serde::{Deserialize, Serialize};

/// Title used for desktop notifications
pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

/// Event emitted by the session engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineEvent {
    pub event_type: EngineEventType,
    pub timestamp: DateTime<Utc>,
}

/// Types of engine events. `PlaySound`, `Notify` and `Render` are requests for
/// the frontend to carry out; the rest describe what happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEventType {
    /// Countdown started
    Started { mode: Mode },
    /// Countdown paused
    Paused { seconds_remaining: u64 },
    /// Countdown restored to the full duration
    Reset { mode: Mode },
    /// Active mode changed
    ModeChanged { mode: Mode },
    /// One second elapsed
    Tick { seconds_remaining: u64 },
    /// A session finished, naturally or by skipping
    SessionCompleted {
        mode: Mode,
        next_mode: Mode,
        skipped: bool,
    },
    /// Settings replaced
    SettingsApplied { settings: Settings },
    /// Play the completion cue
    PlaySound,
    /// Show a desktop notification
    Notify {
        completed: Mode,
        title: String,
        body: String,
    },
    /// Redraw with this state
    Render { display: DisplayState },
}

/// Whether the frontend may show desktop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
}

impl EngineEvent {
    /// Create a new engine event
    pub fn new(event_type: EngineEventType) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
        }
    }

    /// Create a notification request for a finished session
    pub fn notify(completed: Mode) -> Self {
        let body = if completed.is_work() {
            "Work session completed! Time for a break."
        } else {
            "Break time is over! Ready to focus?"
        };

        Self::new(EngineEventType::Notify {
            completed,
            title: NOTIFICATION_TITLE.to_string(),
            body: body.to_string(),
        })
    }

    /// Create a render request
    pub fn render(display: DisplayState) -> Self {
        Self::new(EngineEventType::Render { display })
    }
}
