//! Pomotimer session engine
//!
//! The countdown/session state machine and the tokio task that drives it.

pub mod timer;

pub use timer::{
    Command, EngineEvent, EngineEventType, LoopScheduler, ManualScheduler, NotificationPermission,
    RunnerError, RunnerHandle, Scheduler, SessionEngine, TimerRunner, AUTO_START_DELAY,
};
