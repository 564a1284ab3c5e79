pub mod engine;
pub mod events;
pub mod runner;
pub mod scheduler;

pub use engine::{Command, SessionEngine, AUTO_START_DELAY};
pub use events::{EngineEvent, EngineEventType, NotificationPermission};
pub use runner::{LoopScheduler, RunnerError, RunnerHandle, TimerRunner};
pub use scheduler::{ManualScheduler, Scheduler};
