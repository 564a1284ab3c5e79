//! Scheduling seam between the engine and whatever drives its clock

use std::time::Duration;

/// Arranges the engine's timed callbacks. The engine never waits itself: it asks
/// for a one-second ticker while running and for a single deferred start after
/// an auto-advancing completion. Whoever implements this calls back into
/// `SessionEngine::tick` and `SessionEngine::fire_auto_start`.
pub trait Scheduler {
    fn attach_ticker(&mut self);
    fn detach_ticker(&mut self);
    fn schedule_auto_start(&mut self, delay: Duration);
}

/// Records requests without acting on them. Tests drive the engine by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pub ticker_attached: bool,
    pub attach_count: u32,
    pub pending_auto_start: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending auto-start request, if any.
    pub fn take_auto_start(&mut self) -> Option<Duration> {
        self.pending_auto_start.take()
    }
}

impl Scheduler for ManualScheduler {
    fn attach_ticker(&mut self) {
        self.ticker_attached = true;
        self.attach_count += 1;
    }

    fn detach_ticker(&mut self) {
        self.ticker_attached = false;
    }

    fn schedule_auto_start(&mut self, delay: Duration) {
        self.pending_auto_start = Some(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_records() {
        let mut scheduler = ManualScheduler::new();
        scheduler.attach_ticker();
        scheduler.detach_ticker();
        scheduler.attach_ticker();
        assert!(scheduler.ticker_attached);
        assert_eq!(scheduler.attach_count, 2);

        scheduler.schedule_auto_start(Duration::from_secs(1));
        assert_eq!(scheduler.take_auto_start(), Some(Duration::from_secs(1)));
        assert_eq!(scheduler.take_auto_start(), None);
    }
}
