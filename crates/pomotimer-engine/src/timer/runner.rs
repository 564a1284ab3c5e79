//! Tokio driver for the session engine

use pomotimer_core::{storage::KeyValueStore, Clock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};

use super::engine::{Command, SessionEngine};
use super::scheduler::Scheduler;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Timer runner has stopped")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, RunnerError>;

/// Scheduler state read back by the runner loop after every engine call.
#[derive(Debug, Clone, Default)]
pub struct LoopScheduler {
    ticking: bool,
    generation: u64,
    auto_start_at: Option<Instant>,
}

impl LoopScheduler {
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Bumped on every attach so a pause/start pair gets a fresh interval.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn auto_start_at(&self) -> Option<Instant> {
        self.auto_start_at
    }

    fn clear_auto_start(&mut self) {
        self.auto_start_at = None;
    }
}

impl Scheduler for LoopScheduler {
    fn attach_ticker(&mut self) {
        self.ticking = true;
        self.generation += 1;
    }

    fn detach_ticker(&mut self) {
        self.ticking = false;
    }

    fn schedule_auto_start(&mut self, delay: Duration) {
        self.auto_start_at = Some(Instant::now() + delay);
    }
}

pub type LoopEngine<S, C> = SessionEngine<S, C, LoopScheduler>;

/// Owns the engine on a single task and feeds it commands, ticks and the
/// deferred auto-start.
pub struct TimerRunner<S, C> {
    engine: LoopEngine<S, C>,
    tick_period: Duration,
}

impl<S, C> TimerRunner<S, C>
where
    S: KeyValueStore + Clone + Send + 'static,
    C: Clock + Send + 'static,
{
    pub fn new(engine: LoopEngine<S, C>) -> Self {
        Self {
            engine,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Spawn the runner loop. The join handle yields the engine back once the
    /// runner shuts down.
    pub fn spawn(self) -> (RunnerHandle, JoinHandle<LoopEngine<S, C>>) {
        let (command_tx, command_rx) = mpsc::channel(100);
        let task = tokio::spawn(self.run(command_rx));
        (RunnerHandle { command_tx }, task)
    }

    /// Run until `Command::Shutdown` or until every sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> LoopEngine<S, C> {
        let mut ticker: Option<Interval> = None;
        let mut ticker_generation = 0;

        loop {
            let scheduler = self.engine.scheduler();
            if !scheduler.is_ticking() {
                ticker = None;
            } else if ticker.is_none() || ticker_generation != scheduler.generation() {
                let mut tick_interval =
                    interval_at(Instant::now() + self.tick_period, self.tick_period);
                tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker = Some(tick_interval);
                ticker_generation = scheduler.generation();
            }
            let auto_start_at = scheduler.auto_start_at();

            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => {
                        tracing::debug!(?command, "Command received");
                        self.engine.execute(command);
                    }
                },
                _ = next_tick(&mut ticker) => self.engine.tick(),
                _ = wait_until(auto_start_at) => {
                    self.engine.scheduler_mut().clear_auto_start();
                    self.engine.fire_auto_start();
                }
            }
        }

        tracing::info!("Timer runner stopped");
        self.engine.pause();
        self.engine
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(tick_interval) => {
            tick_interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Cloneable command sender for a spawned runner.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    command_tx: mpsc::Sender<Command>,
}

impl RunnerHandle {
    pub async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RunnerError::ChannelClosed)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::events::{EngineEvent, EngineEventType};
    use chrono::NaiveDate;
    use pomotimer_core::{
        models::{Mode, Settings},
        storage::MemoryStore,
        FixedClock,
    };
    use tokio::sync::broadcast;
    use tokio::time::sleep;

    fn runner(settings: Settings) -> (TimerRunner<MemoryStore, FixedClock>, broadcast::Receiver<EngineEvent>) {
        let (tx, rx) = broadcast::channel(1000);
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        let mut engine = SessionEngine::new(MemoryStore::new(), clock, LoopScheduler::default(), tx);
        engine.apply_settings(settings);
        (TimerRunner::new(engine), rx)
    }

    fn one_minute_work(auto_start: bool) -> Settings {
        Settings {
            work_duration: 1,
            auto_start,
            ..Settings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_counts_down_to_completion() {
        let (runner, _rx) = runner(one_minute_work(false));
        let (handle, task) = runner.spawn();

        handle.send(Command::Start).await.unwrap();
        sleep(Duration::from_secs(61)).await;
        handle.shutdown().await.unwrap();

        let engine = task.await.unwrap();
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert!(!engine.is_running());
        assert_eq!(engine.counters().completed_work_sessions, 1);
        assert_eq!(engine.counters().total_focus_minutes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_pause_stops_ticks() {
        let (runner, _rx) = runner(one_minute_work(false));
        let (handle, task) = runner.spawn();

        handle.send(Command::Start).await.unwrap();
        sleep(Duration::from_millis(10_500)).await;
        handle.send(Command::Pause).await.unwrap();
        sleep(Duration::from_secs(120)).await;
        handle.shutdown().await.unwrap();

        let engine = task.await.unwrap();
        assert_eq!(engine.mode(), Mode::Work);
        assert_eq!(engine.timer().seconds_remaining, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_auto_starts_next_session() {
        let (runner, mut rx) = runner(one_minute_work(true));
        let (handle, task) = runner.spawn();

        handle.send(Command::Start).await.unwrap();
        sleep(Duration::from_millis(65_500)).await;
        handle.shutdown().await.unwrap();

        let engine = task.await.unwrap();
        assert_eq!(engine.mode(), Mode::ShortBreak);
        assert!(engine.timer().seconds_remaining < 300);

        let mut started = 0;
        while let Ok(event) = rx.try_recv() {
            if matches!(event.event_type, EngineEventType::Started { .. }) {
                started += 1;
            }
        }
        assert_eq!(started, 2);
    }

    #[tokio::test]
    async fn test_handle_reports_closed_runner() {
        let (runner, _rx) = runner(Settings::default());
        let (handle, task) = runner.spawn();

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert!(matches!(
            handle.send(Command::Start).await,
            Err(RunnerError::ChannelClosed)
        ));
    }
}
