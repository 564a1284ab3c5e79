use pomotimer_core::{
    clock::day_string,
    models::{DisplayState, Mode, ModeTable, PersistedStats, SessionCounters, Settings, TimerState},
    storage::{KeyValueStore, SettingsStorage, StatsStorage},
    Clock,
};
use std::time::Duration;
use tokio::sync::broadcast;

use super::events::{EngineEvent, EngineEventType, NotificationPermission};
use super::scheduler::Scheduler;

/// Delay before the next session starts when auto-start is on.
pub const AUTO_START_DELAY: Duration = Duration::from_secs(1);

/// User commands, for frontends that dispatch rather than call methods.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle,
    Start,
    Pause,
    Reset,
    Skip,
    SwitchMode(Mode),
    ApplySettings(Settings),
    SetNotificationPermission(NotificationPermission),
    Shutdown,
}

/// The Pomodoro state machine.
///
/// Owns the countdown, the mode table and the session counters. Settings and
/// daily stats are mirrored to a key-value store. Every mutation ends with a
/// `Render` event carrying a fresh [`DisplayState`].
pub struct SessionEngine<S, C, T> {
    modes: ModeTable,
    settings: Settings,
    timer: TimerState,
    counters: SessionCounters,
    notifications: NotificationPermission,
    auto_start_pending: bool,
    settings_storage: SettingsStorage<S>,
    stats_storage: StatsStorage<S>,
    clock: C,
    scheduler: T,
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<S, C, T> SessionEngine<S, C, T>
where
    S: KeyValueStore + Clone,
    C: Clock,
    T: Scheduler,
{
    /// Create an engine in work mode, hydrated from `store`.
    pub fn new(store: S, clock: C, scheduler: T, event_tx: broadcast::Sender<EngineEvent>) -> Self {
        let settings = Settings::default();
        let modes = ModeTable::from_settings(&settings);
        let timer = TimerState::new(Mode::Work, modes.duration_seconds(Mode::Work));

        let mut engine = Self {
            modes,
            settings,
            timer,
            counters: SessionCounters::default(),
            notifications: NotificationPermission::Default,
            auto_start_pending: false,
            settings_storage: SettingsStorage::new(store.clone()),
            stats_storage: StatsStorage::new(store),
            clock,
            scheduler,
            event_tx,
        };

        engine.load_settings();
        engine.load_stats();

        tracing::info!(
            work = engine.settings.work_duration,
            short_break = engine.settings.short_break_duration,
            long_break = engine.settings.long_break_duration,
            completed = engine.counters.completed_work_sessions,
            "Session engine ready"
        );

        engine
    }

    /// Replace settings with what the store holds (defaults when absent).
    pub fn load_settings(&mut self) {
        self.settings = self.settings_storage.load();
        self.modes.update_durations(&self.settings);
        if self.timer.is_idle() {
            let mode = self.timer.mode;
            self.timer.restart(mode, self.modes.duration_seconds(mode));
        }
    }

    /// Restore today's counters. The cycle number is not persisted.
    pub fn load_stats(&mut self) {
        let stats = self.stats_storage.load(&self.clock);
        let session_number = self.counters.session_number;
        self.counters = SessionCounters::from_persisted(&stats);
        self.counters.session_number = session_number;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn modes(&self) -> &ModeTable {
        &self.modes
    }

    pub fn mode(&self) -> Mode {
        self.timer.mode
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_auto_start_pending(&self) -> bool {
        self.auto_start_pending
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    pub fn notification_permission(&self) -> NotificationPermission {
        self.notifications
    }

    pub fn set_notification_permission(&mut self, permission: NotificationPermission) {
        self.notifications = permission;
    }

    /// Current display projection.
    pub fn display(&self) -> DisplayState {
        DisplayState::project(
            &self.timer,
            self.modes.get(self.timer.mode).label,
            &self.counters,
        )
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Toggle => self.toggle(),
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::Skip => self.skip(),
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::ApplySettings(settings) => self.apply_settings(settings),
            Command::SetNotificationPermission(permission) => {
                self.set_notification_permission(permission)
            }
            Command::Shutdown => self.pause(),
        }
    }

    pub fn start(&mut self) {
        if self.timer.is_running() {
            return;
        }
        self.auto_start_pending = false;
        self.begin();
    }

    pub fn pause(&mut self) {
        self.auto_start_pending = false;
        if !self.timer.is_running() {
            return;
        }
        self.halt();

        tracing::info!(remaining = self.timer.seconds_remaining, "Timer paused");
        self.emit(EngineEventType::Paused {
            seconds_remaining: self.timer.seconds_remaining,
        });
        self.render();
    }

    pub fn toggle(&mut self) {
        if self.timer.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance the countdown by one second. Ignored unless running.
    pub fn tick(&mut self) {
        if !self.timer.is_running() {
            tracing::debug!("Ignoring tick while idle");
            return;
        }

        let exhausted = self.timer.count_down();
        self.emit(EngineEventType::Tick {
            seconds_remaining: self.timer.seconds_remaining,
        });

        if exhausted {
            self.complete_session(false);
        } else {
            self.render();
        }
    }

    /// Stop and restore the full duration of the current mode.
    pub fn reset(&mut self) {
        self.auto_start_pending = false;
        self.halt();

        let mode = self.timer.mode;
        self.timer.restart(mode, self.modes.duration_seconds(mode));

        tracing::info!(?mode, "Timer reset");
        self.emit(EngineEventType::Reset { mode });
        self.render();
    }

    /// Stop and finish the current session as if it ran out.
    pub fn skip(&mut self) {
        self.auto_start_pending = false;
        self.halt();
        self.complete_session(true);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.auto_start_pending = false;
        self.enter_mode(mode);
    }

    /// Replace settings. An idle countdown is reloaded with the new duration;
    /// a running one keeps counting down from where it is.
    pub fn apply_settings(&mut self, settings: Settings) {
        if let Err(e) = settings.validate() {
            tracing::warn!("Clamping out-of-range settings: {}", e);
        }
        let settings = settings.clamped();
        self.settings = settings;
        self.modes.update_durations(&settings);

        if !settings.auto_start {
            self.auto_start_pending = false;
        }

        if self.timer.is_idle() {
            let mode = self.timer.mode;
            self.timer.restart(mode, self.modes.duration_seconds(mode));
        }

        if let Err(e) = self.settings_storage.save(&settings) {
            tracing::error!("Failed to save settings: {}", e);
        }

        tracing::info!(?settings, "Settings applied");
        self.emit(EngineEventType::SettingsApplied { settings });
        self.render();
    }

    /// Deferred start requested after an auto-advancing completion. Does
    /// nothing if a command has intervened since it was scheduled.
    pub fn fire_auto_start(&mut self) {
        if !self.auto_start_pending {
            tracing::debug!("Ignoring stale auto-start");
            return;
        }
        self.auto_start_pending = false;

        if self.timer.is_running() {
            return;
        }

        tracing::info!(mode = ?self.timer.mode, "Auto-starting next session");
        self.begin();
    }

    fn begin(&mut self) {
        self.timer.set_running(true);
        self.scheduler.attach_ticker();

        tracing::info!(mode = ?self.timer.mode, remaining = self.timer.seconds_remaining, "Timer started");
        self.emit(EngineEventType::Started {
            mode: self.timer.mode,
        });
        self.render();
    }

    fn halt(&mut self) {
        self.timer.set_running(false);
        self.scheduler.detach_ticker();
    }

    fn enter_mode(&mut self, mode: Mode) {
        self.halt();
        self.timer.restart(mode, self.modes.duration_seconds(mode));

        self.emit(EngineEventType::ModeChanged { mode });
        self.render();
    }

    fn complete_session(&mut self, skipped: bool) {
        let finished = self.timer.mode;
        self.halt();
        self.request_side_effects(finished);

        let next_mode = if finished.is_work() {
            self.counters
                .record_work_session(self.modes.get(Mode::Work).duration_minutes)
        } else {
            self.counters.record_break()
        };

        tracing::info!(
            ?finished,
            ?next_mode,
            skipped,
            completed = self.counters.completed_work_sessions,
            "Session completed"
        );
        self.emit(EngineEventType::SessionCompleted {
            mode: finished,
            next_mode,
            skipped,
        });

        self.enter_mode(next_mode);
        self.persist_stats();

        if self.settings.auto_start {
            self.auto_start_pending = true;
            self.scheduler.schedule_auto_start(AUTO_START_DELAY);
        }
    }

    fn request_side_effects(&mut self, finished: Mode) {
        if self.settings.sound_enabled {
            self.emit(EngineEventType::PlaySound);
        }

        if self.notifications == NotificationPermission::Granted {
            let _ = self.event_tx.send(EngineEvent::notify(finished));
        }
    }

    fn persist_stats(&self) {
        let date = day_string(self.clock.today());
        let stats = PersistedStats::from_counters(&self.counters, date);
        if let Err(e) = self.stats_storage.save(&stats) {
            tracing::error!("Failed to save stats: {}", e);
        }
    }

    fn emit(&self, event_type: EngineEventType) {
        let _ = self.event_tx.send(EngineEvent::new(event_type));
    }

    fn render(&self) {
        let _ = self.event_tx.send(EngineEvent::render(self.display()));
    }
}
