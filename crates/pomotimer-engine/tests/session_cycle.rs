use chrono::NaiveDate;
use pomotimer_core::{
    models::{Mode, Settings},
    storage::{FileStore, KeyValueStore, MemoryStore, STATS_KEY},
    FixedClock,
};
use pomotimer_engine::{EngineEventType, ManualScheduler, SessionEngine};
use tempfile::TempDir;
use tokio::sync::broadcast;

type Engine<S> = SessionEngine<S, FixedClock, ManualScheduler>;

fn today() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
}

fn engine<S: KeyValueStore + Clone>(store: S) -> Engine<S> {
    let (tx, _) = broadcast::channel(1000);
    SessionEngine::new(store, today(), ManualScheduler::new(), tx)
}

fn run_out<S: KeyValueStore + Clone>(engine: &mut Engine<S>) {
    engine.start();
    let total = engine.timer().total_seconds;
    for _ in 0..total {
        engine.tick();
    }
}

#[test]
fn test_switch_mode_loads_full_duration() {
    let mut engine = engine(MemoryStore::new());

    for mode in Mode::ALL {
        engine.start();
        engine.switch_mode(mode);

        let expected = u64::from(engine.settings().duration(mode)) * 60;
        assert_eq!(engine.timer().seconds_remaining, expected);
        assert_eq!(engine.timer().total_seconds, expected);
        assert!(!engine.is_running());
    }
}

#[test]
fn test_four_work_sessions_end_in_long_break() {
    let mut engine = engine(MemoryStore::new());
    let mut breaks = Vec::new();

    for _ in 0..4 {
        assert_eq!(engine.mode(), Mode::Work);
        run_out(&mut engine);
        breaks.push(engine.mode());
        engine.skip();
    }

    assert_eq!(
        breaks,
        vec![
            Mode::ShortBreak,
            Mode::ShortBreak,
            Mode::ShortBreak,
            Mode::LongBreak
        ]
    );
    assert_eq!(engine.counters().completed_work_sessions, 4);
    assert_eq!(engine.counters().current_streak, 4);
    assert_eq!(engine.counters().total_focus_minutes, 100);
    assert_eq!(engine.counters().session_number, 5);
}

#[test]
fn test_skip_matches_natural_completion() {
    let mut natural = engine(MemoryStore::new());
    run_out(&mut natural);

    let mut skipped = engine(MemoryStore::new());
    skipped.start();
    for _ in 0..100 {
        skipped.tick();
    }
    skipped.skip();

    assert_eq!(natural.mode(), skipped.mode());
    assert_eq!(natural.counters(), skipped.counters());
    assert_eq!(natural.timer(), skipped.timer());
}

#[test]
fn test_settings_survive_reload() {
    let store = MemoryStore::new();
    let settings = Settings {
        work_duration: 30,
        short_break_duration: 7,
        long_break_duration: 20,
        auto_start: true,
        sound_enabled: false,
    };

    engine(store.clone()).apply_settings(settings);

    let reloaded = engine(store);
    assert_eq!(*reloaded.settings(), settings);
    assert_eq!(reloaded.timer().total_seconds, 1800);
}

#[test]
fn test_stats_from_previous_day_are_zeroed() {
    let store = MemoryStore::new();
    store
        .set(
            STATS_KEY,
            r#"{"completedSessions":7,"totalFocusTime":175,"currentStreak":7,"date":"Fri Oct 16 2026"}"#,
        )
        .unwrap();

    let engine = engine(store);
    assert_eq!(engine.counters().completed_work_sessions, 0);
    assert_eq!(engine.counters().total_focus_minutes, 0);
    assert_eq!(engine.counters().current_streak, 0);
}

#[test]
fn test_stats_from_today_are_restored() {
    let store = MemoryStore::new();
    let mut first = engine(store.clone());
    first.skip();
    first.skip();
    first.skip();

    let second = engine(store);
    assert_eq!(second.counters().completed_work_sessions, 2);
    assert_eq!(second.counters().total_focus_minutes, 50);
    assert_eq!(second.counters().current_streak, 2);
    assert_eq!(second.counters().session_number, 1);
}

#[test]
fn test_progress_stays_in_range() {
    let mut engine = engine(MemoryStore::new());
    engine.apply_settings(Settings {
        work_duration: 1,
        ..Settings::default()
    });
    assert_eq!(engine.display().progress, 0.0);

    engine.start();
    let mut last = 0.0;
    for _ in 0..59 {
        engine.tick();
        let progress = engine.display().progress;
        assert!(progress > last);
        assert!((0.0..=1.0).contains(&progress));
        last = progress;
    }
    assert!(last > 0.98);

    engine.reset();
    assert_eq!(engine.display().progress, 0.0);

    engine.switch_mode(Mode::LongBreak);
    assert_eq!(engine.display().progress, 0.0);
}

#[test]
fn test_one_minute_work_session() {
    let store = MemoryStore::new();
    let (tx, mut rx) = broadcast::channel(1000);
    let mut engine = SessionEngine::new(store, today(), ManualScheduler::new(), tx);
    engine.apply_settings(Settings {
        work_duration: 1,
        ..Settings::default()
    });

    engine.start();
    for _ in 0..60 {
        engine.tick();
    }

    assert_eq!(engine.mode(), Mode::ShortBreak);
    assert!(!engine.is_running());
    assert_eq!(engine.counters().completed_work_sessions, 1);
    assert_eq!(engine.counters().total_focus_minutes, 1);
    assert_eq!(engine.counters().current_streak, 1);
    assert_eq!(engine.counters().session_number, 1);

    let mut completions = 0;
    while let Ok(event) = rx.try_recv() {
        if let EngineEventType::SessionCompleted { skipped, .. } = event.event_type {
            assert!(!skipped);
            completions += 1;
        }
    }
    assert_eq!(completions, 1);

    // Further ticks after completion are stale.
    engine.tick();
    assert_eq!(engine.timer().seconds_remaining, 300);
}

#[test]
fn test_file_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().to_path_buf());

    let mut first = engine(store.clone());
    first.apply_settings(Settings {
        work_duration: 45,
        ..Settings::default()
    });
    first.skip();

    let second = engine(FileStore::new(temp_dir.path().to_path_buf()));
    assert_eq!(second.settings().work_duration, 45);
    assert_eq!(second.counters().completed_work_sessions, 1);
    assert_eq!(second.counters().total_focus_minutes, 45);
    assert!(temp_dir.path().join("pomodoroSettings.json").exists());
    assert!(temp_dir.path().join("pomodoroStats.json").exists());
}

#[test]
fn test_stats_at_maximum_do_not_overflow() {
    let store = MemoryStore::new();
    store
        .set(
            STATS_KEY,
            r#"{"completedSessions":4294967295,"totalFocusTime":4294967295,"currentStreak":4294967295,"date":"Sat Oct 17 2026"}"#,
        )
        .unwrap();

    let mut first = engine(store.clone());
    first.skip();

    assert_eq!(first.mode(), Mode::ShortBreak);
    assert_eq!(first.counters().completed_work_sessions, u32::MAX);
    assert_eq!(first.counters().total_focus_minutes, u32::MAX);
    assert_eq!(first.counters().current_streak, u32::MAX);

    let reloaded = engine(store);
    assert_eq!(reloaded.counters().completed_work_sessions, u32::MAX);
}
