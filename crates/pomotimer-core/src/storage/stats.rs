//! Daily statistics persistence under the `pomodoroStats` key

use crate::{
    clock::{day_string, Clock},
    models::PersistedStats,
    Result,
};
use serde_json::Value;

use super::KeyValueStore;

pub const STATS_KEY: &str = "pomodoroStats";

pub struct StatsStorage<S> {
    store: S,
}

impl<S: KeyValueStore> StatsStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load today's stats. Records from an earlier day, or that cannot be
    /// read, come back zeroed.
    pub fn load(&self, clock: &impl Clock) -> PersistedStats {
        let today = day_string(clock.today());

        let content = match self.store.get(STATS_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return PersistedStats::empty(today),
            Err(e) => {
                tracing::warn!("Failed to read stats, starting from zero: {}", e);
                return PersistedStats::empty(today);
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                if value.get("date").and_then(Value::as_str) != Some(today.as_str()) {
                    tracing::info!("Stats are from another day, starting fresh");
                }
                PersistedStats::from_stored(&value, &today)
            }
            Err(_) => {
                tracing::debug!("Stored stats are malformed, starting from zero");
                PersistedStats::empty(today)
            }
        }
    }

    pub fn save(&self, stats: &PersistedStats) -> Result<()> {
        let content = serde_json::to_string(stats)?;
        self.store.set(STATS_KEY, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = StatsStorage::new(MemoryStore::new());
        let stats = storage.load(&clock());
        assert_eq!(stats, PersistedStats::empty("Sat Oct 17 2026".to_string()));
    }

    #[test]
    fn test_save_writes_stored_field_names() {
        let store = MemoryStore::new();
        let stats = PersistedStats {
            completed_sessions: 2,
            total_focus_time: 50,
            current_streak: 2,
            date: "Sat Oct 17 2026".to_string(),
        };

        StatsStorage::new(store.clone()).save(&stats).unwrap();

        let raw: Value = serde_json::from_str(&store.get(STATS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            raw,
            json!({
                "completedSessions": 2,
                "totalFocusTime": 50,
                "currentStreak": 2,
                "date": "Sat Oct 17 2026"
            })
        );
        assert_eq!(StatsStorage::new(store).load(&clock()), stats);
    }

    #[test]
    fn test_previous_day_rolls_over() {
        let store = MemoryStore::new();
        store
            .set(
                STATS_KEY,
                r#"{"completedSessions":9,"totalFocusTime":225,"currentStreak":9,"date":"Fri Oct 16 2026"}"#,
            )
            .unwrap();

        let stats = StatsStorage::new(store).load(&clock());
        assert_eq!(stats.completed_sessions, 0);
        assert_eq!(stats.total_focus_time, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.date, "Sat Oct 17 2026");
    }

    #[test]
    fn test_malformed_is_empty() {
        let store = MemoryStore::new();
        store.set(STATS_KEY, "garbage").unwrap();
        let stats = StatsStorage::new(store).load(&clock());
        assert_eq!(stats.completed_sessions, 0);
    }
}
