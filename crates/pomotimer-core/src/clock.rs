//! Calendar clock used for the daily statistics rollover

use chrono::{Local, NaiveDate};

/// Source of "today" for date-scoped statistics.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day, for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Day string stored alongside statistics, e.g. `Sat Oct 17 2026`.
pub fn day_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
