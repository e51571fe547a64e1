//! Daily collection windows.
//!
//! The news API is queried one calendar day at a time: each window is a
//! single-day inclusive range, and the run walks backwards from today over
//! the configured number of days.

use chrono::{Duration, NaiveDate};

/// An inclusive calendar-date range handed to the fetcher as the `from`/`to`
/// bounds of one query. Every generated range covers exactly one day, so
/// `start == end` always holds for windows produced by [`generate_windows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// A range covering one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }
}

/// Build the windows to query: one single-day range per day, most recent
/// first, starting at `today` and counting back `n_days` entries.
///
/// Pure function of its arguments; callers pass
/// `Local::now().date_naive()` for a live run and a fixed date in tests.
pub fn generate_windows(today: NaiveDate, n_days: u32) -> Vec<DateRange> {
    (0..n_days)
        .map(|i| DateRange::single_day(today - Duration::days(i64::from(i))))
        .collect()
}
