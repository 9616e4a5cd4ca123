//! Sobriety streak tracking.
//!
//! The only persisted value is the start date. Day count and year
//! progress are derived on demand so every display surface computes the
//! same numbers from the same stored day.
//!
//! Dates are calendar days in local device time. Subtracting two
//! `NaiveDate`s is midnight-to-midnight by construction, so the count
//! cannot drift with the time of day at which either side was captured.

mod milestone;

pub use milestone::Milestone;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::storage::keys::DATE_FORMAT;
use crate::storage::{KeyValueStore, Preferences};

/// Days after which year progress is complete.
pub const DAYS_PER_YEAR: u32 = 365;

/// Today's calendar date in local device time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Reduce a picker timestamp to the local calendar day it falls on.
pub fn normalize_to_local_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> NaiveDate {
    moment.with_timezone(&Local).date_naive()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Whole days from `start_date` to `today`.
///
/// A start date after `today` yields 0.
pub fn compute_days_sober(start_date: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start_date).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Fraction of the first year completed, clamped to `[0, 1]`.
pub fn compute_year_progress(days_sober: u32) -> f64 {
    (f64::from(days_sober) / f64::from(DAYS_PER_YEAR)).min(1.0)
}

/// Derived streak state for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub start_date: NaiveDate,
    pub days_sober: u32,
    pub year_progress: f64,
    pub next_milestone: Option<Milestone>,
    pub days_to_next_milestone: Option<u32>,
}

impl StreakSnapshot {
    pub fn new(start_date: NaiveDate, today: NaiveDate) -> Self {
        let days_sober = compute_days_sober(start_date, today);
        let next_milestone = Milestone::next(days_sober);
        Self {
            start_date,
            days_sober,
            year_progress: compute_year_progress(days_sober),
            next_milestone,
            days_to_next_milestone: next_milestone.map(|m| m.days() - days_sober),
        }
    }

    pub fn reached_milestones(&self) -> Vec<Milestone> {
        Milestone::reached(self.days_sober)
    }
}

/// Owner of the persisted sobriety start date.
///
/// The cached date only changes after a successful write, so a caller
/// never displays a date that was not committed to storage.
#[derive(Debug)]
pub struct StreakTracker<S> {
    prefs: Preferences<S>,
    start_date: Option<NaiveDate>,
}

impl<S: KeyValueStore> StreakTracker<S> {
    /// Create a tracker and load the stored start date.
    pub fn new(store: S) -> Self {
        let mut tracker = Self {
            prefs: Preferences::new(store),
            start_date: None,
        };
        tracker.load_start_date();
        tracker
    }

    /// Re-read the start date from storage.
    ///
    /// Absence and read failures both yield `None`; failures are logged.
    pub fn load_start_date(&mut self) -> Option<NaiveDate> {
        self.start_date = match self.prefs.start_date() {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(error = %e, "could not read sobriety start date");
                None
            }
        };
        self.start_date
    }

    /// Last loaded or committed start date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Persist a new start date, validated against today's local date.
    pub fn set_start_date(&mut self, date: NaiveDate) -> Result<(), CoreError> {
        self.set_start_date_on(date, today())
    }

    /// Persist a new start date, validated against an explicit `today`.
    ///
    /// # Errors
    /// Returns a validation error for a future date and a persistence error
    /// if the write fails; the cached date is untouched in both cases.
    pub fn set_start_date_on(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
        if date > today {
            return Err(ValidationError::FutureStartDate { date, today }.into());
        }
        self.prefs.set_start_date(date)?;
        self.start_date = Some(date);
        tracing::info!(start_date = %date, "sobriety start date saved");
        Ok(())
    }

    /// Days sober as of today, `None` when no start date is set.
    pub fn days_sober(&self) -> Option<u32> {
        self.days_sober_on(today())
    }

    pub fn days_sober_on(&self, today: NaiveDate) -> Option<u32> {
        self.start_date.map(|d| compute_days_sober(d, today))
    }

    /// Fraction of the one-year goal reached as of today.
    pub fn year_progress(&self) -> Option<f64> {
        self.year_progress_on(today())
    }

    pub fn year_progress_on(&self, today: NaiveDate) -> Option<f64> {
        self.days_sober_on(today).map(compute_year_progress)
    }

    pub fn snapshot(&self) -> Option<StreakSnapshot> {
        self.snapshot_on(today())
    }

    pub fn snapshot_on(&self, today: NaiveDate) -> Option<StreakSnapshot> {
        self.start_date.map(|d| StreakSnapshot::new(d, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::storage::keys::SOBRIETY_START_DATE;
    use crate::storage::MemoryStore;
    use chrono::{Duration, FixedOffset};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::WriteFailed {
                key: key.to_string(),
                message: "disk full".to_string(),
            })
        }
    }

    /// Store whose reads always fail.
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::ReadFailed {
                key: key.to_string(),
                message: "corrupt page".to_string(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    #[test]
    fn ten_days_ago() {
        let today = ymd(2024, 6, 15);
        let start = today - Duration::days(10);
        let days = compute_days_sober(start, today);
        assert_eq!(days, 10);
        assert!((compute_year_progress(days) - 10.0 / 365.0).abs() < 1e-12);
        assert!((compute_year_progress(days) - 0.0274).abs() < 1e-4);
    }

    #[test]
    fn start_today_is_zero() {
        let today = ymd(2024, 6, 15);
        assert_eq!(compute_days_sober(today, today), 0);
    }

    #[test]
    fn future_start_saturates_at_zero() {
        let today = ymd(2024, 6, 15);
        assert_eq!(compute_days_sober(ymd(2024, 7, 1), today), 0);
    }

    #[test]
    fn counts_across_leap_day() {
        assert_eq!(compute_days_sober(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(compute_days_sober(ymd(2023, 1, 1), ymd(2024, 1, 1)), 365);
    }

    #[test]
    fn year_progress_clamps() {
        assert_eq!(compute_year_progress(0), 0.0);
        assert_eq!(compute_year_progress(365), 1.0);
        assert_eq!(compute_year_progress(730), 1.0);
    }

    #[test]
    fn late_evening_timestamp_keeps_its_calendar_day() {
        // 23:30 local on the 14th must count as the 14th, not the 15th.
        let picked = Local.with_ymd_and_hms(2024, 6, 14, 23, 30, 0).earliest().unwrap();
        let start = normalize_to_local_date(&picked);
        assert_eq!(start, ymd(2024, 6, 14));

        // Ten minutes past midnight is already a full day later.
        let now = Local.with_ymd_and_hms(2024, 6, 15, 0, 10, 0).earliest().unwrap();
        assert_eq!(compute_days_sober(start, normalize_to_local_date(&now)), 1);
    }

    #[test]
    fn offset_timestamps_are_converted_before_truncation() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let moment = utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).single().unwrap();
        assert_eq!(
            normalize_to_local_date(&moment),
            moment.with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn parse_date_accepts_only_calendar_days() {
        assert_eq!(parse_date("2024-03-09").unwrap(), ymd(2024, 3, 9));
        assert_eq!(parse_date(" 2024-03-09\n").unwrap(), ymd(2024, 3, 9));
        assert!(matches!(
            parse_date("2024-03-09T10:00:00Z"),
            Err(ValidationError::InvalidDate(_))
        ));
        assert!(parse_date("03/09/2024").is_err());
    }

    #[test]
    fn set_then_reload_agrees_across_trackers() {
        let store = MemoryStore::new();
        let today = ymd(2024, 6, 15);
        let start = ymd(2024, 6, 1);

        let mut writer = StreakTracker::new(&store);
        writer.set_start_date_on(start, today).unwrap();

        let reader = StreakTracker::new(&store);
        assert_eq!(reader.start_date(), Some(start));
        assert_eq!(reader.days_sober_on(today), writer.days_sober_on(today));
        assert_eq!(reader.days_sober_on(today), Some(14));
    }

    #[test]
    fn set_twice_is_idempotent() {
        let store = MemoryStore::new();
        let today = ymd(2024, 6, 15);
        let start = ymd(2024, 5, 1);

        let mut tracker = StreakTracker::new(&store);
        tracker.set_start_date_on(start, today).unwrap();
        let once_raw = store.get(SOBRIETY_START_DATE).unwrap();
        let once_days = tracker.days_sober_on(today);

        tracker.set_start_date_on(start, today).unwrap();
        assert_eq!(store.get(SOBRIETY_START_DATE).unwrap(), once_raw);
        assert_eq!(tracker.days_sober_on(today), once_days);
    }

    #[test]
    fn future_date_rejected_without_write() {
        let store = MemoryStore::new();
        let today = ymd(2024, 6, 15);
        let mut tracker = StreakTracker::new(&store);

        let result = tracker.set_start_date_on(ymd(2024, 6, 16), today);
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::FutureStartDate { .. }))
        ));
        assert_eq!(store.get(SOBRIETY_START_DATE).unwrap(), None);
        assert_eq!(tracker.start_date(), None);
    }

    #[test]
    fn failed_write_leaves_cached_date_unchanged() {
        let previous = ymd(2024, 1, 1);
        let store = ReadOnlyStore(MemoryStore::with_entries([(
            SOBRIETY_START_DATE,
            "2024-01-01",
        )]));
        let mut tracker = StreakTracker::new(store);
        assert_eq!(tracker.start_date(), Some(previous));

        let result = tracker.set_start_date_on(ymd(2024, 3, 1), ymd(2024, 6, 15));
        assert!(matches!(
            result,
            Err(CoreError::Persistence(PersistenceError::WriteFailed { .. }))
        ));
        assert_eq!(tracker.start_date(), Some(previous));
    }

    #[test]
    fn unreadable_store_loads_as_absent() {
        let mut tracker = StreakTracker::new(UnreadableStore);
        assert_eq!(tracker.load_start_date(), None);
        assert_eq!(tracker.snapshot_on(ymd(2024, 6, 15)), None);
    }

    #[test]
    fn tracker_year_progress_follows_stored_date() {
        let store = MemoryStore::new();
        let today = ymd(2024, 6, 15);
        let mut tracker = StreakTracker::new(&store);
        assert_eq!(tracker.year_progress_on(today), None);

        tracker.set_start_date_on(today - Duration::days(73), today).unwrap();
        let progress = tracker.year_progress_on(today).unwrap();
        assert!((progress - 0.2).abs() < 1e-12);

        tracker.set_start_date_on(ymd(2020, 1, 1), today).unwrap();
        assert_eq!(tracker.year_progress_on(today), Some(1.0));
    }

    #[test]
    fn snapshot_reports_next_milestone() {
        let store = MemoryStore::new();
        let today = ymd(2024, 6, 15);
        let mut tracker = StreakTracker::new(&store);
        tracker.set_start_date_on(ymd(2024, 6, 10), today).unwrap();

        let snap = tracker.snapshot_on(today).unwrap();
        assert_eq!(snap.days_sober, 5);
        assert_eq!(snap.next_milestone, Some(Milestone::OneWeek));
        assert_eq!(snap.days_to_next_milestone, Some(2));
        assert_eq!(snap.reached_milestones(), vec![Milestone::OneDay]);
    }
}
