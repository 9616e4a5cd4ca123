use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;
use sobertrack_core::storage::MemoryStore;
use sobertrack_core::streak::{compute_days_sober, compute_year_progress, StreakTracker};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn days_sober_matches_offset(back in 0_i64..20_000, forward in 0_i64..3_000) {
        let today = base_day() + Duration::days(forward);
        let start = today - Duration::days(back);
        prop_assert_eq!(i64::from(compute_days_sober(start, today)), back);
        prop_assert_eq!(compute_days_sober(today, today), 0);
    }

    #[test]
    fn year_progress_is_monotone_and_clamped(a in 0_u32..5_000, b in 0_u32..5_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = compute_year_progress(lo);
        let p_hi = compute_year_progress(hi);
        prop_assert!(p_lo <= p_hi);
        prop_assert!((0.0..=1.0).contains(&p_lo));
        prop_assert!((0.0..=1.0).contains(&p_hi));
    }

    #[test]
    fn repeated_set_matches_single_set(back in 0_i64..5_000) {
        let today = base_day();
        let start = today - Duration::days(back);

        let once = MemoryStore::new();
        let mut a = StreakTracker::new(&once);
        a.set_start_date_on(start, today).unwrap();

        let twice = MemoryStore::new();
        let mut b = StreakTracker::new(&twice);
        b.set_start_date_on(start, today).unwrap();
        b.set_start_date_on(start, today).unwrap();

        prop_assert_eq!(a.start_date(), b.start_date());
        prop_assert_eq!(a.days_sober_on(today), b.days_sober_on(today));
    }
}
