//! Budget period arithmetic.
//!
//! Days are counted by calendar date, not by elapsed hours, so the answer is
//! the same whether `now` is sampled at 00:01 or 23:59. Every timestamp is first
//! moved into the offset of `now` (the viewer's offset) before its date is taken.
//!
//! - `total_days = max(1, end - start + 1)`: both boundary dates are budgeted days.
//! - `days_elapsed = clamp(today - start + 1, 0, total_days)`: today counts as elapsed.
//! - `days_remaining = max(0, total_days - days_elapsed + 1)`: today is still
//!   spendable, so it is counted again here. Before the period starts this reads
//!   `total_days + 1`.

use chrono::{DateTime, FixedOffset, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodStats {
    pub total_days: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
}

/// Calendar date of `timestamp` as seen from `offset`
pub fn calendar_day(timestamp: &DateTime<FixedOffset>, offset: &FixedOffset) -> NaiveDate {
    timestamp.with_timezone(offset).date_naive()
}

/// Whole calendar days from `earlier` to `later` (negative when `later` comes first)
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

pub fn period_stats(
    period_start: &DateTime<FixedOffset>,
    period_end: &DateTime<FixedOffset>,
    now: &DateTime<FixedOffset>,
) -> PeriodStats {
    let offset = now.offset();
    period_stats_for_days(
        calendar_day(period_start, offset),
        calendar_day(period_end, offset),
        calendar_day(now, offset),
    )
}

pub fn period_stats_for_days(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> PeriodStats {
    let total_days = (days_between(end, start) + 1).max(1);
    let days_elapsed = (days_between(today, start) + 1).clamp(0, total_days);
    let days_remaining = (total_days - days_elapsed + 1).max(0);

    PeriodStats {
        total_days: total_days as u32,
        days_elapsed: days_elapsed as u32,
        days_remaining: days_remaining as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_single_day_period_counts_one_day() {
        let stats = period_stats_for_days(date("2025-03-10"), date("2025-03-10"), date("2025-03-10"));
        assert_eq!(stats.total_days, 1);
        assert_eq!(stats.days_elapsed, 1);
        assert_eq!(stats.days_remaining, 1);
    }

    #[test]
    fn test_three_day_period_walkthrough() {
        let start = date("2025-03-01");
        let end = date("2025-03-03");

        let day0 = period_stats_for_days(start, end, date("2025-03-01"));
        assert_eq!(day0, PeriodStats { total_days: 3, days_elapsed: 1, days_remaining: 3 });

        let day1 = period_stats_for_days(start, end, date("2025-03-02"));
        assert_eq!(day1, PeriodStats { total_days: 3, days_elapsed: 2, days_remaining: 2 });

        let day2 = period_stats_for_days(start, end, date("2025-03-03"));
        assert_eq!(day2, PeriodStats { total_days: 3, days_elapsed: 3, days_remaining: 1 });
    }

    #[test]
    fn test_before_period_start() {
        let stats = period_stats_for_days(date("2025-03-10"), date("2025-03-19"), date("2025-03-01"));
        assert_eq!(stats.total_days, 10);
        assert_eq!(stats.days_elapsed, 0);
        assert_eq!(stats.days_remaining, 11);

        let stats = period_stats_for_days(date("2025-03-10"), date("2025-03-12"), date("2025-03-01"));
        assert_eq!(stats, PeriodStats { total_days: 3, days_elapsed: 0, days_remaining: 4 });
    }

    #[test]
    fn test_after_period_end_leaves_a_single_day() {
        let stats = period_stats_for_days(date("2025-03-01"), date("2025-03-05"), date("2025-04-01"));
        assert_eq!(stats.days_elapsed, 5);
        assert_eq!(stats.days_remaining, 1);
    }

    #[test]
    fn test_inverted_period_is_one_day() {
        let stats = period_stats_for_days(date("2025-03-05"), date("2025-03-01"), date("2025-03-05"));
        assert_eq!(stats.total_days, 1);
    }

    #[test]
    fn test_time_of_day_does_not_matter() {
        let start = ts("2025-03-01T18:45:00+03:00");
        let end = ts("2025-03-03T00:00:00+03:00");

        let morning = period_stats(&start, &end, &ts("2025-03-02T00:01:00+03:00"));
        let evening = period_stats(&start, &end, &ts("2025-03-02T23:59:00+03:00"));
        assert_eq!(morning, evening);
        assert_eq!(morning.days_remaining, 2);
    }

    #[test]
    fn test_bounds_are_read_in_viewer_offset() {
        // 2025-03-01T22:00Z is already March 2nd in Moscow
        let start = ts("2025-03-01T22:00:00Z");
        let end = ts("2025-03-04T12:00:00Z");
        let now = ts("2025-03-02T10:00:00+03:00");

        let stats = period_stats(&start, &end, &now);
        assert_eq!(stats.total_days, 3);
        assert_eq!(stats.days_elapsed, 1);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date("2025-03-03"), date("2025-03-01")), 2);
        assert_eq!(days_between(date("2025-03-01"), date("2025-03-03")), -2);
        assert_eq!(days_between(date("2025-03-01"), date("2025-03-01")), 0);
    }
}
