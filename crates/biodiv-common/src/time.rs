//! Date handling for sync watermarks.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Watermark of a cell that has never been synced.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Source of "today". The remote source is incomplete for the current day,
/// so sync ranges always end at yesterday.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn yesterday(&self) -> NaiveDate {
        let today = self.today();
        today.checked_sub_days(Days::new(1)).unwrap_or(today)
    }
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a given day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// A half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end_exclusive: NaiveDate) -> Self {
        Self {
            start,
            end_exclusive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end_exclusive
    }

    /// Query form "start,end" with ISO dates.
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end_exclusive.format("%Y-%m-%d")
        )
    }
}

/// Parse the date part of a loosely formatted event date.
///
/// Accepts "2024-05-01", "2024-05-01T10:00:00" and intervals such as
/// "2024-05-01/2024-05-03" (the start is used).
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_yesterday_crosses_month() {
        let clock = FixedClock(date(2024, 3, 1));
        assert_eq!(clock.yesterday(), date(2024, 2, 29));
    }

    #[test]
    fn test_date_range_query_value() {
        let range = DateRange::new(epoch(), date(2024, 5, 9));
        assert_eq!(range.to_query_value(), "1970-01-01,2024-05-09");
        assert!(!range.is_empty());
        assert!(DateRange::new(date(2024, 5, 9), date(2024, 5, 9)).is_empty());
    }

    #[test]
    fn test_parse_event_date_variants() {
        assert_eq!(parse_event_date("2024-05-01"), Some(date(2024, 5, 1)));
        assert_eq!(
            parse_event_date("2024-05-01T10:31:00"),
            Some(date(2024, 5, 1))
        );
        assert_eq!(
            parse_event_date("2024-05-01/2024-05-03"),
            Some(date(2024, 5, 1))
        );
        assert_eq!(parse_event_date("2024"), None);
        assert_eq!(parse_event_date("not a date"), None);
    }
}
