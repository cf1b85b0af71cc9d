//! Pregnancy date arithmetic.

use chrono::{DateTime, Duration, Months, Utc};

use crate::error::{GratiaError, Result};

/// Full term, 40 weeks.
pub const TERM_DAYS: i64 = 280;

/// Start and due date derived from the current pregnancy age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PregnancyDates {
    pub start: DateTime<Utc>,
    pub due: DateTime<Utc>,
}

impl PregnancyDates {
    /// `start = today - (weeks * 7 + days)`, `due = start + 280 days`.
    ///
    /// Fails with `InvalidInput` when the age reaches outside the calendar.
    pub fn from_age(weeks: u32, days: u32, today: DateTime<Utc>) -> Result<Self> {
        let days_in = i64::from(weeks) * 7 + i64::from(days);
        let out_of_range =
            || GratiaError::InvalidInput(format!("pregnancy age of {weeks} weeks {days} days is out of range"));
        let start = Duration::try_days(days_in)
            .and_then(|age| today.checked_sub_signed(age))
            .ok_or_else(out_of_range)?;
        let due = start
            .checked_add_signed(Duration::days(TERM_DAYS))
            .ok_or_else(out_of_range)?;
        Ok(Self { start, due })
    }

    /// Days left until the due date, negative once it has passed.
    pub fn days_until_due(&self, today: DateTime<Utc>) -> i64 {
        (self.due - today).num_days()
    }
}

/// Default due date for a new or restarted pregnancy.
pub fn nine_months_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(9))
        .unwrap_or(now + Duration::days(TERM_DAYS))
}

/// Whole weeks and remaining days elapsed since `start`.
pub fn age_on(start: DateTime<Utc>, today: DateTime<Utc>) -> (i64, i64) {
    let days = (today - start).num_days().max(0);
    (days / 7, days % 7)
}

/// Parses an RFC 3339 date stored in the shared document; empty means unset.
pub fn parse_stored(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_due_date_is_term_after_start() {
        let today = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let dates = PregnancyDates::from_age(12, 3, today).unwrap();
        assert_eq!((today - dates.start).num_days(), 87);
        assert_eq!((dates.due - dates.start).num_days(), TERM_DAYS);
        assert_eq!(dates.days_until_due(today), TERM_DAYS - 87);
    }

    #[test]
    fn test_age_beyond_calendar_is_rejected() {
        let today = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let err = PregnancyDates::from_age(u32::MAX, 0, today).unwrap_err();
        assert!(matches!(err, GratiaError::InvalidInput(_)));
        assert!(PregnancyDates::from_age(0, u32::MAX, today).is_ok());
    }

    #[test]
    fn test_age_on() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let today = start + Duration::days(30);
        assert_eq!(age_on(start, today), (4, 2));
        assert_eq!(age_on(today, start), (0, 0));
    }

    #[test]
    fn test_nine_months() {
        let now = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let due = nine_months_from(now);
        assert_eq!(due, Utc.with_ymd_and_hms(2026, 10, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_stored() {
        assert!(parse_stored("").is_none());
        assert!(parse_stored("not a date").is_none());
        assert!(parse_stored("2026-01-01T00:00:00Z").is_some());
    }
}
