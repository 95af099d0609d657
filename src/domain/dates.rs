//! Calendar helpers shared by the filter, period and rollover rules.
//!
//! All arithmetic is checked: dates near the representable limits saturate to
//! the input instead of panicking.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Drops the time of day, keeping date-only semantics.
pub fn truncate_to_day(value: NaiveDateTime) -> NaiveDateTime {
    start_of_day(value.date())
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Sunday of the week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(6 - date.weekday().num_days_from_monday());
    date.checked_add_days(Days::new(offset)).unwrap_or(date)
}

/// Moves an instant forward by whole weeks, `None` on overflow.
pub fn add_weeks(value: NaiveDateTime, weeks: u64) -> Option<NaiveDateTime> {
    value.checked_add_days(Days::new(weeks.checked_mul(7)?))
}

/// Parses user supplied date input.
///
/// Accepts `YYYY-MM-DD` as well as ISO-8601 date-times (the time part is
/// discarded). Anything else yields `None`.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(instant.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|instant| instant.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_boundaries_start_on_monday() {
        // 2025-06-11 is a Wednesday.
        assert_eq!(week_start(date(2025, 6, 11)), date(2025, 6, 9));
        assert_eq!(week_end(date(2025, 6, 11)), date(2025, 6, 15));
        assert_eq!(week_start(date(2025, 6, 9)), date(2025, 6, 9));
        assert_eq!(week_end(date(2025, 6, 15)), date(2025, 6, 15));
        assert_eq!(week_start(date(2025, 6, 15)), date(2025, 6, 9));
    }

    #[test]
    fn end_of_day_is_inclusive_upper_bound() {
        let end = end_of_day(date(2025, 6, 15));
        assert!(end > start_of_day(date(2025, 6, 15)));
        assert!(end < start_of_day(date(2025, 6, 16)));
    }

    #[test]
    fn parses_dates_and_date_times() {
        assert_eq!(parse_date_input("2025-06-10"), Some(date(2025, 6, 10)));
        assert_eq!(
            parse_date_input("2025-06-10T15:30:00"),
            Some(date(2025, 6, 10))
        );
        assert_eq!(
            parse_date_input("2025-06-10T15:30:00+02:00"),
            Some(date(2025, 6, 10))
        );
    }

    #[test]
    fn unparseable_dates_are_absent() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("next tuesday"), None);
        assert_eq!(parse_date_input("2025-13-40"), None);
    }

    #[test]
    fn add_weeks_moves_by_seven_days() {
        let start = start_of_day(date(2025, 6, 9));
        assert_eq!(add_weeks(start, 1), Some(start_of_day(date(2025, 6, 16))));
    }
}
