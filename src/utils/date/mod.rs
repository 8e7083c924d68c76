// Date utility functions
// Wall-clock day arithmetic shared by the grid, lane and routing passes

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight at the start of `date`.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Midnight at the start of the day after `date` (exclusive end of `date`).
pub fn next_day_start(date: NaiveDate) -> NaiveDateTime {
    day_start(date) + Duration::days(1)
}

/// Last calendar day an interval actually covers.
///
/// The end is exclusive, so an interval ending exactly at midnight does not
/// cover the following day.
pub fn last_covered_day(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDate {
    if end > start && end.time() == NaiveTime::MIN {
        end.date().pred_opt().unwrap_or(end.date())
    } else {
        end.date().max(start.date())
    }
}

/// True when the interval crosses at least one day boundary.
pub fn is_multi_day(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    last_covered_day(start, end) > start.date()
}

/// True when `[start, end)` touches `date`. Zero-length intervals count on
/// the day they sit on.
pub fn intersects_day(start: NaiveDateTime, end: NaiveDateTime, date: NaiveDate) -> bool {
    let from = day_start(date);
    let to = next_day_start(date);
    if start == end {
        return start >= from && start < to;
    }
    start < to && end > from
}

/// Fractional minutes from `from` to `to`, negative when `to` is earlier.
///
/// Event placements and the current-time marker both convert through here so
/// sub-minute instants land on the same pixel row.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - (first_day_of_week % 7) as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The seven dates of the week containing `date`.
pub fn week_dates(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = get_week_start(date, first_day_of_week);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

/// Whole weeks covering the month of `date`, one row per week.
pub fn month_weeks(date: NaiveDate, first_day_of_week: u8) -> Vec<Vec<NaiveDate>> {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);

    let mut weeks = Vec::new();
    let mut cursor = get_week_start(first, first_day_of_week);
    while cursor <= last {
        let week = week_dates(cursor, first_day_of_week);
        cursor = week[6] + Duration::days(1);
        weeks.push(week);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_midnight_end_does_not_cover_next_day() {
        let start = at(2025, 3, 10, 22, 0);
        let end = at(2025, 3, 11, 0, 0);
        assert_eq!(last_covered_day(start, end), date(2025, 3, 10));
        assert!(!is_multi_day(start, end));
    }

    #[test]
    fn test_crossing_midnight_is_multi_day() {
        let start = at(2025, 3, 10, 22, 0);
        let end = at(2025, 3, 11, 1, 0);
        assert!(is_multi_day(start, end));
    }

    #[test]
    fn test_intersects_day_is_half_open() {
        let start = at(2025, 3, 10, 9, 0);
        let end = at(2025, 3, 11, 0, 0);
        assert!(intersects_day(start, end, date(2025, 3, 10)));
        assert!(!intersects_day(start, end, date(2025, 3, 11)));
    }

    #[test]
    fn test_zero_length_interval_sits_on_its_day() {
        let instant = at(2025, 3, 11, 0, 0);
        assert!(intersects_day(instant, instant, date(2025, 3, 11)));
        assert!(!intersects_day(instant, instant, date(2025, 3, 10)));
    }

    #[test]
    fn test_minutes_between_keeps_seconds() {
        let from = at(2025, 3, 10, 9, 0);
        let to = from + Duration::seconds(90);
        assert_eq!(minutes_between(from, to), 1.5);
        assert_eq!(minutes_between(to, from), -1.5);
    }

    #[test]
    fn test_week_start_sunday_and_monday() {
        // 2025-01-15 is a Wednesday
        let wed = date(2025, 1, 15);
        assert_eq!(get_week_start(wed, 0), date(2025, 1, 12));
        assert_eq!(get_week_start(wed, 1), date(2025, 1, 13));
    }

    #[test]
    fn test_month_weeks_cover_whole_month() {
        let weeks = month_weeks(date(2025, 2, 14), 1);
        assert_eq!(weeks.first().unwrap()[0], date(2025, 1, 27));
        assert_eq!(weeks.last().unwrap()[6], date(2025, 3, 2));
        assert!(weeks.iter().all(|w| w.len() == 7));
    }
}
