//! Date and clock helpers shared by the calendar, time-block and workout views.
//!
//! Every key produced here is built from local calendar fields. Instants are
//! converted into the caller's zone before their date is taken, so items near
//! midnight land on the day the user sees on the wall clock.

use chrono::{
    DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};

use super::errors::ValidationError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` key for a local calendar date
pub fn to_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// `YYYY-MM-DD` key for an instant, taken in `zone`
pub fn instant_date_key<Tz: TimeZone, Z: TimeZone>(instant: &DateTime<Tz>, zone: &Z) -> String {
    to_date_key(instant.with_timezone(zone).date_naive())
}

pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(key.to_string()))
}

/// 12-hour `H:MM AM/PM` label
pub fn to_clock_label(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if is_pm { "PM" } else { "AM" })
}

/// Label of a whole hour, e.g. `8:00 AM`
pub fn hour_label(hour: u32) -> String {
    match NaiveTime::from_hms_opt(hour % 24, 0, 0) {
        Some(time) => to_clock_label(time),
        None => String::new(),
    }
}

/// Parse `HH:MM` (24h) or `H:MM AM/PM` (12h, period case-insensitive)
pub fn parse_clock(text: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime(text.to_string());
    let upper = text.trim().to_ascii_uppercase();

    let (clock, period) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let mut parts = clock.split(':');
    let hour: u32 = parts.next().and_then(|h| h.parse().ok()).ok_or_else(invalid)?;
    let minute: u32 = parts.next().and_then(|m| m.parse().ok()).ok_or_else(invalid)?;
    let second: u32 = match parts.next() {
        Some(s) => s.parse().map_err(|_| invalid())?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    let hour = match period {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return Err(invalid());
            }
            match (is_pm, hour) {
                (false, 12) => 0,
                (true, 12) => 12,
                (true, h) => h + 12,
                (false, h) => h,
            }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Combine a date key and a clock label into an instant in `zone`.
///
/// Inverse of [`to_date_key`] + [`to_clock_label`].
pub fn parse_local_instant<Tz: TimeZone>(
    date_key: &str,
    clock: &str,
    zone: &Tz,
) -> Result<DateTime<Tz>, ValidationError> {
    let date = parse_date_key(date_key)?;
    let time = parse_clock(clock)?;
    zone.from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| ValidationError::InvalidTimestamp(format!("{} {}", date_key, clock)))
}

/// Parse a timestamp as stored by the data service.
///
/// Accepts RFC 3339 (converted into `zone`) and offset-less
/// `YYYY-MM-DDTHH:MM[:SS]` text from `datetime-local` inputs (read as local
/// time in `zone`).
pub fn parse_timestamp<Tz: TimeZone>(text: &str, zone: &Tz) -> Result<DateTime<Tz>, ValidationError> {
    let trimmed = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(zone));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .and_then(|naive| zone.from_local_datetime(&naive).earliest())
        .ok_or_else(|| ValidationError::InvalidTimestamp(text.to_string()))
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the number of days in a given month and year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Weekday of the first of the month (0 = Sunday, 1 = Monday, etc.)
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Day 1 of the month `delta` months away from `year`/`month`
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
}

/// The date `delta` calendar days away, independent of month boundaries
pub fn shift_day(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let days = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    }
}

/// Sunday..Saturday week containing `date`
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_sunday());
    let start = shift_day(date, -offset).unwrap_or(date);
    let end = shift_day(start, 6).unwrap_or(start);
    (start, end)
}

/// e.g. `Monday, October 19`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// e.g. `June 13, 2025`
pub fn format_date_for_display(date: NaiveDate) -> String {
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(to_date_key(date(2025, 6, 3)), "2025-06-03");
        assert_eq!(parse_date_key("2025-06-03").unwrap(), date(2025, 6, 3));
        assert!(parse_date_key("2025-13-01").is_err());
    }

    #[test]
    fn test_instant_date_key_uses_local_fields() {
        // 23:30 in UTC-4 is already the next day in UTC
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let instant = eastern.with_ymd_and_hms(2025, 6, 13, 23, 30, 0).unwrap();
        assert_eq!(instant_date_key(&instant, &eastern), "2025-06-13");
        assert_eq!(instant_date_key(&instant, &Utc), "2025-06-14");
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(to_clock_label(time(0, 5)), "12:05 AM");
        assert_eq!(to_clock_label(time(9, 0)), "9:00 AM");
        assert_eq!(to_clock_label(time(12, 30)), "12:30 PM");
        assert_eq!(to_clock_label(time(20, 45)), "8:45 PM");
        assert_eq!(hour_label(8), "8:00 AM");
        assert_eq!(hour_label(20), "8:00 PM");
    }

    #[test]
    fn test_parse_clock_formats() {
        assert_eq!(parse_clock("09:00").unwrap(), time(9, 0));
        assert_eq!(parse_clock("17:15").unwrap(), time(17, 15));
        assert_eq!(parse_clock("9:00 AM").unwrap(), time(9, 0));
        assert_eq!(parse_clock("12:00 am").unwrap(), time(0, 0));
        assert_eq!(parse_clock("12:10 PM").unwrap(), time(12, 10));
        assert_eq!(parse_clock("8:45PM").unwrap(), time(20, 45));
        assert!(parse_clock("13:00 PM").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("noon").is_err());
    }

    #[test]
    fn test_local_instant_round_trip() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        for (h, m) in [(0, 0), (0, 59), (11, 59), (12, 0), (23, 59)] {
            let original = zone.with_ymd_and_hms(2024, 2, 29, h, m, 0).unwrap();
            let key = instant_date_key(&original, &zone);
            let label = to_clock_label(original.time());
            let parsed = parse_local_instant(&key, &label, &zone).unwrap();
            assert_eq!(parsed, original);
            assert_eq!(parsed.date_naive(), date(2024, 2, 29));
        }
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let zone = FixedOffset::west_opt(4 * 3600).unwrap();
        let from_rfc = parse_timestamp("2025-06-14T02:00:00+00:00", &zone).unwrap();
        assert_eq!(from_rfc.date_naive(), date(2025, 6, 13));
        assert_eq!(from_rfc.time(), time(22, 0));

        let from_input = parse_timestamp("2025-06-13T09:30", &zone).unwrap();
        assert_eq!(from_input.time(), time(9, 30));
        assert!(parse_timestamp("yesterday", &zone).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_first_weekday_of_month() {
        // October 2025 starts on a Wednesday
        assert_eq!(first_weekday_of_month(2025, 10), 3);
        // June 2025 starts on a Sunday
        assert_eq!(first_weekday_of_month(2025, 6), 0);
    }

    #[test]
    fn test_shift_month_resets_to_first() {
        assert_eq!(shift_month(2025, 12, 1), Some(date(2026, 1, 1)));
        assert_eq!(shift_month(2025, 1, -1), Some(date(2024, 12, 1)));
        assert_eq!(shift_month(2025, 1, 1), Some(date(2025, 2, 1)));
    }

    #[test]
    fn test_shift_day_crosses_month_boundaries() {
        assert_eq!(shift_day(date(2025, 1, 31), 1), Some(date(2025, 2, 1)));
        assert_eq!(shift_day(date(2025, 3, 1), -1), Some(date(2025, 2, 28)));
        assert_eq!(shift_day(date(2025, 12, 31), 1), Some(date(2026, 1, 1)));
    }

    #[test]
    fn test_week_range_starts_on_sunday() {
        // Wednesday 2025-06-18
        assert_eq!(week_range(date(2025, 6, 18)), (date(2025, 6, 15), date(2025, 6, 21)));
        // A Sunday is its own week start
        assert_eq!(week_range(date(2025, 6, 15)), (date(2025, 6, 15), date(2025, 6, 21)));
        // Saturday spanning into the next month
        assert_eq!(week_range(date(2025, 5, 31)), (date(2025, 5, 25), date(2025, 5, 31)));
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format_long_date(date(2026, 10, 19)), "Monday, October 19");
        assert_eq!(format_date_for_display(date(2025, 6, 13)), "June 13, 2025");
        assert_eq!(month_name(13), "Invalid Month");
    }
}
