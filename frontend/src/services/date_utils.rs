//! Wall-clock helpers for the browser; date arithmetic lives in the core crate.

use chrono::{DateTime, Local, NaiveDate};
use planner_core::domain::date_utils::{format_date_for_display, to_date_key};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `datetime-local` input value for `hour:00` on `date`
pub fn datetime_local_value(date: NaiveDate, hour: u32) -> String {
    format!("{}T{:02}:00", to_date_key(date), hour.min(23))
}

/// Stored RFC3339 timestamp as a local display date
pub fn format_due_date(timestamp: &str) -> Option<String> {
    let instant = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(format_date_for_display(instant.with_timezone(&Local).date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_local_value() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        assert_eq!(datetime_local_value(date, 9), "2025-06-13T09:00");
        assert_eq!(datetime_local_value(date, 30), "2025-06-13T23:00");
    }

    #[test]
    fn test_format_due_date_rejects_garbage() {
        assert_eq!(format_due_date("next tuesday"), None);
        assert!(format_due_date("2025-06-13T12:00:00+00:00").is_some());
    }
}
