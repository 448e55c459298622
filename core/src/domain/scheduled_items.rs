//! Conversion of data-service rows into [`ScheduledItem`]s.
//!
//! Start and end instants are moved into the display zone before their date
//! and clock fields are read. Items are clipped to the day they start on;
//! an end at or before the start collapses to a zero-length item.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use shared::{CalendarEvent, ScheduledItem, StudySession};
use tracing::warn;

use super::date_utils::parse_timestamp;
use super::errors::ValidationError;

pub const DEFAULT_EVENT_COLOR: &str = "bg-blue-100";
pub const DEFAULT_TIMEBLOCK_COLOR: &str = "bg-purple-100";

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn scheduled_between<Tz: TimeZone>(
    id: String,
    title: String,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    color_tag: String,
) -> ScheduledItem {
    let date = start.date_naive();
    let start_time = start.time();
    let end_time = if end.date_naive() > date {
        end_of_day()
    } else if end <= start {
        start_time
    } else {
        end.time()
    };

    ScheduledItem {
        id,
        title,
        date,
        start: start_time,
        end: end_time,
        color_tag,
    }
}

pub fn from_calendar_event<Tz: TimeZone>(event: &CalendarEvent, zone: &Tz) -> Result<ScheduledItem, ValidationError> {
    let start = parse_timestamp(&event.start_time, zone)?;
    let (start, end) = if event.is_all_day {
        let midnight = start.date_naive().and_time(NaiveTime::MIN);
        let start = zone
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap_or(start);
        let end = start.clone() + Duration::seconds(86_399);
        (start, end)
    } else {
        let end = parse_timestamp(&event.end_time, zone)?;
        (start, end)
    };

    Ok(scheduled_between(
        format!("event:{}", event.id),
        event.title.clone(),
        start,
        end,
        event.color.clone().unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
    ))
}

/// A time block; sessions without an end use their planned duration
pub fn from_study_session<Tz: TimeZone>(session: &StudySession, zone: &Tz) -> Result<ScheduledItem, ValidationError> {
    let start = parse_timestamp(&session.start_time, zone)?;
    let end = match &session.end_time {
        Some(end) => parse_timestamp(end, zone)?,
        None => start.clone() + Duration::minutes(session.duration_planned.max(0)),
    };

    Ok(scheduled_between(
        format!("session:{}", session.id),
        session.title.clone().unwrap_or_else(|| "Time block".to_string()),
        start,
        end,
        DEFAULT_TIMEBLOCK_COLOR.to_string(),
    ))
}

/// Convert every event, skipping rows whose timestamps cannot be read
pub fn items_from_events<Tz: TimeZone>(events: &[CalendarEvent], zone: &Tz) -> Vec<ScheduledItem> {
    events
        .iter()
        .filter_map(|event| match from_calendar_event(event, zone) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "skipping calendar event");
                None
            }
        })
        .collect()
}

pub fn items_from_sessions<Tz: TimeZone>(sessions: &[StudySession], zone: &Tz) -> Vec<ScheduledItem> {
    sessions
        .iter()
        .filter_map(|session| match from_study_session(session, zone) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "skipping study session");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn event(id: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            title: format!("Event {}", id),
            description: None,
            event_type: None,
            subject: None,
            location: None,
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_all_day: false,
            color: None,
            related_task_id: None,
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_event_uses_local_date() {
        let zone = FixedOffset::west_opt(4 * 3600).unwrap();
        let e = event("late", "2025-06-14T01:00:00+00:00", "2025-06-14T02:30:00+00:00");
        let item = from_calendar_event(&e, &zone).unwrap();
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
        assert_eq!(item.start, time(21, 0));
        assert_eq!(item.end, time(22, 30));
        assert_eq!(item.id, "event:late");
        assert_eq!(item.color_tag, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_event_spanning_midnight_is_clipped() {
        let e = event("overnight", "2025-06-13T22:00:00Z", "2025-06-14T01:00:00Z");
        let item = from_calendar_event(&e, &Utc).unwrap();
        assert_eq!(item.start, time(22, 0));
        assert_eq!(item.end, end_of_day());
    }

    #[test]
    fn test_all_day_event_covers_the_day() {
        let mut e = event("holiday", "2025-07-04T00:00:00Z", "2025-07-04T00:00:00Z");
        e.is_all_day = true;
        let item = from_calendar_event(&e, &Utc).unwrap();
        assert_eq!(item.start, NaiveTime::MIN);
        assert_eq!(item.end, end_of_day());
    }

    #[test]
    fn test_session_without_end_uses_planned_duration() {
        let session = StudySession {
            id: "s1".to_string(),
            user_id: "user-1".to_string(),
            session_type: "timeblock".to_string(),
            title: None,
            subject: None,
            duration_planned: 90,
            duration_actual: None,
            start_time: "2025-06-13T09:00".to_string(),
            end_time: None,
            completed: false,
            notes: None,
            related_task_id: None,
        };
        let item = from_study_session(&session, &Utc).unwrap();
        assert_eq!(item.title, "Time block");
        assert_eq!(item.start, time(9, 0));
        assert_eq!(item.end, time(10, 30));
        assert_eq!(item.color_tag, DEFAULT_TIMEBLOCK_COLOR);
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let events = vec![
            event("good", "2025-06-13T09:00:00Z", "2025-06-13T10:00:00Z"),
            event("bad", "not a time", "2025-06-13T10:00:00Z"),
        ];
        let items = items_from_events(&events, &Utc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "event:good");
    }

    #[test]
    fn test_end_before_start_collapses() {
        let e = event("backwards", "2025-06-13T10:00:00Z", "2025-06-13T09:00:00Z");
        let item = from_calendar_event(&e, &Utc).unwrap();
        assert_eq!(item.start, item.end);
    }
}
