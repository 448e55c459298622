//! Controller behind the month calendar.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use shared::{CalendarEvent, MonthGrid, NewCalendarEvent, ScheduledItem};
use tracing::info;

use super::calendar::{build_month_grid, MonthCursor};
use super::date_utils::parse_timestamp;
use super::errors::{ActionError, ValidationError};
use super::navigation::NavigationAction;
use super::scheduled_items::items_from_events;
use super::view_status::{FetchTicket, ViewState, ViewStatus};
use crate::storage::PlannerStore;

pub const FETCH_EVENTS_FAILED: &str = "Failed to fetch calendar events";

/// Raw input of the new-event form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    /// `datetime-local` text
    pub start: String,
    pub end: String,
    pub color: Option<String>,
}

pub struct CalendarViewController<Tz: TimeZone = Local> {
    state: ViewState<Vec<ScheduledItem>>,
    zone: Tz,
    cursor: MonthCursor,
}

impl CalendarViewController<Local> {
    pub fn new(user_id: Option<String>, today: NaiveDate) -> Self {
        Self::with_zone(user_id, Local, today)
    }
}

impl<Tz: TimeZone> CalendarViewController<Tz> {
    pub fn with_zone(user_id: Option<String>, zone: Tz, today: NaiveDate) -> Self {
        Self {
            state: ViewState::new(user_id),
            zone,
            cursor: MonthCursor::containing(today),
        }
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.state.set_user(user_id);
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn previous_month(&mut self) {
        self.cursor = self.cursor.previous();
    }

    pub fn status(&self) -> &ViewStatus<Vec<ScheduledItem>> {
        self.state.status()
    }

    pub fn notice(&self) -> Option<&str> {
        self.state.notice()
    }

    pub fn unmount(&mut self) {
        self.state.unmount();
    }

    /// Grid for the displayed month; empty days while loading or failed
    pub fn month_grid(&self, today: NaiveDate) -> MonthGrid {
        let items = self.state.status().data().map(Vec::as_slice).unwrap_or(&[]);
        build_month_grid(self.cursor, items, today)
    }

    /// A clicked day opens that day's time blocks
    pub fn day_clicked(&self, date: NaiveDate) -> NavigationAction {
        NavigationAction::OpenTimeBlock(date)
    }

    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.state.begin_fetch()
    }

    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: anyhow::Result<Vec<CalendarEvent>>) -> bool {
        let items = result.map(|events| items_from_events(&events, &self.zone));
        self.state.complete_fetch(ticket, FETCH_EVENTS_FAILED, items)
    }

    pub async fn refresh<S: PlannerStore + ?Sized>(&mut self, store: &S) {
        if let Some(ticket) = self.begin_fetch() {
            let result = store.get_calendar_events(ticket.user_id()).await;
            self.complete_fetch(&ticket, result);
        }
    }

    pub fn prepare_event(&self, form: &EventForm) -> Result<NewCalendarEvent, ActionError> {
        let user_id = self.state.signed_in_user()?;
        let title = form.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if form.start.trim().is_empty() {
            return Err(ValidationError::MissingStart.into());
        }
        if form.end.trim().is_empty() {
            return Err(ValidationError::MissingEnd.into());
        }

        let start = parse_timestamp(&form.start, &self.zone)?;
        let end = parse_timestamp(&form.end, &self.zone)?;
        if end <= start {
            return Err(ValidationError::EndNotAfterStart.into());
        }

        let description = form.description.trim();
        Ok(NewCalendarEvent {
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            start_time: start.with_timezone(&Utc).to_rfc3339(),
            end_time: end.with_timezone(&Utc).to_rfc3339(),
            is_all_day: false,
            color: form.color.clone(),
        })
    }

    pub fn finish_action<T>(&mut self, action: &str, result: anyhow::Result<T>) -> Result<T, ActionError> {
        self.state.finish_action(action, result)
    }

    pub async fn create_event<S: PlannerStore + ?Sized>(
        &mut self,
        store: &S,
        form: &EventForm,
    ) -> Result<CalendarEvent, ActionError> {
        let payload = self.prepare_event(form)?;
        let result = store.create_calendar_event(&payload).await;
        let event = self.finish_action("create event", result)?;
        info!(event_id = %event.id, "calendar event created");
        self.refresh(store).await;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form(title: &str, start: &str, end: &str) -> EventForm {
        EventForm {
            title: title.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_events_land_on_their_day() {
        let store = MemoryStore::new();
        let mut controller = CalendarViewController::with_zone(Some("u1".into()), Utc, date(2025, 6, 13));
        controller
            .create_event(&store, &form("Dentist", "2025-06-13T09:00", "2025-06-13T10:00"))
            .await
            .unwrap();

        let grid = controller.month_grid(date(2025, 6, 13));
        let day = grid.month_days().find(|c| c.day == 13).unwrap();
        assert_eq!(day.items.len(), 1);
        assert_eq!(day.items[0].title, "Dentist");
        assert!(day.is_today);
    }

    #[tokio::test]
    async fn test_events_use_display_zone() {
        let store = MemoryStore::new();
        let zone = FixedOffset::east_opt(9 * 3600).unwrap();
        let mut controller = CalendarViewController::with_zone(Some("u1".into()), zone, date(2025, 6, 1));
        store
            .create_calendar_event(&NewCalendarEvent {
                user_id: "u1".into(),
                title: "Late call".into(),
                description: None,
                start_time: "2025-06-30T20:00:00Z".into(),
                end_time: "2025-06-30T21:00:00Z".into(),
                is_all_day: false,
                color: None,
            })
            .await
            .unwrap();
        controller.refresh(&store).await;

        // 20:00 UTC on the 30th is 05:00 on July 1st at +09:00
        let june = controller.month_grid(date(2025, 6, 1));
        assert!(june.cells.iter().all(|c| c.items.is_empty()));
        controller.next_month();
        let july = controller.month_grid(date(2025, 6, 1));
        assert_eq!(july.month_days().next().unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_event_validation() {
        let store = MemoryStore::new();
        let mut controller = CalendarViewController::with_zone(Some("u1".into()), Utc, date(2025, 6, 13));

        let cases = [
            (form("", "2025-06-13T09:00", "2025-06-13T10:00"), ValidationError::EmptyTitle),
            (form("Gym", "", "2025-06-13T10:00"), ValidationError::MissingStart),
            (form("Gym", "2025-06-13T09:00", ""), ValidationError::MissingEnd),
            (form("Gym", "2025-06-13T10:00", "2025-06-13T10:00"), ValidationError::EndNotAfterStart),
        ];
        for (input, expected) in cases {
            let err = controller.create_event(&store, &input).await.unwrap_err();
            assert_eq!(err, ActionError::Invalid(expected));
        }
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_and_navigation() {
        let store = MemoryStore::new();
        store.fail_with("timeout");
        let mut controller = CalendarViewController::with_zone(Some("u1".into()), Utc, date(2025, 12, 5));
        controller.refresh(&store).await;
        assert_eq!(controller.status().error(), Some(FETCH_EVENTS_FAILED));
        assert_eq!(controller.month_grid(date(2025, 12, 5)).month_days().count(), 31);

        controller.next_month();
        assert_eq!(controller.cursor().first_day(), date(2026, 1, 1));
        controller.previous_month();
        controller.previous_month();
        assert_eq!(controller.cursor().to_string(), "November 2025");

        assert_eq!(
            controller.day_clicked(date(2025, 11, 3)),
            NavigationAction::OpenTimeBlock(date(2025, 11, 3))
        );
    }

    #[tokio::test]
    async fn test_signed_out_calendar_stays_loading() {
        let store = MemoryStore::new();
        let mut controller = CalendarViewController::with_zone(None, Utc, date(2025, 6, 1));
        controller.refresh(&store).await;
        assert!(controller.status().is_loading());
        assert_eq!(store.call_count(), 0);
    }
}
