//! Controller behind the daily time-blocking grid.
//!
//! Shows calendar events and `timeblock` study sessions for the selected day.
//! Rows for every day are kept so moving between days needs no refetch.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use shared::{CalendarEvent, NewStudySession, ScheduledItem, StudySession, TimeBlockGrid, TIMEBLOCK_SESSION_TYPE};
use tracing::info;

use super::date_utils::{format_long_date, parse_local_instant, shift_day, to_date_key};
use super::errors::{ActionError, ValidationError};
use super::scheduled_items::{items_from_events, items_from_sessions};
use super::time_block::{build_time_block_grid, TimeWindow};
use super::view_status::{FetchTicket, ViewState, ViewStatus};
use crate::storage::PlannerStore;

pub const FETCH_BLOCKS_FAILED: &str = "Failed to fetch time blocks";

/// Raw input of the new-time-block form; times are on the selected day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBlockForm {
    pub title: String,
    /// `HH:MM` or `H:MM AM/PM`
    pub start: String,
    pub end: String,
    pub subject: String,
}

pub struct TimeBlockViewController<Tz: TimeZone = Local> {
    state: ViewState<Vec<ScheduledItem>>,
    zone: Tz,
    date: NaiveDate,
    window: TimeWindow,
}

impl TimeBlockViewController<Local> {
    pub fn new(user_id: Option<String>, date: NaiveDate) -> Self {
        Self::with_zone(user_id, Local, date)
    }
}

impl<Tz: TimeZone> TimeBlockViewController<Tz> {
    pub fn with_zone(user_id: Option<String>, zone: Tz, date: NaiveDate) -> Self {
        Self {
            state: ViewState::new(user_id),
            zone,
            date,
            window: TimeWindow::WORKDAY,
        }
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.state.set_user(user_id);
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Header text, e.g. `Friday, June 13`
    pub fn title(&self) -> String {
        format_long_date(self.date)
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn next_day(&mut self) {
        self.date = shift_day(self.date, 1).unwrap_or(self.date);
    }

    pub fn previous_day(&mut self) {
        self.date = shift_day(self.date, -1).unwrap_or(self.date);
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

    pub fn grid(&self) -> TimeBlockGrid {
        let items = self.state.status().data().map(Vec::as_slice).unwrap_or(&[]);
        build_time_block_grid(self.date, items, self.window)
    }

    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.state.begin_fetch()
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: anyhow::Result<(Vec<CalendarEvent>, Vec<StudySession>)>,
    ) -> bool {
        let items = result.map(|(events, sessions)| {
            let mut items = items_from_events(&events, &self.zone);
            items.extend(items_from_sessions(&sessions, &self.zone));
            items
        });
        self.state.complete_fetch(ticket, FETCH_BLOCKS_FAILED, items)
    }

    /// Fetch both row sets for `ticket`'s user
    pub async fn load<S: PlannerStore + ?Sized>(
        store: &S,
        ticket: &FetchTicket,
    ) -> anyhow::Result<(Vec<CalendarEvent>, Vec<StudySession>)> {
        let events = store.get_calendar_events(ticket.user_id()).await?;
        let sessions = store
            .get_study_sessions(ticket.user_id(), Some(TIMEBLOCK_SESSION_TYPE))
            .await?;
        Ok((events, sessions))
    }

    pub async fn refresh<S: PlannerStore + ?Sized>(&mut self, store: &S) {
        if let Some(ticket) = self.begin_fetch() {
            let result = Self::load(store, &ticket).await;
            self.complete_fetch(&ticket, result);
        }
    }

    pub fn prepare_block(&self, form: &TimeBlockForm) -> Result<NewStudySession, ActionError> {
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

        let day = to_date_key(self.date);
        let start = parse_local_instant(&day, &form.start, &self.zone)?;
        let end = parse_local_instant(&day, &form.end, &self.zone)?;
        if end <= start {
            return Err(ValidationError::EndNotAfterStart.into());
        }

        let subject = form.subject.trim();
        Ok(NewStudySession {
            user_id: user_id.to_string(),
            session_type: TIMEBLOCK_SESSION_TYPE.to_string(),
            title: Some(title.to_string()),
            subject: (!subject.is_empty()).then(|| subject.to_string()),
            duration_planned: (end.clone() - start.clone()).num_minutes(),
            start_time: start.with_timezone(&Utc).to_rfc3339(),
            end_time: Some(end.with_timezone(&Utc).to_rfc3339()),
            completed: false,
        })
    }

    pub fn finish_action<T>(&mut self, action: &str, result: anyhow::Result<T>) -> Result<T, ActionError> {
        self.state.finish_action(action, result)
    }

    pub async fn create_time_block<S: PlannerStore + ?Sized>(
        &mut self,
        store: &S,
        form: &TimeBlockForm,
    ) -> Result<StudySession, ActionError> {
        let payload = self.prepare_block(form)?;
        let result = store.create_study_session(&payload).await;
        let session = self.finish_action("create time block", result)?;
        info!(session_id = %session.id, minutes = session.duration_planned, "time block created");
        self.refresh(store).await;
        Ok(session)
    }
}
