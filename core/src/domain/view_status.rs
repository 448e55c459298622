//! Load state shared by every view controller.
//!
//! A fetch is split into three steps so the UI can run the awaited part on
//! its own executor: [`FetchTracker::issue`] hands out a [`FetchTicket`], the
//! caller awaits the store, then the controller's `complete_*` method checks
//! the ticket with [`FetchTracker::accepts`]. Results arriving after unmount
//! or after a newer fetch was issued are dropped.

use tracing::{error, warn};

use super::errors::ActionError;

/// What a view renders: a spinner, its data, or an error message
#[derive(Debug, Clone, PartialEq)]
pub enum ViewStatus<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Default for ViewStatus<T> {
    fn default() -> Self {
        ViewStatus::Loading
    }
}

impl<T> ViewStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewStatus::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that a fetch was started by a controller for a given user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    user_id: String,
}

impl FetchTicket {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Mount flag plus a generation counter bumped by every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTracker {
    generation: u64,
    mounted: bool,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self {
            generation: 0,
            mounted: true,
        }
    }
}

impl FetchTracker {
    pub fn issue(&mut self, user_id: &str) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            user_id: user_id.to_string(),
        }
    }

    /// Invalidate every outstanding ticket
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        if !self.mounted {
            warn!(generation = ticket.generation, "dropping fetch result after unmount");
            return false;
        }
        if ticket.generation != self.generation {
            warn!(
                generation = ticket.generation,
                current = self.generation,
                "dropping superseded fetch result"
            );
            return false;
        }
        true
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Signed-in user, load status and last action notice of one view.
///
/// Controllers own one of these and add their view-specific state around it.
#[derive(Debug)]
pub struct ViewState<T> {
    user_id: Option<String>,
    status: ViewStatus<T>,
    tracker: FetchTracker,
    notice: Option<String>,
}

impl<T> ViewState<T> {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id,
            status: ViewStatus::Loading,
            tracker: FetchTracker::default(),
            notice: None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn signed_in_user(&self) -> Result<&str, ActionError> {
        self.user_id.as_deref().ok_or(ActionError::NotSignedIn)
    }

    /// Switch users; outstanding fetches for the previous user are dropped
    pub fn set_user(&mut self, user_id: Option<String>) {
        if self.user_id != user_id {
            self.tracker.invalidate();
            self.status = ViewStatus::Loading;
            self.notice = None;
            self.user_id = user_id;
        }
    }

    pub fn status(&self) -> &ViewStatus<T> {
        &self.status
    }

    /// Message of the last failed action, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn unmount(&mut self) {
        self.tracker.unmount();
    }

    /// Start a fetch. `None` when signed out or unmounted; status is left alone.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.tracker.is_mounted() {
            return None;
        }
        let user_id = self.user_id.clone()?;
        self.status = ViewStatus::Loading;
        Some(self.tracker.issue(&user_id))
    }

    /// Apply a fetch result; returns whether it was accepted
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, generic_message: &str, result: anyhow::Result<T>) -> bool {
        if !self.tracker.accepts(ticket) {
            return false;
        }
        self.status = fetch_outcome(generic_message, result);
        true
    }

    /// Record the outcome of a mutation; the notice is only kept while mounted
    pub fn finish_action<R>(&mut self, action: &str, result: anyhow::Result<R>) -> Result<R, ActionError> {
        let outcome = action_outcome(action, result);
        if self.tracker.is_mounted() {
            self.notice = outcome.as_ref().err().map(ToString::to_string);
        }
        outcome
    }
}

/// Settle a fetch result into a status, logging the failure detail.
/// The view shows `generic_message`, not the backend text.
pub fn fetch_outcome<T>(generic_message: &str, result: anyhow::Result<T>) -> ViewStatus<T> {
    match result {
        Ok(data) => ViewStatus::Ready(data),
        Err(e) => {
            error!(error = %e, "{}", generic_message);
            ViewStatus::Error(generic_message.to_string())
        }
    }
}

/// Map a mutation result to the `Failed to <action>: <detail>` message
pub fn action_outcome<T>(action: &str, result: anyhow::Result<T>) -> Result<T, ActionError> {
    result.map_err(|e| {
        error!(action, error = %e, "data service call failed");
        ActionError::backend(action, &e)
    })
}
