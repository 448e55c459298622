//! Controller behind the task list.
//!
//! Every successful mutation is followed by a full refetch; nothing is
//! patched into the local list.

use chrono::{DateTime, Local, TimeZone, Utc};
use shared::{NewTask, Task, TaskFilters, TaskPatch, TaskStatus};
use tracing::{debug, info};

use super::date_utils::parse_timestamp;
use super::errors::{ActionError, ValidationError};
use super::view_status::{FetchTicket, ViewState, ViewStatus};
use crate::storage::PlannerStore;

pub const FETCH_TASKS_FAILED: &str = "Failed to fetch tasks";

/// Raw input of the new-task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// `datetime-local` text; blank for no due date
    pub due_date: String,
}

pub struct TaskViewController<Tz: TimeZone = Local> {
    state: ViewState<Vec<Task>>,
    zone: Tz,
    filters: TaskFilters,
}

impl TaskViewController<Local> {
    pub fn new(user_id: Option<String>) -> Self {
        Self::with_zone(user_id, Local)
    }
}

impl<Tz: TimeZone> TaskViewController<Tz> {
    pub fn with_zone(user_id: Option<String>, zone: Tz) -> Self {
        Self {
            state: ViewState::new(user_id),
            zone,
            filters: TaskFilters::default(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.state.user_id()
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.state.set_user(user_id);
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.filters = filters;
    }

    pub fn status(&self) -> &ViewStatus<Vec<Task>> {
        self.state.status()
    }

    pub fn notice(&self) -> Option<&str> {
        self.state.notice()
    }

    pub fn unmount(&mut self) {
        self.state.unmount();
    }

    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.state.begin_fetch()
    }

    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: anyhow::Result<Vec<Task>>) -> bool {
        self.state.complete_fetch(ticket, FETCH_TASKS_FAILED, result)
    }

    pub async fn refresh<S: PlannerStore + ?Sized>(&mut self, store: &S) {
        if let Some(ticket) = self.begin_fetch() {
            let filters = (!self.filters.is_empty()).then(|| self.filters.clone());
            let result = store.get_tasks(ticket.user_id(), filters.as_ref()).await;
            self.complete_fetch(&ticket, result);
        }
    }

    /// Validate the form into an insert payload
    pub fn prepare_create(&self, form: &TaskForm) -> Result<NewTask, ActionError> {
        let user_id = self.state.signed_in_user()?;
        let title = form.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let mut task = NewTask::new(user_id, title);
        let description = form.description.trim();
        if !description.is_empty() {
            task.description = Some(description.to_string());
        }
        let due_date = form.due_date.trim();
        if !due_date.is_empty() {
            let due = parse_timestamp(due_date, &self.zone)?;
            task.due_date = Some(due.with_timezone(&Utc).to_rfc3339());
        }
        Ok(task)
    }

    /// Patch that flips completion: completed tasks go back to pending
    pub fn prepare_toggle(&self, task: &Task, now: DateTime<Utc>) -> Result<TaskPatch, ActionError> {
        self.state.signed_in_user()?;
        let status = task.status.toggled();
        let completed_at = match status {
            TaskStatus::Completed => Some(now.to_rfc3339()),
            _ => None,
        };
        Ok(TaskPatch {
            status: Some(status),
            completed_at: Some(completed_at),
            ..Default::default()
        })
    }

    pub fn finish_action<T>(&mut self, action: &str, result: anyhow::Result<T>) -> Result<T, ActionError> {
        self.state.finish_action(action, result)
    }

    pub async fn create_task<S: PlannerStore + ?Sized>(&mut self, store: &S, form: &TaskForm) -> Result<Task, ActionError> {
        let payload = self.prepare_create(form)?;
        let result = store.create_task(&payload).await;
        let task = self.finish_action("create task", result)?;
        info!(task_id = %task.id, "task created");
        self.refresh(store).await;
        Ok(task)
    }

    pub async fn toggle_task<S: PlannerStore + ?Sized>(&mut self, store: &S, task: &Task) -> Result<Task, ActionError> {
        let patch = self.prepare_toggle(task, Utc::now())?;
        debug!(task_id = %task.id, status = ?patch.status, "toggling task");
        let result = store.update_task(&task.id, &patch).await;
        let updated = self.finish_action("update task", result)?;
        self.refresh(store).await;
        Ok(updated)
    }

    pub async fn delete_task<S: PlannerStore + ?Sized>(&mut self, store: &S, task_id: &str) -> Result<(), ActionError> {
        self.state.signed_in_user()?;
        let result = store.delete_task(task_id).await;
        self.finish_action("delete task", result)?;
        self.refresh(store).await;
        Ok(())
    }
}
