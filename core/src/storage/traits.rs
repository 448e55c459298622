//! # Storage Traits
//!
//! The data-access contract shared by every store implementation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    CalendarEvent, NewCalendarEvent, NewStudySession, NewTask, NewUserWorkout, StudySession, Task,
    TaskFilters, TaskPatch, UserWorkout,
};

/// Rows of the hosted data service, scoped by user id.
///
/// Stores run on the browser event loop, so neither the trait nor its
/// futures are `Send`.
#[async_trait(?Send)]
pub trait PlannerStore {
    /// Tasks of `user_id`, ordered by due date ascending with undated tasks last
    async fn get_tasks(&self, user_id: &str, filters: Option<&TaskFilters>) -> Result<Vec<Task>>;

    async fn create_task(&self, task: &NewTask) -> Result<Task>;

    /// Apply the fields present in `patch` and return the updated row
    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task>;

    async fn delete_task(&self, task_id: &str) -> Result<()>;

    /// Events of `user_id`, ordered by start ascending
    async fn get_calendar_events(&self, user_id: &str) -> Result<Vec<CalendarEvent>>;

    async fn create_calendar_event(&self, event: &NewCalendarEvent) -> Result<CalendarEvent>;

    /// Sessions of `user_id`, newest start first, optionally of one type
    async fn get_study_sessions(&self, user_id: &str, session_type: Option<&str>) -> Result<Vec<StudySession>>;

    async fn create_study_session(&self, session: &NewStudySession) -> Result<StudySession>;

    /// Workouts dated within `[week_start, week_end]`, ordered by date ascending
    async fn get_user_workouts_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<Vec<UserWorkout>>;

    async fn create_user_workout(&self, workout: &NewUserWorkout) -> Result<UserWorkout>;

    /// Mark a workout completed and stamp `completed_at`
    async fn complete_user_workout(&self, workout_id: &str) -> Result<UserWorkout>;

    /// Persist set progress. Only `notes` is written; `set_count` is informational.
    async fn update_user_workout_progress(&self, workout_id: &str, set_count: u32, notes: &str) -> Result<UserWorkout>;

    async fn delete_user_workout(&self, workout_id: &str) -> Result<()>;
}
