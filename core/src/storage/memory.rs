//! In-process store with the same ordering and filter rules as the hosted
//! data service. Backs the test suite and the frontend's demo mode.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    CalendarEvent, NewCalendarEvent, NewStudySession, NewTask, NewUserWorkout, StudySession, Task,
    TaskFilters, TaskPatch, UserWorkout,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::traits::PlannerStore;
use crate::domain::date_utils::parse_timestamp;

#[derive(Debug, Default)]
struct Tables {
    tasks: Vec<Task>,
    calendar_events: Vec<CalendarEvent>,
    study_sessions: Vec<StudySession>,
    user_workouts: Vec<UserWorkout>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Sort key for timestamp text; callers order unreadable text after readable text
fn instant(text: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(text, &Utc).ok()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `message` until [`MemoryStore::recover`]
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.into());
        }
    }

    pub fn recover(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    /// Number of trait calls made so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Count the call, then fail if a failure is armed
    fn enter(&self, operation: &str) -> Result<MutexGuard<'_, Tables>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?
            .clone();
        if let Some(message) = failure {
            debug!(operation, "memory store failing on request");
            bail!(message);
        }
        self.tables.lock().map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait(?Send)]
impl PlannerStore for MemoryStore {
    async fn get_tasks(&self, user_id: &str, filters: Option<&TaskFilters>) -> Result<Vec<Task>> {
        let tables = self.enter("get_tasks")?;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|task| task.user_id == user_id)
            .filter(|task| filters.map_or(true, |f| f.matches(task)))
            .cloned()
            .collect();

        tasks.sort_by_key(|task| {
            let due = task.due_date.as_deref().and_then(instant);
            (due.is_none(), due)
        });
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let mut tables = self.enter("create_task")?;
        let stamp = now();
        let row = Task {
            id: new_id(),
            user_id: task.user_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            category: task.category.clone(),
            subject: task.subject.clone(),
            due_date: task.due_date.clone(),
            estimated_duration: task.estimated_duration,
            actual_duration: None,
            difficulty_level: task.difficulty_level,
            energy_required: task.energy_required.clone(),
            tags: task.tags.clone(),
            created_at: stamp.clone(),
            updated_at: stamp,
            completed_at: None,
        };
        tables.tasks.push(row.clone());
        info!(task_id = %row.id, "created task");
        Ok(row)
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        let mut tables = self.enter("update_task")?;
        let task = tables
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| anyhow!("Task not found: {}", task_id))?;

        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = &patch.due_date {
            task.due_date = Some(due_date.clone());
        }
        if let Some(completed_at) = &patch.completed_at {
            task.completed_at = completed_at.clone();
        }
        task.updated_at = now();
        Ok(task.clone())
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        let mut tables = self.enter("delete_task")?;
        tables.tasks.retain(|task| task.id != task_id);
        Ok(())
    }

    async fn get_calendar_events(&self, user_id: &str) -> Result<Vec<CalendarEvent>> {
        let tables = self.enter("get_calendar_events")?;
        let mut events: Vec<CalendarEvent> = tables
            .calendar_events
            .iter()
            .filter(|event| event.user_id == user_id)
            .cloned()
            .collect();
        events.sort_by_key(|event| {
            let start = instant(&event.start_time);
            (start.is_none(), start)
        });
        Ok(events)
    }

    async fn create_calendar_event(&self, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        let mut tables = self.enter("create_calendar_event")?;
        let row = CalendarEvent {
            id: new_id(),
            user_id: event.user_id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            event_type: None,
            subject: None,
            location: None,
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            is_all_day: event.is_all_day,
            color: event.color.clone(),
            related_task_id: None,
        };
        tables.calendar_events.push(row.clone());
        Ok(row)
    }

    async fn get_study_sessions(&self, user_id: &str, session_type: Option<&str>) -> Result<Vec<StudySession>> {
        let tables = self.enter("get_study_sessions")?;
        let mut sessions: Vec<StudySession> = tables
            .study_sessions
            .iter()
            .filter(|session| session.user_id == user_id)
            .filter(|session| session_type.map_or(true, |t| session.session_type == t))
            .cloned()
            .collect();
        sessions.sort_by_key(|session| std::cmp::Reverse(instant(&session.start_time)));
        Ok(sessions)
    }

    async fn create_study_session(&self, session: &NewStudySession) -> Result<StudySession> {
        let mut tables = self.enter("create_study_session")?;
        let row = StudySession {
            id: new_id(),
            user_id: session.user_id.clone(),
            session_type: session.session_type.clone(),
            title: session.title.clone(),
            subject: session.subject.clone(),
            duration_planned: session.duration_planned,
            duration_actual: None,
            start_time: session.start_time.clone(),
            end_time: session.end_time.clone(),
            completed: session.completed,
            notes: None,
            related_task_id: None,
        };
        tables.study_sessions.push(row.clone());
        Ok(row)
    }

    async fn get_user_workouts_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<Vec<UserWorkout>> {
        let tables = self.enter("get_user_workouts_for_week")?;
        let mut workouts: Vec<UserWorkout> = tables
            .user_workouts
            .iter()
            .filter(|w| w.user_id == user_id)
            .filter(|w| w.workout_date >= week_start && w.workout_date <= week_end)
            .cloned()
            .collect();
        workouts.sort_by_key(|w| w.workout_date);
        Ok(workouts)
    }

    async fn create_user_workout(&self, workout: &NewUserWorkout) -> Result<UserWorkout> {
        let mut tables = self.enter("create_user_workout")?;
        let stamp = now();
        let row = UserWorkout {
            id: new_id(),
            user_id: workout.user_id.clone(),
            exercise_name: workout.exercise_name.clone(),
            workout_date: workout.workout_date,
            sets: workout.sets,
            completed: workout.completed,
            duration_minutes: workout.duration_minutes,
            video_url: workout.video_url.clone(),
            notes: workout.notes.clone(),
            created_at: stamp.clone(),
            updated_at: stamp,
            completed_at: None,
        };
        tables.user_workouts.push(row.clone());
        Ok(row)
    }

    async fn complete_user_workout(&self, workout_id: &str) -> Result<UserWorkout> {
        let mut tables = self.enter("complete_user_workout")?;
        let workout = tables
            .user_workouts
            .iter_mut()
            .find(|w| w.id == workout_id)
            .ok_or_else(|| anyhow!("Workout not found: {}", workout_id))?;
        let stamp = now();
        workout.completed = true;
        workout.completed_at = Some(stamp.clone());
        workout.updated_at = stamp;
        Ok(workout.clone())
    }

    async fn update_user_workout_progress(&self, workout_id: &str, set_count: u32, notes: &str) -> Result<UserWorkout> {
        let mut tables = self.enter("update_user_workout_progress")?;
        let workout = tables
            .user_workouts
            .iter_mut()
            .find(|w| w.id == workout_id)
            .ok_or_else(|| anyhow!("Workout not found: {}", workout_id))?;
        workout.notes = Some(notes.to_string());
        workout.updated_at = now();
        debug!(workout_id, set_count, "stored workout progress");
        Ok(workout.clone())
    }

    async fn delete_user_workout(&self, workout_id: &str) -> Result<()> {
        let mut tables = self.enter("delete_user_workout")?;
        tables.user_workouts.retain(|w| w.id != workout_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TaskPriority, TaskStatus};

    fn task(user: &str, title: &str, due: Option<&str>) -> NewTask {
        let mut task = NewTask::new(user, title);
        task.due_date = due.map(str::to_string);
        task
    }

    #[tokio::test]
    async fn test_tasks_ordered_by_due_date_with_undated_last() {
        let store = MemoryStore::new();
        store.create_task(&task("u1", "undated", None)).await.unwrap();
        store.create_task(&task("u1", "later", Some("2025-06-20T09:00:00Z"))).await.unwrap();
        store.create_task(&task("u1", "sooner", Some("2025-06-10T09:00:00Z"))).await.unwrap();
        store.create_task(&task("u2", "someone else", None)).await.unwrap();

        let titles: Vec<String> = store
            .get_tasks("u1", None)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["sooner", "later", "undated"]);
    }

    #[tokio::test]
    async fn test_task_filters_and_patch() {
        let store = MemoryStore::new();
        let mut high = task("u1", "urgent", None);
        high.priority = TaskPriority::High;
        let created = store.create_task(&high).await.unwrap();
        store.create_task(&task("u1", "normal", None)).await.unwrap();

        let filters = TaskFilters { priority: Some(TaskPriority::High), ..Default::default() };
        let filtered = store.get_tasks("u1", Some(&filters)).await.unwrap();
        assert_eq!(filtered.len(), 1);

        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            completed_at: Some(Some("2025-06-13T10:00:00Z".to_string())),
            ..Default::default()
        };
        let updated = store.update_task(&created.id, &patch).await.unwrap();
        assert!(updated.is_completed());
        assert_eq!(updated.completed_at.as_deref(), Some("2025-06-13T10:00:00Z"));

        let clear = TaskPatch { completed_at: Some(None), ..Default::default() };
        let cleared = store.update_task(&created.id, &clear).await.unwrap();
        assert!(cleared.completed_at.is_none());

        assert!(store.update_task("missing", &clear).await.is_err());
    }

    #[tokio::test]
    async fn test_events_ordered_by_start_with_unreadable_last() {
        let store = MemoryStore::new();
        for (title, start) in [("garbled", "sometime"), ("later", "2025-06-13T15:00:00Z"), ("earlier", "2025-06-13T09:00:00Z")] {
            store
                .create_calendar_event(&NewCalendarEvent {
                    user_id: "u1".into(),
                    title: title.into(),
                    description: None,
                    start_time: start.into(),
                    end_time: "2025-06-13T16:00:00Z".into(),
                    is_all_day: false,
                    color: None,
                })
                .await
                .unwrap();
        }

        let titles: Vec<String> = store
            .get_calendar_events("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["earlier", "later", "garbled"]);
    }

    #[tokio::test]
    async fn test_sessions_newest_first_by_type() {
        let store = MemoryStore::new();
        for (kind, start) in [("timeblock", "2025-06-13T09:00"), ("study", "2025-06-14T09:00"), ("timeblock", "2025-06-15T09:00")] {
            store
                .create_study_session(&NewStudySession {
                    user_id: "u1".into(),
                    session_type: kind.into(),
                    title: None,
                    subject: None,
                    duration_planned: 30,
                    start_time: start.into(),
                    end_time: None,
                    completed: false,
                })
                .await
                .unwrap();
        }

        let blocks = store.get_study_sessions("u1", Some("timeblock")).await.unwrap();
        let starts: Vec<&str> = blocks.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["2025-06-15T09:00", "2025-06-13T09:00"]);
        assert_eq!(store.get_study_sessions("u1", None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_workout_week_range_is_inclusive() {
        let store = MemoryStore::new();
        let day = |d: u32| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
        for d in [7, 8, 14, 15] {
            store
                .create_user_workout(&NewUserWorkout {
                    user_id: "u1".into(),
                    exercise_name: format!("day {}", d),
                    workout_date: day(d),
                    sets: 3,
                    completed: false,
                    duration_minutes: None,
                    video_url: None,
                    notes: None,
                })
                .await
                .unwrap();
        }

        let week = store.get_user_workouts_for_week("u1", day(8), day(14)).await.unwrap();
        let dates: Vec<NaiveDate> = week.iter().map(|w| w.workout_date).collect();
        assert_eq!(dates, vec![day(8), day(14)]);

        let done = store.complete_user_workout(&week[0].id).await.unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::new();
        store.fail_with("connection refused");
        let err = store.get_tasks("u1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");

        store.recover();
        assert!(store.get_tasks("u1", None).await.unwrap().is_empty());
        assert_eq!(store.call_count(), 2);
    }
}
