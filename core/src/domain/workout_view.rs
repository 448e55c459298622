//! Controller behind the weekly workout tracker.

use chrono::NaiveDate;
use shared::{NewUserWorkout, UserWorkout};
use tracing::info;

use super::date_utils::week_range;
use super::errors::{ActionError, ValidationError};
use super::view_status::{FetchTicket, ViewState, ViewStatus};
use super::workout::{completed_count, record_set, set_progress, WorkoutNotes, WorkoutTemplate};
use crate::storage::PlannerStore;

pub const FETCH_WORKOUTS_FAILED: &str = "Failed to fetch workouts";

/// Input of the create-exercise form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutForm {
    pub exercise_name: String,
    pub sets: u32,
    pub duration_minutes: Option<u32>,
    pub video_url: String,
    pub workout_date: NaiveDate,
}

impl WorkoutForm {
    /// Blank form: three sets, dated today
    pub fn new(today: NaiveDate) -> Self {
        Self {
            exercise_name: String::new(),
            sets: 3,
            duration_minutes: None,
            video_url: String::new(),
            workout_date: today,
        }
    }

    pub fn from_template(template: &WorkoutTemplate, today: NaiveDate) -> Self {
        Self {
            exercise_name: template.name.to_string(),
            sets: template.sets.unwrap_or(1),
            duration_minutes: template.duration_minutes(),
            video_url: template.video_url.to_string(),
            workout_date: today,
        }
    }
}

/// Set progress to write for a completed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetUpdate {
    pub progress: u32,
    pub notes: String,
    /// Every set is now done
    pub finishes_workout: bool,
}

pub struct WorkoutViewController {
    state: ViewState<Vec<UserWorkout>>,
    week: (NaiveDate, NaiveDate),
}

impl WorkoutViewController {
    /// Tracker for the Sunday..Saturday week containing `today`
    pub fn new(user_id: Option<String>, today: NaiveDate) -> Self {
        Self {
            state: ViewState::new(user_id),
            week: week_range(today),
        }
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.state.set_user(user_id);
    }

    pub fn week(&self) -> (NaiveDate, NaiveDate) {
        self.week
    }

    pub fn status(&self) -> &ViewStatus<Vec<UserWorkout>> {
        self.state.status()
    }

    pub fn notice(&self) -> Option<&str> {
        self.state.notice()
    }

    pub fn completed_count(&self) -> usize {
        self.state.status().data().map_or(0, |workouts| completed_count(workouts))
    }

    pub fn total_count(&self) -> usize {
        self.state.status().data().map_or(0, Vec::len)
    }

    pub fn unmount(&mut self) {
        self.state.unmount();
    }

    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.state.begin_fetch()
    }

    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: anyhow::Result<Vec<UserWorkout>>) -> bool {
        self.state.complete_fetch(ticket, FETCH_WORKOUTS_FAILED, result)
    }

    pub async fn refresh<S: PlannerStore + ?Sized>(&mut self, store: &S) {
        if let Some(ticket) = self.begin_fetch() {
            let (start, end) = self.week;
            let result = store.get_user_workouts_for_week(ticket.user_id(), start, end).await;
            self.complete_fetch(&ticket, result);
        }
    }

    pub fn prepare_create(&self, form: &WorkoutForm) -> Result<NewUserWorkout, ActionError> {
        let user_id = self.state.signed_in_user()?;
        let name = form.exercise_name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if form.sets == 0 {
            return Err(ValidationError::NonPositiveSets.into());
        }

        let video_url = form.video_url.trim();
        Ok(NewUserWorkout {
            user_id: user_id.to_string(),
            exercise_name: name.to_string(),
            workout_date: form.workout_date,
            sets: form.sets,
            completed: false,
            duration_minutes: form.duration_minutes.filter(|minutes| *minutes > 0),
            video_url: (!video_url.is_empty()).then(|| video_url.to_string()),
            notes: None,
        })
    }

    pub fn prepare_set(&self, workout: &UserWorkout, set_number: u32) -> Result<SetUpdate, ActionError> {
        self.state.signed_in_user()?;
        let progress = record_set(set_progress(workout), set_number);
        Ok(SetUpdate {
            progress,
            notes: WorkoutNotes { set_progress: progress }.to_json(),
            finishes_workout: workout.sets > 0 && progress >= workout.sets,
        })
    }

    pub fn finish_action<T>(&mut self, action: &str, result: anyhow::Result<T>) -> Result<T, ActionError> {
        self.state.finish_action(action, result)
    }

    pub async fn create_workout<S: PlannerStore + ?Sized>(
        &mut self,
        store: &S,
        form: &WorkoutForm,
    ) -> Result<UserWorkout, ActionError> {
        let payload = self.prepare_create(form)?;
        let result = store.create_user_workout(&payload).await;
        let workout = self.finish_action("create workout", result)?;
        info!(workout_id = %workout.id, exercise = %workout.exercise_name, "workout created");
        self.refresh(store).await;
        Ok(workout)
    }

    /// Record set `set_number` as done; finishing the last set completes the workout
    pub async fn complete_set<S: PlannerStore + ?Sized>(
        &mut self,
        store: &S,
        workout: &UserWorkout,
        set_number: u32,
    ) -> Result<UserWorkout, ActionError> {
        let update = self.prepare_set(workout, set_number)?;
        let result = store
            .update_user_workout_progress(&workout.id, update.progress, &update.notes)
            .await;
        let mut saved = self.finish_action("save set progress", result)?;
        if update.finishes_workout {
            let result = store.complete_user_workout(&workout.id).await;
            saved = self.finish_action("complete workout", result)?;
        }
        self.refresh(store).await;
        Ok(saved)
    }

    pub async fn complete_workout<S: PlannerStore + ?Sized>(
        &mut self,
        store: &S,
        workout_id: &str,
    ) -> Result<UserWorkout, ActionError> {
        self.state.signed_in_user()?;
        let result = store.complete_user_workout(workout_id).await;
        let workout = self.finish_action("complete workout", result)?;
        self.refresh(store).await;
        Ok(workout)
    }

    pub async fn delete_workout<S: PlannerStore + ?Sized>(&mut self, store: &S, workout_id: &str) -> Result<(), ActionError> {
        self.state.signed_in_user()?;
        let result = store.delete_user_workout(workout_id).await;
        self.finish_action("delete workout", result)?;
        self.refresh(store).await;
        Ok(())
    }
}
