//! Workout rules: exercise kinds, set progress and the starter templates.
//!
//! Set progress lives in the row's `notes` column as `{"setProgress": n}`.
//! Unreadable notes count as no progress.

use serde::{Deserialize, Serialize};
use shared::UserWorkout;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    Strength,
    Cardio,
    Flexibility,
}

impl ExerciseKind {
    /// Timed exercises are cardio, counted ones strength, anything else flexibility
    pub fn of(workout: &UserWorkout) -> Self {
        if workout.duration_minutes.is_some_and(|minutes| minutes > 0) {
            ExerciseKind::Cardio
        } else if workout.sets > 0 {
            ExerciseKind::Strength
        } else {
            ExerciseKind::Flexibility
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::Strength => "strength",
            ExerciseKind::Cardio => "cardio",
            ExerciseKind::Flexibility => "flexibility",
        }
    }

    pub fn color_tag(self) -> &'static str {
        match self {
            ExerciseKind::Strength => "bg-blue-100 text-blue-800",
            ExerciseKind::Cardio => "bg-red-100 text-red-800",
            ExerciseKind::Flexibility => "bg-green-100 text-green-800",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutNotes {
    #[serde(default)]
    pub set_progress: u32,
}

impl WorkoutNotes {
    pub fn parse(notes: Option<&str>) -> Self {
        match notes.map(serde_json::from_str::<WorkoutNotes>) {
            Some(Ok(parsed)) => parsed,
            Some(Err(e)) => {
                debug!(error = %e, "ignoring unreadable workout notes");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn to_json(self) -> String {
        serde_json::json!({ "setProgress": self.set_progress }).to_string()
    }
}

pub fn set_progress(workout: &UserWorkout) -> u32 {
    WorkoutNotes::parse(workout.notes.as_deref()).set_progress
}

/// Completing set `set_number` never lowers the recorded progress
pub fn record_set(previous: u32, set_number: u32) -> u32 {
    previous.max(set_number)
}

pub fn is_fully_completed(workout: &UserWorkout) -> bool {
    workout.completed || (workout.sets > 0 && set_progress(workout) >= workout.sets)
}

/// 0..=100
pub fn progress_percent(workout: &UserWorkout) -> f64 {
    if workout.completed {
        return 100.0;
    }
    if workout.sets == 0 {
        return 0.0;
    }
    let done = set_progress(workout).min(workout.sets);
    f64::from(done) / f64::from(workout.sets) * 100.0
}

pub fn completed_count(workouts: &[UserWorkout]) -> usize {
    workouts.iter().filter(|w| is_fully_completed(w)).count()
}

/// Starter exercise offered in the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutTemplate {
    pub name: &'static str,
    pub video_url: &'static str,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub muscle_group: &'static str,
}

impl WorkoutTemplate {
    /// Whole minutes for timed templates, rounded up
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_seconds.map(|seconds| (seconds + 59) / 60)
    }
}

pub const TEMPLATES: [WorkoutTemplate; 4] = [
    WorkoutTemplate {
        name: "Push-ups",
        video_url: "https://youtube.com/watch?v=IODxDxX7oi4",
        sets: Some(3),
        reps: Some(15),
        duration_seconds: None,
        muscle_group: "Chest",
    },
    WorkoutTemplate {
        name: "Plank",
        video_url: "https://youtube.com/watch?v=pSHjTRCQxIw",
        sets: None,
        reps: None,
        duration_seconds: Some(60),
        muscle_group: "Core",
    },
    WorkoutTemplate {
        name: "Squats",
        video_url: "https://youtube.com/watch?v=aclHkVaku9U",
        sets: Some(4),
        reps: Some(20),
        duration_seconds: None,
        muscle_group: "Legs",
    },
    WorkoutTemplate {
        name: "Jumping Jacks",
        video_url: "https://youtube.com/watch?v=c4DAnQ6DtF8",
        sets: None,
        reps: None,
        duration_seconds: Some(45),
        muscle_group: "Full Body",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn workout(sets: u32, duration: Option<u32>, notes: Option<&str>) -> UserWorkout {
        UserWorkout {
            id: "w1".into(),
            user_id: "u1".into(),
            exercise_name: "Push-ups".into(),
            workout_date: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
            sets,
            completed: false,
            duration_minutes: duration,
            video_url: None,
            notes: notes.map(str::to_string),
            created_at: String::new(),
            updated_at: String::new(),
            completed_at: None,
        }
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(ExerciseKind::of(&workout(3, Some(10), None)), ExerciseKind::Cardio);
        assert_eq!(ExerciseKind::of(&workout(3, None, None)), ExerciseKind::Strength);
        assert_eq!(ExerciseKind::of(&workout(0, None, None)), ExerciseKind::Flexibility);
        assert_eq!(ExerciseKind::Cardio.label(), "cardio");
    }

    #[test]
    fn test_notes_json() {
        assert_eq!(WorkoutNotes { set_progress: 2 }.to_json(), r#"{"setProgress":2}"#);
        assert_eq!(set_progress(&workout(3, None, Some(r#"{"setProgress":2}"#))), 2);
        assert_eq!(set_progress(&workout(3, None, Some("felt great"))), 0);
        assert_eq!(set_progress(&workout(3, None, Some("{}"))), 0);
        assert_eq!(set_progress(&workout(3, None, None)), 0);
    }

    #[test]
    fn test_record_set_keeps_maximum() {
        assert_eq!(record_set(0, 1), 1);
        assert_eq!(record_set(3, 2), 3);
        assert_eq!(record_set(2, 3), 3);
    }

    #[test]
    fn test_progress_and_completion() {
        let partial = workout(4, None, Some(r#"{"setProgress":1}"#));
        assert!((progress_percent(&partial) - 25.0).abs() < 1e-9);
        assert!(!is_fully_completed(&partial));

        let done = workout(4, None, Some(r#"{"setProgress":4}"#));
        assert!(is_fully_completed(&done));
        assert!((progress_percent(&done) - 100.0).abs() < 1e-9);

        let mut timed = workout(0, Some(5), None);
        assert_eq!(progress_percent(&timed), 0.0);
        timed.completed = true;
        assert_eq!(progress_percent(&timed), 100.0);

        assert_eq!(completed_count(&[partial, done, timed]), 2);
    }

    #[test]
    fn test_templates() {
        let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Push-ups", "Plank", "Squats", "Jumping Jacks"]);
        assert_eq!(TEMPLATES[1].duration_minutes(), Some(1));
        assert_eq!(TEMPLATES[2].sets, Some(4));
        assert!(TEMPLATES[3].video_url.ends_with("c4DAnQ6DtF8"));
    }
}
