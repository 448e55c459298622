use std::cell::RefCell;
use std::rc::Rc;

use planner_core::domain::workout_view::WorkoutForm;
use planner_core::domain::{ViewStatus, WorkoutViewController};
use shared::UserWorkout;
use tracing::{debug, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{PlannerContext, Submission};
use crate::services::api::StoreHandle;
use crate::services::date_utils::today;

type Controller = Rc<RefCell<WorkoutViewController>>;

#[derive(Clone)]
pub struct WorkoutViewState {
    pub status: ViewStatus<Vec<UserWorkout>>,
    pub completed_count: usize,
    pub total_count: usize,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct UseWorkoutViewActions {
    pub create_workout: Callback<Submission<WorkoutForm>>,
    /// Workout and the 1-based set just checked
    pub complete_set: Callback<(UserWorkout, u32)>,
    pub complete_workout: Callback<String>,
    pub delete_workout: Callback<String>,
}

pub struct UseWorkoutViewResult {
    pub state: WorkoutViewState,
    pub actions: UseWorkoutViewActions,
}

fn spawn_fetch(controller: Controller, store: StoreHandle, update: UseForceUpdateHandle) {
    let Some(ticket) = controller.borrow_mut().begin_fetch() else {
        return;
    };
    let (start, end) = controller.borrow().week();
    update.force_update();

    spawn_local(async move {
        let result = store.get_user_workouts_for_week(ticket.user_id(), start, end).await;
        if controller.borrow_mut().complete_fetch(&ticket, result) {
            update.force_update();
        }
    });
}

#[hook]
pub fn use_workout_view(context: &PlannerContext) -> UseWorkoutViewResult {
    let controller = use_mut_ref({
        let user_id = context.user_id();
        move || WorkoutViewController::new(Some(user_id), today())
    });
    let update = use_force_update();

    let create_workout = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |submission: Submission<WorkoutForm>, store| {
            let Submission { form, on_result } = submission;
            let prepared = controller.borrow().prepare_create(&form);
            let payload = match prepared {
                Ok(payload) => payload,
                Err(e) => {
                    on_result.emit(Err(e.to_string()));
                    return;
                }
            };

            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store.create_user_workout(&payload).await;
                let outcome = controller.borrow_mut().finish_action("create workout", result);
                match outcome {
                    Ok(workout) => {
                        info!(workout_id = %workout.id, exercise = %workout.exercise_name, "workout created");
                        on_result.emit(Ok(()));
                        spawn_fetch(controller, store, update);
                    }
                    Err(e) => {
                        on_result.emit(Err(e.to_string()));
                        update.force_update();
                    }
                }
            });
        })
    };

    let complete_set = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |(workout, set_number): (UserWorkout, u32), store| {
            let Ok(set) = controller.borrow().prepare_set(&workout, set_number) else {
                return;
            };
            debug!(workout_id = %workout.id, progress = set.progress, "recording set");

            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store
                    .update_user_workout_progress(&workout.id, set.progress, &set.notes)
                    .await;
                let mut outcome = controller
                    .borrow_mut()
                    .finish_action("save set progress", result)
                    .map(|_| ());
                if outcome.is_ok() && set.finishes_workout {
                    let result = store.complete_user_workout(&workout.id).await;
                    outcome = controller
                        .borrow_mut()
                        .finish_action("complete workout", result)
                        .map(|_| ());
                }

                if outcome.is_ok() {
                    spawn_fetch(controller, store, update);
                } else {
                    update.force_update();
                }
            });
        })
    };

    let complete_workout = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |workout_id: String, store| {
            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store.complete_user_workout(&workout_id).await;
                let outcome = controller.borrow_mut().finish_action("complete workout", result);
                if outcome.is_ok() {
                    spawn_fetch(controller, store, update);
                } else {
                    update.force_update();
                }
            });
        })
    };

    let delete_workout = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |workout_id: String, store| {
            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store.delete_user_workout(&workout_id).await;
                let outcome = controller.borrow_mut().finish_action("delete workout", result);
                if outcome.is_ok() {
                    info!(workout_id = %workout_id, "workout deleted");
                    spawn_fetch(controller, store, update);
                } else {
                    update.force_update();
                }
            });
        })
    };

    {
        let controller = controller.clone();
        let update = update.clone();
        use_effect_with((context.user_id(), context.store.clone()), move |(user_id, store)| {
            controller.borrow_mut().set_user(Some(user_id.clone()));
            spawn_fetch(controller.clone(), store.clone(), update);
            || ()
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.borrow_mut().unmount());
    }

    let state = {
        let controller = controller.borrow();
        WorkoutViewState {
            status: controller.status().clone(),
            completed_count: controller.completed_count(),
            total_count: controller.total_count(),
            notice: controller.notice().map(str::to_string),
        }
    };

    UseWorkoutViewResult {
        state,
        actions: UseWorkoutViewActions {
            create_workout,
            complete_set,
            complete_workout,
            delete_workout,
        },
    }
}
