use planner_core::domain::date_utils::format_date_for_display;
use planner_core::domain::workout::{is_fully_completed, progress_percent, set_progress, ExerciseKind};
use shared::UserWorkout;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::new_workout_modal::NewWorkoutModal;
use crate::hooks::use_workout_view::use_workout_view;
use crate::hooks::PlannerContext;

#[derive(Properties, PartialEq)]
pub struct WorkoutViewProps {
    pub context: PlannerContext,
}

#[derive(Properties, PartialEq)]
struct WorkoutCardProps {
    workout: UserWorkout,
    on_complete_set: Callback<(UserWorkout, u32)>,
    on_complete: Callback<String>,
    on_delete: Callback<String>,
}

#[function_component(WorkoutCard)]
fn workout_card(props: &WorkoutCardProps) -> Html {
    let workout = &props.workout;
    let kind = ExerciseKind::of(workout);
    let done = is_fully_completed(workout);
    let progress = set_progress(workout);

    let on_complete = {
        let workout_id = workout.id.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |_: MouseEvent| on_complete.emit(workout_id.clone()))
    };

    let on_delete = {
        let workout_id = workout.id.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(workout_id.clone()))
    };

    let set_boxes = (1..=workout.sets).map(|set_number| {
        let checked = done || set_number <= progress;
        let workout = workout.clone();
        let on_complete_set = props.on_complete_set.clone();
        let onchange = Callback::from(move |_: Event| on_complete_set.emit((workout.clone(), set_number)));
        html! {
            <label class="set-checkbox">
                <input type="checkbox" checked={checked} disabled={checked} onchange={onchange} />
                {format!("Set {}", set_number)}
            </label>
        }
    });

    let card_class = if done { "workout-card completed" } else { "workout-card" };

    html! {
        <div class={card_class}>
            <div class="workout-card-header">
                <h3 class="workout-name">{&workout.exercise_name}</h3>
                <span class={format!("workout-kind {}", kind.color_tag())}>{kind.label()}</span>
            </div>
            <div class="workout-meta">
                <span>{format_date_for_display(workout.workout_date)}</span>
                {if let Some(minutes) = workout.duration_minutes {
                    html! { <span>{format!("{} min", minutes)}</span> }
                } else {
                    html! {}
                }}
                {if let Some(url) = workout.video_url.clone() {
                    html! { <a href={url} target="_blank" rel="noopener noreferrer">{"Watch video"}</a> }
                } else {
                    html! {}
                }}
            </div>
            <div class="workout-progress">
                <div class="workout-progress-bar" style={format!("width: {:.0}%;", progress_percent(workout))}></div>
            </div>
            <div class="workout-sets">{for set_boxes}</div>
            <div class="workout-actions">
                {if done {
                    html! { <span class="workout-done">{"Completed"}</span> }
                } else {
                    html! { <button class="btn btn-primary" onclick={on_complete}>{"Mark complete"}</button> }
                }}
                <button class="btn btn-icon" title="Delete exercise" onclick={on_delete}>{"🗑️"}</button>
            </div>
        </div>
    }
}

#[function_component(WorkoutView)]
pub fn workout_view(props: &WorkoutViewProps) -> Html {
    let view = use_workout_view(&props.context);
    let show_modal = use_state(|| false);
    let state = &view.state;

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    let body = if let Some(error) = state.status.error() {
        html! { <div class="view-error">{error}</div> }
    } else if let Some(workouts) = state.status.data() {
        if workouts.is_empty() {
            html! { <div class="view-empty">{"No exercises planned this week."}</div> }
        } else {
            html! {
                <div class="workout-grid">
                    {for workouts.iter().map(|workout| html! {
                        <WorkoutCard
                            key={workout.id.clone()}
                            workout={workout.clone()}
                            on_complete_set={view.actions.complete_set.clone()}
                            on_complete={view.actions.complete_workout.clone()}
                            on_delete={view.actions.delete_workout.clone()}
                        />
                    })}
                </div>
            }
        }
    } else {
        html! { <div class="view-loading">{"Loading workouts..."}</div> }
    };

    html! {
        <section class="view workout-view">
            <header class="view-header">
                <div>
                    <h2>{"Workout Tracker"}</h2>
                    <div class="workout-summary">
                        {format!("{} of {} exercises done this week", state.completed_count, state.total_count)}
                    </div>
                </div>
                <button class="btn btn-primary" onclick={open_modal}>{"+ Add Exercise"}</button>
            </header>

            {if let Some(notice) = state.notice.clone() {
                html! { <div class="view-notice">{notice}</div> }
            } else {
                html! {}
            }}

            {body}

            <NewWorkoutModal
                is_open={*show_modal}
                on_submit={view.actions.create_workout.clone()}
                on_close={close_modal}
            />
        </section>
    }
}
