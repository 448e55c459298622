use planner_core::domain::date_utils::{parse_date_key, to_date_key};
use planner_core::domain::workout::TEMPLATES;
use planner_core::domain::workout_view::WorkoutForm;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use super::modal::Modal;
use crate::hooks::Submission;
use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct NewWorkoutModalProps {
    pub is_open: bool,
    pub on_submit: Callback<Submission<WorkoutForm>>,
    pub on_close: Callback<()>,
}

fn number_value(e: &Event) -> Option<u32> {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value().trim().parse().ok()
}

#[function_component(NewWorkoutModal)]
pub fn new_workout_modal(props: &NewWorkoutModalProps) -> Html {
    let form = use_state(|| WorkoutForm::new(today()));
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with(props.is_open, {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                form.set(WorkoutForm::new(today()));
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_name_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(WorkoutForm { exercise_name: input.value(), ..(*form).clone() });
        })
    };

    let on_sets_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            form.set(WorkoutForm { sets: number_value(&e).unwrap_or(0), ..(*form).clone() });
        })
    };

    let on_duration_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            form.set(WorkoutForm { duration_minutes: number_value(&e), ..(*form).clone() });
        })
    };

    let on_video_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(WorkoutForm { video_url: input.value(), ..(*form).clone() });
        })
    };

    let on_date_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(date) = parse_date_key(&input.value()) {
                form.set(WorkoutForm { workout_date: date, ..(*form).clone() });
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_submit = props.on_submit.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_close = on_close.clone();
            on_submit.emit(Submission {
                form: (*form).clone(),
                on_result: Callback::from(move |result: Result<(), String>| {
                    is_submitting.set(false);
                    match result {
                        Ok(()) => on_close.emit(()),
                        Err(e) => error_message.set(Some(e)),
                    }
                }),
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let templates: Vec<Html> = TEMPLATES
        .into_iter()
        .map(|template| {
            let form = form.clone();
            let onclick = Callback::from(move |_: MouseEvent| {
                let workout_date = form.workout_date;
                form.set(WorkoutForm::from_template(&template, workout_date));
            });
            html! {
                <button type="button" class="template-chip" onclick={onclick} title={template.muscle_group}>
                    {template.name}
                </button>
            }
        })
        .collect();

    html! {
        <Modal
            is_open={props.is_open}
            title="Add Exercise"
            on_close={props.on_close.clone()}
            error={(*error_message).clone()}
        >
            <div class="workout-templates">
                <span class="templates-label">{"Quick add:"}</span>
                {for templates}
            </div>
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="workout-name">{"Exercise"}</label>
                    <input
                        id="workout-name"
                        type="text"
                        value={form.exercise_name.clone()}
                        onchange={on_name_change}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="workout-sets">{"Sets"}</label>
                        <input
                            id="workout-sets"
                            type="number"
                            min="1"
                            value={form.sets.to_string()}
                            onchange={on_sets_change}
                            disabled={*is_submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="workout-duration">{"Minutes"}</label>
                        <input
                            id="workout-duration"
                            type="number"
                            min="0"
                            value={form.duration_minutes.map(|m| m.to_string()).unwrap_or_default()}
                            onchange={on_duration_change}
                            disabled={*is_submitting}
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="workout-video">{"Video link"}</label>
                    <input
                        id="workout-video"
                        type="url"
                        value={form.video_url.clone()}
                        onchange={on_video_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="workout-date">{"Date"}</label>
                    <input
                        id="workout-date"
                        type="date"
                        value={to_date_key(form.workout_date)}
                        onchange={on_date_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Adding..." } else { "Add Exercise" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
