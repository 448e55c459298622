use planner_core::domain::calendar_view::EventForm;
use planner_core::domain::scheduled_items::DEFAULT_EVENT_COLOR;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use super::modal::Modal;
use crate::hooks::Submission;
use crate::services::date_utils::{datetime_local_value, today};

const COLOR_CHOICES: [(&str, &str); 4] = [
    (DEFAULT_EVENT_COLOR, "Blue"),
    ("bg-green-100", "Green"),
    ("bg-yellow-100", "Yellow"),
    ("bg-red-100", "Red"),
];

fn blank_form() -> EventForm {
    EventForm {
        start: datetime_local_value(today(), 9),
        end: datetime_local_value(today(), 10),
        color: Some(DEFAULT_EVENT_COLOR.to_string()),
        ..Default::default()
    }
}

#[derive(Properties, PartialEq)]
pub struct NewEventModalProps {
    pub is_open: bool,
    pub on_submit: Callback<Submission<EventForm>>,
    pub on_close: Callback<()>,
}

#[function_component(NewEventModal)]
pub fn new_event_modal(props: &NewEventModalProps) -> Html {
    let form = use_state(blank_form);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with(props.is_open, {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                form.set(blank_form());
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_title_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(EventForm { title: input.value(), ..(*form).clone() });
        })
    };

    let on_description_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            form.set(EventForm { description: input.value(), ..(*form).clone() });
        })
    };

    let on_start_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(EventForm { start: input.value(), ..(*form).clone() });
        })
    };

    let on_end_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(EventForm { end: input.value(), ..(*form).clone() });
        })
    };

    let on_color_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.set(EventForm { color: Some(select.value()), ..(*form).clone() });
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

    let selected_color = form.color.clone().unwrap_or_default();

    html! {
        <Modal
            is_open={props.is_open}
            title="New Event"
            on_close={props.on_close.clone()}
            error={(*error_message).clone()}
        >
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="event-title">{"Title"}</label>
                    <input
                        id="event-title"
                        type="text"
                        value={form.title.clone()}
                        onchange={on_title_change}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>
                <div class="form-group">
                    <label for="event-description">{"Description"}</label>
                    <textarea
                        id="event-description"
                        value={form.description.clone()}
                        onchange={on_description_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="event-start">{"Start"}</label>
                        <input
                            id="event-start"
                            type="datetime-local"
                            value={form.start.clone()}
                            onchange={on_start_change}
                            disabled={*is_submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="event-end">{"End"}</label>
                        <input
                            id="event-end"
                            type="datetime-local"
                            value={form.end.clone()}
                            onchange={on_end_change}
                            disabled={*is_submitting}
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="event-color">{"Color"}</label>
                    <select id="event-color" onchange={on_color_change} disabled={*is_submitting}>
                        {for COLOR_CHOICES.into_iter().map(|(tag, label)| html! {
                            <option value={tag} selected={selected_color == tag}>{label}</option>
                        })}
                    </select>
                </div>
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Saving..." } else { "Create Event" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
