use planner_core::domain::time_block_view::TimeBlockForm;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use super::modal::Modal;
use crate::hooks::Submission;

fn blank_form() -> TimeBlockForm {
    TimeBlockForm {
        start: "09:00".to_string(),
        end: "10:00".to_string(),
        ..Default::default()
    }
}

#[derive(Properties, PartialEq)]
pub struct NewTimeBlockModalProps {
    pub is_open: bool,
    /// Day the block is placed on, for the heading
    pub day_title: AttrValue,
    pub on_submit: Callback<Submission<TimeBlockForm>>,
    pub on_close: Callback<()>,
}

#[function_component(NewTimeBlockModal)]
pub fn new_time_block_modal(props: &NewTimeBlockModalProps) -> Html {
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
            form.set(TimeBlockForm { title: input.value(), ..(*form).clone() });
        })
    };

    let on_subject_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(TimeBlockForm { subject: input.value(), ..(*form).clone() });
        })
    };

    let on_start_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(TimeBlockForm { start: input.value(), ..(*form).clone() });
        })
    };

    let on_end_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(TimeBlockForm { end: input.value(), ..(*form).clone() });
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

    html! {
        <Modal
            is_open={props.is_open}
            title={format!("New Time Block · {}", props.day_title)}
            on_close={props.on_close.clone()}
            error={(*error_message).clone()}
        >
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="block-title">{"Title"}</label>
                    <input
                        id="block-title"
                        type="text"
                        value={form.title.clone()}
                        onchange={on_title_change}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>
                <div class="form-group">
                    <label for="block-subject">{"Subject"}</label>
                    <input
                        id="block-subject"
                        type="text"
                        value={form.subject.clone()}
                        onchange={on_subject_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="block-start">{"Start"}</label>
                        <input
                            id="block-start"
                            type="time"
                            value={form.start.clone()}
                            onchange={on_start_change}
                            disabled={*is_submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="block-end">{"End"}</label>
                        <input
                            id="block-end"
                            type="time"
                            value={form.end.clone()}
                            onchange={on_end_change}
                            disabled={*is_submitting}
                        />
                    </div>
                </div>
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Saving..." } else { "Add Block" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
