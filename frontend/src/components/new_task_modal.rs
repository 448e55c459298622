use planner_core::domain::task_view::TaskForm;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use super::modal::Modal;
use crate::hooks::Submission;

#[derive(Properties, PartialEq)]
pub struct NewTaskModalProps {
    pub is_open: bool,
    pub on_submit: Callback<Submission<TaskForm>>,
    pub on_close: Callback<()>,
}

#[function_component(NewTaskModal)]
pub fn new_task_modal(props: &NewTaskModalProps) -> Html {
    let form = use_state(TaskForm::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with(props.is_open, {
        let form = form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |is_open| {
            if *is_open {
                form.set(TaskForm::default());
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
            form.set(TaskForm { title: input.value(), ..(*form).clone() });
        })
    };

    let on_description_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            form.set(TaskForm { description: input.value(), ..(*form).clone() });
        })
    };

    let on_due_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(TaskForm { due_date: input.value(), ..(*form).clone() });
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
            title="New Task"
            on_close={props.on_close.clone()}
            error={(*error_message).clone()}
        >
            <form class="modal-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="task-title">{"Title"}</label>
                    <input
                        id="task-title"
                        type="text"
                        placeholder="What needs doing?"
                        value={form.title.clone()}
                        onchange={on_title_change}
                        disabled={*is_submitting}
                        autofocus=true
                    />
                </div>
                <div class="form-group">
                    <label for="task-description">{"Description"}</label>
                    <textarea
                        id="task-description"
                        value={form.description.clone()}
                        onchange={on_description_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="form-group">
                    <label for="task-due">{"Due"}</label>
                    <input
                        id="task-due"
                        type="datetime-local"
                        value={form.due_date.clone()}
                        onchange={on_due_change}
                        disabled={*is_submitting}
                    />
                </div>
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Creating..." } else { "Create Task" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
