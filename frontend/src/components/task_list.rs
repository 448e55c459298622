use shared::{Task, TaskFilters, TaskStatus};
use web_sys::{HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use super::new_task_modal::NewTaskModal;
use crate::hooks::use_task_view::use_task_view;
use crate::hooks::PlannerContext;
use crate::services::date_utils::format_due_date;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub context: PlannerContext,
}

fn status_from_value(value: &str) -> Option<TaskStatus> {
    match value {
        "pending" => Some(TaskStatus::Pending),
        "in_progress" => Some(TaskStatus::InProgress),
        "completed" => Some(TaskStatus::Completed),
        _ => None,
    }
}

#[derive(Properties, PartialEq)]
struct TaskRowProps {
    task: Task,
    on_toggle: Callback<Task>,
    on_delete: Callback<String>,
}

#[function_component(TaskRow)]
fn task_row(props: &TaskRowProps) -> Html {
    let task = &props.task;

    let on_toggle = {
        let task = task.clone();
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(task.clone()))
    };

    let on_delete = {
        let task_id = task.id.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(task_id.clone()))
    };

    let row_class = if task.is_completed() { "task-row completed" } else { "task-row" };

    html! {
        <li class={row_class}>
            <input type="checkbox" class="task-checkbox" checked={task.is_completed()} onchange={on_toggle} />
            <div class="task-body">
                <div class="task-title">{&task.title}</div>
                {if let Some(description) = &task.description {
                    html! { <div class="task-description">{description}</div> }
                } else {
                    html! {}
                }}
                <div class="task-meta">
                    <span class={format!("task-priority {}", task.priority.as_str())}>{task.priority.as_str()}</span>
                    {if let Some(due) = task.due_date.as_deref().and_then(format_due_date) {
                        html! { <span class="task-due">{format!("Due {}", due)}</span> }
                    } else {
                        html! {}
                    }}
                </div>
            </div>
            <button class="btn btn-icon" title="Delete task" onclick={on_delete}>{"🗑️"}</button>
        </li>
    }
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    let view = use_task_view(&props.context);
    let show_modal = use_state(|| false);
    let state = &view.state;

    let on_status_filter = {
        let filters = state.filters.clone();
        let set_filters = view.actions.set_filters.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set_filters.emit(TaskFilters {
                status: status_from_value(&select.value()),
                ..filters.clone()
            });
        })
    };

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    let selected_status = state.filters.status.map(TaskStatus::as_str).unwrap_or("all");

    let body = if let Some(error) = state.status.error() {
        html! { <div class="view-error">{error}</div> }
    } else if let Some(tasks) = state.status.data() {
        if tasks.is_empty() {
            html! { <div class="view-empty">{"No tasks yet."}</div> }
        } else {
            html! {
                <ul class="task-list">
                    {for tasks.iter().map(|task| html! {
                        <TaskRow
                            key={task.id.clone()}
                            task={task.clone()}
                            on_toggle={view.actions.toggle_task.clone()}
                            on_delete={view.actions.delete_task.clone()}
                        />
                    })}
                </ul>
            }
        }
    } else {
        html! { <div class="view-loading">{"Loading tasks..."}</div> }
    };

    html! {
        <section class="view task-view">
            <header class="view-header">
                <h2>{"Tasks"}</h2>
                <div class="view-controls">
                    <select class="task-filter" onchange={on_status_filter}>
                        {for ["all", "pending", "in_progress", "completed"].into_iter().map(|value| html! {
                            <option value={value} selected={value == selected_status}>
                                {value.replace('_', " ")}
                            </option>
                        })}
                    </select>
                    <button class="btn btn-primary" onclick={open_modal}>{"+ New Task"}</button>
                </div>
            </header>

            {if let Some(notice) = state.notice.clone() {
                html! { <div class="view-notice">{notice}</div> }
            } else {
                html! {}
            }}

            {body}

            <NewTaskModal
                is_open={*show_modal}
                on_submit={view.actions.create_task.clone()}
                on_close={close_modal}
            />
        </section>
    }
}
