use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use planner_core::domain::task_view::TaskForm;
use planner_core::domain::{TaskViewController, ViewStatus};
use shared::{Task, TaskFilters};
use tracing::info;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{PlannerContext, Submission};
use crate::services::api::StoreHandle;

type Controller = Rc<RefCell<TaskViewController>>;

#[derive(Clone)]
pub struct TaskViewState {
    pub status: ViewStatus<Vec<Task>>,
    pub filters: TaskFilters,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct UseTaskViewActions {
    pub refresh: Callback<()>,
    pub set_filters: Callback<TaskFilters>,
    pub create_task: Callback<Submission<TaskForm>>,
    pub toggle_task: Callback<Task>,
    pub delete_task: Callback<String>,
}

pub struct UseTaskViewResult {
    pub state: TaskViewState,
    pub actions: UseTaskViewActions,
}

fn spawn_fetch(controller: Controller, store: StoreHandle, update: UseForceUpdateHandle) {
    let Some(ticket) = controller.borrow_mut().begin_fetch() else {
        return;
    };
    let filters = {
        let controller = controller.borrow();
        (!controller.filters().is_empty()).then(|| controller.filters().clone())
    };
    update.force_update();

    spawn_local(async move {
        let result = store.get_tasks(ticket.user_id(), filters.as_ref()).await;
        if controller.borrow_mut().complete_fetch(&ticket, result) {
            update.force_update();
        }
    });
}

#[hook]
pub fn use_task_view(context: &PlannerContext) -> UseTaskViewResult {
    let controller = use_mut_ref({
        let user_id = context.user_id();
        move || TaskViewController::new(Some(user_id))
    });
    let update = use_force_update();

    let refresh = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |_: (), store| {
            spawn_fetch(controller.clone(), store.clone(), update.clone());
        })
    };

    let set_filters = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        use_callback(refresh, move |filters: TaskFilters, refresh| {
            controller.borrow_mut().set_filters(filters);
            refresh.emit(());
        })
    };

    let create_task = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |submission: Submission<TaskForm>, store| {
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
                let result = store.create_task(&payload).await;
                let outcome = controller.borrow_mut().finish_action("create task", result);
                match outcome {
                    Ok(task) => {
                        info!(task_id = %task.id, "task created");
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

    let toggle_task = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |task: Task, store| {
            let Ok(patch) = controller.borrow().prepare_toggle(&task, Utc::now()) else {
                return;
            };

            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store.update_task(&task.id, &patch).await;
                let outcome = controller.borrow_mut().finish_action("update task", result);
                if outcome.is_ok() {
                    spawn_fetch(controller, store, update);
                } else {
                    update.force_update();
                }
            });
        })
    };

    let delete_task = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |task_id: String, store| {
            let controller = controller.clone();
            let store = store.clone();
            let update = update.clone();
            spawn_local(async move {
                let result = store.delete_task(&task_id).await;
                let outcome = controller.borrow_mut().finish_action("delete task", result);
                if outcome.is_ok() {
                    info!(task_id = %task_id, "task deleted");
                    spawn_fetch(controller, store, update);
                } else {
                    update.force_update();
                }
            });
        })
    };

    // New session or store: start over for that user
    {
        let controller = controller.clone();
        let refresh = refresh.clone();
        use_effect_with((context.user_id(), context.store.clone()), move |(user_id, _)| {
            controller.borrow_mut().set_user(Some(user_id.clone()));
            refresh.emit(());
            || ()
        });
    }

    {
        let controller = controller.clone();
        use_effect_with((), move |_| move || controller.borrow_mut().unmount());
    }

    let state = {
        let controller = controller.borrow();
        TaskViewState {
            status: controller.status().clone(),
            filters: controller.filters().clone(),
            notice: controller.notice().map(str::to_string),
        }
    };

    UseTaskViewResult {
        state,
        actions: UseTaskViewActions {
            refresh,
            set_filters,
            create_task,
            toggle_task,
            delete_task,
        },
    }
}
