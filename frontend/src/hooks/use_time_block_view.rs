use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;

use planner_core::domain::time_block_view::TimeBlockForm;
use planner_core::domain::{NavigationAction, TimeBlockViewController};
use shared::TimeBlockGrid;
use tracing::info;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::use_navigation::use_navigation;
use super::{PlannerContext, Submission};
use crate::services::api::StoreHandle;

type Controller = Rc<RefCell<TimeBlockViewController>>;

#[derive(Clone)]
pub struct TimeBlockViewState {
    /// e.g. `Friday, June 13`
    pub title: String,
    pub grid: TimeBlockGrid,
    pub is_loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct UseTimeBlockViewActions {
    pub prev_day: Callback<MouseEvent>,
    pub next_day: Callback<MouseEvent>,
    pub create_block: Callback<Submission<TimeBlockForm>>,
}

pub struct UseTimeBlockViewResult {
    pub state: TimeBlockViewState,
    pub actions: UseTimeBlockViewActions,
}

fn spawn_fetch(controller: Controller, store: StoreHandle, update: UseForceUpdateHandle) {
    let Some(ticket) = controller.borrow_mut().begin_fetch() else {
        return;
    };
    update.force_update();

    spawn_local(async move {
        let result = TimeBlockViewController::<Local>::load(&*store, &ticket).await;
        if controller.borrow_mut().complete_fetch(&ticket, result) {
            update.force_update();
        }
    });
}

/// The focused day comes from the shared navigation state
#[hook]
pub fn use_time_block_view(context: &PlannerContext) -> UseTimeBlockViewResult {
    let navigation = use_navigation();
    let selected_date = navigation.state.selected_date;
    let controller = use_mut_ref({
        let user_id = context.user_id();
        let window = context.window;
        move || TimeBlockViewController::new(Some(user_id), selected_date).with_window(window)
    });
    let update = use_force_update();

    let prev_day = {
        let dispatch = navigation.dispatch.clone();
        use_callback(dispatch, move |_: MouseEvent, dispatch| {
            dispatch.emit(NavigationAction::ShiftDate(-1));
        })
    };

    let next_day = {
        let dispatch = navigation.dispatch.clone();
        use_callback(dispatch, move |_: MouseEvent, dispatch| {
            dispatch.emit(NavigationAction::ShiftDate(1));
        })
    };

    let create_block = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |submission: Submission<TimeBlockForm>, store| {
            let Submission { form, on_result } = submission;
            let prepared = controller.borrow().prepare_block(&form);
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
                let result = store.create_study_session(&payload).await;
                let outcome = controller.borrow_mut().finish_action("create time block", result);
                match outcome {
                    Ok(session) => {
                        info!(session_id = %session.id, minutes = session.duration_planned, "time block created");
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

    // Rows for every day are already loaded; following the date is enough
    controller.borrow_mut().set_date(selected_date);

    let state = {
        let controller = controller.borrow();
        TimeBlockViewState {
            title: controller.title(),
            grid: controller.grid(),
            is_loading: controller.status().is_loading(),
            error: controller.status().error().map(str::to_string),
            notice: controller.notice().map(str::to_string),
        }
    };

    UseTimeBlockViewResult {
        state,
        actions: UseTimeBlockViewActions {
            prev_day,
            next_day,
            create_block,
        },
    }
}
