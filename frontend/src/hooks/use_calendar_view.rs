use std::cell::RefCell;
use std::rc::Rc;

use planner_core::domain::calendar_view::EventForm;
use planner_core::domain::{CalendarViewController, NavigationAction};
use shared::MonthGrid;
use tracing::info;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::use_navigation::use_navigation;
use super::{PlannerContext, Submission};
use crate::services::api::StoreHandle;
use crate::services::date_utils::today;

type Controller = Rc<RefCell<CalendarViewController>>;

#[derive(Clone)]
pub struct CalendarViewState {
    /// e.g. `June 2025`
    pub month_title: String,
    pub grid: MonthGrid,
    pub is_loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct UseCalendarViewActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub open_day: Callback<chrono::NaiveDate>,
    pub create_event: Callback<Submission<EventForm>>,
}

pub struct UseCalendarViewResult {
    pub state: CalendarViewState,
    pub actions: UseCalendarViewActions,
}

fn spawn_fetch(controller: Controller, store: StoreHandle, update: UseForceUpdateHandle) {
    let Some(ticket) = controller.borrow_mut().begin_fetch() else {
        return;
    };
    update.force_update();

    spawn_local(async move {
        let result = store.get_calendar_events(ticket.user_id()).await;
        if controller.borrow_mut().complete_fetch(&ticket, result) {
            update.force_update();
        }
    });
}

#[hook]
pub fn use_calendar_view(context: &PlannerContext) -> UseCalendarViewResult {
    let navigation = use_navigation();
    let controller = use_mut_ref({
        let user_id = context.user_id();
        move || CalendarViewController::new(Some(user_id), today())
    });
    let update = use_force_update();

    // Month changes only re-filter the rows already loaded
    let prev_month = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback((), move |_: MouseEvent, _| {
            controller.borrow_mut().previous_month();
            update.force_update();
        })
    };

    let next_month = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback((), move |_: MouseEvent, _| {
            controller.borrow_mut().next_month();
            update.force_update();
        })
    };

    let open_day = {
        let controller = controller.clone();
        use_callback(navigation.dispatch.clone(), move |date: chrono::NaiveDate, dispatch| {
            let action: NavigationAction = controller.borrow().day_clicked(date);
            dispatch.emit(action);
        })
    };

    let create_event = {
        let controller = controller.clone();
        let update = update.clone();
        use_callback(context.store.clone(), move |submission: Submission<EventForm>, store| {
            let Submission { form, on_result } = submission;
            let prepared = controller.borrow().prepare_event(&form);
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
                let result = store.create_calendar_event(&payload).await;
                let outcome = controller.borrow_mut().finish_action("create event", result);
                match outcome {
                    Ok(event) => {
                        info!(event_id = %event.id, "calendar event created");
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

    let state = {
        let controller = controller.borrow();
        CalendarViewState {
            month_title: controller.cursor().to_string(),
            grid: controller.month_grid(today()),
            is_loading: controller.status().is_loading(),
            error: controller.status().error().map(str::to_string),
            notice: controller.notice().map(str::to_string),
        }
    };

    UseCalendarViewResult {
        state,
        actions: UseCalendarViewActions {
            prev_month,
            next_month,
            open_day,
            create_event,
        },
    }
}
