pub mod use_calendar_view;
pub mod use_navigation;
pub mod use_task_view;
pub mod use_time_block_view;
pub mod use_workout_view;

use planner_core::domain::TimeWindow;
use shared::UserSession;
use yew::Callback;

use crate::services::api::StoreHandle;

/// Signed-in session and the store it talks to
#[derive(Clone, PartialEq)]
pub struct PlannerContext {
    pub session: UserSession,
    pub store: StoreHandle,
    /// Visible hours of the time-block grid
    pub window: TimeWindow,
}

impl PlannerContext {
    pub fn user_id(&self) -> String {
        self.session.user_id.clone()
    }
}

/// Form payload plus where the modal wants to hear how it went
#[derive(Clone, PartialEq)]
pub struct Submission<F> {
    pub form: F,
    pub on_result: Callback<Result<(), String>>,
}
