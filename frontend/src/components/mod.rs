pub mod auth_form;
pub mod calendar;
pub mod modal;
pub mod new_event_modal;
pub mod new_task_modal;
pub mod new_time_block_modal;
pub mod new_workout_modal;
pub mod sidebar;
pub mod task_list;
pub mod time_block;
pub mod workout;

pub use auth_form::AuthForm;
pub use calendar::CalendarView;
pub use sidebar::Sidebar;
pub use task_list::TaskList;
pub use time_block::TimeBlockView;
pub use workout::WorkoutView;
