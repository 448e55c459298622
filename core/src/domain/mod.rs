//! Domain layer: pure layout logic plus the controllers behind each view.
//!
//! Controllers hold no UI state beyond what they render. They talk to the
//! data service only through [`crate::storage::PlannerStore`].

pub mod calendar;
pub mod calendar_view;
pub mod date_utils;
pub mod errors;
pub mod navigation;
pub mod overlap_layout;
pub mod scheduled_items;
pub mod task_view;
pub mod time_block;
pub mod time_block_view;
pub mod view_status;
pub mod workout;
pub mod workout_view;

pub use calendar::{build_month_grid, MonthCursor};
pub use calendar_view::CalendarViewController;
pub use navigation::{Navigation, NavigationAction};
pub use overlap_layout::layout_columns;
pub use task_view::TaskViewController;
pub use time_block::{build_time_block_grid, TimeWindow};
pub use time_block_view::TimeBlockViewController;
pub use view_status::{FetchTicket, ViewState, ViewStatus};
pub use workout_view::WorkoutViewController;
