//! Shared setup for the integration tests.

use std::sync::Once;

use chrono::NaiveDate;
use planner_core::storage::MemoryStore;
use shared::NewCalendarEvent;

static TRACING: Once = Once::new();

/// Log to the test writer; `RUST_LOG` picks the level, `warn` otherwise
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

pub const USER: &str = "user-1";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_event(store: &MemoryStore, title: &str, start: &str, end: &str) {
    use planner_core::PlannerStore;

    store
        .create_calendar_event(&NewCalendarEvent {
            user_id: USER.to_string(),
            title: title.to_string(),
            description: None,
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_all_day: false,
            color: None,
        })
        .await
        .unwrap();
}
