mod common;

use chrono::Utc;
use common::{date, init_tracing, seed_event, USER};
use planner_core::domain::calendar_view::CalendarViewController;
use planner_core::domain::task_view::{TaskForm, TaskViewController};
use planner_core::domain::time_block_view::{TimeBlockForm, TimeBlockViewController};
use planner_core::domain::workout::TEMPLATES;
use planner_core::domain::workout_view::{WorkoutForm, WorkoutViewController};
use planner_core::domain::{Navigation, NavigationAction};
use planner_core::storage::MemoryStore;
use planner_core::PlannerStore;
use shared::{ActiveView, TaskFilters, TaskStatus};

#[tokio::test]
async fn test_calendar_day_click_opens_time_blocks() {
    init_tracing();
    let store = MemoryStore::new();
    seed_event(&store, "Lecture", "2025-06-13T09:00:00Z", "2025-06-13T10:30:00Z").await;
    seed_event(&store, "Office hours", "2025-06-13T10:00:00Z", "2025-06-13T11:00:00Z").await;
    seed_event(&store, "Exam", "2025-06-20T13:00:00Z", "2025-06-20T15:00:00Z").await;

    let today = date(2025, 6, 10);
    let mut calendar = CalendarViewController::with_zone(Some(USER.to_string()), Utc, today);
    calendar.refresh(&store).await;

    let grid = calendar.month_grid(today);
    assert_eq!(grid.padding_count(), 0);
    let friday = grid.month_days().find(|cell| cell.day == 13).unwrap();
    assert_eq!(friday.items.len(), 2);

    let nav = Navigation::new(today)
        .apply(NavigationAction::ShowView(ActiveView::Calendar))
        .apply(calendar.day_clicked(date(2025, 6, 13)));
    assert_eq!(nav.active_view, ActiveView::TimeBlock);

    let mut blocks = TimeBlockViewController::with_zone(Some(USER.to_string()), Utc, nav.selected_date);
    blocks.refresh(&store).await;
    let grid = blocks.grid();
    assert_eq!(grid.blocks.len(), 2);
    assert!(grid.blocks.iter().all(|b| b.total_columns == 2));

    let form = TimeBlockForm {
        title: "Review notes".to_string(),
        start: "2:00 PM".to_string(),
        end: "3:30 PM".to_string(),
        subject: "history".to_string(),
    };
    blocks.create_time_block(&store, &form).await.unwrap();
    let grid = blocks.grid();
    assert_eq!(grid.blocks.len(), 3);
    let review = grid.blocks.iter().find(|b| b.item.title == "Review notes").unwrap();
    assert_eq!((review.column, review.total_columns), (0, 1));
    assert!((review.top_px - 6.0 * 48.0).abs() < 1e-9);
    assert!((review.height_px - 72.0).abs() < 1e-9);

    // the block is a study session, not a calendar event
    assert_eq!(store.get_calendar_events(USER).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_task_lifecycle_with_filters() {
    init_tracing();
    let store = MemoryStore::new();
    let mut tasks = TaskViewController::with_zone(Some(USER.to_string()), Utc);
    tasks.refresh(&store).await;
    assert_eq!(tasks.status().data().map(Vec::len), Some(0));

    for (title, due) in [("Lab report", "2025-06-18T12:00"), ("Reading", ""), ("Problem set", "2025-06-15T09:00")] {
        let form = TaskForm {
            title: title.to_string(),
            due_date: due.to_string(),
            ..Default::default()
        };
        tasks.create_task(&store, &form).await.unwrap();
    }

    let titles = |controller: &TaskViewController<Utc>| -> Vec<String> {
        controller
            .status()
            .data()
            .map(|rows| rows.iter().map(|t| t.title.clone()).collect())
            .unwrap_or_default()
    };
    assert_eq!(titles(&tasks), vec!["Problem set", "Lab report", "Reading"]);

    let first = tasks.status().data().unwrap()[0].clone();
    tasks.toggle_task(&store, &first).await.unwrap();

    tasks.set_filters(TaskFilters {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    });
    tasks.refresh(&store).await;
    assert_eq!(titles(&tasks), vec!["Problem set"]);
}

#[tokio::test]
async fn test_week_of_workouts() {
    init_tracing();
    let store = MemoryStore::new();
    let today = date(2025, 6, 14);
    let mut tracker = WorkoutViewController::new(Some(USER.to_string()), today);

    let squats = tracker
        .create_workout(&store, &WorkoutForm::from_template(&TEMPLATES[2], today))
        .await
        .unwrap();
    let mut monday = WorkoutForm::from_template(&TEMPLATES[0], today);
    monday.workout_date = date(2025, 6, 9);
    tracker.create_workout(&store, &monday).await.unwrap();

    let names: Vec<String> = tracker
        .status()
        .data()
        .unwrap()
        .iter()
        .map(|w| w.exercise_name.clone())
        .collect();
    assert_eq!(names, vec!["Push-ups", "Squats"]);

    let mut current = squats;
    for set in 1..=4 {
        current = tracker.complete_set(&store, &current, set).await.unwrap();
    }
    assert!(current.completed);
    assert_eq!(tracker.completed_count(), 1);
    assert_eq!(tracker.total_count(), 2);
}

#[tokio::test]
async fn test_interleaved_fetches_keep_newest() {
    init_tracing();
    let store = MemoryStore::new();
    seed_event(&store, "Lecture", "2025-06-13T09:00:00Z", "2025-06-13T10:00:00Z").await;

    let mut calendar = CalendarViewController::with_zone(Some(USER.to_string()), Utc, date(2025, 6, 13));
    let older = calendar.begin_fetch().unwrap();
    let older_rows = store.get_calendar_events(older.user_id()).await;

    let newer = calendar.begin_fetch().unwrap();
    store.fail_with("gateway timeout");
    let newer_rows = store.get_calendar_events(newer.user_id()).await;

    // the failed newer fetch wins; the older success arrives late and is dropped
    assert!(calendar.complete_fetch(&newer, newer_rows));
    assert!(!calendar.complete_fetch(&older, older_rows));
    assert!(calendar.status().error().is_some());
}
