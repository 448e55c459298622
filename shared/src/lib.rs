use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task row. Stored as lowercase text by the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    /// Any status this client does not know; written back as `other`
    #[serde(other)]
    Other,
}

impl TaskStatus {
    /// Status a task moves to when its completion checkbox is toggled
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            _ => TaskStatus::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Other => "other",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    #[serde(other)]
    Other,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Other => "other",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// A row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Owner of the row
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub subject: Option<String>,
    /// Timestamp text as returned by the data service (RFC 3339 or `YYYY-MM-DDTHH:MM`)
    pub due_date: Option<String>,
    /// Estimated duration in minutes
    pub estimated_duration: Option<i32>,
    pub actual_duration: Option<i32>,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: i32,
    #[serde(default = "default_energy")]
    pub energy_required: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

fn default_difficulty() -> i32 {
    1
}

fn default_energy() -> String {
    "medium".to_string()
}

/// Insert payload for the `tasks` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub estimated_duration: Option<i32>,
    pub difficulty_level: i32,
    pub energy_required: String,
    pub tags: Vec<String>,
}

impl NewTask {
    /// A pending, medium-priority task with the defaults the task form uses
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            category: None,
            subject: None,
            estimated_duration: None,
            difficulty_level: default_difficulty(),
            energy_required: default_energy(),
            tags: Vec::new(),
        }
    }
}

/// Partial update for a task. Only fields that are `Some` are sent.
///
/// `completed_at` is doubly optional so that `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
}

/// Equality filters accepted by the task list query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
    pub subject: Option<String>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.subject.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
            && self
                .category
                .as_ref()
                .map_or(true, |c| task.category.as_ref() == Some(c))
            && self
                .subject
                .as_ref()
                .map_or(true, |s| task.subject.as_ref() == Some(s))
    }
}

/// A row of the `calendar_events` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub subject: Option<String>,
    pub location: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_all_day: bool,
    /// Opaque display token, e.g. a CSS class
    pub color: Option<String>,
    pub related_task_id: Option<String>,
}

/// Insert payload for the `calendar_events` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_all_day: bool,
    pub color: Option<String>,
}

/// Session type used for ad-hoc time blocks
pub const TIMEBLOCK_SESSION_TYPE: &str = "timeblock";

/// A row of the `study_sessions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub user_id: String,
    pub session_type: String,
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Planned duration in minutes
    pub duration_planned: i64,
    pub duration_actual: Option<i64>,
    pub start_time: String,
    pub end_time: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub notes: Option<String>,
    pub related_task_id: Option<String>,
}

/// Insert payload for the `study_sessions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudySession {
    pub user_id: String,
    pub session_type: String,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub duration_planned: i64,
    pub start_time: String,
    pub end_time: Option<String>,
    pub completed: bool,
}

/// A row of the `user_workouts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWorkout {
    pub id: String,
    pub user_id: String,
    pub exercise_name: String,
    pub workout_date: NaiveDate,
    pub sets: u32,
    pub completed: bool,
    pub duration_minutes: Option<u32>,
    pub video_url: Option<String>,
    /// JSON text, e.g. `{"setProgress":2}`
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_at: Option<String>,
}

/// Insert payload for the `user_workouts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserWorkout {
    pub user_id: String,
    pub exercise_name: String,
    pub workout_date: NaiveDate,
    pub sets: u32,
    pub completed: bool,
    pub duration_minutes: Option<u32>,
    pub video_url: Option<String>,
    pub notes: Option<String>,
}

/// Session issued by the identity service after sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
}

/// A task, calendar event or time block reduced to what the layout code needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    /// Unique within one day's item set
    pub id: String,
    pub title: String,
    /// Local calendar date the item belongs to
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Opaque display token
    pub color_tag: String,
}

impl ScheduledItem {
    pub fn start_minutes(&self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes().saturating_sub(self.start_minutes())
    }

    /// Half-open overlap: touching endpoints do not overlap
    pub fn overlaps(&self, other: &ScheduledItem) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Column assignment for one item in a day's overlap layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlacement {
    pub id: String,
    /// 0-based column index
    pub column: usize,
    /// Number of columns the item's overlap cluster is divided into
    pub total_columns: usize,
}

/// Column assignments for a day, in the order the items were supplied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumnLayout {
    pub placements: Vec<ColumnPlacement>,
}

impl DayColumnLayout {
    pub fn get(&self, id: &str) -> Option<&ColumnPlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }
}

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding cell before day 1
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A single cell of the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day_type: CalendarDayType,
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub items: Vec<ScheduledItem>,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn padding() -> Self {
        Self {
            day_type: CalendarDayType::PaddingBefore,
            day: 0,
            date: None,
            items: Vec::new(),
            is_today: false,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.day_type == CalendarDayType::PaddingBefore
    }
}

/// Seven-column month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Weekday of day 1, 0 = Sunday
    pub first_day_of_week: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn padding_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_padding()).count()
    }

    pub fn month_days(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|c| !c.is_padding())
    }

    /// Number of 7-cell rows needed to draw the grid
    pub fn row_count(&self) -> usize {
        (self.cells.len() + 6) / 7
    }
}

/// Hour row of the time-block grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: String,
    pub top_px: f64,
}

/// An item positioned inside the time-block grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedBlock {
    pub item: ScheduledItem,
    pub top_px: f64,
    pub height_px: f64,
    pub left_percent: f64,
    pub width_percent: f64,
    pub column: usize,
    pub total_columns: usize,
}

/// Render geometry for one day of the time-block view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlockGrid {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub blocks: Vec<PositionedBlock>,
    /// Items that fall entirely outside the visible window
    pub outside_window: Vec<ScheduledItem>,
    pub height_px: f64,
}

/// Top-level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveView {
    Tasks,
    Calendar,
    TimeBlock,
    Workout,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Tasks,
        ActiveView::Calendar,
        ActiveView::TimeBlock,
        ActiveView::Workout,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActiveView::Tasks => "Tasks",
            ActiveView::Calendar => "Calendar",
            ActiveView::TimeBlock => "Time Blocking",
            ActiveView::Workout => "Workout Tracker",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, start: (u32, u32), end: (u32, u32)) -> ScheduledItem {
        ScheduledItem {
            id: id.to_string(),
            title: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            color_tag: "bg-blue-100".to_string(),
        }
    }

    #[test]
    fn test_task_status_toggle() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
    }

    #[test]
    fn test_task_status_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"in_progress\"");
        let status: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn test_unknown_status_and_priority_still_parse() {
        let status: TaskStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, TaskStatus::Other);
        assert_eq!(status.toggled(), TaskStatus::Completed);

        let priority: TaskPriority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(priority, TaskPriority::Other);
        assert_eq!(priority.as_str(), "other");
    }

    #[test]
    fn test_task_patch_only_sends_present_fields() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Pending),
            completed_at: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "pending", "completed_at": null }));
    }

    #[test]
    fn test_task_filters_match() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "user_id": "u1",
            "title": "Read chapter 4",
            "description": null,
            "status": "pending",
            "priority": "high",
            "category": "reading",
            "subject": null,
            "due_date": null,
            "estimated_duration": null,
            "actual_duration": null,
            "created_at": "2025-06-01T00:00:00Z",
            "updated_at": "2025-06-01T00:00:00Z",
            "completed_at": null
        }))
        .unwrap();

        assert!(TaskFilters::default().matches(&task));
        let high = TaskFilters { priority: Some(TaskPriority::High), ..Default::default() };
        assert!(high.matches(&task));
        let other_category = TaskFilters { category: Some("math".into()), ..Default::default() };
        assert!(!other_category.matches(&task));
        // defaults fill in missing columns
        assert_eq!(task.difficulty_level, 1);
        assert_eq!(task.energy_required, "medium");
    }

    #[test]
    fn test_scheduled_item_overlap_is_half_open() {
        let a = item("a", (9, 0), (10, 0));
        let b = item("b", (10, 0), (11, 0));
        let c = item("c", (9, 30), (10, 30));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert_eq!(c.duration_minutes(), 60);
    }

    #[test]
    fn test_day_column_layout_lookup() {
        let layout = DayColumnLayout {
            placements: vec![ColumnPlacement { id: "a".into(), column: 1, total_columns: 2 }],
        };
        assert_eq!(layout.get("a").map(|p| p.column), Some(1));
        assert!(layout.get("missing").is_none());
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn test_month_grid_rows() {
        let mut cells = vec![CalendarCell::padding(); 3];
        cells.extend((1..=30).map(|day| CalendarCell {
            day_type: CalendarDayType::MonthDay,
            day,
            date: NaiveDate::from_ymd_opt(2025, 4, day),
            items: Vec::new(),
            is_today: false,
        }));
        let grid = MonthGrid { year: 2025, month: 4, first_day_of_week: 3, cells };
        assert_eq!(grid.padding_count(), 3);
        assert_eq!(grid.month_days().count(), 30);
        assert_eq!(grid.row_count(), 5);
    }
}
