//! Calendar domain logic for the planner.
//!
//! Builds the seven-column month grid the calendar view renders and handles
//! month-to-month navigation. The view only draws the cells; deciding which
//! cell is padding, which items belong to which day and which day is today
//! all happens here.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use shared::{CalendarCell, CalendarDayType, MonthGrid, ScheduledItem};
use tracing::debug;

use super::date_utils::{days_in_month, first_weekday_of_month, month_name, shift_month};

/// The month currently shown by the calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Cursor for the month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day 1 of the displayed month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Move forward one month; always lands on day 1 so no day overflow can occur
    pub fn next(self) -> Self {
        shift_month(self.year, self.month, 1).map(Self::containing).unwrap_or(self)
    }

    pub fn previous(self) -> Self {
        shift_month(self.year, self.month, -1).map(Self::containing).unwrap_or(self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month), self.year)
    }
}

/// Generate the month grid for `cursor`.
///
/// `today` is the real current date, captured by the caller at render time.
pub fn build_month_grid(cursor: MonthCursor, items: &[ScheduledItem], today: NaiveDate) -> MonthGrid {
    let days = days_in_month(cursor.year, cursor.month);
    let first_day = first_weekday_of_month(cursor.year, cursor.month);
    let mut items_by_day = group_items_by_day(cursor, items);

    let mut cells = Vec::with_capacity((first_day + days) as usize);
    cells.extend((0..first_day).map(|_| CalendarCell::padding()));

    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day);
        cells.push(CalendarCell {
            day_type: CalendarDayType::MonthDay,
            day,
            date,
            items: items_by_day.remove(&day).unwrap_or_default(),
            is_today: date == Some(today),
        });
    }

    debug!(
        month = %cursor,
        padding = first_day,
        days,
        items = items.len(),
        "built month grid"
    );

    MonthGrid {
        year: cursor.year,
        month: cursor.month,
        first_day_of_week: first_day,
        cells,
    }
}

/// Group items by day of month, keeping only those inside `cursor`'s month.
/// Items of one day keep their relative order.
fn group_items_by_day(cursor: MonthCursor, items: &[ScheduledItem]) -> HashMap<u32, Vec<ScheduledItem>> {
    let mut by_day: HashMap<u32, Vec<ScheduledItem>> = HashMap::new();
    for item in items.iter().filter(|item| cursor.contains(item.date)) {
        by_day.entry(item.date.day()).or_default().push(item.clone());
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: &str, on: NaiveDate, start_hour: u32) -> ScheduledItem {
        ScheduledItem {
            id: id.to_string(),
            title: format!("Event {}", id),
            date: on,
            start: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(start_hour + 1, 0, 0).unwrap(),
            color_tag: "bg-green-100".to_string(),
        }
    }

    #[test]
    fn test_thirty_day_month_starting_wednesday() {
        // April 2026: 30 days, day 1 is a Wednesday
        let cursor = MonthCursor::new(2026, 4).unwrap();
        let grid = build_month_grid(cursor, &[], date(2026, 4, 10));

        assert_eq!(grid.first_day_of_week, 3);
        assert_eq!(grid.cells.len(), 33);
        assert!(grid.cells[..3].iter().all(|c| c.is_padding()));
        assert!(grid.cells[3..].iter().all(|c| !c.is_padding()));
        assert_eq!(grid.cells[3].day, 1);
        assert_eq!(grid.cells[32].day, 30);
    }

    #[test]
    fn test_month_starting_sunday_has_no_padding() {
        let grid = build_month_grid(MonthCursor::new(2025, 6).unwrap(), &[], date(2025, 6, 1));
        assert_eq!(grid.padding_count(), 0);
        assert_eq!(grid.month_days().count(), 30);
    }

    #[test]
    fn test_empty_items_give_structurally_valid_grid() {
        let grid = build_month_grid(MonthCursor::new(2024, 2).unwrap(), &[], date(2030, 1, 1));
        assert_eq!(grid.month_days().count(), 29);
        assert!(grid.cells.iter().all(|c| c.items.is_empty()));
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_items_bucketed_by_day() {
        let items = vec![
            item("a", date(2025, 6, 1), 9),
            item("b", date(2025, 6, 1), 15),
            item("c", date(2025, 6, 15), 12),
            item("other-month", date(2025, 5, 30), 12),
        ];
        let grid = build_month_grid(MonthCursor::new(2025, 6).unwrap(), &items, date(2025, 6, 20));

        let day = |d: u32| grid.month_days().find(|c| c.day == d).unwrap();
        let ids: Vec<&str> = day(1).items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(day(15).items.len(), 1);
        assert!(day(30).items.is_empty());
    }

    #[test]
    fn test_today_flag() {
        let grid = build_month_grid(MonthCursor::new(2025, 6).unwrap(), &[], date(2025, 6, 13));
        let today: Vec<u32> = grid.cells.iter().filter(|c| c.is_today).map(|c| c.day).collect();
        assert_eq!(today, vec![13]);

        let other = build_month_grid(MonthCursor::new(2025, 7).unwrap(), &[], date(2025, 6, 13));
        assert!(other.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_navigation() {
        let december = MonthCursor::new(2025, 12).unwrap();
        let january = december.next();
        assert_eq!((january.year(), january.month()), (2026, 1));
        assert_eq!(january.first_day(), date(2026, 1, 1));
        assert_eq!(january.previous(), december);

        // navigating from a 31st never overflows
        let from_31st = MonthCursor::containing(date(2025, 1, 31)).next();
        assert_eq!(from_31st.first_day(), date(2025, 2, 1));
    }

    #[test]
    fn test_cursor_display() {
        assert_eq!(MonthCursor::new(2026, 10).unwrap().to_string(), "October 2026");
        assert!(MonthCursor::new(2026, 13).is_none());
    }
}
