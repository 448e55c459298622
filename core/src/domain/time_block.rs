//! Pixel geometry for the daily time-blocking grid.
//!
//! The application uses a single window policy, [`TimeWindow::WORKDAY`]:
//! thirteen hourly rows starting at 08:00 (labels 8:00 AM through 8:00 PM),
//! 48 px per hour. Items partially outside the window are clipped to it;
//! items entirely outside are listed separately so the view can mention them.

use chrono::NaiveDate;
use shared::{PositionedBlock, ScheduledItem, TimeBlockGrid, TimeSlot};

use super::date_utils::hour_label;
use super::overlap_layout::layout_columns;

const MINUTES_PER_HOUR: u32 = 60;

/// Visible hours of the time-block grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start_hour: u32,
    pub slot_count: u32,
    pub pixels_per_minute: f64,
}

impl TimeWindow {
    /// 08:00 start, 13 hourly slots, 0.8 px per minute
    pub const WORKDAY: TimeWindow = TimeWindow {
        start_hour: 8,
        slot_count: 13,
        pixels_per_minute: 0.8,
    };

    pub fn start_minutes(&self) -> u32 {
        self.start_hour * MINUTES_PER_HOUR
    }

    pub fn end_minutes(&self) -> u32 {
        (self.start_hour + self.slot_count).min(24) * MINUTES_PER_HOUR
    }

    pub fn slot_height_px(&self) -> f64 {
        f64::from(MINUTES_PER_HOUR) * self.pixels_per_minute
    }

    pub fn height_px(&self) -> f64 {
        f64::from(self.slot_count) * self.slot_height_px()
    }

    /// Minutes from the window start, negative before it
    pub fn minutes_since_start(&self, minutes_of_day: u32) -> i64 {
        i64::from(minutes_of_day) - i64::from(self.start_minutes())
    }

    pub fn slots(&self) -> Vec<TimeSlot> {
        (0..self.slot_count)
            .map(|index| TimeSlot {
                label: hour_label(self.start_hour + index),
                top_px: f64::from(index) * self.slot_height_px(),
            })
            .collect()
    }

    fn shows(&self, item: &ScheduledItem) -> bool {
        let (start, end) = (item.start_minutes(), item.end_minutes());
        let (window_start, window_end) = (self.start_minutes(), self.end_minutes());
        if start == end {
            (window_start..window_end).contains(&start)
        } else {
            start < window_end && end > window_start
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::WORKDAY
    }
}

/// Lay out `items` of `date` inside `window`.
///
/// Items dated on another day are ignored.
pub fn build_time_block_grid(date: NaiveDate, items: &[ScheduledItem], window: TimeWindow) -> TimeBlockGrid {
    let (visible, outside_window): (Vec<ScheduledItem>, Vec<ScheduledItem>) = items
        .iter()
        .filter(|item| item.date == date)
        .cloned()
        .partition(|item| window.shows(item));

    let layout = layout_columns(&visible);
    let window_start = window.start_minutes();
    let window_end = window.end_minutes();

    let blocks = visible
        .into_iter()
        .zip(layout.placements)
        .map(|(item, placement)| {
            let start = item.start_minutes().clamp(window_start, window_end);
            let end = item.end_minutes().clamp(window_start, window_end);
            let width_percent = 100.0 / placement.total_columns as f64;
            PositionedBlock {
                top_px: window.minutes_since_start(start) as f64 * window.pixels_per_minute,
                height_px: f64::from(end.saturating_sub(start)) * window.pixels_per_minute,
                left_percent: placement.column as f64 * width_percent,
                width_percent,
                column: placement.column,
                total_columns: placement.total_columns,
                item,
            }
        })
        .collect();

    TimeBlockGrid {
        date,
        slots: window.slots(),
        blocks,
        outside_window,
        height_px: window.height_px(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
    }

    fn item(id: &str, start: (u32, u32), end: (u32, u32)) -> ScheduledItem {
        ScheduledItem {
            id: id.to_string(),
            title: id.to_string(),
            date: day(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            color_tag: "bg-purple-100".to_string(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_workday_window_slots() {
        let window = TimeWindow::WORKDAY;
        let slots = window.slots();
        assert_eq!(slots.len(), 13);
        assert_eq!(slots[0].label, "8:00 AM");
        assert_eq!(slots[4].label, "12:00 PM");
        assert_eq!(slots[12].label, "8:00 PM");
        assert!(approx(slots[1].top_px, 48.0));
        assert!(approx(window.height_px(), 13.0 * 48.0));
    }

    #[test]
    fn test_two_hour_block_geometry() {
        let grid = build_time_block_grid(day(), &[item("study", (9, 0), (11, 0))], TimeWindow::WORKDAY);
        assert_eq!(grid.blocks.len(), 1);
        let block = &grid.blocks[0];
        assert!(approx(block.top_px, 48.0));
        assert!(approx(block.height_px, 96.0));
        assert!(approx(block.left_percent, 0.0));
        assert!(approx(block.width_percent, 100.0));
    }

    #[test]
    fn test_overlapping_blocks_split_width() {
        let items = vec![item("a", (9, 0), (10, 0)), item("b", (9, 30), (10, 30))];
        let grid = build_time_block_grid(day(), &items, TimeWindow::WORKDAY);
        let b = grid.blocks.iter().find(|blk| blk.item.id == "b").unwrap();
        assert_eq!((b.column, b.total_columns), (1, 2));
        assert!(approx(b.width_percent, 50.0));
        assert!(approx(b.left_percent, 50.0));
        assert!(approx(b.top_px, 72.0));
    }

    #[test]
    fn test_empty_day_is_valid_grid() {
        let grid = build_time_block_grid(day(), &[], TimeWindow::WORKDAY);
        assert!(grid.blocks.is_empty());
        assert!(grid.outside_window.is_empty());
        assert_eq!(grid.slots.len(), 13);
    }

    #[test]
    fn test_items_outside_window_are_listed() {
        let items = vec![
            item("early", (6, 0), (7, 30)),
            item("late", (21, 0), (22, 0)),
            item("edge", (7, 0), (8, 0)),
        ];
        let grid = build_time_block_grid(day(), &items, TimeWindow::WORKDAY);
        assert!(grid.blocks.is_empty());
        assert_eq!(grid.outside_window.len(), 3);
    }

    #[test]
    fn test_partially_visible_item_is_clipped() {
        let grid = build_time_block_grid(day(), &[item("morning", (7, 0), (9, 0))], TimeWindow::WORKDAY);
        let block = &grid.blocks[0];
        assert!(approx(block.top_px, 0.0));
        assert!(approx(block.height_px, 48.0));

        let grid = build_time_block_grid(day(), &[item("evening", (20, 30), (22, 0))], TimeWindow::WORKDAY);
        let block = &grid.blocks[0];
        assert!(approx(block.top_px, 12.5 * 48.0));
        assert!(approx(block.height_px, 24.0));
    }

    #[test]
    fn test_zero_duration_item_has_no_height() {
        let grid = build_time_block_grid(day(), &[item("marker", (10, 0), (10, 0))], TimeWindow::WORKDAY);
        assert_eq!(grid.blocks.len(), 1);
        assert!(approx(grid.blocks[0].top_px, 96.0));
        assert!(approx(grid.blocks[0].height_px, 0.0));
    }

    #[test]
    fn test_reversed_item_is_drawn_without_height() {
        let grid = build_time_block_grid(day(), &[item("reversed", (10, 0), (9, 0))], TimeWindow::WORKDAY);
        assert_eq!(grid.blocks.len(), 1);
        assert!(approx(grid.blocks[0].top_px, 96.0));
        assert!(approx(grid.blocks[0].height_px, 0.0));
    }

    #[test]
    fn test_other_days_are_ignored() {
        let mut tomorrow = item("tomorrow", (9, 0), (10, 0));
        tomorrow.date = day().succ_opt().unwrap();
        let grid = build_time_block_grid(day(), &[tomorrow], TimeWindow::WORKDAY);
        assert!(grid.blocks.is_empty());
        assert!(grid.outside_window.is_empty());
    }

    #[test]
    fn test_custom_window_start() {
        let window = TimeWindow { start_hour: 0, slot_count: 24, pixels_per_minute: 1.0 };
        let grid = build_time_block_grid(day(), &[item("a", (1, 15), (2, 0))], window);
        assert!(approx(grid.blocks[0].top_px, 75.0));
        assert!(approx(grid.blocks[0].height_px, 45.0));
        assert_eq!(window.end_minutes(), 24 * 60);
    }
}
