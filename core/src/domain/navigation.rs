//! Which view is showing and which day the time-block view is focused on.
//!
//! A calendar day click opens that day in the time-block view by dispatching
//! [`NavigationAction::OpenTimeBlock`].

use chrono::NaiveDate;
use shared::ActiveView;
use tracing::info;

use super::date_utils::shift_day;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub active_view: ActiveView,
    pub selected_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    ShowView(ActiveView),
    OpenTimeBlock(NaiveDate),
    SelectDate(NaiveDate),
    /// Move the selected date by whole days
    ShiftDate(i64),
}

impl Navigation {
    /// Tasks view, focused on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            active_view: ActiveView::Tasks,
            selected_date: today,
        }
    }

    pub fn apply(&self, action: NavigationAction) -> Self {
        let mut next = self.clone();
        match action {
            NavigationAction::ShowView(view) => next.active_view = view,
            NavigationAction::OpenTimeBlock(date) => {
                info!(date = %date, "opening time block view");
                next.active_view = ActiveView::TimeBlock;
                next.selected_date = date;
            }
            NavigationAction::SelectDate(date) => next.selected_date = date,
            NavigationAction::ShiftDate(days) => {
                if let Some(date) = shift_day(self.selected_date, days) {
                    next.selected_date = date;
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_starts_on_tasks() {
        let nav = Navigation::new(date(2026, 10, 19));
        assert_eq!(nav.active_view, ActiveView::Tasks);
        assert_eq!(nav.selected_date, date(2026, 10, 19));
    }

    #[test]
    fn test_open_time_block_switches_view_and_date() {
        let nav = Navigation::new(date(2026, 10, 19)).apply(NavigationAction::ShowView(ActiveView::Calendar));
        let nav = nav.apply(NavigationAction::OpenTimeBlock(date(2026, 10, 3)));
        assert_eq!(nav.active_view, ActiveView::TimeBlock);
        assert_eq!(nav.selected_date, date(2026, 10, 3));
    }

    #[test]
    fn test_select_date_keeps_view() {
        let nav = Navigation::new(date(2026, 10, 19))
            .apply(NavigationAction::ShowView(ActiveView::Workout))
            .apply(NavigationAction::SelectDate(date(2026, 1, 1)));
        assert_eq!(nav.active_view, ActiveView::Workout);
        assert_eq!(nav.selected_date, date(2026, 1, 1));
    }

    #[test]
    fn test_shift_date_crosses_month_and_year() {
        let nav = Navigation::new(date(2025, 12, 31)).apply(NavigationAction::ShiftDate(1));
        assert_eq!(nav.selected_date, date(2026, 1, 1));
        let nav = nav.apply(NavigationAction::ShiftDate(-1));
        assert_eq!(nav.selected_date, date(2025, 12, 31));
    }
}
