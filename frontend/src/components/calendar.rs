use chrono::NaiveDate;
use planner_core::domain::date_utils::to_clock_label;
use shared::{CalendarCell, ScheduledItem};
use web_sys::MouseEvent;
use yew::prelude::*;

use super::new_event_modal::NewEventModal;
use crate::hooks::use_calendar_view::use_calendar_view;
use crate::hooks::PlannerContext;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Properties, PartialEq)]
pub struct CalendarViewProps {
    pub context: PlannerContext,
}

fn item_chip(item: &ScheduledItem) -> Html {
    let tooltip = format!(
        "{}\n{} - {}",
        item.title,
        to_clock_label(item.start),
        to_clock_label(item.end)
    );
    html! {
        <div class={format!("calendar-item {}", item.color_tag)} title={tooltip}>
            <span class="calendar-item-time">{to_clock_label(item.start)}</span>
            <span class="calendar-item-title">{&item.title}</span>
        </div>
    }
}

fn day_cell(cell: &CalendarCell, on_open_day: &Callback<NaiveDate>) -> Html {
    let Some(date) = cell.date else {
        return html! { <div class="calendar-day empty"></div> };
    };

    let onclick = {
        let on_open_day = on_open_day.clone();
        Callback::from(move |_: MouseEvent| on_open_day.emit(date))
    };
    let class = if cell.is_today { "calendar-day today" } else { "calendar-day" };

    html! {
        <div class={class} onclick={onclick}>
            <div class="day-header">
                <div class="day-number">{cell.day}</div>
            </div>
            <div class="day-items">
                {for cell.items.iter().map(item_chip)}
            </div>
        </div>
    }
}

#[function_component(CalendarView)]
pub fn calendar_view(props: &CalendarViewProps) -> Html {
    let view = use_calendar_view(&props.context);
    let show_modal = use_state(|| false);
    let state = &view.state;

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    html! {
        <section class="view calendar-view">
            <header class="view-header">
                <div class="month-nav">
                    <button class="btn btn-icon" onclick={view.actions.prev_month.clone()}>{"‹"}</button>
                    <h2 class="month-title">{&state.month_title}</h2>
                    <button class="btn btn-icon" onclick={view.actions.next_month.clone()}>{"›"}</button>
                </div>
                <button class="btn btn-primary" onclick={open_modal}>{"+ New Event"}</button>
            </header>

            {if let Some(error) = state.error.clone() {
                html! { <div class="view-error">{error}</div> }
            } else if state.is_loading {
                html! { <div class="view-loading">{"Loading events..."}</div> }
            } else {
                html! {}
            }}

            {if let Some(notice) = state.notice.clone() {
                html! { <div class="view-notice">{notice}</div> }
            } else {
                html! {}
            }}

            <div class="calendar">
                <div class="calendar-weekdays">
                    {for WEEKDAYS.into_iter().map(|day| html! { <div class="weekday">{day}</div> })}
                </div>
                <div class="calendar-grid">
                    {for state.grid.cells.iter().map(|cell| day_cell(cell, &view.actions.open_day))}
                </div>
            </div>

            <NewEventModal
                is_open={*show_modal}
                on_submit={view.actions.create_event.clone()}
                on_close={close_modal}
            />
        </section>
    }
}
