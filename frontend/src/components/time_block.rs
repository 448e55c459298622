use planner_core::domain::date_utils::to_clock_label;
use shared::{PositionedBlock, ScheduledItem};
use web_sys::MouseEvent;
use yew::prelude::*;

use super::new_time_block_modal::NewTimeBlockModal;
use crate::hooks::use_time_block_view::use_time_block_view;
use crate::hooks::PlannerContext;

#[derive(Properties, PartialEq)]
pub struct TimeBlockViewProps {
    pub context: PlannerContext,
}

fn time_range(item: &ScheduledItem) -> String {
    format!("{} - {}", to_clock_label(item.start), to_clock_label(item.end))
}

fn block_view(block: &PositionedBlock) -> Html {
    let style = format!(
        "top: {:.1}px; height: {:.1}px; left: {:.2}%; width: {:.2}%;",
        block.top_px, block.height_px, block.left_percent, block.width_percent
    );
    html! {
        <div
            class={format!("time-block {}", block.item.color_tag)}
            style={style}
            title={format!("{}\n{}", block.item.title, time_range(&block.item))}
        >
            <div class="time-block-title">{&block.item.title}</div>
            <div class="time-block-time">{time_range(&block.item)}</div>
        </div>
    }
}

#[function_component(TimeBlockView)]
pub fn time_block_view(props: &TimeBlockViewProps) -> Html {
    let view = use_time_block_view(&props.context);
    let show_modal = use_state(|| false);
    let state = &view.state;
    let grid = &state.grid;

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: ()| show_modal.set(false))
    };

    html! {
        <section class="view time-block-view">
            <header class="view-header">
                <div class="day-nav">
                    <button class="btn btn-icon" onclick={view.actions.prev_day.clone()}>{"‹"}</button>
                    <h2 class="day-title">{&state.title}</h2>
                    <button class="btn btn-icon" onclick={view.actions.next_day.clone()}>{"›"}</button>
                </div>
                <button class="btn btn-primary" onclick={open_modal}>{"+ New Block"}</button>
            </header>

            {if let Some(error) = state.error.clone() {
                html! { <div class="view-error">{error}</div> }
            } else if state.is_loading {
                html! { <div class="view-loading">{"Loading time blocks..."}</div> }
            } else {
                html! {}
            }}

            {if let Some(notice) = state.notice.clone() {
                html! { <div class="view-notice">{notice}</div> }
            } else {
                html! {}
            }}

            <div class="time-grid" style={format!("height: {:.1}px;", grid.height_px)}>
                <div class="time-labels">
                    {for grid.slots.iter().map(|slot| html! {
                        <div class="time-label" style={format!("top: {:.1}px;", slot.top_px)}>
                            {&slot.label}
                        </div>
                    })}
                </div>
                <div class="time-blocks">
                    {for grid.slots.iter().map(|slot| html! {
                        <div class="time-slot-line" style={format!("top: {:.1}px;", slot.top_px)}></div>
                    })}
                    {for grid.blocks.iter().map(block_view)}
                </div>
            </div>

            {if grid.outside_window.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="outside-window">
                        <h3>{"Outside working hours"}</h3>
                        <ul>
                            {for grid.outside_window.iter().map(|item| html! {
                                <li class={item.color_tag.clone()}>
                                    {format!("{} · {}", item.title, time_range(item))}
                                </li>
                            })}
                        </ul>
                    </div>
                }
            }}

            <NewTimeBlockModal
                is_open={*show_modal}
                day_title={state.title.clone()}
                on_submit={view.actions.create_block.clone()}
                on_close={close_modal}
            />
        </section>
    }
}
