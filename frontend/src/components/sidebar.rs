use planner_core::domain::NavigationAction;
use shared::ActiveView;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_navigation::use_navigation;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub email: Option<String>,
    pub on_sign_out: Callback<()>,
}

fn view_icon(view: ActiveView) -> &'static str {
    match view {
        ActiveView::Tasks => "✅",
        ActiveView::Calendar => "📅",
        ActiveView::TimeBlock => "⏱️",
        ActiveView::Workout => "💪",
    }
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let navigation = use_navigation();
    let active = navigation.state.active_view;

    let on_sign_out = {
        let on_sign_out = props.on_sign_out.clone();
        Callback::from(move |_: MouseEvent| on_sign_out.emit(()))
    };

    html! {
        <nav class="sidebar">
            <div class="sidebar-brand">{"Planner"}</div>
            <ul class="sidebar-links">
                {for ActiveView::ALL.into_iter().map(|view| {
                    let dispatch = navigation.dispatch.clone();
                    let class = if view == active { "sidebar-link active" } else { "sidebar-link" };
                    html! {
                        <li>
                            <button
                                class={class}
                                onclick={Callback::from(move |_: MouseEvent| {
                                    dispatch.emit(NavigationAction::ShowView(view));
                                })}
                            >
                                <span class="sidebar-icon">{view_icon(view)}</span>
                                {view.title()}
                            </button>
                        </li>
                    }
                })}
            </ul>
            <div class="sidebar-footer">
                {if let Some(email) = props.email.clone() {
                    html! { <div class="sidebar-user">{email}</div> }
                } else {
                    html! {}
                }}
                <button class="btn btn-secondary" onclick={on_sign_out}>{"Sign out"}</button>
            </div>
        </nav>
    }
}
