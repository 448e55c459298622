mod components;
mod hooks;
mod services;

use planner_core::domain::TimeWindow;
use shared::{ActiveView, UserSession};
use tracing::{info, warn};
use yew::prelude::*;

use components::{AuthForm, CalendarView, Sidebar, TaskList, TimeBlockView, WorkoutView};
use hooks::use_navigation::{use_navigation_provider, NavigationContext};
use hooks::PlannerContext;
use services::api::{planner_config, StoreHandle};
use services::auth::{clear_session, load_session};
use services::logging::init_logging;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| match planner_config() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "data service not configured");
            None
        }
    });
    let session = use_state(load_session);
    let navigation = use_navigation_provider();

    let context = use_memo(((*session).clone(), (*config).clone()), |(session, config)| {
        session.as_ref().map(|session| PlannerContext {
            session: session.clone(),
            store: StoreHandle::connect(config.as_ref(), session),
            window: config.as_ref().map_or(TimeWindow::WORKDAY, |config| config.window),
        })
    });

    let on_signed_in = {
        let session = session.clone();
        Callback::from(move |signed_in: UserSession| session.set(Some(signed_in)))
    };

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_: ()| {
            info!("signing out");
            clear_session();
            session.set(None);
        })
    };

    let Some(context) = (*context).clone() else {
        return html! {
            <AuthForm config={(*config).clone()} on_signed_in={on_signed_in} />
        };
    };

    let view = match navigation.state.active_view {
        ActiveView::Tasks => html! { <TaskList context={context.clone()} /> },
        ActiveView::Calendar => html! { <CalendarView context={context.clone()} /> },
        ActiveView::TimeBlock => html! { <TimeBlockView context={context.clone()} /> },
        ActiveView::Workout => html! { <WorkoutView context={context.clone()} /> },
    };

    html! {
        <ContextProvider<NavigationContext> context={navigation}>
            <div class="app">
                <Sidebar email={context.session.email.clone()} on_sign_out={on_sign_out} />
                <main class="content">
                    {view}
                </main>
            </div>
        </ContextProvider<NavigationContext>>
    }
}

fn main() {
    init_logging();
    info!("starting planner frontend");
    yew::Renderer::<App>::new().render();
}
