use std::rc::Rc;

use planner_core::domain::{Navigation, NavigationAction};
use tracing::warn;
use yew::prelude::*;

use crate::services::date_utils::today;

#[derive(Clone, PartialEq)]
struct NavigationState(Navigation);

impl Reducible for NavigationState {
    type Action = NavigationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(NavigationState(self.0.apply(action)))
    }
}

/// Shared view selection, provided once by the app shell
#[derive(Clone, PartialEq)]
pub struct NavigationContext {
    pub state: Navigation,
    pub dispatch: Callback<NavigationAction>,
}

/// Owns the navigation state; call once at the top of the tree
#[hook]
pub fn use_navigation_provider() -> NavigationContext {
    let reducer = use_reducer(|| NavigationState(Navigation::new(today())));
    let dispatch = {
        let reducer = reducer.clone();
        use_callback((), move |action: NavigationAction, _| reducer.dispatch(action))
    };

    NavigationContext {
        state: reducer.0.clone(),
        dispatch,
    }
}

#[hook]
pub fn use_navigation() -> NavigationContext {
    use_context::<NavigationContext>().unwrap_or_else(|| {
        warn!("navigation requested outside its provider");
        NavigationContext {
            state: Navigation::new(today()),
            dispatch: Callback::noop(),
        }
    })
}
