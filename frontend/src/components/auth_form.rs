use planner_core::PlannerConfig;
use shared::UserSession;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::auth::sign_in;

#[derive(Properties, PartialEq)]
pub struct AuthFormProps {
    pub config: Option<PlannerConfig>,
    pub on_signed_in: Callback<UserSession>,
}

#[function_component(AuthForm)]
pub fn auth_form(props: &AuthFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let config = props.config.clone();
        let on_signed_in = props.on_signed_in.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            is_submitting.set(true);
            error_message.set(None);

            let email = (*email).clone();
            let password = (*password).clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let config = config.clone();
            let on_signed_in = on_signed_in.clone();

            spawn_local(async move {
                match sign_in(config.as_ref(), &email, &password).await {
                    Ok(session) => on_signed_in.emit(session),
                    Err(e) => {
                        is_submitting.set(false);
                        error_message.set(Some(e));
                    }
                }
            });
        })
    };

    html! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-title">{"Planner"}</h1>
                {if props.config.is_none() {
                    html! {
                        <p class="auth-hint">
                            {"No data service configured. Any email and password open a demo session kept in memory."}
                        </p>
                    }
                } else {
                    html! {}
                }}

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="auth-error">{error}</div> }
                } else {
                    html! {}
                }}

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="auth-email">{"Email"}</label>
                        <input
                            id="auth-email"
                            type="email"
                            value={(*email).clone()}
                            onchange={on_email_change}
                            disabled={*is_submitting}
                            autofocus=true
                        />
                    </div>
                    <div class="form-group">
                        <label for="auth-password">{"Password"}</label>
                        <input
                            id="auth-password"
                            type="password"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*is_submitting}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
