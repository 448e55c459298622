//! Sign-in against the identity service and session persistence.

use gloo::storage::{LocalStorage, Storage};
use planner_core::storage::rest::password_sign_in;
use planner_core::PlannerConfig;
use shared::UserSession;
use tracing::{error, info};

use super::api::GlooTransport;

const SESSION_KEY: &str = "planner.session";
const DEMO_USER_ID: &str = "demo-user";

pub fn load_session() -> Option<UserSession> {
    LocalStorage::get(SESSION_KEY).ok()
}

fn save_session(session: &UserSession) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
        error!(error = %e, "failed to persist session");
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}

/// Password sign-in. Without a configured service any credentials open a demo session.
pub async fn sign_in(config: Option<&PlannerConfig>, email: &str, password: &str) -> Result<UserSession, String> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    let session = match config {
        Some(config) => password_sign_in(&GlooTransport, config, email, password)
            .await
            .map_err(|e| {
                error!(error = %e, "sign-in failed");
                format!("Failed to sign in: {}", e)
            })?,
        None => UserSession {
            user_id: DEMO_USER_ID.to_string(),
            email: Some(email.to_string()),
            access_token: String::new(),
        },
    };

    info!(user_id = %session.user_id, "signed in");
    save_session(&session);
    Ok(session)
}
