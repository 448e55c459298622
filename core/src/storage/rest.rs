//! Store backed by the hosted data service's REST interface.
//!
//! Tables live under `{data_url}/rest/v1/{table}`. Filters are query pairs of
//! the form `column=eq.value` (`gte.`/`lte.` for ranges) and ordering is
//! `order=column.asc`. Writes ask for `Prefer: return=representation` and
//! read the first returned row.
//!
//! HTTP itself is delegated to an [`HttpTransport`] so the request shaping
//! here runs natively in tests while the browser build plugs in `gloo`.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::{
    CalendarEvent, NewCalendarEvent, NewStudySession, NewTask, NewUserWorkout, StudySession, Task,
    TaskFilters, TaskPatch, UserSession, UserWorkout,
};
use tracing::{debug, error};
use url::Url;

use super::traits::PlannerStore;
use crate::config::PlannerConfig;
use crate::domain::date_utils::to_date_key;

const TASKS: &str = "tasks";
const CALENDAR_EVENTS: &str = "calendar_events";
const STUDY_SESSIONS: &str = "study_sessions";
const USER_WORKOUTS: &str = "user_workouts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<String>,
}

impl RestRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response, whatever its status
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: RestRequest) -> Result<RestResponse>;
}

/// Non-2xx answer from the data service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("data service returned {status}: {body}")]
pub struct RestError {
    pub status: u16,
    pub body: String,
}

pub struct RestStore<T: HttpTransport> {
    config: PlannerConfig,
    transport: T,
    access_token: Option<String>,
}

impl<T: HttpTransport> RestStore<T> {
    pub fn new(config: PlannerConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            access_token: None,
        }
    }

    /// Authorize requests as a signed-in user instead of the anonymous key
    pub fn with_session(mut self, session: &UserSession) -> Self {
        self.access_token = Some(session.access_token.clone());
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, table: &str, params: &[(&str, String)]) -> Result<String> {
        let mut url = Url::parse(&self.config.table_url(table))
            .with_context(|| format!("invalid table URL for {}", table))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    fn headers(&self, returning: bool) -> Vec<(String, String)> {
        let bearer = self.access_token.as_deref().unwrap_or(&self.config.anon_key);
        let mut headers = vec![
            ("apikey".to_string(), self.config.anon_key.clone()),
            ("Authorization".to_string(), format!("Bearer {}", bearer)),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if returning {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            headers.push(("Prefer".to_string(), "return=representation".to_string()));
        }
        headers
    }

    async fn execute(&self, request: RestRequest) -> Result<String> {
        debug!(method = request.method.as_str(), url = %request.url, "data service request");
        let method = request.method;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            error!(method = method.as_str(), status = response.status, "data service request failed");
            return Err(RestError {
                status: response.status,
                body: response.body,
            }
            .into());
        }
        Ok(response.body)
    }

    async fn select<R: DeserializeOwned>(&self, table: &str, params: &[(&str, String)]) -> Result<Vec<R>> {
        let request = RestRequest {
            method: HttpMethod::Get,
            url: self.url(table, params)?,
            headers: self.headers(false),
            body: None,
        };
        let body = self.execute(request).await?;
        serde_json::from_str(&body).with_context(|| format!("failed to parse {} rows", table))
    }

    async fn write_one<P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        table: &str,
        params: &[(&str, String)],
        payload: &P,
    ) -> Result<R> {
        let request = RestRequest {
            method,
            url: self.url(table, params)?,
            headers: self.headers(true),
            body: Some(serde_json::to_string(payload)?),
        };
        let body = self.execute(request).await?;
        let mut rows: Vec<R> =
            serde_json::from_str(&body).with_context(|| format!("failed to parse {} row", table))?;
        if rows.is_empty() {
            return Err(anyhow!("no {} row returned", table));
        }
        Ok(rows.swap_remove(0))
    }

    async fn insert<P: Serialize + ?Sized, R: DeserializeOwned>(&self, table: &str, payload: &P) -> Result<R> {
        self.write_one(HttpMethod::Post, table, &[], payload).await
    }

    async fn update<P: Serialize + ?Sized, R: DeserializeOwned>(&self, table: &str, id: &str, payload: &P) -> Result<R> {
        self.write_one(HttpMethod::Patch, table, &[("id", eq(id))], payload).await
    }

    async fn remove(&self, table: &str, id: &str) -> Result<()> {
        let request = RestRequest {
            method: HttpMethod::Delete,
            url: self.url(table, &[("id", eq(id))])?,
            headers: self.headers(false),
            body: None,
        };
        self.execute(request).await.map(|_| ())
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

#[async_trait(?Send)]
impl<T: HttpTransport> PlannerStore for RestStore<T> {
    async fn get_tasks(&self, user_id: &str, filters: Option<&TaskFilters>) -> Result<Vec<Task>> {
        let mut params = vec![("select", "*".to_string()), ("user_id", eq(user_id))];
        if let Some(filters) = filters {
            if let Some(status) = filters.status {
                params.push(("status", eq(status.as_str())));
            }
            if let Some(priority) = filters.priority {
                params.push(("priority", eq(priority.as_str())));
            }
            if let Some(category) = &filters.category {
                params.push(("category", eq(category)));
            }
            if let Some(subject) = &filters.subject {
                params.push(("subject", eq(subject)));
            }
        }
        params.push(("order", "due_date.asc.nullslast".to_string()));
        self.select(TASKS, &params).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.insert(TASKS, task).await
    }

    async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        self.update(TASKS, task_id, patch).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.remove(TASKS, task_id).await
    }

    async fn get_calendar_events(&self, user_id: &str) -> Result<Vec<CalendarEvent>> {
        let params = [
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "start_time.asc".to_string()),
        ];
        self.select(CALENDAR_EVENTS, &params).await
    }

    async fn create_calendar_event(&self, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        self.insert(CALENDAR_EVENTS, event).await
    }

    async fn get_study_sessions(&self, user_id: &str, session_type: Option<&str>) -> Result<Vec<StudySession>> {
        let mut params = vec![("select", "*".to_string()), ("user_id", eq(user_id))];
        if let Some(session_type) = session_type {
            params.push(("session_type", eq(session_type)));
        }
        params.push(("order", "start_time.desc".to_string()));
        self.select(STUDY_SESSIONS, &params).await
    }

    async fn create_study_session(&self, session: &NewStudySession) -> Result<StudySession> {
        self.insert(STUDY_SESSIONS, session).await
    }

    async fn get_user_workouts_for_week(
        &self,
        user_id: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<Vec<UserWorkout>> {
        let params = [
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("workout_date", format!("gte.{}", to_date_key(week_start))),
            ("workout_date", format!("lte.{}", to_date_key(week_end))),
            ("order", "workout_date.asc".to_string()),
        ];
        self.select(USER_WORKOUTS, &params).await
    }

    async fn create_user_workout(&self, workout: &NewUserWorkout) -> Result<UserWorkout> {
        self.insert(USER_WORKOUTS, workout).await
    }

    async fn complete_user_workout(&self, workout_id: &str) -> Result<UserWorkout> {
        let payload = json!({ "completed": true, "completed_at": Utc::now().to_rfc3339() });
        self.update(USER_WORKOUTS, workout_id, &payload).await
    }

    async fn update_user_workout_progress(&self, workout_id: &str, set_count: u32, notes: &str) -> Result<UserWorkout> {
        debug!(workout_id, set_count, "saving workout progress");
        let payload = json!({ "notes": notes, "updated_at": Utc::now().to_rfc3339() });
        self.update(USER_WORKOUTS, workout_id, &payload).await
    }

    async fn delete_user_workout(&self, workout_id: &str) -> Result<()> {
        self.remove(USER_WORKOUTS, workout_id).await
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

/// Exchange an email and password for a session with the identity service
pub async fn password_sign_in<T: HttpTransport>(
    transport: &T,
    config: &PlannerConfig,
    email: &str,
    password: &str,
) -> Result<UserSession> {
    let request = RestRequest {
        method: HttpMethod::Post,
        url: config.auth_url("token?grant_type=password"),
        headers: vec![
            ("apikey".to_string(), config.anon_key.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ],
        body: Some(json!({ "email": email, "password": password }).to_string()),
    };

    let response = transport.send(request).await?;
    if !response.is_success() {
        error!(status = response.status, "sign-in rejected");
        return Err(RestError {
            status: response.status,
            body: response.body,
        }
        .into());
    }

    let token: TokenResponse = serde_json::from_str(&response.body).context("failed to parse sign-in response")?;
    Ok(UserSession {
        user_id: token.user.id,
        email: token.user.email,
        access_token: token.access_token,
    })
}
