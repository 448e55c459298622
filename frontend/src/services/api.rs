//! Data-service access for the browser build.
//!
//! [`GlooTransport`] carries the core REST store's requests over `fetch`.
//! Without compile-time credentials the app runs against an in-memory demo
//! store instead.

use std::ops::Deref;
use std::rc::Rc;

use anyhow::anyhow;
use async_trait::async_trait;
use gloo::net::http::Request;
use planner_core::config::{ANON_KEY_KEY, DATA_URL_KEY};
use planner_core::storage::{HttpMethod, HttpTransport, MemoryStore, RestRequest, RestResponse, RestStore};
use planner_core::{ConfigError, PlannerConfig, PlannerStore};
use shared::UserSession;
use tracing::{info, warn};

/// `fetch`-backed transport
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: RestRequest) -> anyhow::Result<RestResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Patch => Request::patch(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| anyhow!("Failed to build request: {}", e))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| anyhow!("Request failed: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response: {}", e))?;
        Ok(RestResponse { status, body })
    }
}

/// Credentials baked in at build time
pub fn planner_config() -> Result<PlannerConfig, ConfigError> {
    PlannerConfig::from_lookup(|key| match key {
        DATA_URL_KEY => option_env!("PLANNER_DATA_URL").map(str::to_string),
        ANON_KEY_KEY => option_env!("PLANNER_DATA_ANON_KEY").map(str::to_string),
        _ => None,
    })
}

/// Shared handle to whichever store the app runs against
#[derive(Clone)]
pub struct StoreHandle(Rc<dyn PlannerStore>);

impl StoreHandle {
    /// Hosted store for `session`, or the demo store when unconfigured
    pub fn connect(config: Option<&PlannerConfig>, session: &UserSession) -> Self {
        match config {
            Some(config) => {
                info!(user_id = %session.user_id, "connecting to data service");
                let store = RestStore::new(config.clone(), GlooTransport).with_session(session);
                Self(Rc::new(store))
            }
            None => {
                warn!("no data service configured, using in-memory demo store");
                Self(Rc::new(MemoryStore::new()))
            }
        }
    }
}

impl Deref for StoreHandle {
    type Target = dyn PlannerStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
