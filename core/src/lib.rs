//! # Planner Core
//!
//! UI-agnostic domain and storage layer for the planner dashboard.
//!
//! - [`domain`]: date arithmetic, layout engines and the per-view controllers
//! - [`storage`]: the [`storage::PlannerStore`] data-access trait with an
//!   in-memory and a REST implementation
//! - [`config`]: data-service endpoint and credentials
//!
//! The frontend owns rendering and async scheduling; everything it shows is
//! computed here.

pub mod config;
pub mod domain;
pub mod storage;

pub use config::{ConfigError, PlannerConfig};
pub use domain::errors::{ActionError, ValidationError};
pub use storage::PlannerStore;
