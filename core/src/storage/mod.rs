//! # Storage Layer
//!
//! Data access for the planner. Controllers depend only on the
//! [`PlannerStore`] trait; the concrete store is chosen by the host.
//!
//! - [`MemoryStore`]: in-process rows, used by tests and the demo mode
//! - [`RestStore`]: the hosted data service over any [`HttpTransport`]

pub mod memory;
pub mod rest;
pub mod traits;

pub use memory::MemoryStore;
pub use rest::{HttpMethod, HttpTransport, RestError, RestRequest, RestResponse, RestStore};
pub use traits::PlannerStore;
