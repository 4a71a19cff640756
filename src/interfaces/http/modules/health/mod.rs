//! Service health endpoint

mod handlers;

pub use handlers::{health_check, ComponentHealth, HealthResponse, HealthState};
