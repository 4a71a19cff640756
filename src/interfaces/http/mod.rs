//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: request handlers and DTOs per resource
//! - `router`: API router and shared state

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
