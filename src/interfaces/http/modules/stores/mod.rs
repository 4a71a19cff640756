//! Store management REST API

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
