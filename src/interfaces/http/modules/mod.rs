//! REST API modules, one per resource

pub mod accounts;
pub mod categories;
pub mod health;
pub mod stores;
