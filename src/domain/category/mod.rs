//! Category aggregate
//!
//! Categories are activated independently of stores; stores only hold
//! a reference to them.

pub mod model;
pub mod repository;

pub use model::{Category, CategoryRef, CategoryStatus};
pub use repository::CategoryRepository;
