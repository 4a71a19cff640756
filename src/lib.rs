//! # Store Service
//!
//! Store registry: stores move through a pending / active / block / disable
//! lifecycle, each owns a zero-balance account created with it, and listings
//! come back with their categories resolved.
//!
//! ## Architecture
//!
//! - **domain**: entities, lifecycle rules, repository traits, errors
//! - **application**: services (store orchestrator, category, account) and
//!   the category enricher
//! - **infrastructure**: SeaORM persistence and the in-memory backend
//! - **interfaces**: REST API
//! - **shared**: pagination, deadlines, identifier parsing, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

pub use interfaces::http::create_api_router;
