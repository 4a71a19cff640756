//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod account_repository;
pub mod category_repository;
pub mod repository_provider;
pub mod store_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use log::error;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::from(e)
}
