//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::account::AccountRepository;
use super::category::CategoryRepository;
use super::store::StoreRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let store = repos.stores().get_by_id(id).await?;
///     let category = repos.categories().get_by_id(category_id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn stores(&self) -> &dyn StoreRepository;
    fn categories(&self) -> &dyn CategoryRepository;
    fn accounts(&self) -> &dyn AccountRepository;
}
