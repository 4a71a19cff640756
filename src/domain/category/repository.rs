//! Category repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Category, CategoryStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Category>>;

    /// Only returns the category when it currently has `status`.
    async fn get_by_id_and_status(
        &self,
        id: Uuid,
        status: CategoryStatus,
    ) -> DomainResult<Option<Category>>;

    async fn create(&self, category: Category) -> DomainResult<()>;
    async fn update(&self, category: Category) -> DomainResult<()>;
}
