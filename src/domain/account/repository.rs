//! Account repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Account;
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: Account) -> DomainResult<()>;
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Account>>;
    async fn update(&self, account: Account) -> DomainResult<()>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
