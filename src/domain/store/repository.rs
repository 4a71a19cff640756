//! Store repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::location::LocationQuery;
use super::model::{Store, StoreStatus};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;
use crate::shared::{ListParams, PaginatedResult, Sort};

/// Columns a store listing may be ordered by.
pub const SORTABLE_FIELDS: &[&str] = &["name", "status", "created_at", "updated_at"];

/// Computed column only available to proximity queries.
pub const DISTANCE_FIELD: &str = "distance";

/// Parses a listing sort expression against the store columns.
pub fn parse_store_sort(expr: &str, allow_distance: bool) -> DomainResult<Sort> {
    let sort = Sort::parse(expr)?;
    let known = SORTABLE_FIELDS.contains(&sort.field.as_str())
        || (allow_distance && sort.field == DISTANCE_FIELD);
    if !known {
        return Err(DomainError::BadParameter(format!(
            "cannot sort stores by {}",
            sort.field
        )));
    }
    Ok(sort)
}

/// Persistence for stores. Listed stores carry a [`CategoryRef::Stub`]
/// category; resolving it is the caller's job.
///
/// [`CategoryRef::Stub`]: crate::domain::category::CategoryRef::Stub
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn create(&self, store: Store) -> DomainResult<()>;

    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Store>>;
    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Store>>;

    async fn get_all(&self, params: &ListParams) -> DomainResult<PaginatedResult<Store>>;
    async fn get_all_by_category(
        &self,
        category_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>>;
    async fn get_all_by_owner(
        &self,
        owner_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>>;
    async fn get_all_by_status(
        &self,
        status: StoreStatus,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>>;
    /// Stores carrying at least one of `tags`.
    async fn get_all_by_tags(
        &self,
        tags: &[String],
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>>;
    /// Stores with `status` within `max_distance_km` of the query center.
    /// Accepts `distance` as an extra sort field.
    async fn get_all_by_location(
        &self,
        query: &LocationQuery,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>>;

    /// Full replacement of the stored row.
    async fn update(&self, store: Store) -> DomainResult<()>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
