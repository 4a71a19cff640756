//! Store orchestration service
//!
//! Composes the store lifecycle, category enrichment and the account /
//! category repositories into the operations exposed to delivery adapters.
//! Every public operation runs under the configured per-call deadline.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use super::enrichment::CategoryEnricher;
use crate::domain::{
    Account, CategoryRef, CategoryStatus, CreateStoreDto, DomainResult, LocationQuery, Position,
    RepositoryProvider, Store, StoreStatus, Transition,
};
use crate::shared::errors::DomainError;
use crate::shared::validations::parse_identifier;
use crate::shared::{with_deadline, ListParams, PaginatedResult};

/// Service for store operations
pub struct StoreService {
    repos: Arc<dyn RepositoryProvider>,
    timeout: Duration,
}

impl StoreService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, timeout: Duration) -> Self {
        Self { repos, timeout }
    }

    fn enricher(&self) -> CategoryEnricher<'_> {
        CategoryEnricher::new(self.repos.categories())
    }

    // ── Create ─────────────────────────────────────────────────

    /// Creates a pending store with a fresh zero-balance account.
    ///
    /// Input and category are checked before the account is created. If
    /// persisting the store fails afterwards the account is deleted again.
    pub async fn create(&self, dto: CreateStoreDto) -> DomainResult<Store> {
        with_deadline(self.timeout, "store.create", self.create_inner(dto)).await
    }

    async fn create_inner(&self, dto: CreateStoreDto) -> DomainResult<Store> {
        let external_id = parse_identifier(&dto.external_id)
            .map_err(|_| DomainError::Validation("external_id: must be a valid identifier".into()))?;
        let category_id = parse_identifier(&dto.category_id).map_err(|_| {
            DomainError::BadParameter(format!("invalid category id: {}", dto.category_id))
        })?;
        let position = Position::new(dto.latitude, dto.longitude)?;

        let category = self
            .repos
            .categories()
            .get_by_id_and_status(category_id, CategoryStatus::Active)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "id", category_id))?;

        let account = Account::new();
        let store = Store::new(
            dto.name,
            dto.description,
            external_id,
            account.id,
            CategoryRef::Resolved(category),
            dto.tags,
            Some(position),
        )?;

        self.repos.accounts().create(account.clone()).await?;

        if let Err(e) = self.repos.stores().create(store.clone()).await {
            warn!(account_id = %account.id, error = %e, "Store insert failed, removing account");
            if let Err(cleanup) = self.repos.accounts().delete(account.id).await {
                warn!(account_id = %account.id, error = %cleanup, "Orphaned account left behind");
            }
            return Err(e);
        }

        info!(
            store_id = %store.id,
            account_id = %store.account_id,
            category_id = %store.category.id(),
            "Store created"
        );
        Ok(store)
    }

    // ── Read ───────────────────────────────────────────────────

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Store> {
        with_deadline(self.timeout, "store.get_by_id", async {
            let store = self
                .repos
                .stores()
                .get_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", "id", id))?;
            self.enricher().enrich_one(store).await
        })
        .await
    }

    pub async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Store> {
        with_deadline(self.timeout, "store.get_by_id_and_owner", async {
            let store = self
                .repos
                .stores()
                .get_by_id_and_owner(id, owner_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", "id", id))?;
            self.enricher().enrich_one(store).await
        })
        .await
    }

    // ── List ───────────────────────────────────────────────────
    //
    // An enrichment failure fails the whole listing: an error never comes
    // with a count attached.

    pub async fn list(&self, params: ListParams) -> DomainResult<PaginatedResult<Store>> {
        let params = params.normalized();
        with_deadline(self.timeout, "store.list", async {
            let page = self.repos.stores().get_all(&params).await?;
            self.enrich_page(page).await
        })
        .await
    }

    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        params: ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let params = params.normalized();
        with_deadline(self.timeout, "store.list_by_category", async {
            let page = self
                .repos
                .stores()
                .get_all_by_category(category_id, &params)
                .await?;
            self.enrich_page(page).await
        })
        .await
    }

    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        params: ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let params = params.normalized();
        with_deadline(self.timeout, "store.list_by_owner", async {
            let page = self
                .repos
                .stores()
                .get_all_by_owner(owner_id, &params)
                .await?;
            self.enrich_page(page).await
        })
        .await
    }

    pub async fn list_by_status(
        &self,
        status: StoreStatus,
        params: ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let params = params.normalized();
        with_deadline(self.timeout, "store.list_by_status", async {
            let page = self
                .repos
                .stores()
                .get_all_by_status(status, &params)
                .await?;
            self.enrich_page(page).await
        })
        .await
    }

    pub async fn list_by_tags(
        &self,
        tags: Vec<String>,
        params: ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tags.is_empty() {
            return Err(DomainError::BadParameter(
                "at least one tag is required".to_string(),
            ));
        }

        let params = params.normalized();
        with_deadline(self.timeout, "store.list_by_tags", async {
            let page = self.repos.stores().get_all_by_tags(&tags, &params).await?;
            self.enrich_page(page).await
        })
        .await
    }

    pub async fn list_by_close_location(
        &self,
        query: LocationQuery,
        params: ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let params = params.normalized();
        with_deadline(self.timeout, "store.list_by_close_location", async {
            let page = self
                .repos
                .stores()
                .get_all_by_location(&query, &params)
                .await?;
            self.enrich_page(page).await
        })
        .await
    }

    async fn enrich_page(
        &self,
        page: PaginatedResult<Store>,
    ) -> DomainResult<PaginatedResult<Store>> {
        let PaginatedResult {
            items,
            total,
            page,
            limit,
            ..
        } = page;
        let items = self.enricher().enrich(items).await?;
        Ok(PaginatedResult::new(items, total, page, limit))
    }

    // ── Lifecycle ──────────────────────────────────────────────

    pub async fn activate(&self, id: Uuid) -> DomainResult<Store> {
        self.transition(id, Transition::Activate).await
    }

    pub async fn block(&self, id: Uuid) -> DomainResult<Store> {
        self.transition(id, Transition::Block).await
    }

    pub async fn disable(&self, id: Uuid) -> DomainResult<Store> {
        self.transition(id, Transition::Disable).await
    }

    /// Loads the store, applies the guarded transition and persists it.
    /// The returned store keeps its category as a stub.
    pub async fn transition(&self, id: Uuid, transition: Transition) -> DomainResult<Store> {
        with_deadline(self.timeout, "store.transition", async {
            let mut store = self
                .repos
                .stores()
                .get_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", "id", id))?;

            let from = store.status;
            store.apply(transition)?;
            store.touch();
            self.repos.stores().update(store.clone()).await?;

            info!(store_id = %id, from = %from, to = %store.status, "Store status changed");
            Ok(store)
        })
        .await
    }

    // ── Update / Delete ────────────────────────────────────────

    /// Replaces the stored record with `store` (no field-level merge).
    ///
    /// Moving the store to another category requires that category to
    /// exist and be active, the same rule create applies.
    pub async fn update(&self, mut store: Store) -> DomainResult<Store> {
        with_deadline(self.timeout, "store.update", async {
            let existing = self
                .repos
                .stores()
                .get_by_id(store.id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", "id", store.id))?;

            let category_id = store.category.id();
            if category_id != existing.category.id() {
                let category = self
                    .repos
                    .categories()
                    .get_by_id_and_status(category_id, CategoryStatus::Active)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Category", "id", category_id))?;
                store.category = CategoryRef::Resolved(category);
            }

            store.touch();
            store.ensure_valid()?;
            self.repos.stores().update(store.clone()).await?;

            info!(store_id = %store.id, "Store updated");
            Ok(store)
        })
        .await
    }

    /// Deletes the owned account first; the store row is only removed once
    /// that succeeded.
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        with_deadline(self.timeout, "store.delete", async {
            let store = self
                .repos
                .stores()
                .get_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Store", "id", id))?;

            self.repos.accounts().delete(store.account_id).await?;
            self.repos.stores().delete(id).await?;

            info!(store_id = %id, account_id = %store.account_id, "Store deleted");
            Ok(())
        })
        .await
    }
}

// ── Tests ──────────────────────────────────────────────────────
