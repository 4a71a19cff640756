//! In-memory repositories for development and testing

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::store::distance_km;
use crate::domain::{
    parse_store_sort, Account, AccountRepository, Category, CategoryRef, CategoryRepository,
    CategoryStatus, DomainError, DomainResult, LocationQuery, RepositoryProvider, Store,
    StoreRepository, StoreStatus,
};
use crate::shared::{ListParams, PaginatedResult, Sort};

/// In-memory storage for development and testing.
///
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryRepositoryProvider {
    stores: InMemoryStores,
    categories: InMemoryCategories,
    accounts: InMemoryAccounts,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_count(&self) -> usize {
        self.stores.rows.len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.rows.len()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn stores(&self) -> &dyn StoreRepository {
        &self.stores
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn accounts(&self) -> &dyn AccountRepository {
        &self.accounts
    }
}

// ── Stores ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryStores {
    rows: Arc<DashMap<Uuid, Store>>,
}

/// Rows keep only the category id, like the SQL table does.
fn as_row(mut store: Store) -> Store {
    store.category = CategoryRef::Stub(store.category.id());
    store
}

impl InMemoryStores {
    /// Filters, orders and pages the table. `distance` is the computed
    /// distance of each candidate, when the listing is a proximity query.
    fn page<F>(
        &self,
        params: &ListParams,
        allow_distance: bool,
        filter: F,
    ) -> DomainResult<PaginatedResult<Store>>
    where
        F: Fn(&Store) -> Option<f64>,
    {
        let sort = parse_store_sort(&params.sort, allow_distance)?;

        let mut matched: Vec<(Store, f64)> = self
            .rows
            .iter()
            .filter_map(|entry| filter(entry.value()).map(|d| (entry.value().clone(), d)))
            .collect();

        // ties always break on id ascending, whatever the direction
        matched.sort_by(|(a, da), (b, db)| {
            let ord = compare(&sort, a, *da, b, *db);
            let ord = if sort.descending { ord.reverse() } else { ord };
            ord.then_with(|| a.id.cmp(&b.id))
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.page_size() as usize)
            .map(|(store, _)| store)
            .collect();

        Ok(PaginatedResult::new(
            items,
            total,
            params.page.max(1) as u64,
            params.page_size(),
        ))
    }
}

fn compare(sort: &Sort, a: &Store, da: f64, b: &Store, db: f64) -> Ordering {
    match sort.field.as_str() {
        "name" => a.name.cmp(&b.name),
        "status" => a.status.as_str().cmp(b.status.as_str()),
        "updated_at" => a.updated_at.cmp(&b.updated_at),
        "distance" => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
        _ => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl StoreRepository for InMemoryStores {
    async fn create(&self, store: Store) -> DomainResult<()> {
        if self.rows.contains_key(&store.id) {
            return Err(DomainError::Internal(format!(
                "store {} already exists",
                store.id
            )));
        }
        self.rows.insert(store.id, as_row(store));
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Store>> {
        Ok(self.rows.get(&id).map(|s| s.clone()))
    }

    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Store>> {
        Ok(self
            .rows
            .get(&id)
            .filter(|s| s.external_id == owner_id)
            .map(|s| s.clone()))
    }

    async fn get_all(&self, params: &ListParams) -> DomainResult<PaginatedResult<Store>> {
        self.page(params, false, |_| Some(0.0))
    }

    async fn get_all_by_category(
        &self,
        category_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        self.page(params, false, |s| {
            (s.category.id() == category_id).then_some(0.0)
        })
    }

    async fn get_all_by_owner(
        &self,
        owner_id: Uuid,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        self.page(params, false, |s| (s.external_id == owner_id).then_some(0.0))
    }

    async fn get_all_by_status(
        &self,
        status: StoreStatus,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        self.page(params, false, |s| (s.status == status).then_some(0.0))
    }

    async fn get_all_by_tags(
        &self,
        tags: &[String],
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        self.page(params, false, |s| {
            s.tags.iter().any(|t| tags.contains(t)).then_some(0.0)
        })
    }

    async fn get_all_by_location(
        &self,
        query: &LocationQuery,
        params: &ListParams,
    ) -> DomainResult<PaginatedResult<Store>> {
        let center = query.center();
        self.page(params, true, |s| {
            if s.status != query.status {
                return None;
            }
            let distance = distance_km(center, s.position?);
            (distance <= query.max_distance_km).then_some(distance)
        })
    }

    async fn update(&self, store: Store) -> DomainResult<()> {
        if !self.rows.contains_key(&store.id) {
            return Err(DomainError::not_found("Store", "id", store.id));
        }
        self.rows.insert(store.id, as_row(store));
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rows
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Store", "id", id))?;
        Ok(())
    }
}

// ── Categories ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryCategories {
    rows: Arc<DashMap<Uuid, Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        Ok(self.rows.get(&id).map(|c| c.clone()))
    }

    async fn get_by_id_and_status(
        &self,
        id: Uuid,
        status: CategoryStatus,
    ) -> DomainResult<Option<Category>> {
        Ok(self
            .rows
            .get(&id)
            .filter(|c| c.status == status)
            .map(|c| c.clone()))
    }

    async fn create(&self, category: Category) -> DomainResult<()> {
        if self.rows.contains_key(&category.id) {
            return Err(DomainError::Internal(format!(
                "category {} already exists",
                category.id
            )));
        }
        self.rows.insert(category.id, category);
        Ok(())
    }

    async fn update(&self, category: Category) -> DomainResult<()> {
        if !self.rows.contains_key(&category.id) {
            return Err(DomainError::not_found("Category", "id", category.id));
        }
        self.rows.insert(category.id, category);
        Ok(())
    }
}

// ── Accounts ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct InMemoryAccounts {
    rows: Arc<DashMap<Uuid, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn create(&self, account: Account) -> DomainResult<()> {
        if self.rows.contains_key(&account.id) {
            return Err(DomainError::Internal(format!(
                "account {} already exists",
                account.id
            )));
        }
        self.rows.insert(account.id, account);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        Ok(self.rows.get(&id).map(|a| a.clone()))
    }

    async fn update(&self, account: Account) -> DomainResult<()> {
        if !self.rows.contains_key(&account.id) {
            return Err(DomainError::not_found("Account", "id", account.id));
        }
        self.rows.insert(account.id, account);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.rows
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Account", "id", id))?;
        Ok(())
    }
}
