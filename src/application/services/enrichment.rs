//! Category enrichment for store batches
//!
//! A listed store only carries its category id. Resolving them one row at
//! a time costs a round trip per store; instead the batch is reduced to its
//! distinct category ids, those are fetched concurrently (one fetch per id),
//! and every store is rewritten from the resulting id -> category map.
//!
//! All-or-nothing: the first failed fetch drops the remaining in-flight
//! fetches and the whole batch fails. Callers never see a partly enriched
//! batch.

use std::collections::{BTreeSet, HashMap};

use futures_util::future::try_join_all;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Category, CategoryRef, CategoryRepository, DomainResult, Store};
use crate::shared::errors::DomainError;

pub struct CategoryEnricher<'a> {
    categories: &'a dyn CategoryRepository,
}

impl<'a> CategoryEnricher<'a> {
    pub fn new(categories: &'a dyn CategoryRepository) -> Self {
        Self { categories }
    }

    /// Resolves the category of every store, preserving batch order and size.
    pub async fn enrich(&self, mut stores: Vec<Store>) -> DomainResult<Vec<Store>> {
        if stores.is_empty() {
            return Ok(stores);
        }

        let ids: BTreeSet<Uuid> = stores.iter().map(|s| s.category.id()).collect();
        let resolved = self.fetch_all(ids).await?;

        for store in &mut stores {
            let id = store.category.id();
            let category = resolved
                .get(&id)
                .cloned()
                .ok_or_else(|| DomainError::not_found("Category", "id", id))?;
            store.category = CategoryRef::Resolved(category);
        }

        Ok(stores)
    }

    pub async fn enrich_one(&self, mut store: Store) -> DomainResult<Store> {
        let category = self.fetch(store.category.id()).await?;
        store.category = CategoryRef::Resolved(category);
        Ok(store)
    }

    async fn fetch_all(&self, ids: BTreeSet<Uuid>) -> DomainResult<HashMap<Uuid, Category>> {
        debug!(distinct_categories = ids.len(), "Resolving categories");

        let fetches = ids.into_iter().map(|id| async move {
            let category = self.fetch(id).await?;
            Ok::<_, DomainError>((id, category))
        });

        Ok(try_join_all(fetches).await?.into_iter().collect())
    }

    async fn fetch(&self, id: Uuid) -> DomainResult<Category> {
        self.categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "id", id))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use dashmap::DashMap;

    use crate::domain::CategoryStatus;

    /// Counts fetches and fails for ids in `failing`.
    #[derive(Default)]
    struct CountingCategories {
        categories: DashMap<Uuid, Category>,
        failing: DashMap<Uuid, ()>,
        fetches: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl CountingCategories {
        fn with(categories: &[Category]) -> Self {
            let repo = Self::default();
            for c in categories {
                repo.categories.insert(c.id, c.clone());
            }
            repo
        }
    }

    #[async_trait]
    impl CategoryRepository for CountingCategories {
        async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains_key(&id) {
                return Err(DomainError::Internal("connection reset".into()));
            }
            Ok(self.categories.get(&id).map(|c| c.clone()))
        }

        async fn get_by_id_and_status(
            &self,
            id: Uuid,
            status: CategoryStatus,
        ) -> DomainResult<Option<Category>> {
            Ok(self.get_by_id(id).await?.filter(|c| c.status == status))
        }

        async fn create(&self, category: Category) -> DomainResult<()> {
            self.categories.insert(category.id, category);
            Ok(())
        }

        async fn update(&self, category: Category) -> DomainResult<()> {
            self.categories.insert(category.id, category);
            Ok(())
        }
    }

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn store(name: &str, category_id: Uuid) -> Store {
        Store::new(
            name,
            "",
            Uuid::new_v4(),
            Uuid::new_v4(),
            CategoryRef::Stub(category_id),
            vec![],
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn one_fetch_per_distinct_category() {
        let c1 = category("Bakery");
        let c2 = category("Pharmacy");
        let repo = CountingCategories::with(&[c1.clone(), c2.clone()]);

        let batch = vec![
            store("a", c1.id),
            store("b", c2.id),
            store("c", c1.id),
            store("d", c1.id),
            store("e", c2.id),
        ];
        let names: Vec<String> = batch.iter().map(|s| s.name.clone()).collect();

        let enriched = CategoryEnricher::new(&repo).enrich(batch).await.unwrap();

        assert_eq!(repo.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(
            enriched.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
            names
        );
        assert!(enriched.iter().all(|s| s.category.is_resolved()));
        assert_eq!(enriched[1].category.resolved().unwrap().name, "Pharmacy");
        assert_eq!(enriched[3].category.resolved().unwrap().name, "Bakery");
    }

    #[tokio::test]
    async fn three_stores_same_category_single_fetch() {
        let c1 = category("Bakery");
        let repo = CountingCategories::with(&[c1.clone()]);
        let batch = vec![store("a", c1.id), store("b", c1.id), store("c", c1.id)];

        let enriched = CategoryEnricher::new(&repo).enrich(batch).await.unwrap();

        assert_eq!(enriched.len(), 3);
        assert_eq!(repo.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetches_run_concurrently() {
        let categories: Vec<Category> = (0..4).map(|i| category(&format!("c{}", i))).collect();
        let repo = CountingCategories::with(&categories);
        let batch: Vec<Store> = categories.iter().map(|c| store("s", c.id)).collect();

        CategoryEnricher::new(&repo).enrich(batch).await.unwrap();

        assert_eq!(repo.fetches.load(Ordering::SeqCst), 4);
        assert!(repo.max_in_flight.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn failure_fails_the_whole_batch() {
        let c1 = category("Bakery");
        let c2 = category("Pharmacy");
        let repo = CountingCategories::with(&[c1.clone(), c2.clone()]);
        repo.failing.insert(c2.id, ());

        let batch = vec![store("a", c1.id), store("b", c2.id)];
        let err = CategoryEnricher::new(&repo).enrich(batch).await.unwrap_err();

        assert_eq!(err, DomainError::Internal("connection reset".into()));
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let repo = CountingCategories::default();
        let missing = Uuid::new_v4();

        let err = CategoryEnricher::new(&repo)
            .enrich(vec![store("a", missing)])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_batch_issues_no_fetch() {
        let repo = CountingCategories::default();
        let enriched = CategoryEnricher::new(&repo).enrich(vec![]).await.unwrap();
        assert!(enriched.is_empty());
        assert_eq!(repo.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn enrich_one_resolves_single_store() {
        let c1 = category("Bakery");
        let repo = CountingCategories::with(&[c1.clone()]);
        let s = CategoryEnricher::new(&repo)
            .enrich_one(store("a", c1.id))
            .await
            .unwrap();
        assert_eq!(s.category, CategoryRef::Resolved(c1));
    }
}
