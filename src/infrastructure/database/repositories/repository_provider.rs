//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{AccountRepository, CategoryRepository, RepositoryProvider, StoreRepository};

use super::account_repository::SeaOrmAccountRepository;
use super::category_repository::SeaOrmCategoryRepository;
use super::store_repository::SeaOrmStoreRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let store = repos.stores().get_by_id(id).await?;
/// let page = repos.stores().get_all_by_status(StoreStatus::Active, &params).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    stores: SeaOrmStoreRepository,
    categories: SeaOrmCategoryRepository,
    accounts: SeaOrmAccountRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            stores: SeaOrmStoreRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            accounts: SeaOrmAccountRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{ConnectOptions, Database};
    use uuid::Uuid;

    use crate::domain::{
        Account, Category, CategoryRef, CategoryStatus, DomainError, LocationQuery, Position,
        Store, StoreStatus,
    };
    use crate::infrastructure::database::migrator::{Migrator, MigratorTrait};
    use crate::shared::ListParams;

    async fn provider() -> SeaOrmRepositoryProvider {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    async fn active_category(repos: &SeaOrmRepositoryProvider) -> Category {
        let mut category = Category::new("Groceries").unwrap();
        category.activate().unwrap();
        repos.categories().create(category.clone()).await.unwrap();
        category
    }

    fn store(name: &str, category_id: Uuid, tags: &[&str], latitude: f64) -> Store {
        Store::new(
            name,
            "desc",
            Uuid::new_v4(),
            Uuid::new_v4(),
            CategoryRef::Stub(category_id),
            tags.iter().map(|t| t.to_string()).collect(),
            Some(Position::new(latitude, 69.0).unwrap()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn category_status_lookup() {
        let repos = provider().await;
        let pending = Category::new("Books").unwrap();
        repos.categories().create(pending.clone()).await.unwrap();

        assert!(repos
            .categories()
            .get_by_id_and_status(pending.id, CategoryStatus::Active)
            .await
            .unwrap()
            .is_none());

        let mut active = pending.clone();
        active.activate().unwrap();
        repos.categories().update(active).await.unwrap();

        let found = repos
            .categories()
            .get_by_id_and_status(pending.id, CategoryStatus::Active)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Books");
    }

    #[tokio::test]
    async fn account_balance_round_trips_exactly() {
        let repos = provider().await;
        let mut account = Account::new();
        repos.accounts().create(account.clone()).await.unwrap();

        account.deposit(Decimal::new(1234567, 4)).unwrap();
        repos.accounts().update(account.clone()).await.unwrap();

        let loaded = repos.accounts().get_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(loaded.balance, Decimal::new(1234567, 4));

        repos.accounts().delete(account.id).await.unwrap();
        assert!(repos
            .accounts()
            .delete(account.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn store_crud() {
        let repos = provider().await;
        let category = active_category(&repos).await;
        let mut s = store("Corner", category.id, &["food", "late"], 41.0);
        s.category = CategoryRef::Resolved(category.clone());
        repos.stores().create(s.clone()).await.unwrap();

        let loaded = repos.stores().get_by_id(s.id).await.unwrap().unwrap();
        assert_eq!(loaded.category, CategoryRef::Stub(category.id));
        assert_eq!(loaded.tags, vec!["food".to_string(), "late".to_string()]);
        assert_eq!(loaded.position, s.position);
        assert_eq!(loaded.status, StoreStatus::Pending);

        assert!(repos
            .stores()
            .get_by_id_and_owner(s.id, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
        assert!(repos
            .stores()
            .get_by_id_and_owner(s.id, s.external_id)
            .await
            .unwrap()
            .is_some());

        let mut changed = loaded.clone();
        changed.activate().unwrap();
        changed.name = "Renamed".into();
        repos.stores().update(changed).await.unwrap();
        let loaded = repos.stores().get_by_id(s.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, StoreStatus::Active);
        assert_eq!(loaded.name, "Renamed");

        repos.stores().delete(s.id).await.unwrap();
        assert!(repos.stores().get_by_id(s.id).await.unwrap().is_none());
        assert!(repos.stores().delete(s.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn listing_filters_sorts_and_pages() {
        let repos = provider().await;
        let category = active_category(&repos).await;
        for (name, tags) in [
            ("Delta", vec!["tea"]),
            ("Alpha", vec!["coffee"]),
            ("Charlie", vec!["coffee", "tea"]),
            ("Bravo", vec!["juice"]),
        ] {
            repos
                .stores()
                .create(store(name, category.id, &tags, 41.0))
                .await
                .unwrap();
        }

        let page = repos
            .stores()
            .get_all(&ListParams::new("name ASC", 3, 1))
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);

        let page = repos
            .stores()
            .get_all(&ListParams::new("name ASC", 3, 2))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Delta");

        let by_tags = repos
            .stores()
            .get_all_by_tags(&["tea".to_string()], &ListParams::new("name DESC", 10, 1))
            .await
            .unwrap();
        let names: Vec<&str> = by_tags.items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Delta", "Charlie"]);

        let by_category = repos
            .stores()
            .get_all_by_category(category.id, &ListParams::default())
            .await
            .unwrap();
        assert_eq!(by_category.total, 4);

        let err = repos
            .stores()
            .get_all(&ListParams::new("distance ASC", 10, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BadParameter(_)));
    }

    async fn names_for_tag(repos: &SeaOrmRepositoryProvider, tag: &str) -> Vec<String> {
        repos
            .stores()
            .get_all_by_tags(&[tag.to_string()], &ListParams::new("name ASC", 10, 1))
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[tokio::test]
    async fn tags_match_exact_elements_only() {
        let repos = provider().await;
        let category = active_category(&repos).await;
        for (name, tags) in [
            ("Plain", vec!["abc"]),
            ("Sale", vec!["50%", "say \"hi\""]),
            ("Path", vec!["back\\slash"]),
        ] {
            repos
                .stores()
                .create(store(name, category.id, &tags, 41.0))
                .await
                .unwrap();
        }

        assert!(names_for_tag(&repos, "a_c").await.is_empty());
        assert!(names_for_tag(&repos, "%").await.is_empty());
        assert!(names_for_tag(&repos, "ab").await.is_empty());
        assert_eq!(names_for_tag(&repos, "abc").await, vec!["Plain"]);
        assert_eq!(names_for_tag(&repos, "50%").await, vec!["Sale"]);
        assert_eq!(names_for_tag(&repos, "say \"hi\"").await, vec!["Sale"]);
        assert_eq!(names_for_tag(&repos, "back\\slash").await, vec!["Path"]);

        let page = repos
            .stores()
            .get_all_by_tags(
                &["abc".to_string(), "50%".to_string()],
                &ListParams::new("name ASC", 10, 1),
            )
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn location_query_orders_and_bounds_like_distance() {
        let repos = provider().await;
        let category = active_category(&repos).await;
        let mut ids = Vec::new();
        for lat in [41.0, 41.2, 41.1, -41.0] {
            let mut s = store("S", category.id, &[], lat);
            s.activate().unwrap();
            repos.stores().create(s.clone()).await.unwrap();
            ids.push(s.id);
        }

        let query = LocationQuery::new(41.0, 69.0, 30.0, StoreStatus::Active).unwrap();
        let page = repos
            .stores()
            .get_all_by_location(&query, &ListParams::new("distance DESC", 10, 1))
            .await
            .unwrap();
        let found: Vec<Uuid> = page.items.iter().map(|s| s.id).collect();
        assert_eq!(found, vec![ids[1], ids[2], ids[0]]);

        // exact center still matches a zero radius
        let query = LocationQuery::new(41.0, 69.0, 0.0, StoreStatus::Active).unwrap();
        let page = repos
            .stores()
            .get_all_by_location(&query, &ListParams::new("distance ASC", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, ids[0]);

        // a radius past the antipode covers the whole sphere
        let query = LocationQuery::new(41.0, 69.0, 30_000.0, StoreStatus::Active).unwrap();
        let page = repos
            .stores()
            .get_all_by_location(&query, &ListParams::new("distance ASC", 10, 1))
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.items[3].id, ids[3]);
    }

    #[tokio::test]
    async fn location_query_uses_distance() {
        let repos = provider().await;
        let category = active_category(&repos).await;
        let mut ids = Vec::new();
        for lat in [41.1, 41.0, 42.0] {
            let mut s = store("S", category.id, &[], lat);
            s.activate().unwrap();
            repos.stores().create(s.clone()).await.unwrap();
            ids.push(s.id);
        }
        // pending stores never match an active query
        repos
            .stores()
            .create(store("P", category.id, &[], 41.0))
            .await
            .unwrap();

        let query = LocationQuery::new(41.0, 69.0, 50.0, StoreStatus::Active).unwrap();
        let page = repos
            .stores()
            .get_all_by_location(&query, &ListParams::new("distance ASC", 10, 1))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        let found: Vec<Uuid> = page.items.iter().map(|s| s.id).collect();
        assert_eq!(found, vec![ids[1], ids[0]]);
    }
}
