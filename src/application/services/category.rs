//! Category administration service

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::domain::{Category, DomainResult, RepositoryProvider};
use crate::shared::errors::DomainError;
use crate::shared::with_deadline;

pub struct CategoryService {
    repos: Arc<dyn RepositoryProvider>,
    timeout: Duration,
}

impl CategoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, timeout: Duration) -> Self {
        Self { repos, timeout }
    }

    /// Creates a pending category. It has to be activated before stores can
    /// reference it.
    pub async fn create(&self, name: String) -> DomainResult<Category> {
        with_deadline(self.timeout, "category.create", async {
            let category = Category::new(name)?;
            self.repos.categories().create(category.clone()).await?;
            info!(category_id = %category.id, name = %category.name, "Category created");
            Ok(category)
        })
        .await
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Category> {
        with_deadline(self.timeout, "category.get_by_id", self.load(id)).await
    }

    pub async fn activate(&self, id: Uuid) -> DomainResult<Category> {
        with_deadline(self.timeout, "category.activate", async {
            let mut category = self.load(id).await?;
            category.activate()?;
            self.repos.categories().update(category.clone()).await?;
            info!(category_id = %id, "Category activated");
            Ok(category)
        })
        .await
    }

    /// Stores already referencing the category keep it; only new stores
    /// are refused.
    pub async fn deactivate(&self, id: Uuid) -> DomainResult<Category> {
        with_deadline(self.timeout, "category.deactivate", async {
            let mut category = self.load(id).await?;
            category.deactivate()?;
            self.repos.categories().update(category.clone()).await?;
            info!(category_id = %id, "Category deactivated");
            Ok(category)
        })
        .await
    }

    async fn load(&self, id: Uuid) -> DomainResult<Category> {
        self.repos
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "id", id))
    }
}
