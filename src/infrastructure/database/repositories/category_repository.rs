//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::db_err;
use crate::domain::{Category, CategoryRepository, CategoryStatus, DomainError, DomainResult};
use crate::infrastructure::database::entities::category;

fn status_to_entity(s: CategoryStatus) -> category::CategoryStatus {
    match s {
        CategoryStatus::Pending => category::CategoryStatus::Pending,
        CategoryStatus::Active => category::CategoryStatus::Active,
        CategoryStatus::Inactive => category::CategoryStatus::Inactive,
    }
}

fn model_to_domain(m: category::Model) -> Category {
    Category {
        id: m.id,
        name: m.name,
        status: match m.status {
            category::CategoryStatus::Pending => CategoryStatus::Pending,
            category::CategoryStatus::Active => CategoryStatus::Active,
            category::CategoryStatus::Inactive => CategoryStatus::Inactive,
        },
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(c: &Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.id),
        name: Set(c.name.clone()),
        status: Set(status_to_entity(c.status)),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn get_by_id_and_status(
        &self,
        id: Uuid,
        status: CategoryStatus,
    ) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .filter(category::Column::Status.eq(status_to_entity(status)))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn create(&self, c: Category) -> DomainResult<()> {
        domain_to_active(&c)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!("Category saved: {} ({})", c.name, c.id);
        Ok(())
    }

    async fn update(&self, c: Category) -> DomainResult<()> {
        let exists = category::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Category", "id", c.id));
        }
        domain_to_active(&c)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
