//! SeaORM implementation of AccountRepository

use std::str::FromStr;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::db_err;
use crate::domain::{Account, AccountRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::account;

fn model_to_domain(m: account::Model) -> DomainResult<Account> {
    let balance = Decimal::from_str(&m.balance).map_err(|e| {
        DomainError::Internal(format!("corrupt balance on account {}: {}", m.id, e))
    })?;
    Ok(Account {
        id: m.id,
        balance,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(a: &Account) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(a.id),
        balance: Set(a.balance.to_string()),
        created_at: Set(a.created_at),
        updated_at: Set(a.updated_at),
    }
}

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(&self, a: Account) -> DomainResult<()> {
        domain_to_active(&a)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        info!("Account saved: {}", a.id);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        let model = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, a: Account) -> DomainResult<()> {
        let exists = account::Entity::find_by_id(a.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Account", "id", a.id));
        }
        domain_to_active(&a)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = account::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Account", "id", id));
        }
        info!("Account deleted: {}", id);
        Ok(())
    }
}
