//! Store account balance operations

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Account, DomainResult, RepositoryProvider};
use crate::shared::errors::DomainError;
use crate::shared::with_deadline;

pub struct AccountService {
    repos: Arc<dyn RepositoryProvider>,
    timeout: Duration,
}

impl AccountService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, timeout: Duration) -> Self {
        Self { repos, timeout }
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Account> {
        with_deadline(self.timeout, "account.get_by_id", self.load(id)).await
    }

    pub async fn deposit(&self, id: Uuid, amount: Decimal) -> DomainResult<Account> {
        with_deadline(self.timeout, "account.deposit", async {
            let mut account = self.load(id).await?;
            account.deposit(amount)?;
            self.repos.accounts().update(account.clone()).await?;
            info!(account_id = %id, amount = %amount, balance = %account.balance, "Deposit");
            Ok(account)
        })
        .await
    }

    /// Rejected with a validation error if the balance would go negative.
    pub async fn withdraw(&self, id: Uuid, amount: Decimal) -> DomainResult<Account> {
        with_deadline(self.timeout, "account.withdraw", async {
            let mut account = self.load(id).await?;
            account.withdraw(amount)?;
            self.repos.accounts().update(account.clone()).await?;
            info!(account_id = %id, amount = %amount, balance = %account.balance, "Withdrawal");
            Ok(account)
        })
        .await
    }

    async fn load(&self, id: Uuid) -> DomainResult<Account> {
        self.repos
            .accounts()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account", "id", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    async fn setup() -> (AccountService, Uuid) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let account = Account::new();
        repos.accounts().create(account.clone()).await.unwrap();
        (
            AccountService::new(repos, Duration::from_secs(1)),
            account.id,
        )
    }

    #[tokio::test]
    async fn deposit_then_withdraw_persists_balance() {
        let (service, id) = setup().await;

        service.deposit(id, Decimal::new(1500, 2)).await.unwrap();
        let account = service.withdraw(id, Decimal::new(500, 2)).await.unwrap();
        assert_eq!(account.balance, Decimal::new(10, 0));

        let loaded = service.get_by_id(id).await.unwrap();
        assert_eq!(loaded.balance, Decimal::new(10, 0));
    }

    #[tokio::test]
    async fn overdraft_leaves_balance_untouched() {
        let (service, id) = setup().await;
        service.deposit(id, Decimal::new(5, 0)).await.unwrap();

        let err = service.withdraw(id, Decimal::new(6, 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let loaded = service.get_by_id(id).await.unwrap();
        assert_eq!(loaded.balance, Decimal::new(5, 0));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let (service, _) = setup().await;
        let err = service
            .deposit(Uuid::new_v4(), Decimal::ONE)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
