//! Account domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;
use crate::shared::validations::{validate_identifier, validate_non_negative};

/// Balance holder owned by exactly one store.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Account {
    #[validate(custom(function = "validate_identifier"))]
    pub id: Uuid,
    #[validate(custom(function = "validate_non_negative"))]
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Fresh account with a zero balance.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate()?;
        Ok(())
    }

    pub fn deposit(&mut self, amount: Decimal) -> DomainResult<()> {
        Self::check_amount(amount)?;
        self.apply(self.balance + amount)
    }

    /// Fails without touching the balance if it would go negative.
    pub fn withdraw(&mut self, amount: Decimal) -> DomainResult<()> {
        Self::check_amount(amount)?;
        self.apply(self.balance - amount)
    }

    fn check_amount(amount: Decimal) -> DomainResult<()> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::BadParameter(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        Ok(())
    }

    fn apply(&mut self, balance: Decimal) -> DomainResult<()> {
        let candidate = Self {
            balance,
            updated_at: Utc::now(),
            ..self.clone()
        };
        candidate.ensure_valid()?;
        *self = candidate;
        Ok(())
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_zero_balance() {
        let a = Account::new();
        assert_eq!(a.balance, Decimal::ZERO);
        assert!(a.ensure_valid().is_ok());
    }

    #[test]
    fn deposit_and_withdraw() {
        let mut a = Account::new();
        a.deposit(Decimal::new(2550, 2)).unwrap();
        a.withdraw(Decimal::new(550, 2)).unwrap();
        assert_eq!(a.balance, Decimal::new(20, 0));
    }

    #[test]
    fn overdraft_is_rejected_and_balance_kept() {
        let mut a = Account::new();
        a.deposit(Decimal::new(10, 0)).unwrap();
        let err = a.withdraw(Decimal::new(1001, 2)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("balance")));
        assert_eq!(a.balance, Decimal::new(10, 0));
    }

    #[test]
    fn non_positive_amounts_are_bad_parameters() {
        let mut a = Account::new();
        assert!(matches!(
            a.deposit(Decimal::ZERO),
            Err(DomainError::BadParameter(_))
        ));
        assert!(matches!(
            a.withdraw(Decimal::new(-5, 0)),
            Err(DomainError::BadParameter(_))
        ));
    }

    #[test]
    fn negative_balance_fails_validation() {
        let mut a = Account::new();
        a.balance = Decimal::new(-1, 0);
        assert!(a.ensure_valid().is_err());
    }
}
