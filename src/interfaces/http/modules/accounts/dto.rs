//! Account DTOs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Account, DomainError};
use crate::shared::validations::validate_not_blank;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    /// Decimal string, e.g. "12.50"
    pub balance: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            balance: a.balance.to_string(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AmountRequest {
    /// Decimal string, e.g. "12.50"
    #[validate(custom(function = "validate_not_blank"))]
    pub amount: String,
}

impl AmountRequest {
    pub fn decimal(&self) -> Result<Decimal, DomainError> {
        Decimal::from_str(self.amount.trim())
            .map_err(|_| DomainError::BadParameter(format!("invalid amount: {}", self.amount)))
    }
}
