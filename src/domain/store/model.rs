//! Store domain entity and its lifecycle

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::domain::category::CategoryRef;
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;
use crate::shared::validations::{validate_identifier, validate_not_blank};

/// Store status. Closed set: stores never take any other value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreStatus {
    #[default]
    Pending,
    Active,
    Block,
    Disable,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Block => "block",
            Self::Disable => "disable",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StoreStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "block" => Ok(Self::Block),
            "disable" => Ok(Self::Disable),
            other => Err(DomainError::BadParameter(format!(
                "unknown store status: {}",
                other
            ))),
        }
    }
}

/// Guarded lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Activate,
    Block,
    Disable,
}

impl Transition {
    pub fn target(&self) -> StoreStatus {
        match self {
            Self::Activate => StoreStatus::Active,
            Self::Block => StoreStatus::Block,
            Self::Disable => StoreStatus::Disable,
        }
    }
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct Position {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        let position = Self {
            latitude,
            longitude,
        };
        position.validate()?;
        Ok(position)
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Store {
    #[validate(custom(function = "validate_identifier"))]
    pub id: Uuid,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub description: String,
    pub status: StoreStatus,
    /// Owning user / tenant
    #[validate(custom(function = "validate_identifier"))]
    pub external_id: Uuid,
    #[validate(custom(function = "validate_identifier"))]
    pub account_id: Uuid,
    pub category: CategoryRef,
    pub tags: Vec<String>,
    pub position: Option<Position>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Builds a pending store and checks its invariants.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        external_id: Uuid,
        account_id: Uuid,
        category: CategoryRef,
        tags: Vec<String>,
        position: Option<Position>,
    ) -> DomainResult<Self> {
        let now = Utc::now();
        let store = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            status: StoreStatus::Pending,
            external_id,
            account_id,
            category,
            tags,
            position,
            created_at: now,
            updated_at: now,
        };
        store.ensure_valid()?;
        Ok(store)
    }

    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate()?;
        if let Some(position) = &self.position {
            position.validate()?;
        }
        if self.category.id().is_nil() {
            return Err(DomainError::Validation(
                "category: must be a valid identifier".to_string(),
            ));
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(DomainError::Validation(
                "tags: must not contain blank tags".to_string(),
            ));
        }
        Ok(())
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status == StoreStatus::Active {
            return Err(DomainError::AlreadyActive);
        }
        self.status = StoreStatus::Active;
        self.ensure_valid()
    }

    /// Only stores that have left `pending` can be blocked.
    pub fn block(&mut self) -> DomainResult<()> {
        match self.status {
            StoreStatus::Block => return Err(DomainError::AlreadyBlocked),
            StoreStatus::Pending => return Err(DomainError::StillPending),
            _ => {}
        }
        self.status = StoreStatus::Block;
        self.ensure_valid()
    }

    /// A blocked store cannot be disabled directly.
    pub fn disable(&mut self) -> DomainResult<()> {
        match self.status {
            StoreStatus::Disable => return Err(DomainError::AlreadyInactive),
            StoreStatus::Block => return Err(DomainError::AlreadyBlocked),
            _ => {}
        }
        self.status = StoreStatus::Disable;
        self.ensure_valid()
    }

    pub fn apply(&mut self, transition: Transition) -> DomainResult<()> {
        match transition {
            Transition::Activate => self.activate(),
            Transition::Block => self.block(),
            Transition::Disable => self.disable(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────
