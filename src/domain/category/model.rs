//! Category domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;
use crate::shared::validations::{validate_identifier, validate_not_blank};

/// Category status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryStatus {
    #[default]
    Pending,
    Active,
    Inactive,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CategoryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(DomainError::BadParameter(format!(
                "unknown category status: {}",
                other
            ))),
        }
    }
}

/// Store category. Owned independently of the stores referencing it.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Category {
    #[validate(custom(function = "validate_identifier"))]
    pub id: Uuid,
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    pub status: CategoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// New categories start out pending.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let now = Utc::now();
        let category = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CategoryStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        category.ensure_valid()?;
        Ok(category)
    }

    pub fn ensure_valid(&self) -> DomainResult<()> {
        self.validate()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == CategoryStatus::Active
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status == CategoryStatus::Active {
            return Err(DomainError::AlreadyActive);
        }
        self.status = CategoryStatus::Active;
        self.updated_at = Utc::now();
        self.ensure_valid()
    }

    pub fn deactivate(&mut self) -> DomainResult<()> {
        if self.status == CategoryStatus::Inactive {
            return Err(DomainError::AlreadyInactive);
        }
        self.status = CategoryStatus::Inactive;
        self.updated_at = Utc::now();
        self.ensure_valid()
    }
}

/// A store's view of its category: either just the identifier, or the
/// full record once it has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRef {
    Stub(Uuid),
    Resolved(Category),
}

impl CategoryRef {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Stub(id) => *id,
            Self::Resolved(category) => category.id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&Category> {
        match self {
            Self::Stub(_) => None,
            Self::Resolved(category) => Some(category),
        }
    }
}

impl From<Category> for CategoryRef {
    fn from(category: Category) -> Self {
        Self::Resolved(category)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_is_pending() {
        let c = Category::new("Bakery").unwrap();
        assert_eq!(c.status, CategoryStatus::Pending);
        assert!(!c.is_active());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Category::new("  ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("name")));
    }

    #[test]
    fn activate_twice_fails() {
        let mut c = Category::new("Bakery").unwrap();
        c.activate().unwrap();
        assert!(c.is_active());
        assert_eq!(c.activate().unwrap_err(), DomainError::AlreadyActive);
    }

    #[test]
    fn deactivate_twice_fails() {
        let mut c = Category::new("Bakery").unwrap();
        c.deactivate().unwrap();
        assert_eq!(c.status, CategoryStatus::Inactive);
        assert_eq!(c.deactivate().unwrap_err(), DomainError::AlreadyInactive);
    }

    #[test]
    fn status_parsing() {
        assert_eq!("Active".parse::<CategoryStatus>().unwrap(), CategoryStatus::Active);
        assert_eq!(CategoryStatus::Inactive.to_string(), "inactive");
        assert!("archived".parse::<CategoryStatus>().is_err());
    }

    #[test]
    fn category_ref_id() {
        let c = Category::new("Bakery").unwrap();
        let id = c.id;
        assert_eq!(CategoryRef::Stub(id).id(), id);
        let resolved = CategoryRef::from(c);
        assert!(resolved.is_resolved());
        assert_eq!(resolved.id(), id);
        assert_eq!(resolved.resolved().map(|c| c.name.as_str()), Some("Bakery"));
    }
}
