use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Store is already blocked")]
    AlreadyBlocked,

    #[error("Store is still pending and must be activated first")]
    StillPending,

    #[error("Already active")]
    AlreadyActive,

    #[error("Already inactive")]
    AlreadyInactive,

    #[error("Bad parameter: {0}")]
    BadParameter(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Deadline exceeded for {0}")]
    Timeout(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Lifecycle guard violations. Terminal for the call that raised them.
    pub fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyBlocked | Self::StillPending | Self::AlreadyActive | Self::AlreadyInactive
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            Self::Validation("validation failed".to_string())
        } else {
            Self::Validation(messages.join("; "))
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::RecordNotFound(what) => Self::NotFound {
                entity: "Record",
                field: "id",
                value: what,
            },
            other => Self::Internal(format!("Database error: {}", other)),
        }
    }
}
