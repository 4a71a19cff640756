//! Field-level validators shared by entities and request DTOs.

use std::borrow::Cow;

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Identifiers must be present and not the nil UUID.
pub fn validate_identifier(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(error("identifier", "must be a valid identifier"));
    }
    Ok(())
}

/// Parses a caller supplied identifier string.
pub fn parse_identifier(raw: &str) -> Result<Uuid, ValidationError> {
    let id = Uuid::parse_str(raw.trim())
        .map_err(|_| error("identifier", "must be a valid identifier"))?;
    validate_identifier(&id)?;
    Ok(id)
}

pub fn validate_non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(error("non_negative", "must not be negative"));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "must not be blank"));
    }
    Ok(())
}
