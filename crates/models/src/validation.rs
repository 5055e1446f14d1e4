//! Field rules shared by both entities.

use crate::errors::ModelError;

/// Reject empty and whitespace-only values.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Identifiers are positive and fit the `integer` primary keys.
pub fn validate_identifier(field: &str, raw: i64) -> Result<i32, ModelError> {
    if raw <= 0 {
        return Err(ModelError::Validation(format!("{field} must be a positive integer")));
    }
    i32::try_from(raw).map_err(|_| ModelError::Validation(format!("{field} is out of range")))
}

/// Parse an identifier taken from a URL path segment.
pub fn parse_identifier(raw: &str) -> Result<i32, ModelError> {
    raw.parse::<u32>()
        .ok()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| ModelError::Validation(format!("invalid identifier: {raw}")))
}
