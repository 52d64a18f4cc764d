//! Field-level rules shared by the aggregates.
//!
//! Messages follow the `"<FieldName> <reason>"` shape that API clients match
//! against, so they must not be reworded.

use thiserror::Error;

/// A field constraint was violated while building or mutating an aggregate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EntityValidationError(pub String);

pub type ValidationResult = Result<(), EntityValidationError>;

pub fn not_null_or_empty(value: &str, field: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(EntityValidationError(format!(
            "{field} should not be null or empty"
        )));
    }
    Ok(())
}

/// Length in UTF-16 code units; characters outside the BMP count twice.
fn length(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn min_length(value: &str, min: usize, field: &str) -> ValidationResult {
    if length(value) < min {
        return Err(EntityValidationError(format!(
            "{field} should be at least {min} characters long"
        )));
    }
    Ok(())
}

pub fn max_length(value: &str, max: usize, field: &str) -> ValidationResult {
    if length(value) > max {
        return Err(EntityValidationError(format!(
            "{field} should be less or equal {max} characters long"
        )));
    }
    Ok(())
}
