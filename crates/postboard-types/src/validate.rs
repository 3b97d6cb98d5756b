//! Required-field validation for create payloads.
//!
//! The only rule is that every required text field is non-empty after
//! trimming surrounding whitespace. Validation runs before any storage
//! call so a rejected payload never mutates the store.

/// A create payload failed field validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A required field was empty or whitespace-only.
    #[error("field `{field}` must not be empty")]
    Empty {
        /// Name of the offending field as it appears on the wire.
        field: &'static str,
    },
}

impl FieldError {
    /// The wire name of the field that failed validation.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } => field,
        }
    }
}

/// Trim `value` and reject it if nothing is left.
///
/// Returns the trimmed text, which is what gets stored.
pub fn require(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty { field });
    }
    Ok(trimmed.to_owned())
}
