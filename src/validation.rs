//! Payload limits and shared validation helpers.
//!
//! Predicates and filters arrive from clients as JSON, so decoded values are
//! bounded before they are evaluated against every event.

use crate::error::ValidationError;

/// Conservative upper bound for free-form text fields.
pub const MAX_TEXT_LEN: usize = 16 * 1024;

/// Conservative upper bound for list-valued fields.
pub const MAX_ARRAY_LEN: usize = 1024;

/// Validate a non-empty trimmed string field.
pub(crate) fn validate_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    validate_text(field, value)
}

pub(crate) fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_TEXT_LEN {
        return Err(ValidationError::FieldTooLong {
            field: field.to_string(),
            max_length: MAX_TEXT_LEN,
        });
    }
    Ok(())
}

pub(crate) fn validate_len(field: &'static str, actual: usize, max: usize) -> Result<(), ValidationError> {
    if actual > max {
        return Err(ValidationError::TooManyItems {
            field: field.to_string(),
            max,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn validate_text_list(field: &'static str, values: &[String]) -> Result<(), ValidationError> {
    validate_len(field, values.len(), MAX_ARRAY_LEN)?;
    values.iter().try_for_each(|v| validate_text(field, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(validate_non_empty("key", "  ").is_err());
        assert!(validate_non_empty("key", "status").is_ok());
    }

    #[test]
    fn test_text_limit() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = validate_text("value", &long).unwrap_err();
        assert!(matches!(err, ValidationError::FieldTooLong { .. }));
    }

    #[test]
    fn test_list_limit() {
        let values = vec![String::new(); MAX_ARRAY_LEN + 1];
        let err = validate_text_list("value", &values).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooManyItems {
                field: "value".to_string(),
                max: MAX_ARRAY_LEN,
                actual: MAX_ARRAY_LEN + 1,
            }
        );
    }
}
