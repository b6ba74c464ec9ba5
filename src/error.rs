//! Error types for attribute filtering.
//!
//! All errors are strongly typed using thiserror. Construction and wire
//! decoding fail fast with these types; predicate and filter evaluation
//! never produce errors (a mismatched value is simply "no match").

use thiserror::Error;

/// Validation errors that occur while constructing or validating values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Invalid {kind} predicate: {reason}")]
    InvalidPredicate {
        kind: &'static str,
        reason: String,
    },

    #[error("Field '{field}' exceeds maximum length of {max_length}")]
    FieldTooLong {
        field: String,
        max_length: usize,
    },

    #[error("Field '{field}' has {actual} items, maximum is {max}")]
    TooManyItems {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl ValidationError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn predicate(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors raised while decoding wire payloads.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("Discriminator field '{field}' is missing")]
    MissingDiscriminator {
        field: &'static str,
    },

    #[error("Unknown {field} '{tag}'")]
    UnknownDiscriminator {
        field: &'static str,
        tag: String,
    },

    #[error("Malformed payload: {message}")]
    Malformed {
        message: String,
    },

    #[error("Unknown event source '{value}'")]
    UnknownSource {
        value: String,
    },

    #[error("Header '{name}' is missing")]
    MissingHeader {
        name: String,
    },

    #[error("Invalid payload: {0}")]
    Invalid(#[from] ValidationError),
}

impl DecodeError {
    pub(crate) fn malformed(message: impl std::fmt::Display) -> Self {
        Self::Malformed {
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self::malformed(e)
    }
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl FilterError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a decode error.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns true if the payload named a discriminator this build does not know.
    #[must_use]
    pub const fn is_unknown_discriminator(&self) -> bool {
        matches!(self, Self::Decode(DecodeError::UnknownDiscriminator { .. }))
    }
}

/// Result type alias for crate operations.
pub type FilterResult<T> = Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_missing_field() {
        let err = ValidationError::missing("attributeState");
        let msg = format!("{err}");
        assert!(msg.contains("attributeState"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_validation_error_invalid_predicate() {
        let err = ValidationError::predicate("number", "BETWEEN requires rangeValue");
        let msg = format!("{err}");
        assert!(msg.contains("number"));
        assert!(msg.contains("rangeValue"));
    }

    #[test]
    fn test_decode_error_unknown_discriminator() {
        let err = DecodeError::UnknownDiscriminator {
            field: "predicateType",
            tag: "regex".to_string(),
        };
        assert_eq!(format!("{err}"), "Unknown predicateType 'regex'");
    }

    #[test]
    fn test_decode_error_from_validation() {
        let err: DecodeError = ValidationError::missing("key").into();
        assert!(matches!(err, DecodeError::Invalid(_)));
    }

    #[test]
    fn test_filter_error_classification() {
        let err: FilterError = ValidationError::missing("x").into();
        assert!(err.is_validation());
        assert!(!err.is_decode());

        let err: FilterError = DecodeError::UnknownDiscriminator {
            field: "filterType",
            tag: "nope".to_string(),
        }
        .into();
        assert!(err.is_decode());
        assert!(err.is_unknown_discriminator());
        assert!(!err.is_validation());
    }
}
