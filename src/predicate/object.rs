//! Object-shape and presence predicates.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::validate_non_empty;
use crate::value::Value;

use super::{Predicate, PredicateKind};

/// Tests whether an object value has a key, whatever the key's value.
///
/// Non-object inputs never match, negated or not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectValueKeyPredicate {
    pub key: String,

    #[serde(default)]
    pub negated: bool,
}

impl ObjectValueKeyPredicate {
    #[must_use]
    pub fn has_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            negated: false,
        }
    }

    #[must_use]
    pub fn lacks_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            negated: true,
        }
    }
}

impl Predicate for ObjectValueKeyPredicate {
    const KIND: PredicateKind = PredicateKind::ObjectValueKey;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(obj) = value.and_then(Value::as_object) else {
            return false;
        };
        obj.contains_key(&self.key) != self.negated
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_non_empty("key", &self.key)
    }
}

/// Matches absent or empty values (`null`, `""`, `[]`, `{}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueEmptyPredicate {}

impl Predicate for ValueEmptyPredicate {
    const KIND: PredicateKind = PredicateKind::ValueEmpty;

    fn matches(&self, value: Option<&Value>) -> bool {
        value.map_or(true, Value::is_empty)
    }
}

/// Matches present, non-empty values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueNotEmptyPredicate {}

impl Predicate for ValueNotEmptyPredicate {
    const KIND: PredicateKind = PredicateKind::ValueNotEmpty;

    fn matches(&self, value: Option<&Value>) -> bool {
        value.is_some_and(|v| !v.is_empty())
    }
}
