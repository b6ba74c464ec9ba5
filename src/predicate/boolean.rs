//! Boolean predicate.

use serde::{Deserialize, Serialize};

use crate::value::Value;

use super::{Predicate, PredicateKind};

/// Equality against a boolean literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanPredicate {
    pub value: bool,
}

impl BooleanPredicate {
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self { value }
    }
}

impl Predicate for BooleanPredicate {
    const KIND: PredicateKind = PredicateKind::Boolean;

    fn matches(&self, value: Option<&Value>) -> bool {
        value.and_then(Value::as_bool) == Some(self.value)
    }
}
