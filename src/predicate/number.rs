//! Numeric predicates.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::Value;

use super::{Operator, Predicate, PredicateKind};

/// Compares numeric values. Integers and floats are both accepted as input.
///
/// # Examples
///
/// ```
/// use attribute_filter::predicate::{NumberPredicate, Predicate};
/// use attribute_filter::Value;
///
/// let p = NumberPredicate::between(10.0, 20.0);
/// assert!(p.matches(Some(&Value::Int(15))));
/// assert!(p.matches(Some(&Value::Int(20))));
/// assert!(!p.matches(Some(&Value::Int(25))));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPredicate {
    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_value: Option<f64>,

    #[serde(default)]
    pub operator: Operator,

    #[serde(default)]
    pub negate: bool,
}

impl NumberPredicate {
    #[must_use]
    pub const fn new(operator: Operator, value: f64) -> Self {
        Self {
            value,
            range_value: None,
            operator,
            negate: false,
        }
    }

    #[must_use]
    pub const fn equals(value: f64) -> Self {
        Self::new(Operator::Equals, value)
    }

    #[must_use]
    pub const fn greater_than(value: f64) -> Self {
        Self::new(Operator::GreaterThan, value)
    }

    #[must_use]
    pub const fn less_than(value: f64) -> Self {
        Self::new(Operator::LessThan, value)
    }

    /// Inclusive range; bounds may be given in either order.
    #[must_use]
    pub const fn between(low: f64, high: f64) -> Self {
        Self {
            value: low,
            range_value: Some(high),
            operator: Operator::Between,
            negate: false,
        }
    }

    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }
}

impl Predicate for NumberPredicate {
    const KIND: PredicateKind = PredicateKind::Number;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(input) = value.and_then(Value::as_float) else {
            return false;
        };
        if input.is_nan() {
            return false;
        }
        self.operator
            .compare(&input, &self.value, self.range_value.as_ref())
            .is_some_and(|hit| hit != self.negate)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.value.is_finite() {
            return Err(ValidationError::predicate(Self::KIND.tag(), "value must be finite"));
        }
        match self.range_value {
            Some(range) if !range.is_finite() => Err(ValidationError::predicate(
                Self::KIND.tag(),
                "rangeValue must be finite",
            )),
            None if self.operator.needs_range() => Err(ValidationError::predicate(
                Self::KIND.tag(),
                "BETWEEN requires rangeValue",
            )),
            _ => Ok(()),
        }
    }
}
