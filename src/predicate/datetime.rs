//! Date-time predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::Value;

use super::{Operator, Predicate, PredicateKind};

/// Reads an instant from an RFC 3339 string or an epoch-millis integer.
#[must_use]
pub fn instant_of(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Int(millis) => DateTime::from_timestamp_millis(*millis),
        _ => None,
    }
}

/// Compares temporal values.
///
/// Literals are RFC 3339 on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimePredicate {
    pub value: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_value: Option<DateTime<Utc>>,

    #[serde(default)]
    pub operator: Operator,

    #[serde(default)]
    pub negate: bool,
}

impl DateTimePredicate {
    #[must_use]
    pub const fn new(operator: Operator, value: DateTime<Utc>) -> Self {
        Self {
            value,
            range_value: None,
            operator,
            negate: false,
        }
    }

    #[must_use]
    pub const fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            value: from,
            range_value: Some(to),
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

impl Predicate for DateTimePredicate {
    const KIND: PredicateKind = PredicateKind::DateTime;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(input) = value.and_then(instant_of) else {
            return false;
        };
        self.operator
            .compare(&input, &self.value, self.range_value.as_ref())
            .is_some_and(|hit| hit != self.negate)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.operator.needs_range() && self.range_value.is_none() {
            return Err(ValidationError::predicate(
                Self::KIND.tag(),
                "BETWEEN requires rangeValue",
            ));
        }
        Ok(())
    }
}
