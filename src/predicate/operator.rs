//! Comparison operators shared by ordered predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison applied by number and date-time predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    #[default]
    Equals,
    GreaterThan,
    GreaterEquals,
    LessThan,
    LessEquals,
    /// Inclusive on both ends; the bounds may be given in either order.
    Between,
}

impl Operator {
    /// Compares `input` against the configured bound(s).
    ///
    /// Returns `None` when `Between` has no second bound.
    pub fn compare<T: PartialOrd>(self, input: &T, value: &T, range_value: Option<&T>) -> Option<bool> {
        let hit = match self {
            Self::Equals => input == value,
            Self::GreaterThan => input > value,
            Self::GreaterEquals => input >= value,
            Self::LessThan => input < value,
            Self::LessEquals => input <= value,
            Self::Between => {
                let range_value = range_value?;
                let (low, high) = if value <= range_value {
                    (value, range_value)
                } else {
                    (range_value, value)
                };
                input >= low && input <= high
            }
        };
        Some(hit)
    }

    pub const fn needs_range(self) -> bool {
        matches!(self, Self::Between)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Equals => "=",
            Self::GreaterThan => ">",
            Self::GreaterEquals => ">=",
            Self::LessThan => "<",
            Self::LessEquals => "<=",
            Self::Between => "between",
        };
        f.write_str(symbol)
    }
}
