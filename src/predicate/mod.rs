//! Value predicates.
//!
//! A value predicate is a pure, serializable test against an attribute value.
//! The set of variants is closed: `PredicateKind` is the one registry mapping
//! `predicateType` discriminators to variants, and every dispatch over it is
//! an exhaustive match, so adding a variant is a compile-checked change.
//!
//! Evaluation never fails. A missing value or a value of the wrong shape is
//! "no match", which keeps filtering robust against heterogeneous attributes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{split_tagged, tagged};
use crate::error::{DecodeError, ValidationError};
use crate::value::Value;

mod boolean;
mod datetime;
mod geofence;
mod number;
mod object;
mod operator;
mod string;

pub use boolean::BooleanPredicate;
pub use datetime::{instant_of, DateTimePredicate};
pub use geofence::{RadialGeofencePredicate, RectangularGeofencePredicate};
pub use number::NumberPredicate;
pub use object::{ObjectValueKeyPredicate, ValueEmptyPredicate, ValueNotEmptyPredicate};
pub use operator::Operator;
pub use string::{ArrayMatch, StringArrayPredicate, StringMatch, StringPredicate};

/// Behaviour shared by every predicate variant.
pub trait Predicate {
    /// Discriminator of this variant.
    const KIND: PredicateKind;

    /// Returns true if `value` satisfies the predicate.
    fn matches(&self, value: Option<&Value>) -> bool;

    /// Checks the predicate's parameters.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the parameters can never be evaluated sensibly.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Discriminator for predicate variants.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    String,
    Boolean,
    StringArray,
    DateTime,
    Number,
    Radial,
    Rectangular,
    ObjectValueKey,
    ValueEmpty,
    ValueNotEmpty,
}

impl PredicateKind {
    /// Wire field carrying the discriminator.
    pub const FIELD: &'static str = "predicateType";

    /// Every kind, in registry order.
    pub const ALL: [Self; 10] = [
        Self::String,
        Self::Boolean,
        Self::StringArray,
        Self::DateTime,
        Self::Number,
        Self::Radial,
        Self::Rectangular,
        Self::ObjectValueKey,
        Self::ValueEmpty,
        Self::ValueNotEmpty,
    ];

    /// The stable wire tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::StringArray => "string-array",
            Self::DateTime => "datetime",
            Self::Number => "number",
            Self::Radial => "radial",
            Self::Rectangular => "rectangular",
            Self::ObjectValueKey => "object-value-key",
            Self::ValueEmpty => "value-empty",
            Self::ValueNotEmpty => "value-not-empty",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PredicateKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| DecodeError::UnknownDiscriminator {
                field: Self::FIELD,
                tag: s.to_string(),
            })
    }
}

/// Any value predicate.
///
/// On the wire this is the variant's fields plus a `predicateType` tag.
///
/// # Examples
///
/// ```
/// use attribute_filter::predicate::{NumberPredicate, ValuePredicate};
/// use attribute_filter::Value;
///
/// let p: ValuePredicate = serde_json::from_str(
///     r#"{"predicateType": "number", "operator": "GREATER_THAN", "value": 30}"#,
/// ).unwrap();
/// assert_eq!(p, ValuePredicate::from(NumberPredicate::greater_than(30.0)));
/// assert!(p.matches(Some(&Value::Int(31))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValuePredicate {
    String(StringPredicate),
    Boolean(BooleanPredicate),
    StringArray(StringArrayPredicate),
    DateTime(DateTimePredicate),
    Number(NumberPredicate),
    Radial(RadialGeofencePredicate),
    Rectangular(RectangularGeofencePredicate),
    ObjectValueKey(ObjectValueKeyPredicate),
    ValueEmpty(ValueEmptyPredicate),
    ValueNotEmpty(ValueNotEmptyPredicate),
}

impl ValuePredicate {
    #[must_use]
    pub const fn kind(&self) -> PredicateKind {
        match self {
            Self::String(_) => StringPredicate::KIND,
            Self::Boolean(_) => BooleanPredicate::KIND,
            Self::StringArray(_) => StringArrayPredicate::KIND,
            Self::DateTime(_) => DateTimePredicate::KIND,
            Self::Number(_) => NumberPredicate::KIND,
            Self::Radial(_) => RadialGeofencePredicate::KIND,
            Self::Rectangular(_) => RectangularGeofencePredicate::KIND,
            Self::ObjectValueKey(_) => ObjectValueKeyPredicate::KIND,
            Self::ValueEmpty(_) => ValueEmptyPredicate::KIND,
            Self::ValueNotEmpty(_) => ValueNotEmptyPredicate::KIND,
        }
    }

    /// The `predicateType` discriminator.
    #[must_use]
    pub const fn predicate_type(&self) -> &'static str {
        self.kind().tag()
    }

    /// Returns true if `value` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Self::String(p) => p.matches(value),
            Self::Boolean(p) => p.matches(value),
            Self::StringArray(p) => p.matches(value),
            Self::DateTime(p) => p.matches(value),
            Self::Number(p) => p.matches(value),
            Self::Radial(p) => p.matches(value),
            Self::Rectangular(p) => p.matches(value),
            Self::ObjectValueKey(p) => p.matches(value),
            Self::ValueEmpty(p) => p.matches(value),
            Self::ValueNotEmpty(p) => p.matches(value),
        }
    }

    /// Checks the wrapped predicate's parameters.
    ///
    /// # Errors
    ///
    /// Returns the variant's `ValidationError`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::String(p) => p.validate(),
            Self::Boolean(p) => p.validate(),
            Self::StringArray(p) => p.validate(),
            Self::DateTime(p) => p.validate(),
            Self::Number(p) => p.validate(),
            Self::Radial(p) => p.validate(),
            Self::Rectangular(p) => p.validate(),
            Self::ObjectValueKey(p) => p.validate(),
            Self::ValueEmpty(p) => p.validate(),
            Self::ValueNotEmpty(p) => p.validate(),
        }
    }

    /// Canonical wire representation.
    ///
    /// # Errors
    ///
    /// Fails only if a variant does not serialize to a JSON object.
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        let tag = self.predicate_type();
        match self {
            Self::String(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::Boolean(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::StringArray(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::DateTime(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::Number(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::Radial(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::Rectangular(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::ObjectValueKey(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::ValueEmpty(p) => tagged(PredicateKind::FIELD, tag, p),
            Self::ValueNotEmpty(p) => tagged(PredicateKind::FIELD, tag, p),
        }
    }

    /// Decodes and validates a predicate from its wire representation.
    ///
    /// # Errors
    ///
    /// Fails on a missing or unknown `predicateType`, on fields that do not
    /// fit the variant, and on parameters that do not validate.
    pub fn from_json_value(raw: serde_json::Value) -> Result<Self, DecodeError> {
        let (tag, body) = split_tagged(raw, PredicateKind::FIELD)?;
        let predicate = match tag.parse::<PredicateKind>()? {
            PredicateKind::String => Self::String(serde_json::from_value(body)?),
            PredicateKind::Boolean => Self::Boolean(serde_json::from_value(body)?),
            PredicateKind::StringArray => Self::StringArray(serde_json::from_value(body)?),
            PredicateKind::DateTime => Self::DateTime(serde_json::from_value(body)?),
            PredicateKind::Number => Self::Number(serde_json::from_value(body)?),
            PredicateKind::Radial => Self::Radial(serde_json::from_value(body)?),
            PredicateKind::Rectangular => Self::Rectangular(serde_json::from_value(body)?),
            PredicateKind::ObjectValueKey => Self::ObjectValueKey(serde_json::from_value(body)?),
            PredicateKind::ValueEmpty => Self::ValueEmpty(serde_json::from_value(body)?),
            PredicateKind::ValueNotEmpty => Self::ValueNotEmpty(serde_json::from_value(body)?),
        };
        predicate.validate()?;
        Ok(predicate)
    }
}

impl Serialize for ValuePredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValuePredicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json_value(raw).map_err(serde::de::Error::custom)
    }
}

impl From<StringPredicate> for ValuePredicate {
    fn from(p: StringPredicate) -> Self {
        Self::String(p)
    }
}

impl From<BooleanPredicate> for ValuePredicate {
    fn from(p: BooleanPredicate) -> Self {
        Self::Boolean(p)
    }
}

impl From<StringArrayPredicate> for ValuePredicate {
    fn from(p: StringArrayPredicate) -> Self {
        Self::StringArray(p)
    }
}

impl From<DateTimePredicate> for ValuePredicate {
    fn from(p: DateTimePredicate) -> Self {
        Self::DateTime(p)
    }
}

impl From<NumberPredicate> for ValuePredicate {
    fn from(p: NumberPredicate) -> Self {
        Self::Number(p)
    }
}

impl From<RadialGeofencePredicate> for ValuePredicate {
    fn from(p: RadialGeofencePredicate) -> Self {
        Self::Radial(p)
    }
}

impl From<RectangularGeofencePredicate> for ValuePredicate {
    fn from(p: RectangularGeofencePredicate) -> Self {
        Self::Rectangular(p)
    }
}

impl From<ObjectValueKeyPredicate> for ValuePredicate {
    fn from(p: ObjectValueKeyPredicate) -> Self {
        Self::ObjectValueKey(p)
    }
}

impl From<ValueEmptyPredicate> for ValuePredicate {
    fn from(p: ValueEmptyPredicate) -> Self {
        Self::ValueEmpty(p)
    }
}

impl From<ValueNotEmptyPredicate> for ValuePredicate {
    fn from(p: ValueNotEmptyPredicate) -> Self {
        Self::ValueNotEmpty(p)
    }
}
