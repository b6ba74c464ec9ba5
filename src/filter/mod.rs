//! Event filters.
//!
//! An event filter decides whether a whole event should be delivered. Filters
//! are pure: `apply` has no side effects and never fails for a well-formed
//! event, so filters can be shared across threads and evaluated in any order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{split_tagged, tagged};
use crate::error::{DecodeError, ValidationError};
use crate::event::AttributeEvent;

mod entity;
mod value;

pub use entity::EntityIdFilter;
pub use value::AttributeValueFilter;

/// A pure test against a whole event.
pub trait EventFilter<T>: Send + Sync {
    /// Stable discriminator of the concrete filter.
    fn filter_type(&self) -> &'static str;

    /// Returns true if the event should pass.
    fn apply(&self, event: &T) -> bool;
}

/// Discriminator for attribute event filters.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    EntityId,
    AttributeValue,
}

impl FilterKind {
    /// Wire field carrying the discriminator.
    pub const FIELD: &'static str = "filterType";

    /// Every kind, in registry order.
    pub const ALL: [Self; 2] = [Self::EntityId, Self::AttributeValue];

    /// The stable wire tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EntityId => "attribute-entity-id",
            Self::AttributeValue => "attribute-value",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FilterKind {
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

/// Any filter over attribute events.
///
/// On the wire this is the filter's fields plus a `filterType` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeEventFilter {
    EntityId(EntityIdFilter),
    AttributeValue(AttributeValueFilter),
}

impl AttributeEventFilter {
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::EntityId(_) => FilterKind::EntityId,
            Self::AttributeValue(_) => FilterKind::AttributeValue,
        }
    }

    /// Checks the filter's parameters.
    ///
    /// # Errors
    ///
    /// Returns the wrapped filter's `ValidationError`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::EntityId(_) => Ok(()),
            Self::AttributeValue(f) => f.validate(),
        }
    }

    /// Canonical wire representation.
    ///
    /// # Errors
    ///
    /// Fails only if a filter does not serialize to a JSON object.
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        let tag = self.kind().tag();
        match self {
            Self::EntityId(f) => tagged(FilterKind::FIELD, tag, f),
            Self::AttributeValue(f) => tagged(FilterKind::FIELD, tag, f),
        }
    }

    /// Decodes and validates a filter from its wire representation.
    ///
    /// # Errors
    ///
    /// Fails on a missing or unknown `filterType` and on malformed or invalid fields.
    pub fn from_json_value(raw: serde_json::Value) -> Result<Self, DecodeError> {
        let (tag, body) = split_tagged(raw, FilterKind::FIELD)?;
        let filter = match tag.parse::<FilterKind>()? {
            FilterKind::EntityId => Self::EntityId(serde_json::from_value(body)?),
            FilterKind::AttributeValue => Self::AttributeValue(serde_json::from_value(body)?),
        };
        filter.validate()?;
        Ok(filter)
    }
}

impl EventFilter<AttributeEvent> for AttributeEventFilter {
    fn filter_type(&self) -> &'static str {
        self.kind().tag()
    }

    fn apply(&self, event: &AttributeEvent) -> bool {
        match self {
            Self::EntityId(f) => f.apply(event),
            Self::AttributeValue(f) => f.apply(event),
        }
    }
}

impl Serialize for AttributeEventFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeEventFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Self::from_json_value(raw).map_err(serde::de::Error::custom)
    }
}

impl From<EntityIdFilter> for AttributeEventFilter {
    fn from(f: EntityIdFilter) -> Self {
        Self::EntityId(f)
    }
}

impl From<AttributeValueFilter> for AttributeEventFilter {
    fn from(f: AttributeValueFilter) -> Self {
        Self::AttributeValue(f)
    }
}
