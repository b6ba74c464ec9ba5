//! Attribute addressing and state.
//!
//! An `AttributeRef` names one attribute on one entity; an `AttributeState`
//! pairs it with the attribute's current value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::Value;

/// Identifies one attribute on one entity.
///
/// # Examples
///
/// ```
/// use attribute_filter::AttributeRef;
///
/// let r = AttributeRef::new("boiler-1", "temperature");
/// assert_eq!(r.to_string(), "boiler-1/temperature");
/// assert_eq!("boiler-1/temperature".parse::<AttributeRef>().unwrap(), r);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRef {
    entity_id: String,
    attribute_name: String,
}

impl AttributeRef {
    /// Creates a new attribute reference.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, attribute_name: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            attribute_name: attribute_name.into(),
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_id, self.attribute_name)
    }
}

impl FromStr for AttributeRef {
    type Err = ValidationError;

    /// Parses the `entityId/attributeName` form; the entity id ends at the first `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (entity_id, attribute_name) = s
            .split_once('/')
            .ok_or_else(|| ValidationError::missing("attributeName"))?;
        Ok(Self::new(entity_id, attribute_name))
    }
}

/// An attribute together with its current value.
///
/// An absent value and an explicit JSON `null` are the same state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeState {
    attribute_ref: AttributeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

impl AttributeState {
    /// Creates a new attribute state.
    #[must_use]
    pub fn new(attribute_ref: AttributeRef, value: Option<Value>) -> Self {
        Self {
            attribute_ref,
            value: value.filter(|v| !v.is_null()),
        }
    }

    pub const fn attribute_ref(&self) -> &AttributeRef {
        &self.attribute_ref
    }

    /// The new value, if any.
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl fmt::Display for AttributeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{} = {v}", self.attribute_ref),
            None => write!(f, "{} = <none>", self.attribute_ref),
        }
    }
}
