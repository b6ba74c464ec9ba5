//! Attribute events.
//!
//! An `AttributeEvent` is a timestamped `AttributeState`. Its provenance
//! (`Source`) is carried separately in an `EventEnvelope` so that it never
//! takes part in the event's equality or serialized form.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeRef, AttributeState};
use crate::error::{DecodeError, ValidationError};
use crate::source::{Source, HEADER_SOURCE};
use crate::value::Value;

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A timestamped attribute state change.
///
/// # Examples
///
/// ```
/// use attribute_filter::{AttributeEvent, Value};
///
/// let event = AttributeEvent::for_attribute_at("boiler-1", "temperature", Some(Value::Float(71.5)), 1_700_000_000_000);
/// assert_eq!(event.entity_id(), "boiler-1");
/// assert_eq!(event.value(), Some(&Value::Float(71.5)));
/// assert_eq!(event.timestamp(), 1_700_000_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAttributeEvent")]
pub struct AttributeEvent {
    attribute_state: AttributeState,
    timestamp: i64,
}

/// Wire shape before the non-null state invariant is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawAttributeEvent {
    #[serde(default)]
    attribute_state: Option<AttributeState>,
    #[serde(default)]
    timestamp: Option<i64>,
}

impl TryFrom<RawAttributeEvent> for AttributeEvent {
    type Error = ValidationError;

    fn try_from(raw: RawAttributeEvent) -> Result<Self, Self::Error> {
        let state = raw
            .attribute_state
            .ok_or_else(|| ValidationError::missing("attributeState"))?;
        Ok(Self {
            attribute_state: state,
            timestamp: raw.timestamp.unwrap_or_else(now_millis),
        })
    }
}

impl AttributeEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(attribute_state: AttributeState) -> Self {
        Self::with_timestamp(attribute_state, now_millis())
    }

    /// Creates an event with an explicit epoch-millis timestamp.
    #[must_use]
    pub const fn with_timestamp(attribute_state: AttributeState, timestamp: i64) -> Self {
        Self {
            attribute_state,
            timestamp,
        }
    }

    #[must_use]
    pub fn for_attribute(
        entity_id: impl Into<String>,
        attribute_name: impl Into<String>,
        value: Option<Value>,
    ) -> Self {
        Self::for_ref(AttributeRef::new(entity_id, attribute_name), value)
    }

    #[must_use]
    pub fn for_attribute_at(
        entity_id: impl Into<String>,
        attribute_name: impl Into<String>,
        value: Option<Value>,
        timestamp: i64,
    ) -> Self {
        Self::for_ref_at(AttributeRef::new(entity_id, attribute_name), value, timestamp)
    }

    #[must_use]
    pub fn for_ref(attribute_ref: AttributeRef, value: Option<Value>) -> Self {
        Self::new(AttributeState::new(attribute_ref, value))
    }

    #[must_use]
    pub fn for_ref_at(attribute_ref: AttributeRef, value: Option<Value>, timestamp: i64) -> Self {
        Self::with_timestamp(AttributeState::new(attribute_ref, value), timestamp)
    }

    /// Creates a new event builder.
    #[must_use]
    pub fn builder() -> AttributeEventBuilder {
        AttributeEventBuilder::new()
    }

    pub const fn attribute_state(&self) -> &AttributeState {
        &self.attribute_state
    }

    pub const fn attribute_ref(&self) -> &AttributeRef {
        self.attribute_state.attribute_ref()
    }

    pub fn entity_id(&self) -> &str {
        self.attribute_ref().entity_id()
    }

    pub fn attribute_name(&self) -> &str {
        self.attribute_ref().attribute_name()
    }

    /// The new value; `None` when the attribute was cleared.
    pub const fn value(&self) -> Option<&Value> {
        self.attribute_state.value()
    }

    /// Epoch milliseconds.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The timestamp as a UTC instant, if representable.
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl fmt::Display for AttributeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.attribute_state, self.timestamp)
    }
}

/// Builder for `AttributeEvent`.
///
/// Either a complete `AttributeState` or an entity id plus attribute name
/// must be supplied.
#[derive(Debug, Default)]
pub struct AttributeEventBuilder {
    state: Option<AttributeState>,
    entity_id: Option<String>,
    attribute_name: Option<String>,
    value: Option<Value>,
    timestamp: Option<i64>,
}

impl AttributeEventBuilder {
    /// Creates a new event builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the complete state; takes precedence over the individual parts.
    #[must_use]
    pub fn state(mut self, state: AttributeState) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets entity id and attribute name from a reference.
    #[must_use]
    pub fn attribute_ref(mut self, attribute_ref: AttributeRef) -> Self {
        self.entity_id = Some(attribute_ref.entity_id().to_string());
        self.attribute_name = Some(attribute_ref.attribute_name().to_string());
        self
    }

    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn attribute_name(mut self, attribute_name: impl Into<String>) -> Self {
        self.attribute_name = Some(attribute_name.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the timestamp (epoch millis); defaults to build time.
    #[must_use]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the event.
    /// Returns `ValidationError` if no state can be assembled.
    pub fn build(self) -> Result<AttributeEvent, ValidationError> {
        let state = match self.state {
            Some(state) => state,
            None => {
                let entity_id = self
                    .entity_id
                    .ok_or_else(|| ValidationError::missing("entityId"))?;
                let attribute_name = self
                    .attribute_name
                    .ok_or_else(|| ValidationError::missing("attributeName"))?;
                AttributeState::new(AttributeRef::new(entity_id, attribute_name), self.value)
            }
        };

        Ok(AttributeEvent::with_timestamp(
            state,
            self.timestamp.unwrap_or_else(now_millis),
        ))
    }
}

/// An event together with its out-of-band provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEnvelope {
    event: AttributeEvent,
    source: Source,
}

impl EventEnvelope {
    #[must_use]
    pub const fn new(event: AttributeEvent, source: Source) -> Self {
        Self { event, source }
    }

    /// Rebuilds an envelope from transport headers.
    ///
    /// # Errors
    ///
    /// Fails when the source header is missing or holds an unknown value.
    pub fn from_headers(
        event: AttributeEvent,
        headers: &BTreeMap<String, String>,
    ) -> Result<Self, DecodeError> {
        let raw = headers.get(HEADER_SOURCE).ok_or_else(|| DecodeError::MissingHeader {
            name: HEADER_SOURCE.to_string(),
        })?;
        Ok(Self::new(event, raw.parse()?))
    }

    /// Transport headers describing this envelope's metadata.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert(HEADER_SOURCE.to_string(), self.source.to_string());
        headers
    }

    pub const fn event(&self) -> &AttributeEvent {
        &self.event
    }

    pub const fn source(&self) -> Source {
        self.source
    }

    #[must_use]
    pub fn into_event(self) -> AttributeEvent {
        self.event
    }
}
