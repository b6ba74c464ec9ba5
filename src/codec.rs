//! Wire codec helpers.
//!
//! Serde already provides the JSON mapping for every type. This module
//! centralizes the discriminator handling shared by tagged unions and the
//! entry points used at the decoding boundary, where failures must surface
//! as typed `DecodeError`s.

use serde::Serialize;
use tracing::debug;

use crate::config::SubscriptionConfig;
use crate::error::{DecodeError, FilterError, FilterResult};
use crate::event::{AttributeEvent, RawAttributeEvent};
use crate::filter::AttributeEventFilter;
use crate::predicate::ValuePredicate;
use crate::subscription::{EventSubscription, SubscriptionRequest};

/// Splits a tagged object into its discriminator and the remaining fields.
pub(crate) fn split_tagged(
    raw: serde_json::Value,
    field: &'static str,
) -> Result<(String, serde_json::Value), DecodeError> {
    let serde_json::Value::Object(mut map) = raw else {
        return Err(DecodeError::malformed(format!(
            "expected an object carrying '{field}'"
        )));
    };
    match map.remove(field) {
        Some(serde_json::Value::String(tag)) => Ok((tag, serde_json::Value::Object(map))),
        Some(other) => Err(DecodeError::malformed(format!(
            "'{field}' must be a string, got {other}"
        ))),
        None => Err(DecodeError::MissingDiscriminator { field }),
    }
}

/// Serializes `body` as an object and adds the discriminator.
pub(crate) fn tagged<T: Serialize>(
    field: &'static str,
    tag: &'static str,
    body: &T,
) -> Result<serde_json::Value, serde_json::Error> {
    let mut value = serde_json::to_value(body)?;
    let serde_json::Value::Object(map) = &mut value else {
        return Err(serde::ser::Error::custom(format!(
            "{tag} does not serialize to an object"
        )));
    };
    map.insert(field.to_string(), serde_json::Value::String(tag.to_string()));
    Ok(value)
}

fn parse(s: &str) -> Result<serde_json::Value, DecodeError> {
    serde_json::from_str(s).map_err(|e| {
        debug!(error = %e, "rejected payload that is not JSON");
        DecodeError::from(e)
    })
}

/// Decodes a value predicate.
pub fn predicate_from_json(s: &str) -> Result<ValuePredicate, DecodeError> {
    ValuePredicate::from_json_value(parse(s)?).map_err(|e| {
        debug!(error = %e, "rejected value predicate");
        e
    })
}

/// Decodes an event filter.
pub fn filter_from_json(s: &str) -> Result<AttributeEventFilter, DecodeError> {
    AttributeEventFilter::from_json_value(parse(s)?).map_err(|e| {
        debug!(error = %e, "rejected event filter");
        e
    })
}

/// Decodes an attribute event.
///
/// A payload without an `attributeState` fails with `DecodeError::Invalid`.
pub fn event_from_json(s: &str) -> Result<AttributeEvent, DecodeError> {
    let raw: RawAttributeEvent = serde_json::from_value(parse(s)?).map_err(|e| {
        debug!(error = %e, "rejected attribute event");
        DecodeError::from(e)
    })?;
    AttributeEvent::try_from(raw).map_err(|e| {
        debug!(error = %e, "attribute event without state");
        DecodeError::from(e)
    })
}

/// Decodes a subscription and applies the configured defaults and limits.
///
/// Wire failures surface as `FilterError::Decode`, limit violations as
/// `FilterError::Validation`.
pub fn subscription_from_json(s: &str, config: &SubscriptionConfig) -> FilterResult<EventSubscription> {
    let request: SubscriptionRequest = serde_json::from_value(parse(s)?).map_err(|e| {
        debug!(error = %e, "rejected subscription");
        FilterError::Decode(DecodeError::from(e))
    })?;
    EventSubscription::from_request(request, config).map_err(|e| {
        debug!(error = %e, "subscription exceeds limits");
        FilterError::Validation(e)
    })
}

/// Serializes any wire type to compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, DecodeError> {
    serde_json::to_string(value).map_err(DecodeError::from)
}

/// Serializes any wire type to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, DecodeError> {
    serde_json::to_string_pretty(value).map_err(DecodeError::from)
}
