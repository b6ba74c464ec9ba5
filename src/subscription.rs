//! Event subscriptions.
//!
//! A subscription binds a filter pipeline to an id. Delivery collaborators
//! hand it batches of events and forward the `TriggeredEvents` it returns.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::SubscriptionConfig;
use crate::error::ValidationError;
use crate::event::AttributeEvent;
use crate::filter::AttributeEventFilter;
use crate::pipeline::{FilterPipeline, MatchMode};
use crate::validation::validate_len;

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subscription as sent by a client, before limits and defaults apply.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub subscription_id: Option<SubscriptionId>,

    #[serde(default)]
    pub mode: Option<MatchMode>,

    #[serde(default)]
    pub filters: Vec<AttributeEventFilter>,
}

/// A validated subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscription {
    subscription_id: SubscriptionId,
    #[serde(flatten)]
    pipeline: FilterPipeline,
}

impl EventSubscription {
    /// Creates a subscription with a fresh id.
    #[must_use]
    pub fn new(pipeline: FilterPipeline) -> Self {
        Self::with_id(SubscriptionId::new(), pipeline)
    }

    #[must_use]
    pub const fn with_id(subscription_id: SubscriptionId, pipeline: FilterPipeline) -> Self {
        Self {
            subscription_id,
            pipeline,
        }
    }

    /// Applies defaults and limits to a client request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the request exceeds the configured limits.
    pub fn from_request(
        request: SubscriptionRequest,
        config: &SubscriptionConfig,
    ) -> Result<Self, ValidationError> {
        let mode = request.mode.unwrap_or(config.default_match_mode);
        let subscription = Self::with_id(
            request.subscription_id.unwrap_or_default(),
            FilterPipeline::from_filters(mode, request.filters),
        );
        subscription.validate(config)?;
        Ok(subscription)
    }

    /// Checks the subscription against configured limits.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::TooManyItems` or the first invalid filter's error.
    pub fn validate(&self, config: &SubscriptionConfig) -> Result<(), ValidationError> {
        let filters = self.pipeline.filters();
        validate_len("filters", filters.len(), config.max_filters)?;

        let entity_ids: usize = filters
            .iter()
            .filter_map(|f| match f {
                AttributeEventFilter::EntityId(ids) => Some(ids.entity_ids().len()),
                AttributeEventFilter::AttributeValue(_) => None,
            })
            .sum();
        validate_len("entityId", entity_ids, config.max_entity_ids)?;

        filters.iter().try_for_each(AttributeEventFilter::validate)
    }

    pub const fn id(&self) -> SubscriptionId {
        self.subscription_id
    }

    pub const fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn matches(&self, event: &AttributeEvent) -> bool {
        self.pipeline.matches(event)
    }

    /// Collects the matching events of a batch.
    ///
    /// Returns `None` when nothing in the batch matches.
    pub fn triggered<I, E>(&self, events: I) -> Option<TriggeredEvents>
    where
        I: IntoIterator<Item = E>,
        E: Borrow<AttributeEvent>,
    {
        let events: Vec<AttributeEvent> = events
            .into_iter()
            .filter(|e| self.matches(e.borrow()))
            .map(|e| e.borrow().clone())
            .collect();
        if events.is_empty() {
            return None;
        }
        debug!(
            subscription_id = %self.subscription_id,
            count = events.len(),
            "subscription triggered"
        );
        Some(TriggeredEvents {
            subscription_id: self.subscription_id,
            events,
        })
    }
}

/// Events delivered to one subscription.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredEvents {
    pub subscription_id: SubscriptionId,
    pub events: Vec<AttributeEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AttributeValueFilter, EntityIdFilter};
    use crate::predicate::NumberPredicate;
    use crate::value::Value;
    use serde_json::json;

    fn temp(entity_id: &str, v: i64) -> AttributeEvent {
        AttributeEvent::for_attribute_at(entity_id, "temp", Some(Value::Int(v)), 7)
    }

    #[test]
    fn test_subscription_ids_unique() {
        assert_ne!(SubscriptionId::new(), SubscriptionId::new());
    }

    #[test]
    fn test_triggered_batch() {
        let sub = EventSubscription::new(
            FilterPipeline::new(MatchMode::All).with_filter(EntityIdFilter::new(["a"])),
        );
        let batch = vec![temp("a", 1), temp("b", 2), temp("a", 3)];
        let triggered = sub.triggered(&batch).unwrap();
        assert_eq!(triggered.subscription_id, sub.id());
        assert_eq!(triggered.events, vec![temp("a", 1), temp("a", 3)]);
    }

    #[test]
    fn test_nothing_triggered() {
        let sub = EventSubscription::new(
            FilterPipeline::new(MatchMode::All).with_filter(EntityIdFilter::new(["z"])),
        );
        assert!(sub.triggered(vec![temp("a", 1)]).is_none());
    }

    #[test]
    fn test_request_uses_configured_default_mode() {
        let request: SubscriptionRequest = serde_json::from_value(json!({
            "filters": [
                {"filterType": "attribute-entity-id", "entityId": ["a"]},
                {"filterType": "attribute-value", "attributeName": "temp",
                 "predicate": {"predicateType": "number", "operator": "GREATER_THAN", "value": 100}}
            ]
        }))
        .unwrap();
        let config = SubscriptionConfig {
            default_match_mode: MatchMode::Any,
            ..SubscriptionConfig::default()
        };
        let sub = EventSubscription::from_request(request, &config).unwrap();
        assert_eq!(sub.pipeline().mode(), MatchMode::Any);
        assert!(sub.matches(&temp("a", 1)));
        assert!(sub.matches(&temp("b", 101)));
    }

    #[test]
    fn test_explicit_mode_wins() {
        let request: SubscriptionRequest = serde_json::from_value(json!({
            "subscriptionId": Uuid::nil().to_string(),
            "mode": "ALL",
            "filters": []
        }))
        .unwrap();
        let config = SubscriptionConfig {
            default_match_mode: MatchMode::Any,
            ..SubscriptionConfig::default()
        };
        let sub = EventSubscription::from_request(request, &config).unwrap();
        assert_eq!(sub.id(), SubscriptionId::from_uuid(Uuid::nil()));
        assert_eq!(sub.pipeline().mode(), MatchMode::All);
    }

    #[test]
    fn test_request_limits() {
        let request = SubscriptionRequest {
            subscription_id: None,
            mode: None,
            filters: vec![EntityIdFilter::new(["a", "b", "c"]).into()],
        };
        let config = SubscriptionConfig {
            max_entity_ids: 2,
            ..SubscriptionConfig::default()
        };
        let err = EventSubscription::from_request(request.clone(), &config).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyItems { .. }));

        let config = SubscriptionConfig {
            max_filters: 0,
            ..SubscriptionConfig::default()
        };
        assert!(EventSubscription::from_request(request, &config).is_err());
    }

    #[test]
    fn test_serialized_form_flattens_pipeline() {
        let id = SubscriptionId::from_uuid(Uuid::nil());
        let sub = EventSubscription::with_id(
            id,
            FilterPipeline::new(MatchMode::All)
                .with_filter(AttributeValueFilter::new("temp", NumberPredicate::equals(1.0))),
        );
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["subscriptionId"], json!(Uuid::nil().to_string()));
        assert_eq!(json["mode"], json!("ALL"));
        assert_eq!(json["filters"][0]["filterType"], json!("attribute-value"));
    }
}
