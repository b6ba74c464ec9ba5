//! Filter pipeline.
//!
//! Combines a set of filters into one delivery decision per event. All
//! filters are pure, so evaluation order is irrelevant and evaluation
//! short-circuits.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::{AttributeEvent, EventEnvelope};
use crate::filter::{AttributeEventFilter, EventFilter};

/// How the results of individual filters are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    /// Every filter must pass. An empty pipeline passes everything.
    #[default]
    All,
    /// At least one filter must pass. An empty pipeline passes nothing.
    Any,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// An ordered set of filters plus a combination mode.
///
/// # Examples
///
/// ```
/// use attribute_filter::filter::{AttributeValueFilter, EntityIdFilter};
/// use attribute_filter::predicate::NumberPredicate;
/// use attribute_filter::{AttributeEvent, FilterPipeline, MatchMode, Value};
///
/// let pipeline = FilterPipeline::new(MatchMode::All)
///     .with_filter(EntityIdFilter::new(["boiler-1"]))
///     .with_filter(AttributeValueFilter::new("temperature", NumberPredicate::greater_than(90.0)));
///
/// let hot = AttributeEvent::for_attribute("boiler-1", "temperature", Some(Value::Float(95.0)));
/// let warm = AttributeEvent::for_attribute("boiler-1", "temperature", Some(Value::Float(60.0)));
/// assert!(pipeline.matches(&hot));
/// assert!(!pipeline.matches(&warm));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPipeline {
    #[serde(default)]
    mode: MatchMode,

    #[serde(default)]
    filters: Vec<AttributeEventFilter>,
}

impl FilterPipeline {
    #[must_use]
    pub const fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_filters(mode: MatchMode, filters: Vec<AttributeEventFilter>) -> Self {
        Self { mode, filters }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<AttributeEventFilter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn filters(&self) -> &[AttributeEventFilter] {
        &self.filters
    }

    /// Returns true if the event should be delivered.
    #[must_use]
    pub fn matches(&self, event: &AttributeEvent) -> bool {
        let deliver = match self.mode {
            MatchMode::All => self.filters.iter().all(|f| f.apply(event)),
            MatchMode::Any => self.filters.iter().any(|f| f.apply(event)),
        };
        trace!(
            attribute = %event.attribute_ref(),
            timestamp = event.timestamp(),
            mode = %self.mode,
            filters = self.filters.len(),
            deliver,
            "evaluated attribute event"
        );
        deliver
    }

    /// Evaluates the event inside an envelope; the source does not take part.
    #[must_use]
    pub fn matches_envelope(&self, envelope: &EventEnvelope) -> bool {
        self.matches(envelope.event())
    }

    /// Keeps only the events that should be delivered, preserving order.
    pub fn select<'a, I, E>(&'a self, events: I) -> impl Iterator<Item = E> + 'a
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: 'a,
        E: Borrow<AttributeEvent> + 'a,
    {
        events.into_iter().filter(move |e| self.matches(e.borrow()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AttributeValueFilter, EntityIdFilter};
    use crate::predicate::{BooleanPredicate, NumberPredicate};
    use crate::source::Source;
    use crate::value::Value;

    fn temp(entity_id: &str, v: i64) -> AttributeEvent {
        AttributeEvent::for_attribute_at(entity_id, "temp", Some(Value::Int(v)), 0)
    }

    #[test]
    fn test_empty_pipeline() {
        assert!(FilterPipeline::new(MatchMode::All).matches(&temp("a", 1)));
        assert!(!FilterPipeline::new(MatchMode::Any).matches(&temp("a", 1)));
    }

    #[test]
    fn test_conjunction() {
        let pipeline = FilterPipeline::new(MatchMode::All)
            .with_filter(EntityIdFilter::new(["a"]))
            .with_filter(AttributeValueFilter::new("temp", NumberPredicate::greater_than(10.0)));
        assert!(pipeline.matches(&temp("a", 11)));
        assert!(!pipeline.matches(&temp("a", 9)));
        assert!(!pipeline.matches(&temp("b", 11)));
    }

    #[test]
    fn test_disjunction() {
        let pipeline = FilterPipeline::new(MatchMode::Any)
            .with_filter(EntityIdFilter::new(["a"]))
            .with_filter(AttributeValueFilter::new("temp", NumberPredicate::greater_than(10.0)));
        assert!(pipeline.matches(&temp("a", 1)));
        assert!(pipeline.matches(&temp("b", 11)));
        assert!(!pipeline.matches(&temp("b", 9)));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = EntityIdFilter::new(["a"]);
        let b = AttributeValueFilter::new("temp", BooleanPredicate::new(true));
        let forward = FilterPipeline::new(MatchMode::Any).with_filter(a.clone()).with_filter(b.clone());
        let backward = FilterPipeline::new(MatchMode::Any).with_filter(b).with_filter(a);
        for event in [temp("a", 1), temp("b", 1)] {
            assert_eq!(forward.matches(&event), backward.matches(&event));
        }
    }

    #[test]
    fn test_select_preserves_order() {
        let pipeline = FilterPipeline::new(MatchMode::All).with_filter(EntityIdFilter::new(["a", "c"]));
        let events = vec![temp("a", 1), temp("b", 2), temp("c", 3)];
        let selected: Vec<&AttributeEvent> = pipeline.select(&events).collect();
        assert_eq!(selected, vec![&events[0], &events[2]]);

        let owned: Vec<AttributeEvent> = pipeline.select(events.clone()).collect();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn test_envelope_ignores_source() {
        let pipeline = FilterPipeline::new(MatchMode::All).with_filter(EntityIdFilter::new(["a"]));
        for source in Source::ALL {
            assert!(pipeline.matches_envelope(&EventEnvelope::new(temp("a", 1), source)));
        }
    }

    #[test]
    fn test_repeated_evaluation_is_deterministic() {
        let pipeline = FilterPipeline::new(MatchMode::All)
            .with_filter(AttributeValueFilter::new("temp", NumberPredicate::between(0.0, 5.0)));
        let event = temp("a", 3);
        let first = pipeline.matches(&event);
        assert!((0..100).all(|_| pipeline.matches(&event) == first));
    }

    #[test]
    fn test_wire_form_carries_no_filter_type() {
        let pipeline = FilterPipeline::new(MatchMode::Any).with_filter(EntityIdFilter::new(["a"]));
        let json = serde_json::to_value(&pipeline).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["filters", "mode"]);
        assert!(crate::codec::filter_from_json(&json.to_string()).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let pipeline = std::sync::Arc::new(
            FilterPipeline::new(MatchMode::All).with_filter(EntityIdFilter::new(["a"])),
        );
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = std::sync::Arc::clone(&pipeline);
                std::thread::spawn(move || pipeline.matches(&temp(if i % 2 == 0 { "a" } else { "b" }, i)))
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true, false]);
    }
}
