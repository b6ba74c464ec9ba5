//! Value-predicate filters scoped to an attribute.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeRef;
use crate::error::ValidationError;
use crate::event::AttributeEvent;
use crate::predicate::ValuePredicate;
use crate::validation::validate_non_empty;

use super::{EventFilter, FilterKind};

/// Passes events for a named attribute whose value satisfies a predicate.
///
/// Without an entity id the filter applies to that attribute on every entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValueFilter {
    attribute_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,

    predicate: ValuePredicate,
}

impl AttributeValueFilter {
    /// Filters `attribute_name` on any entity.
    #[must_use]
    pub fn new(attribute_name: impl Into<String>, predicate: impl Into<ValuePredicate>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            entity_id: None,
            predicate: predicate.into(),
        }
    }

    /// Filters exactly one attribute.
    #[must_use]
    pub fn for_ref(attribute_ref: &AttributeRef, predicate: impl Into<ValuePredicate>) -> Self {
        Self {
            attribute_name: attribute_ref.attribute_name().to_string(),
            entity_id: Some(attribute_ref.entity_id().to_string()),
            predicate: predicate.into(),
        }
    }

    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub const fn predicate(&self) -> &ValuePredicate {
        &self.predicate
    }

    /// Returns true if the event addresses an attribute within this filter's scope.
    #[must_use]
    pub fn in_scope(&self, attribute_ref: &AttributeRef) -> bool {
        attribute_ref.attribute_name() == self.attribute_name
            && self
                .entity_id
                .as_deref()
                .map_or(true, |id| id == attribute_ref.entity_id())
    }

    /// Validates the scope and the predicate.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a blank attribute name or an invalid predicate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_empty("attributeName", &self.attribute_name)?;
        self.predicate.validate()
    }
}

impl EventFilter<AttributeEvent> for AttributeValueFilter {
    fn filter_type(&self) -> &'static str {
        FilterKind::AttributeValue.tag()
    }

    fn apply(&self, event: &AttributeEvent) -> bool {
        self.in_scope(event.attribute_ref()) && self.predicate.matches(event.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{NumberPredicate, ValueEmptyPredicate};
    use crate::value::Value;

    #[test]
    fn test_scope_any_entity() {
        let filter = AttributeValueFilter::new("temp", NumberPredicate::greater_than(30.0));
        assert!(filter.apply(&AttributeEvent::for_attribute("a", "temp", Some(Value::Int(31)))));
        assert!(filter.apply(&AttributeEvent::for_attribute("b", "temp", Some(Value::Int(40)))));
        assert!(!filter.apply(&AttributeEvent::for_attribute("a", "temp", Some(Value::Int(29)))));
        assert!(!filter.apply(&AttributeEvent::for_attribute("a", "humidity", Some(Value::Int(31)))));
    }

    #[test]
    fn test_scope_single_entity() {
        let r = AttributeRef::new("a", "temp");
        let filter = AttributeValueFilter::for_ref(&r, NumberPredicate::greater_than(30.0));
        assert!(filter.apply(&AttributeEvent::for_ref(r, Some(Value::Int(31)))));
        assert!(!filter.apply(&AttributeEvent::for_attribute("b", "temp", Some(Value::Int(31)))));
    }

    #[test]
    fn test_missing_value_uses_predicate_semantics() {
        let number = AttributeValueFilter::new("temp", NumberPredicate::greater_than(0.0));
        let empty = AttributeValueFilter::new("temp", ValueEmptyPredicate {});
        let cleared = AttributeEvent::for_attribute("a", "temp", None);
        assert!(!number.apply(&cleared));
        assert!(empty.apply(&cleared));
    }

    #[test]
    fn test_validate() {
        assert!(AttributeValueFilter::new(" ", ValueEmptyPredicate {}).validate().is_err());
        assert!(AttributeValueFilter::new("temp", NumberPredicate::equals(f64::NAN))
            .validate()
            .is_err());
        assert!(AttributeValueFilter::new("temp", ValueEmptyPredicate {}).validate().is_ok());
    }
}
