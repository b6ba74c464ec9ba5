//! Entity-id membership filter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::AttributeEvent;

use super::{EventFilter, FilterKind};

/// Passes events whose entity id is one of the configured ids.
///
/// An empty id list matches nothing. Duplicates are harmless.
///
/// # Examples
///
/// ```
/// use attribute_filter::filter::{EntityIdFilter, EventFilter};
/// use attribute_filter::AttributeEvent;
///
/// let filter = EntityIdFilter::new(["pump-1", "pump-2"]);
/// assert!(filter.apply(&AttributeEvent::for_attribute("pump-2", "flow", None)));
/// assert!(!filter.apply(&AttributeEvent::for_attribute("pump-3", "flow", None)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityIdFilter {
    #[serde(rename = "entityId", default)]
    entity_ids: Vec<String>,
}

impl EntityIdFilter {
    #[must_use]
    pub fn new<I, S>(entity_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity_ids: entity_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn entity_ids(&self) -> &[String] {
        &self.entity_ids
    }
}

impl EventFilter<AttributeEvent> for EntityIdFilter {
    fn filter_type(&self) -> &'static str {
        FilterKind::EntityId.tag()
    }

    fn apply(&self, event: &AttributeEvent) -> bool {
        self.entity_ids.iter().any(|id| id == event.entity_id())
    }
}

impl fmt::Display for EntityIdFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityIdFilter{{entityId={:?}}}", self.entity_ids)
    }
}
