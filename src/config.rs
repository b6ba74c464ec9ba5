//! Subscription limits and defaults.

use serde::Deserialize;

use crate::pipeline::MatchMode;

/// Limits applied to subscriptions decoded from clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionConfig {
    /// Mode used when a subscription does not state one.
    #[serde(default)]
    pub default_match_mode: MatchMode,

    /// Maximum number of filters in one subscription.
    #[serde(default = "default_max_filters")]
    pub max_filters: usize,

    /// Maximum number of entity ids across a subscription's entity-id filters.
    #[serde(default = "default_max_entity_ids")]
    pub max_entity_ids: usize,
}

const fn default_max_filters() -> usize {
    64
}

const fn default_max_entity_ids() -> usize {
    1024
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            default_match_mode: MatchMode::default(),
            max_filters: default_max_filters(),
            max_entity_ids: default_max_entity_ids(),
        }
    }
}
