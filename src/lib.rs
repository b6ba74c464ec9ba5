//! # attribute-filter
//!
//! Typed attribute events and the filters that decide which of them a
//! subscriber receives.
//!
//! ## Core Concepts
//!
//! - **AttributeRef**: Names one attribute of one entity
//! - **AttributeEvent**: A timestamped change of an attribute's value
//! - **ValuePredicate**: A pure test against a single attribute value
//! - **EventFilter**: A pure test against a whole event
//! - **FilterPipeline**: Filters combined with a match mode
//!
//! ## Usage
//!
//! ```rust
//! use attribute_filter::filter::{AttributeValueFilter, EntityIdFilter};
//! use attribute_filter::predicate::{RadialGeofencePredicate, StringMatch, StringPredicate};
//! use attribute_filter::{AttributeEvent, FilterPipeline, MatchMode, Value};
//!
//! let pipeline = FilterPipeline::new(MatchMode::Any)
//!     .with_filter(EntityIdFilter::new(["truck-7"]))
//!     .with_filter(AttributeValueFilter::new(
//!         "status",
//!         StringPredicate::new(StringMatch::Begin, "alarm").case_insensitive(),
//!     ))
//!     .with_filter(AttributeValueFilter::new(
//!         "location",
//!         RadialGeofencePredicate::new(500.0, 52.37, 4.89),
//!     ));
//!
//! let event = AttributeEvent::for_attribute("sensor-3", "status", Some(Value::from("ALARM: door")));
//! assert!(pipeline.matches(&event));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod attribute;
pub mod error;
pub mod event;
pub mod geo;
pub mod source;
pub mod value;

// Matching
pub mod filter;
pub mod pipeline;
pub mod predicate;

// Wire format and subscriptions
pub mod codec;
pub mod config;
pub mod subscription;
mod validation;

// Re-export primary types at crate root for convenience
pub use attribute::{AttributeRef, AttributeState};
pub use error::{DecodeError, FilterError, FilterResult, ValidationError};
pub use event::{AttributeEvent, AttributeEventBuilder, EventEnvelope};
pub use filter::{AttributeEventFilter, AttributeValueFilter, EntityIdFilter, EventFilter};
pub use geo::GeoPoint;
pub use pipeline::{FilterPipeline, MatchMode};
pub use predicate::{Predicate, PredicateKind, ValuePredicate};
pub use source::{Source, HEADER_SOURCE};
pub use value::Value;

pub use config::SubscriptionConfig;
pub use subscription::{EventSubscription, SubscriptionId, SubscriptionRequest, TriggeredEvents};

pub use validation::{MAX_ARRAY_LEN, MAX_TEXT_LEN};
