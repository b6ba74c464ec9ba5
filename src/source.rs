//! Event provenance.
//!
//! The source of an attribute event is transport metadata: it travels in a
//! header next to the event and is never part of the event body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Header carrying the event source.
pub const HEADER_SOURCE: &str = "attribute-event.source";

/// What triggered an attribute event.
///
/// Downstream consumers use this for loop prevention and auditing.
///
/// # Examples
///
/// ```
/// use attribute_filter::Source;
///
/// let s: Source = "SENSOR".parse().unwrap();
/// assert_eq!(s, Source::Sensor);
/// assert_eq!(s.to_string(), "SENSOR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// A write request made by a user.
    Client,
    /// Internal processing, for example a rule consequence or a protocol-internal update.
    Internal,
    /// A value change observed on a sensor.
    Sensor,
}

impl Source {
    /// All sources, in declaration order.
    pub const ALL: [Self; 3] = [Self::Client, Self::Internal, Self::Sensor];

    /// Wire name of this source.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Internal => "INTERNAL",
            Self::Sensor => "SENSOR",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownSource {
                value: s.to_string(),
            })
    }
}
