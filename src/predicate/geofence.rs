//! Geofence predicates.
//!
//! Inputs are locations as understood by `Value::as_geo_point`. Anything that
//! is not a valid point never matches, negated or not.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::{is_valid_lat, is_valid_lng, GeoPoint};
use crate::value::Value;

use super::{Predicate, PredicateKind};

/// Point-in-circle test. The radius is in metres and the boundary is inclusive.
///
/// # Examples
///
/// ```
/// use attribute_filter::predicate::{Predicate, RadialGeofencePredicate};
/// use attribute_filter::geo::GeoPoint;
/// use attribute_filter::Value;
///
/// let fence = RadialGeofencePredicate::new(500.0, 51.9225, 4.4792);
/// let inside = GeoPoint::new(51.9230, 4.4800).unwrap();
/// assert!(fence.matches(Some(&Value::from(inside))));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialGeofencePredicate {
    pub radius: f64,
    pub lat: f64,
    pub lng: f64,

    #[serde(default)]
    pub negated: bool,
}

impl RadialGeofencePredicate {
    #[must_use]
    pub const fn new(radius: f64, lat: f64, lng: f64) -> Self {
        Self {
            radius,
            lat,
            lng,
            negated: false,
        }
    }

    /// Matches points outside the circle instead.
    #[must_use]
    pub fn outside(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    #[must_use]
    pub fn center(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.lat, self.lng)
    }
}

impl Predicate for RadialGeofencePredicate {
    const KIND: PredicateKind = PredicateKind::Radial;

    fn matches(&self, value: Option<&Value>) -> bool {
        let (Some(point), Some(center)) = (value.and_then(Value::as_geo_point), self.center()) else {
            return false;
        };
        (center.distance_to(&point) <= self.radius) != self.negated
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ValidationError::predicate(
                Self::KIND.tag(),
                "radius must be a non-negative number of metres",
            ));
        }
        if self.center().is_none() {
            return Err(ValidationError::predicate(
                Self::KIND.tag(),
                format!("center ({}, {}) is not a valid coordinate", self.lat, self.lng),
            ));
        }
        Ok(())
    }
}

/// Point-in-box test with inclusive bounds.
///
/// Boxes crossing the antimeridian are not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangularGeofencePredicate {
    pub lat_min: f64,
    pub lng_min: f64,
    pub lat_max: f64,
    pub lng_max: f64,

    #[serde(default)]
    pub negated: bool,
}

impl RectangularGeofencePredicate {
    /// Builds the box spanned by two opposite corners, given in any order.
    #[must_use]
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            lat_min: a.lat().min(b.lat()),
            lng_min: a.lng().min(b.lng()),
            lat_max: a.lat().max(b.lat()),
            lng_max: a.lng().max(b.lng()),
            negated: false,
        }
    }

    /// Matches points outside the box instead.
    #[must_use]
    pub fn outside(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    fn contains(&self, point: GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat())
            && (self.lng_min..=self.lng_max).contains(&point.lng())
    }
}

impl Predicate for RectangularGeofencePredicate {
    const KIND: PredicateKind = PredicateKind::Rectangular;

    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(point) = value.and_then(Value::as_geo_point) else {
            return false;
        };
        self.contains(point) != self.negated
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let lats_ok = is_valid_lat(self.lat_min) && is_valid_lat(self.lat_max);
        let lngs_ok = is_valid_lng(self.lng_min) && is_valid_lng(self.lng_max);
        if !lats_ok || !lngs_ok {
            return Err(ValidationError::predicate(
                Self::KIND.tag(),
                "bounds must be valid coordinates",
            ));
        }
        if self.lat_min > self.lat_max || self.lng_min > self.lng_max {
            return Err(ValidationError::predicate(
                Self::KIND.tag(),
                "minimum bounds must not exceed maximum bounds",
            ));
        }
        Ok(())
    }
}
