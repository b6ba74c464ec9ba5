//! Attribute value types.
//!
//! Attribute values are JSON-shaped: attributes on assets carry primitives,
//! arrays, objects and GeoJSON locations. `Value` keeps that shape typed so
//! predicates can match on it without re-parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Possible values an attribute can hold.
///
/// Serialized untagged, so the wire form is plain JSON.
///
/// # Examples
///
/// ```
/// use attribute_filter::Value;
///
/// let v: Value = serde_json::from_str("15").unwrap();
/// assert_eq!(v.as_int(), Some(15));
/// assert_eq!(v.as_float(), Some(15.0));
///
/// let v: Value = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
/// assert!(v.as_object().unwrap().contains_key("status"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true for null and for empty strings, arrays and objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(v) => v.is_empty(),
            Self::Array(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Extracts a location.
    ///
    /// Accepts a GeoJSON point (`{"type": "Point", "coordinates": [lng, lat]}`)
    /// or a plain `{"lat": .., "lng": ..}` object.
    #[must_use]
    pub fn as_geo_point(&self) -> Option<GeoPoint> {
        let obj = self.as_object()?;

        if let Some(coords) = obj.get("coordinates") {
            if obj.get("type").and_then(Value::as_str) != Some("Point") {
                return None;
            }
            let [lng, lat] = coords.as_array()? else {
                return None;
            };
            return GeoPoint::new(lat.as_float()?, lng.as_float()?);
        }

        let lat = obj.get("lat")?.as_float()?;
        let lng = obj.get("lng")?.as_float()?;
        GeoPoint::new(lat, lng)
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "<{}>", self.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<GeoPoint> for Value {
    fn from(p: GeoPoint) -> Self {
        let mut obj = BTreeMap::new();
        obj.insert("type".to_string(), Self::from("Point"));
        obj.insert(
            "coordinates".to_string(),
            Self::Array(vec![Self::Float(p.lng()), Self::Float(p.lat())]),
        );
        Self::Object(obj)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
