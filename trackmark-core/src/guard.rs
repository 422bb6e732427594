//! Structural predicates over untyped GeoJSON
//!
//! Track files come from third-party export tooling, so nothing is assumed
//! about their shape. Every function here is total over arbitrary JSON: no
//! panics, no I/O, no side effects.

use serde_json::Value;

/// Geometry types that carry a single coordinate tree a start point can be
/// read from.
const COORDINATE_GEOMETRIES: [&str; 3] = ["Point", "LineString", "Polygon"];

/// True iff `value` is `[lng, lat]` or `[lng, lat, alt]` with finite numbers.
///
/// JSON cannot encode NaN; a NaN pushed into a `Value` becomes `null` and is
/// rejected here along with every other non-number.
pub fn is_valid_coordinate(value: &Value) -> bool {
    match value.as_array() {
        Some(items) if items.len() == 2 || items.len() == 3 => items
            .iter()
            .all(|item| item.as_f64().is_some_and(f64::is_finite)),
        _ => false,
    }
}

/// True iff `geometry` is a Point, LineString or Polygon object with a
/// `coordinates` member.
///
/// GeometryCollection and the Multi* variants are rejected: they have no
/// single obvious starting point.
pub fn has_coordinates(geometry: &Value) -> bool {
    let Some(object) = geometry.as_object() else {
        return false;
    };

    let is_supported = object
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| COORDINATE_GEOMETRIES.contains(&kind));

    is_supported && object.contains_key("coordinates")
}

/// True iff `value` is an object with `"type": "FeatureCollection"` and an
/// array-valued `features` member.
///
/// Single gate before any downstream processing of a fetched file.
pub fn is_feature_collection(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    object.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && object.get("features").is_some_and(Value::is_array)
}

/// A validated `[longitude, latitude, altitude?]` position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl Coordinate {
    /// Parse a coordinate array, `None` unless [`is_valid_coordinate`] holds
    pub fn from_value(value: &Value) -> Option<Self> {
        if !is_valid_coordinate(value) {
            return None;
        }

        let items = value.as_array()?;
        Some(Self {
            lng: items[0].as_f64()?,
            lat: items[1].as_f64()?,
            alt: items.get(2).and_then(Value::as_f64),
        })
    }

    /// Latitude-first pair as map libraries expect it
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// First position of a coordinate-bearing geometry.
///
/// Point: the point itself. LineString: its first vertex. Polygon: the first
/// vertex of its outer ring. `None` if the geometry is unsupported or that
/// position is not a valid coordinate.
pub fn start_coordinate(geometry: &Value) -> Option<Coordinate> {
    if !has_coordinates(geometry) {
        return None;
    }

    let coordinates = geometry.get("coordinates")?;
    let first = match geometry.get("type").and_then(Value::as_str)? {
        "Point" => coordinates,
        "LineString" => coordinates.get(0)?,
        "Polygon" => coordinates.get(0)?.get(0)?,
        _ => return None,
    };

    Coordinate::from_value(first)
}

/// Short name of a JSON value's type, for log messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
