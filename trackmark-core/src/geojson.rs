//! Validated track collections
//!
//! A [`TrackCollection`] is a fetched GeoJSON document that passed
//! [`is_feature_collection`]. The JSON is kept as-is, unknown members
//! included, so the rendering layer receives the file it asked for plus
//! whatever color binding the marker extractor wrote onto it.

use crate::guard::is_feature_collection;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON FeatureCollection with an array of features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct TrackCollection(Map<String, Value>);

/// Returned when a JSON value fails the FeatureCollection gate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("value is not a GeoJSON FeatureCollection")]
pub struct NotAFeatureCollection(pub Value);

impl TrackCollection {
    /// Validate and wrap a JSON value
    pub fn from_value(value: Value) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Features in file order
    pub fn features(&self) -> &[Value] {
        self.0
            .get("features")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First feature, if any
    pub fn first_feature(&self) -> Option<&Value> {
        self.features().first()
    }

    pub fn first_feature_mut(&mut self) -> Option<&mut Value> {
        self.0
            .get_mut("features")
            .and_then(Value::as_array_mut)
            .and_then(|features| features.first_mut())
    }

    pub fn len(&self) -> usize {
        self.features().len()
    }

    pub fn is_empty(&self) -> bool {
        self.features().is_empty()
    }

    /// Underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for TrackCollection {
    type Error = NotAFeatureCollection;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !is_feature_collection(&value) {
            return Err(NotAFeatureCollection(value));
        }
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(NotAFeatureCollection(other)),
        }
    }
}

impl From<TrackCollection> for Value {
    fn from(collection: TrackCollection) -> Self {
        collection.into_value()
    }
}

/// Properties object of a feature, if present and an object
pub fn feature_properties(feature: &Value) -> Option<&Map<String, Value>> {
    feature.get("properties").and_then(Value::as_object)
}

/// Properties object of a feature, created (or replaced, if it is not an
/// object) when needed. `None` only if the feature itself is not an object.
pub fn feature_properties_mut(feature: &mut Value) -> Option<&mut Map<String, Value>> {
    let feature = feature.as_object_mut()?;
    let properties = feature
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));

    if !properties.is_object() {
        *properties = Value::Object(Map::new());
    }
    properties.as_object_mut()
}
