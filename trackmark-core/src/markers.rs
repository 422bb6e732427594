//! Start-point markers
//!
//! One marker per track collection, placed at the first position of its
//! first feature. The marker color is also written onto that feature's
//! `properties.color`, so a path drawn from the same collection matches its
//! marker. This is the only place the pipeline mutates fetched data.

use crate::client::TrackClient;
use crate::geojson::{feature_properties, feature_properties_mut, TrackCollection};
use crate::guard::start_coordinate;
use crate::style::{generate_color_with, DEFAULT_MAX_LIGHTNESS, DEFAULT_MIN_LIGHTNESS};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Alpha of marker and path colors
pub const MARKER_ALPHA: f64 = 0.7;

/// Distinct activity categories observed across a batch
pub type ActivityTypes = BTreeSet<String>;

/// Start-location marker for one track
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    /// `[latitude, longitude]`
    pub lat_lng: [f64; 2],
    pub color: String,
    /// `properties.name` of the source feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_index: Option<String>,
    /// `properties.type` of the source feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
}

/// Everything the rendering layer needs for one batch
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerBatch {
    /// Collections with colors bound onto their first features
    pub collections: Vec<TrackCollection>,
    pub markers: Vec<MarkerRecord>,
    pub activity_types: ActivityTypes,
}

/// Derive markers for a batch of collections.
///
/// Mutates each collection that yields a marker (its first feature gets
/// `properties.color`) and adds every observed `properties.type` to
/// `activity_types`. Collections that cannot yield a marker are skipped
/// without being touched.
pub fn extract_markers(
    collections: &mut [TrackCollection],
    activity_types: &mut ActivityTypes,
) -> Vec<MarkerRecord> {
    extract_markers_with(collections, activity_types, &mut rand::thread_rng())
}

/// [`extract_markers`] with a caller-supplied RNG
pub fn extract_markers_with<R: Rng + ?Sized>(
    collections: &mut [TrackCollection],
    activity_types: &mut ActivityTypes,
    rng: &mut R,
) -> Vec<MarkerRecord> {
    let markers: Vec<MarkerRecord> = collections
        .iter_mut()
        .filter_map(|collection| extract_marker(collection, activity_types, rng))
        .collect();

    debug!(
        collections = collections.len(),
        markers = markers.len(),
        activity_types = activity_types.len(),
        "Markers extracted"
    );

    markers
}

/// Marker for a single collection, if its first feature has a valid start
pub fn extract_marker<R: Rng + ?Sized>(
    collection: &mut TrackCollection,
    activity_types: &mut ActivityTypes,
    rng: &mut R,
) -> Option<MarkerRecord> {
    let feature = collection.first_feature_mut()?;
    let start = feature.get("geometry").and_then(start_coordinate)?;

    let color = generate_color_with(rng, DEFAULT_MIN_LIGHTNESS, DEFAULT_MAX_LIGHTNESS, MARKER_ALPHA);
    feature_properties_mut(feature)?.insert("color".to_string(), Value::String(color.clone()));

    let properties = feature_properties(feature);
    let string_property = |key: &str| {
        properties
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let path_index = string_property("name");
    let activity_type = string_property("type");

    if let Some(kind) = &activity_type {
        activity_types.insert(kind.clone());
    }

    Some(MarkerRecord {
        lat_lng: start.lat_lng(),
        color,
        path_index,
        activity_type,
    })
}

impl TrackClient {
    /// Ingest the configured folder and derive its markers
    pub async fn load_markers(&self) -> MarkerBatch {
        let mut collections = self.load_all().await;
        let mut activity_types = ActivityTypes::new();
        let markers = extract_markers(&mut collections, &mut activity_types);

        info!(
            tracks = collections.len(),
            markers = markers.len(),
            activity_types = activity_types.len(),
            "Marker batch ready"
        );

        MarkerBatch {
            collections,
            markers,
            activity_types,
        }
    }
}
