//! # Trackmark Core
//!
//! Turns a folder of exported activity tracks (GeoJSON) into one start-point
//! marker per track for a map renderer:
//!
//! 1. [`TrackClient::load_manifest`] reads the list of track files
//! 2. [`TrackClient::load_all`] fetches and validates them, skipping bad files
//! 3. [`markers::extract_markers`] derives markers, binds colors and collects
//!    activity types
//!
//! Nothing in the pipeline fails the caller: every per-file problem is logged
//! and the file is left out of the result.
//!
//! ```no_run
//! # async fn run() -> trackmark_common::Result<()> {
//! use trackmark_common::SourceConfig;
//! use trackmark_core::TrackClient;
//!
//! let client = TrackClient::new(SourceConfig::default())?;
//! let batch = client.load_markers().await;
//! println!("{} markers, types {:?}", batch.markers.len(), batch.activity_types);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod geojson;
pub mod guard;
pub mod ingest;
pub mod manifest;
pub mod markers;
pub mod style;

pub use client::TrackClient;
pub use error::{FailureKind, IngestError};
pub use geojson::TrackCollection;
pub use ingest::{IngestFailure, IngestReport};
pub use markers::{extract_markers, ActivityTypes, MarkerBatch, MarkerRecord};
pub use style::generate_color;
