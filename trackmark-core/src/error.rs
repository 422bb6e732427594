//! Ingestion failure taxonomy
//!
//! Every variant is caught where it occurs, logged, and turned into "exclude
//! this item". None of them reach callers of `load_manifest` or `load_all`;
//! they are public so that `IngestReport` can describe what was skipped.

use serde::Serialize;
use thiserror::Error;

/// Reason a manifest or track file was excluded from a batch
#[derive(Debug, Error)]
pub enum IngestError {
    /// Manifest request returned a non-success status
    #[error("Manifest request failed with HTTP {status}")]
    ManifestFetch { status: u16 },

    /// Manifest body is not JSON, or not a JSON array
    #[error("Manifest format is invalid: {reason}")]
    ManifestFormat { reason: String },

    /// Track file request returned a non-success status
    #[error("Failed to load {file}: HTTP {status}")]
    FileFetch { file: String, status: u16 },

    /// Track file body is not valid JSON
    #[error("Invalid JSON in {file}: {source}")]
    FileParse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Track file is JSON but not a FeatureCollection
    #[error("Invalid GeoJSON format in file: {file}")]
    FileSchema { file: String },

    /// Transport-level failure (connection refused, timeout, truncated body)
    #[error("Network error fetching {target}: {source}")]
    Network {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// File name could not be joined onto the base URL
    #[error("Cannot build a URL for {target}")]
    InvalidUrl { target: String },
}

/// Stable, serialisable classification of an [`IngestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ManifestFetch,
    ManifestFormat,
    FileFetch,
    FileParse,
    FileSchema,
    Network,
    InvalidUrl,
}

impl IngestError {
    pub fn kind(&self) -> FailureKind {
        match self {
            IngestError::ManifestFetch { .. } => FailureKind::ManifestFetch,
            IngestError::ManifestFormat { .. } => FailureKind::ManifestFormat,
            IngestError::FileFetch { .. } => FailureKind::FileFetch,
            IngestError::FileParse { .. } => FailureKind::FileParse,
            IngestError::FileSchema { .. } => FailureKind::FileSchema,
            IngestError::Network { .. } => FailureKind::Network,
            IngestError::InvalidUrl { .. } => FailureKind::InvalidUrl,
        }
    }
}
