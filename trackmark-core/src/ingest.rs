//! Track file ingestion
//!
//! Fetches every file named by the manifest, parses and validates it, and
//! keeps the ones that are FeatureCollections. A missing or malformed file
//! is logged and skipped; the batch always completes.
//!
//! Fetches fan out up to `max_concurrent_fetches` at a time. A slow file only
//! occupies its own slot; later files keep being issued while it is pending.
//! Results are put back into manifest order before they are returned, so
//! marker order downstream is deterministic.

use crate::client::{strip_bom, FetchError, TrackClient};
use crate::error::{FailureKind, IngestError};
use crate::geojson::TrackCollection;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// A file that was excluded from the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestFailure {
    /// Manifest entry (or the manifest itself) that failed
    pub file: String,
    pub kind: FailureKind,
    pub message: String,
}

impl IngestFailure {
    fn new(file: &str, error: &IngestError) -> Self {
        Self {
            file: file.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Outcome of one ingestion batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    /// Number of file names the manifest listed
    pub manifest_entries: usize,
    /// Validated collections, in manifest order
    pub collections: Vec<TrackCollection>,
    /// Excluded files, in manifest order
    pub failures: Vec<IngestFailure>,
}

/// Parse a fetched body and apply the FeatureCollection gate
pub fn parse_track_file(file: &str, body: &[u8]) -> Result<TrackCollection, IngestError> {
    let value: Value = serde_json::from_slice(strip_bom(body)).map_err(|source| IngestError::FileParse {
        file: file.to_string(),
        source,
    })?;

    TrackCollection::from_value(value).ok_or_else(|| IngestError::FileSchema {
        file: file.to_string(),
    })
}

impl TrackClient {
    /// Load every valid track collection the manifest lists.
    ///
    /// Never fails; see [`TrackClient::load_all_with_report`] for what was
    /// skipped.
    pub async fn load_all(&self) -> Vec<TrackCollection> {
        self.load_all_with_report().await.collections
    }

    /// Load every valid track collection and report the exclusions
    pub async fn load_all_with_report(&self) -> IngestReport {
        let files = match self.try_load_manifest().await {
            Ok(files) => files,
            Err(e) => {
                self.log_manifest_failure(&e);
                return IngestReport {
                    failures: vec![IngestFailure::new(&self.config().manifest_file, &e)],
                    ..IngestReport::default()
                };
            }
        };

        let mut report = IngestReport {
            manifest_entries: files.len(),
            ..IngestReport::default()
        };

        let mut results: Vec<(usize, String, Result<TrackCollection, IngestError>)> =
            stream::iter(files.into_iter().enumerate())
                .map(|(index, file)| async move {
                    let result = self.load_track_file(&file).await;
                    (index, file, result)
                })
                .buffer_unordered(self.config().max_concurrent_fetches)
                .collect()
                .await;
        results.sort_by_key(|(index, _, _)| *index);

        for (_, file, result) in results {
            match result {
                Ok(collection) => report.collections.push(collection),
                Err(e) => {
                    warn!(file = %file, kind = ?e.kind(), "Excluding track file: {}", e);
                    report.failures.push(IngestFailure::new(&file, &e));
                }
            }
        }

        info!(
            listed = report.manifest_entries,
            loaded = report.collections.len(),
            excluded = report.failures.len(),
            "Track ingestion complete"
        );

        report
    }

    /// Fetch, parse and validate one track file
    pub async fn load_track_file(&self, file: &str) -> Result<TrackCollection, IngestError> {
        let body = self.fetch(file).await.map_err(|e| match e {
            FetchError::Status(status) => IngestError::FileFetch {
                file: file.to_string(),
                status: status.as_u16(),
            },
            FetchError::Network(source) => IngestError::Network {
                target: file.to_string(),
                source,
            },
            FetchError::InvalidUrl => IngestError::InvalidUrl {
                target: file.to_string(),
            },
        })?;

        parse_track_file(file, &body)
    }
}
