//! Manifest loading
//!
//! The manifest is a JSON array of track file names relative to the
//! configured folder. Anything else degrades to "no files to process".

use crate::client::{strip_bom, FetchError, TrackClient};
use crate::error::IngestError;
use crate::guard::json_kind;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Validate a manifest body and return its string entries in order.
///
/// Non-string entries are dropped with a warning; they do not invalidate the
/// rest of the manifest.
pub fn parse_manifest(body: &[u8]) -> Result<Vec<String>, IngestError> {
    let value: Value = serde_json::from_slice(strip_bom(body)).map_err(|e| IngestError::ManifestFormat {
        reason: format!("not valid JSON ({})", e),
    })?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(IngestError::ManifestFormat {
                reason: format!("expected an array, found {}", json_kind(&other)),
            })
        }
    };

    let total = entries.len();
    let files: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect();

    let dropped = total - files.len();
    if dropped > 0 {
        warn!(dropped, total, "Ignoring non-string manifest entries");
    }

    Ok(files)
}

impl TrackClient {
    /// Fetch and validate the manifest.
    ///
    /// Never fails: a bad status, an unreachable server or a malformed body
    /// are logged and produce an empty list.
    pub async fn load_manifest(&self) -> Vec<String> {
        match self.try_load_manifest().await {
            Ok(files) => files,
            Err(e) => {
                self.log_manifest_failure(&e);
                Vec::new()
            }
        }
    }

    pub(crate) async fn try_load_manifest(&self) -> Result<Vec<String>, IngestError> {
        let manifest_file = &self.config().manifest_file;

        let body = self.fetch(manifest_file).await.map_err(|e| match e {
            FetchError::Status(status) => IngestError::ManifestFetch {
                status: status.as_u16(),
            },
            FetchError::Network(source) => IngestError::Network {
                target: manifest_file.clone(),
                source,
            },
            FetchError::InvalidUrl => IngestError::InvalidUrl {
                target: manifest_file.clone(),
            },
        })?;

        let files = parse_manifest(&body)?;
        debug!(count = files.len(), manifest = %manifest_file, "Manifest loaded");
        Ok(files)
    }

    pub(crate) fn log_manifest_failure(&self, e: &IngestError) {
        error!(
            manifest = %self.config().manifest_url(),
            kind = ?e.kind(),
            "Failed to load track manifest: {}",
            e
        );
    }
}
