//! Track source configuration
//!
//! Where the manifest and track files live, and how hard ingestion may fan
//! out. Loaded from a TOML file; every key is optional:
//!
//! ```toml
//! base_url = "http://localhost:5173"
//! folder_path = "/geojson"
//! manifest_file = "geojson-list.json"
//! max_concurrent_fetches = 8
//! # request_timeout_ms = 10000
//!
//! [logging]
//! level = "info"
//! ```
//!
//! No environment variables are consulted. Callers that want overrides apply
//! them to the struct after loading.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Location of the manifest and track files plus fetch tuning
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Origin the folder path is resolved against
    pub base_url: String,

    /// Folder holding the manifest and the track files
    pub folder_path: String,

    /// Manifest file name inside `folder_path`
    pub manifest_file: String,

    /// Maximum number of track fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Per-request timeout. `None` means requests may wait indefinitely.
    pub request_timeout_ms: Option<u64>,

    /// Logging configuration (optional)
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full EnvFilter string)
    pub level: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            folder_path: "/geojson".to_string(),
            manifest_file: "geojson-list.json".to_string(),
            max_concurrent_fetches: 8,
            request_timeout_ms: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl SourceConfig {
    /// Read and validate a TOML configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading source configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SourceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_fetches == 0 {
            return Err(Error::Config(
                "max_concurrent_fetches must be at least 1".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if self.manifest_file.trim().is_empty() {
            return Err(Error::Config("manifest_file must not be empty".to_string()));
        }
        if self.request_timeout_ms == Some(0) {
            return Err(Error::Config(
                "request_timeout_ms must be positive when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Optional request timeout as a Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// URL of a file inside the configured folder.
    ///
    /// Slashes between the three parts are normalised so that
    /// `"http://host/"`, `"/geojson/"` and `"a.json"` join to
    /// `"http://host/geojson/a.json"`.
    pub fn file_url(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let folder = self.folder_path.trim_matches('/');
        let file = file_name.trim_start_matches('/');

        if folder.is_empty() {
            format!("{}/{}", base, file)
        } else {
            format!("{}/{}/{}", base, folder, file)
        }
    }

    /// URL of the manifest file
    pub fn manifest_url(&self) -> String {
        self.file_url(&self.manifest_file)
    }
}
