//! HTTP access to the manifest and track files

use reqwest::{Client, StatusCode, Url};
use trackmark_common::{Error, Result, SourceConfig};

const USER_AGENT: &str = concat!("trackmark/", env!("CARGO_PKG_VERSION"));

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Body bytes without a leading UTF-8 byte order mark.
///
/// Export tools sometimes write one; JSON parsers reject it.
pub(crate) fn strip_bom(body: &[u8]) -> &[u8] {
    body.strip_prefix(UTF8_BOM).unwrap_or(body)
}

/// Client for one configured track folder.
///
/// Holds no state beyond its configuration and connection pool; clone it or
/// build several freely.
#[derive(Debug, Clone)]
pub struct TrackClient {
    http_client: Client,
    config: SourceConfig,
}

/// Why a single GET did not produce a body
#[derive(Debug)]
pub(crate) enum FetchError {
    Status(StatusCode),
    Network(reqwest::Error),
    InvalidUrl,
}

impl TrackClient {
    /// Build a client for the configured folder.
    ///
    /// Fails only on unusable configuration; fetching never fails the caller.
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;

        Url::parse(&config.manifest_url()).map_err(|e| {
            Error::Config(format!("Invalid base_url '{}': {}", config.base_url, e))
        })?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// GET `{folder}/{file_name}` and return the body of a success response
    pub(crate) async fn fetch(&self, file_name: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let url = Url::parse(&self.config.file_url(file_name)).map_err(|_| FetchError::InvalidUrl)?;

        tracing::debug!(file = %file_name, url = %url, "Fetching");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        Ok(body.to_vec())
    }
}
