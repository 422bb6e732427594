//! Common error types for trackmark

use thiserror::Error;

/// Common result type for trackmark operations
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time errors.
///
/// The ingestion pipeline itself never returns these; they only surface while
/// reading configuration or building a client.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
