//! # Trackmark Common Library
//!
//! Shared code for the trackmark crates:
//! - Error types
//! - Track source configuration (TOML)
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use config::{LoggingConfig, SourceConfig};
pub use error::{Error, Result};
