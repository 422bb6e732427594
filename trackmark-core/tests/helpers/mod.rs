//! Test Helper Utilities
//!
//! Shared utilities for trackmark-core integration tests

#![allow(dead_code)]

pub mod log_capture;
pub mod track_server;

pub use log_capture::capture_logs;
pub use track_server::TrackServer;
