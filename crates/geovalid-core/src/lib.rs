//! Geovalid Core Library
//!
//! This crate provides the domain models, configuration, and shared
//! constants used by the geovalid upload/validation pipeline crates.

pub mod config;
pub mod constants;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::{Config, S3Config};
pub use models::{DatasetKind, DatasetSubtype, StorageUri, UploadProgress};
