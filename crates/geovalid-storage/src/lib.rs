//! Geovalid Storage Library
//!
//! Object-store abstraction and the S3 implementation used by the upload
//! coordinator. The client is constructed exactly once with injected,
//! caller-supplied credentials; there is no ambient or module-level state.
//!
//! # Key format
//!
//! Keys embed the dataset classification and an operation timestamp:
//!
//! - **Single file**: `files/{kind}/{subtype}/{timestamp}_{name}`
//! - **Bundle member**: `files/{kind}/{subtype}/{timestamp}_{base}/{relative_path}`
//!
//! Key generation is centralized in the `keys` module.

pub mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, StoreError, StoreResult};
