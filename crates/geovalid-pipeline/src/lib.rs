//! Geovalid Pipeline Library
//!
//! The upload/validate orchestration layer: the upload coordinator that
//! fans bundle members out to object storage, the operation state machine
//! observed by the UI layer, and the end-to-end pipeline driver that wires
//! archive inspection, upload, and remote validation together.

pub mod coordinator;
pub mod error;
pub mod pipeline;
pub mod state;

pub use coordinator::{MemberFile, MemberUploadError, SourceFile, UploadCoordinator};
pub use error::PipelineError;
pub use pipeline::ValidationPipeline;
pub use state::{OperationState, OperationTracker};
