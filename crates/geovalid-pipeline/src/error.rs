//! Unified pipeline error.

use geovalid_archive::ArchiveError;
use geovalid_client::ClientError;
use geovalid_storage::StoreError;
use thiserror::Error;

use crate::coordinator::MemberUploadError;

/// Everything that can abort an upload/validate operation. All variants
/// are terminal for the operation that raised them; no partial validation
/// result is ever synthesized.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upload(#[from] MemberUploadError),

    #[error(transparent)]
    Client(#[from] ClientError),
}
