//! Object-store abstraction trait

use async_trait::async_trait;
use bytes::Bytes;
use geovalid_core::models::StorageUri;
use thiserror::Error;

/// Object-store write errors, classified by kind. Callers match on the
/// variant, never on message content.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The session or credentials were rejected by the store.
    #[error("Storage credentials expired or rejected: {0}")]
    CredentialExpired(String),

    /// Connection or timeout class failure.
    #[error("Transient network failure talking to storage: {0}")]
    TransientNetwork(String),

    #[error("Storage error: {0}")]
    Unknown(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Object-store write abstraction.
///
/// The coordinator only ever writes named byte payloads; everything else
/// (listing, deletion, presigning) is out of scope for this system.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write one object. No automatic retries; a failed write surfaces a
    /// classified [`StoreError`] to the caller.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()>;

    /// Bucket this store writes into.
    fn bucket(&self) -> &str;

    /// Logical URI for a key (or key prefix) in this store.
    fn uri_for(&self, key: &str) -> StorageUri {
        StorageUri::new(self.bucket(), key)
    }
}
