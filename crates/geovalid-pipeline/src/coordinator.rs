//! Upload coordination: single files and bundle fan-out.

use bytes::Bytes;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;

use geovalid_core::constants::DEFAULT_CONTENT_TYPE;
use geovalid_core::models::{DatasetSubtype, StorageUri, UploadProgress};
use geovalid_storage::{keys, ObjectStore, StoreError};

use crate::state::OperationTracker;

/// A single dataset file chosen by the user.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// One bundle member ready for upload.
#[derive(Debug, Clone)]
pub struct MemberFile {
    /// Path relative to the bundle base.
    pub relative_path: String,
    pub data: Bytes,
}

/// A member upload failure, carrying which member triggered it.
#[derive(Debug, Error)]
#[error("Upload of bundle member {member} failed: {source}")]
pub struct MemberUploadError {
    pub member: String,
    #[source]
    pub source: StoreError,
}

/// Drives uploads against an [`ObjectStore`], tracking progress and
/// deciding overall success or failure.
pub struct UploadCoordinator {
    store: Arc<dyn ObjectStore>,
    concurrency: usize,
}

impl UploadCoordinator {
    pub fn new(store: Arc<dyn ObjectStore>, concurrency: usize) -> Self {
        UploadCoordinator {
            store,
            concurrency: concurrency.max(1),
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Upload one file under a fresh operation timestamp.
    pub async fn upload_single(
        &self,
        subtype: DatasetSubtype,
        file: &SourceFile,
        tracker: &OperationTracker,
    ) -> Result<StorageUri, StoreError> {
        let timestamp = Utc::now().timestamp_millis();
        let key = keys::single_file_key(subtype, timestamp, &file.name);

        tracker.begin_uploading(1);
        self.store
            .put(&key, file.data.clone(), &file.content_type)
            .await?;

        tracker.progress_sender().send_replace(UploadProgress::new(1, 1));

        Ok(self.store.uri_for(&key))
    }

    /// Upload every member of a bundle concurrently, bounded by the
    /// configured fan-out limit.
    ///
    /// Every dispatched upload runs to a terminal state; siblings are never
    /// cancelled when one fails, so a failed operation can still leave some
    /// objects durably written. The operation succeeds only if all members
    /// succeeded; otherwise the failure with the lexicographically lowest
    /// relative path is surfaced. On success the returned URI is the
    /// logical bundle prefix, not a member key.
    pub async fn upload_bundle(
        &self,
        subtype: DatasetSubtype,
        base: &str,
        members: Vec<MemberFile>,
        tracker: &OperationTracker,
    ) -> Result<StorageUri, MemberUploadError> {
        let timestamp = Utc::now().timestamp_millis();
        let base_key = keys::bundle_base_key(subtype, timestamp, base);
        let total = members.len();

        tracker.begin_uploading(total);
        tracing::info!(
            bundle = %base,
            member_count = total,
            concurrency = self.concurrency,
            "Starting bundle upload"
        );

        let completed = Arc::new(AtomicUsize::new(0));
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(total);

        for member in members {
            let store = Arc::clone(&self.store);
            let key = keys::bundle_member_key(&base_key, &member.relative_path);
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("semaphore closed");
            let completed = Arc::clone(&completed);
            let progress = tracker.progress_sender();

            let handle = tokio::spawn(async move {
                let result = store.put(&key, member.data, DEFAULT_CONTENT_TYPE).await;
                drop(permit);

                // settled = success or failure; multiple completions can race,
                // and publication order is not the increment order
                let settled = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress.send_modify(|p| *p = UploadProgress::new(p.completed.max(settled), total));

                (member.relative_path, result)
            });
            handles.push(handle);
        }

        // Wait for every member to settle before resolving.
        let mut failures: Vec<(String, StoreError)> = Vec::new();
        for handle in handles {
            match handle.await {
                Ok((_, Ok(()))) => {}
                Ok((member, Err(error))) => failures.push((member, error)),
                Err(join_error) => {
                    failures.push((String::new(), StoreError::Unknown(join_error.to_string())))
                }
            }
        }

        if !failures.is_empty() {
            // deterministic tie-break: lowest relative path wins
            failures.sort_by(|a, b| a.0.cmp(&b.0));
            let (member, source) = failures.remove(0);
            tracing::error!(
                bundle = %base,
                member = %member,
                error = %source,
                "Bundle upload failed"
            );
            return Err(MemberUploadError { member, source });
        }

        tracing::info!(bundle = %base, member_count = total, "Bundle upload complete");
        Ok(self.store.uri_for(&base_key))
    }
}
