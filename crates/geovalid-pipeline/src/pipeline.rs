//! End-to-end pipeline driver: inspect, upload, submit, aggregate.

use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

use geovalid_archive::ArchiveInspector;
use geovalid_client::{aggregate, CategoryFindings, ClientError, ValidationClient};
use geovalid_core::config::Config;
use geovalid_core::models::DatasetSubtype;
use geovalid_storage::{ObjectStore, S3ObjectStore};

use crate::coordinator::{MemberFile, SourceFile, UploadCoordinator};
use crate::error::PipelineError;
use crate::state::OperationTracker;

/// Wires the inspector, coordinator, and validation client into one
/// operation per user action. The caller owns the tracker and observes it
/// from its own event loop; nothing here blocks that loop.
pub struct ValidationPipeline {
    coordinator: UploadCoordinator,
    client: ValidationClient,
}

impl ValidationPipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        client: ValidationClient,
        upload_concurrency: usize,
    ) -> Self {
        ValidationPipeline {
            coordinator: UploadCoordinator::new(store, upload_concurrency),
            client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let store = S3ObjectStore::new(&config.s3)?;
        let client = ValidationClient::new(
            &config.validator_base_url,
            Duration::from_secs(config.validation_timeout_secs),
        )?;
        Ok(Self::new(Arc::new(store), client, config.upload_concurrency))
    }

    /// Validate an archive containing a geodatabase bundle.
    ///
    /// Inspection and bundle validation happen before any network call;
    /// their failures abort with zero side effects.
    pub async fn validate_archive(
        &self,
        subtype: DatasetSubtype,
        archive: Bytes,
        tracker: &OperationTracker,
    ) -> Result<Vec<CategoryFindings>, PipelineError> {
        match self.run_archive(subtype, archive, tracker).await {
            Ok(findings) => {
                tracker.complete();
                Ok(findings)
            }
            Err(e) => {
                tracker.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Validate a single (non-archive) dataset file. The `Inspecting`
    /// state is skipped.
    pub async fn validate_file(
        &self,
        subtype: DatasetSubtype,
        file: SourceFile,
        tracker: &OperationTracker,
    ) -> Result<Vec<CategoryFindings>, PipelineError> {
        match self.run_file(subtype, file, tracker).await {
            Ok(findings) => {
                tracker.complete();
                Ok(findings)
            }
            Err(e) => {
                tracker.fail(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_archive(
        &self,
        subtype: DatasetSubtype,
        archive: Bytes,
        tracker: &OperationTracker,
    ) -> Result<Vec<CategoryFindings>, PipelineError> {
        let code = resolve_code(subtype)?;

        tracker.begin_inspecting();
        let mut inspector = ArchiveInspector::open(archive)?;
        let descriptor = inspector.locate_bundle()?;
        descriptor.validate_essentials()?;
        let members = inspector.extract_members(&descriptor)?;

        let members = members
            .into_iter()
            .map(|m| MemberFile {
                relative_path: m.relative_path,
                data: m.data,
            })
            .collect();

        let uri = self
            .coordinator
            .upload_bundle(subtype, &descriptor.base, members, tracker)
            .await?;

        tracker.begin_submitting();
        let report = self.client.submit(code, &uri).await?;

        Ok(aggregate(&report))
    }

    async fn run_file(
        &self,
        subtype: DatasetSubtype,
        file: SourceFile,
        tracker: &OperationTracker,
    ) -> Result<Vec<CategoryFindings>, PipelineError> {
        let code = resolve_code(subtype)?;

        let uri = self
            .coordinator
            .upload_single(subtype, &file, tracker)
            .await?;

        tracker.begin_submitting();
        let report = self.client.submit(code, &uri).await?;

        Ok(aggregate(&report))
    }
}

/// Geoservice subtypes carry no code and are rejected before any network
/// call; geoservice validation never uploads anything.
fn resolve_code(subtype: DatasetSubtype) -> Result<i32, PipelineError> {
    subtype
        .data_type_code()
        .ok_or_else(|| ClientError::InvalidDatasetType(subtype.to_string()).into())
}
