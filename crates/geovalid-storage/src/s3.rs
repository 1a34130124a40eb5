use crate::traits::{ObjectStore, StoreError, StoreResult};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use geovalid_core::config::S3Config;

/// S3 object store
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new S3ObjectStore from injected credentials.
    ///
    /// SDK-level retries are disabled: the pipeline never retries
    /// automatically, and the SDK must not do so behind its back.
    /// An `endpoint_url` switches to path-style addressing for
    /// S3-compatible providers (MinIO, DigitalOcean Spaces, etc.).
    pub fn new(config: &S3Config) -> StoreResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(StoreError::Config("bucket name is empty".to_string()));
        }

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.session_token.clone(),
            None,
            "geovalid",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());

        if let Some(ref endpoint) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(S3ObjectStore {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

/// Classify an SDK put failure into the store error taxonomy. Matches the
/// error kind and service error code, never message strings.
fn classify_put_error<R>(err: SdkError<PutObjectError, R>) -> StoreError {
    match &err {
        SdkError::ServiceError(ctx) => {
            let service_err = ctx.err();
            let code = service_err.code().unwrap_or("");
            let detail = format!(
                "{}: {}",
                code,
                service_err.message().unwrap_or("no message")
            );
            match code {
                "ExpiredToken"
                | "ExpiredTokenException"
                | "InvalidToken"
                | "TokenRefreshRequired"
                | "InvalidAccessKeyId"
                | "SignatureDoesNotMatch" => StoreError::CredentialExpired(detail),
                "RequestTimeout" | "SlowDown" | "ServiceUnavailable" | "InternalError" => {
                    StoreError::TransientNetwork(detail)
                }
                _ => StoreError::Unknown(detail),
            }
        }
        SdkError::DispatchFailure(failure) => {
            StoreError::TransientNetwork(format!("dispatch failure: {:?}", failure))
        }
        SdkError::TimeoutError(_) => StoreError::TransientNetwork("request timed out".to_string()),
        SdkError::ResponseError(_) => {
            StoreError::TransientNetwork("malformed response from storage".to_string())
        }
        _ => StoreError::Unknown(err.to_string()),
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StoreResult<()> {
        let size = data.len() as u64;
        let body = ByteStream::from(data);
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                let classified = classify_put_error(e);
                tracing::error!(
                    error = %classified,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 put failed"
                );
                classified
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(())
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
