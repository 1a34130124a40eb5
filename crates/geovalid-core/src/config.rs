//! Configuration module
//!
//! Configuration is consumed from the environment layer; the core never
//! acquires credentials itself. Tokens arrive as opaque, pre-obtained
//! values and are handed to the object-store client exactly once at
//! construction.

use std::env;

const VALIDATION_TIMEOUT_SECS: u64 = 60;
const UPLOAD_CONCURRENCY: usize = 8;

/// Object-store configuration: bucket, region, injected credentials, and an
/// optional custom endpoint for S3-compatible providers.
#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub s3: S3Config,
    /// Base URL of the remote validation service.
    pub validator_base_url: String,
    /// Timeout for the validation request. Bounds only that call, not
    /// individual store writes.
    pub validation_timeout_secs: u64,
    /// Fan-out limit for concurrent bundle member uploads.
    pub upload_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let s3 = S3Config {
            bucket: env::var("S3_BUCKET")
                .map_err(|_| anyhow::anyhow!("S3_BUCKET must be set"))?,
            region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .map_err(|_| anyhow::anyhow!("S3_REGION or AWS_REGION must be set"))?,
            access_key_id: env::var("AWS_ACCESS_KEY_ID")
                .map_err(|_| anyhow::anyhow!("AWS_ACCESS_KEY_ID must be set"))?,
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .map_err(|_| anyhow::anyhow!("AWS_SECRET_ACCESS_KEY must be set"))?,
            session_token: env::var("AWS_SESSION_TOKEN").ok().filter(|s| !s.is_empty()),
            endpoint_url: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
        };

        let config = Config {
            s3,
            validator_base_url: env::var("VALIDATOR_BASE_URL")
                .map_err(|_| anyhow::anyhow!("VALIDATOR_BASE_URL must be set"))?,
            validation_timeout_secs: env::var("VALIDATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| VALIDATION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(VALIDATION_TIMEOUT_SECS),
            upload_concurrency: env::var("UPLOAD_CONCURRENCY")
                .unwrap_or_else(|_| UPLOAD_CONCURRENCY.to_string())
                .parse()
                .unwrap_or(UPLOAD_CONCURRENCY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.s3.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET cannot be empty"));
        }

        if !self.validator_base_url.starts_with("http://")
            && !self.validator_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "VALIDATOR_BASE_URL must be an http(s) URL"
            ));
        }

        if self.upload_concurrency == 0 {
            return Err(anyhow::anyhow!("UPLOAD_CONCURRENCY must be at least 1"));
        }

        Ok(())
    }
}
