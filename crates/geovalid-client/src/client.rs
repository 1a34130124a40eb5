//! HTTP client for the remote validation service.

use crate::report::ValidationReport;
use geovalid_core::models::{DatasetSubtype, StorageUri};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Validation request errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The chosen subtype carries no `data_type` code; nothing is sent.
    #[error("Dataset subtype {0} cannot be submitted for validation")]
    InvalidDatasetType(String),

    /// The service answered with a non-success status.
    #[error("Validation service rejected the request ({status}): {message}")]
    RemoteValidation { status: u16, message: String },

    /// The request never produced a response (connect/timeout class).
    #[error("Failed to reach validation service: {0}")]
    Request(String),
}

#[derive(Serialize)]
struct ValidationRequest<'a> {
    data_type: i32,
    s3_bucket_uri: &'a str,
}

/// Client for the remote validation endpoint.
#[derive(Clone, Debug)]
pub struct ValidationClient {
    client: reqwest::Client,
    endpoint: String,
}

/// Pull a human-readable message out of an error response body. The
/// service sends `{"message": "..."}` when it has one; otherwise fall back
/// to the raw body, or the status text for an empty body.
fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}

impl ValidationClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Submit an uploaded dataset's location under a resolved `data_type`
    /// code and return the service's raw report.
    pub async fn submit(
        &self,
        data_type: i32,
        uri: &StorageUri,
    ) -> Result<ValidationReport, ClientError> {
        let body = ValidationRequest {
            data_type,
            s3_bucket_uri: uri.as_str(),
        };

        tracing::info!(
            endpoint = %self.endpoint,
            data_type,
            uri = %uri,
            "Submitting dataset for validation"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(status.as_u16(), &text);
            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Validation service returned an error"
            );
            return Err(ClientError::RemoteValidation {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ValidationReport>()
            .await
            .map_err(|e| ClientError::Request(format!("invalid report body: {}", e)))
    }

    /// Resolve the subtype's code and submit. Fails with
    /// `InvalidDatasetType` before any network call for subtypes that
    /// carry no code (geoservices).
    pub async fn submit_dataset(
        &self,
        subtype: DatasetSubtype,
        uri: &StorageUri,
    ) -> Result<ValidationReport, ClientError> {
        let code = subtype
            .data_type_code()
            .ok_or_else(|| ClientError::InvalidDatasetType(subtype.to_string()))?;
        self.submit(code, uri).await
    }
}
