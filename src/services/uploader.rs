//! Media host upload client.
//!
//! Uploaded files are not stored locally; they are forwarded to an external
//! media-hosting service which returns a durable URL. For video files the
//! host also reports the duration in seconds.
//!
//! # Wire Contract
//!
//! `POST {endpoint}/upload` with a multipart `file` field. The host replies:
//!
//! ```json
//! { "url": "https://media.example.com/f/abc123", "duration": 12.34 }
//! ```
//!
//! `duration` is only present for video content. Any transport failure or
//! non-2xx reply is surfaced to our caller as a 500; there are no retries.

use crate::config::MediaHostConfig;
use crate::error::{AppError, Result};
use bytes::Bytes;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// A file stored by the media host
#[derive(Debug, Clone)]
pub struct HostedFile {
    /// Durable URL of the stored file
    pub url: String,
    /// Duration in seconds, reported for video files
    pub duration: Option<f64>,
}

/// Reply body from the media host
#[derive(Debug, Deserialize)]
struct UploadReply {
    url: String,
    #[serde(default)]
    duration: Option<f64>,
}

/// Client for the external media-hosting service
#[derive(Debug, Clone)]
pub struct MediaHostClient {
    http: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl MediaHostClient {
    /// Create a new media host client
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &MediaHostConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        info!(endpoint = %config.endpoint, "Media host client initialized");

        Ok(Self {
            http,
            upload_url: config.upload_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// Upload a file to the media host and return its hosted URL
    ///
    /// # Arguments
    /// * `filename` - Original filename, forwarded for the host's bookkeeping
    /// * `content_type` - MIME type of the file
    /// * `data` - File contents
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<HostedFile> {
        let size = data.len();

        let part = reqwest::multipart::Part::stream(data)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::upload(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::upload(format!("Media host unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upload(format!(
                "Media host rejected upload ({}): {}",
                status, body
            )));
        }

        let reply: UploadReply = response
            .json()
            .await
            .map_err(|e| AppError::upload(format!("Invalid media host reply: {}", e)))?;

        debug!(
            filename = %filename,
            size = size,
            url = %reply.url,
            "Uploaded file to media host"
        );

        Ok(HostedFile {
            url: reply.url,
            duration: reply.duration,
        })
    }
}
