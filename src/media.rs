//! Media Upload Collaborator
//! Mission: Opaque file hosting - bytes in, public URL out

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;

/// Seam for the external media host. Implementations return a public
/// reference URL or fail with `UploadFailed`; the rest of the system
/// treats them as a black box.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str, folder: &str)
        -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Cloudinary unsigned-preset uploads over HTTPS.
pub struct CloudinaryUploader {
    http_client: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    pub fn new(http_client: reqwest::Client, cloud_name: String, upload_preset: String) -> Self {
        Self {
            http_client,
            cloud_name,
            upload_preset,
        }
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<String, ApiError> {
        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/auto/upload",
            self.cloud_name
        );

        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
            );

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Media upload request failed: {e}");
                ApiError::UploadFailed
            })?;

        if !response.status().is_success() {
            warn!("Media host returned {}", response.status());
            return Err(ApiError::UploadFailed);
        }

        let parsed = response.json::<UploadResponse>().await.map_err(|e| {
            warn!("Media host reply was not parseable: {e}");
            ApiError::UploadFailed
        })?;

        Ok(parsed.secure_url)
    }
}

/// Placeholder used when the media host is not configured. Every upload
/// fails cleanly instead of panicking at startup.
pub struct UnconfiguredUploader;

#[async_trait]
impl MediaUploader for UnconfiguredUploader {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        _filename: &str,
        _folder: &str,
    ) -> Result<String, ApiError> {
        warn!("Media upload attempted but no media host is configured");
        Err(ApiError::UploadFailed)
    }
}
