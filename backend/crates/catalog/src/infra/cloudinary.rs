//! Cloudinary image store client
//!
//! Signed upload API: the request carries `api_key`, `timestamp` and a SHA-1
//! `signature` over the other signed parameters, so the secret itself never
//! leaves the process.

use std::fmt;
use std::time::Duration;

use platform::crypto::{data_uri, sha1_hex};
use serde::Deserialize;

use crate::domain::image_store::{ImageStore, ImageUpload, UploadedImage};
use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Automatic format and quality
const UPLOAD_TRANSFORMATION: &str = "f_auto,q_auto";

/// Cloudinary account settings
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Point the client somewhere else (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Signature over `params` sorted by key, joined as `k=v&k=v`, followed by the secret
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    sha1_hex(format!("{joined}{api_secret}").as_bytes())
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Image store backed by the Cloudinary upload API
#[derive(Clone)]
pub struct CloudinaryImageStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    async fn upload_at(
        &self,
        image: &ImageUpload,
        folder: &str,
        timestamp: i64,
    ) -> CatalogResult<UploadedImage> {
        let timestamp = timestamp.to_string();
        let signature = sign_params(
            &[
                ("folder", folder),
                ("timestamp", &timestamp),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.config.api_secret,
        );
        let file = data_uri(&image.content_type, &image.bytes);

        let response = self
            .client
            .post(self.upload_url())
            .form(&[
                ("file", file.as_str()),
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Upload(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            return Err(CatalogError::Upload(format!("{status}: {message}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Upload(format!("Unexpected response body: {e}")))?;

        Ok(UploadedImage {
            secure_url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> CatalogResult<UploadedImage> {
        self.upload_at(image, folder, chrono::Utc::now().timestamp())
            .await
    }
}
