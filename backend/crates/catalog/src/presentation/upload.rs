//! Multipart reading for image batches
//!
//! File parts are checked while they stream in: a non-image part or one over
//! the per-file ceiling ends the request before anything reaches a use case.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::application::config::CatalogConfig;
use crate::domain::image_store::ImageUpload;
use crate::error::{CatalogError, CatalogResult};

/// Multipart field carrying the image payloads
pub const FILES_FIELD: &str = "files";

/// Multipart field carrying one metadata JSON string per file
pub const METADATA_FIELD: &str = "metadata";

/// Parts of an image batch request, in arrival order
#[derive(Debug, Default)]
pub struct ImageForm {
    pub files: Vec<ImageUpload>,
    pub metadata: Vec<String>,
}

pub async fn read_image_form(
    mut multipart: Multipart,
    config: &CatalogConfig,
) -> CatalogResult<ImageForm> {
    let mut form = ImageForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            FILES_FIELD => {
                if form.files.len() >= config.max_images {
                    return Err(CatalogError::InvalidInput(format!(
                        "Too many files. At most {} images per request.",
                        config.max_images
                    )));
                }

                let content_type = field
                    .content_type()
                    .map(str::to_ascii_lowercase)
                    .filter(|ct| ct.starts_with("image/"))
                    .ok_or_else(|| {
                        CatalogError::UnsupportedMediaType(
                            "Only image files are allowed.".to_string(),
                        )
                    })?;

                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    if bytes.len() + chunk.len() > config.max_image_bytes {
                        return Err(file_too_large(config));
                    }
                    bytes.extend_from_slice(&chunk);
                }

                form.files.push(ImageUpload {
                    content_type,
                    bytes,
                });
            }
            METADATA_FIELD => {
                form.metadata
                    .push(field.text().await.map_err(multipart_error)?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unexpected multipart field");
            }
        }
    }

    Ok(form)
}

fn file_too_large(config: &CatalogConfig) -> CatalogError {
    CatalogError::PayloadTooLarge(format!(
        "One or more image files are too large. Maximum {} MiB allowed per file.",
        config.max_image_bytes / (1024 * 1024)
    ))
}

fn multipart_error(err: MultipartError) -> CatalogError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CatalogError::PayloadTooLarge("Request body is too large.".to_string())
    } else {
        CatalogError::InvalidInput(format!("Malformed multipart body: {}", err.body_text()))
    }
}
