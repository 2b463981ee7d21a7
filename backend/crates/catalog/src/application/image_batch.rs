//! Image Batch Use Case
//!
//! Each file is uploaded to the external store and then recorded as a
//! `variant_images` row. Items run concurrently and commit independently;
//! the batch only succeeds when every item does.
//!
//! The fan-out is a saga: every finished step is recorded, and when any item
//! fails the recorded steps are handed to an [`ImageCompensator`].

use std::sync::Arc;

use futures::future::join_all;
use kernel::id::{ImageId, VariantId};
use serde_json::Value;

use crate::application::config::CatalogConfig;
use crate::domain::entity::NewImage;
use crate::domain::image_store::{ImageStore, ImageUpload};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Metadata
// ============================================================================

/// Per-file metadata sent as a JSON string part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub variant_id: VariantId,
    pub is_primary: bool,
}

impl ImageMetadata {
    /// Parse `{"variant_id": <positive int>, "is_primary": <bool>}`
    pub fn parse(raw: &str, index: usize) -> CatalogResult<Self> {
        let invalid = || {
            CatalogError::InvalidInput(format!(
                "Invalid metadata for image {index}. Expected {{\"variant_id\": number, \"is_primary\": boolean}}."
            ))
        };

        let value: Value = serde_json::from_str(raw).map_err(|_| invalid())?;
        // Any JSON number; 7.0 counts as 7
        let variant_id = value
            .get("variant_id")
            .and_then(Value::as_f64)
            .ok_or_else(invalid)?;
        let is_primary = value
            .get("is_primary")
            .and_then(Value::as_bool)
            .ok_or_else(invalid)?;

        let whole = variant_id.fract() == 0.0;
        let variant_id = (whole && variant_id > 0.0 && variant_id <= f64::from(i32::MAX))
            .then_some(variant_id as i32)
            .ok_or_else(|| {
                CatalogError::InvalidInput(format!(
                    "Invalid variant_id \"{variant_id}\" in metadata for image {index}. Must be a positive number."
                ))
            })?;

        Ok(Self {
            variant_id: VariantId::new(variant_id),
            is_primary,
        })
    }
}

// ============================================================================
// Saga
// ============================================================================

/// A step that went through the external store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedImage {
    pub index: usize,
    pub variant_id: VariantId,
    pub public_id: String,
    /// `None` when the upload landed but the row insert failed
    pub image_id: Option<ImageId>,
}

/// Handles the completed steps of a failed batch
#[trait_variant::make(ImageCompensator: Send)]
pub trait LocalImageCompensator {
    async fn compensate(&self, completed: &[CompletedImage]);
}

/// Keeps every upload and row, logging what stays behind
#[derive(Debug, Clone, Copy, Default)]
pub struct RetainUploads;

impl ImageCompensator for RetainUploads {
    async fn compensate(&self, completed: &[CompletedImage]) {
        for step in completed {
            tracing::warn!(
                index = step.index,
                variant_id = %step.variant_id,
                public_id = %step.public_id,
                persisted = step.image_id.is_some(),
                "Image retained after failed batch"
            );
        }
    }
}

struct FailedImage {
    index: usize,
    partial: Option<CompletedImage>,
    error: CatalogError,
}

/// Concurrent upload-then-record over a batch
pub struct ImageBatchSaga<R, S, C>
where
    R: ProductRepository,
    S: ImageStore,
    C: ImageCompensator,
{
    repo: Arc<R>,
    store: Arc<S>,
    compensator: Arc<C>,
    folder: String,
}

impl<R, S, C> ImageBatchSaga<R, S, C>
where
    R: ProductRepository,
    S: ImageStore,
    C: ImageCompensator,
{
    pub fn new(repo: Arc<R>, store: Arc<S>, compensator: Arc<C>, folder: String) -> Self {
        Self {
            repo,
            store,
            compensator,
            folder,
        }
    }

    /// Run every item; on any failure compensate and report the count
    pub async fn run(&self, items: Vec<(ImageUpload, ImageMetadata)>) -> CatalogResult<Vec<ImageId>> {
        let total = items.len();
        let outcomes = join_all(
            items
                .into_iter()
                .enumerate()
                .map(|(index, (upload, metadata))| self.run_item(index, upload, metadata)),
        )
        .await;

        let mut completed = Vec::with_capacity(total);
        let mut failed = 0usize;
        for outcome in outcomes {
            match outcome {
                Ok(step) => completed.push(step),
                Err(FailedImage {
                    index,
                    partial,
                    error,
                }) => {
                    failed += 1;
                    tracing::error!(index, error = %error, "Image batch item failed");
                    completed.extend(partial);
                }
            }
        }

        if failed > 0 {
            completed.sort_by_key(|step| step.index);
            self.compensator.compensate(&completed).await;
            return Err(CatalogError::ImageBatch { failed, total });
        }

        Ok(completed.into_iter().filter_map(|step| step.image_id).collect())
    }

    async fn run_item(
        &self,
        index: usize,
        upload: ImageUpload,
        metadata: ImageMetadata,
    ) -> Result<CompletedImage, FailedImage> {
        let uploaded = self
            .store
            .upload(&upload, &self.folder)
            .await
            .map_err(|error| FailedImage {
                index,
                partial: None,
                error,
            })?;

        tracing::debug!(index, public_id = %uploaded.public_id, "Image uploaded");

        let mut step = CompletedImage {
            index,
            variant_id: metadata.variant_id,
            public_id: uploaded.public_id.clone(),
            image_id: None,
        };

        let inserted = self
            .repo
            .create_image(&NewImage {
                variant_id: metadata.variant_id,
                url: uploaded.secure_url,
                is_primary: metadata.is_primary,
                public_id: uploaded.public_id,
            })
            .await;

        match inserted {
            Ok(image_id) => {
                step.image_id = Some(image_id);
                Ok(step)
            }
            Err(error) => Err(FailedImage {
                index,
                partial: Some(step),
                error,
            }),
        }
    }
}

// ============================================================================
// Use case
// ============================================================================

/// Add images use case
///
/// Every metadata item is validated before the first upload is launched.
pub struct AddImagesUseCase<R, S, C>
where
    R: ProductRepository,
    S: ImageStore,
    C: ImageCompensator,
{
    saga: ImageBatchSaga<R, S, C>,
    max_images: usize,
}

impl<R, S, C> AddImagesUseCase<R, S, C>
where
    R: ProductRepository,
    S: ImageStore,
    C: ImageCompensator,
{
    pub fn new(repo: Arc<R>, store: Arc<S>, compensator: Arc<C>, config: &CatalogConfig) -> Self {
        Self {
            saga: ImageBatchSaga::new(repo, store, compensator, config.image_folder.clone()),
            max_images: config.max_images,
        }
    }

    /// Returns the ids of the stored image rows, in upload order
    pub async fn execute(
        &self,
        files: Vec<ImageUpload>,
        metadata: Vec<String>,
    ) -> CatalogResult<Vec<ImageId>> {
        if files.is_empty() {
            return Err(CatalogError::InvalidInput("No images were provided.".to_string()));
        }
        if files.len() > self.max_images {
            return Err(CatalogError::InvalidInput(format!(
                "Too many files. At most {} images per request.",
                self.max_images
            )));
        }
        if metadata.len() != files.len() {
            return Err(CatalogError::InvalidInput(format!(
                "Mismatch between files and metadata: {} files, {} metadata entries.",
                files.len(),
                metadata.len()
            )));
        }

        let parsed = metadata
            .iter()
            .enumerate()
            .map(|(index, raw)| ImageMetadata::parse(raw, index))
            .collect::<CatalogResult<Vec<_>>>()?;

        tracing::info!(count = files.len(), "Processing image batch");

        let image_ids = self.saga.run(files.into_iter().zip(parsed).collect()).await?;

        tracing::info!(count = image_ids.len(), "Image batch stored");
        Ok(image_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let meta = ImageMetadata::parse(r#"{"variant_id": 7, "is_primary": true}"#, 0).unwrap();
        assert_eq!(meta.variant_id, VariantId::new(7));
        assert!(meta.is_primary);
    }

    #[test]
    fn test_parse_metadata_accepts_integral_float() {
        let meta = ImageMetadata::parse(r#"{"variant_id": 7.0, "is_primary": false}"#, 0).unwrap();
        assert_eq!(meta.variant_id, VariantId::new(7));
        assert!(!meta.is_primary);
    }

    #[test]
    fn test_parse_metadata_rejects_out_of_range_variant() {
        let err = ImageMetadata::parse(r#"{"variant_id": 3000000000, "is_primary": true}"#, 0)
            .unwrap_err();
        assert!(err.to_string().contains("Must be a positive number"));
    }

    #[test]
    fn test_parse_metadata_rejects_bad_structure() {
        for raw in [
            "not json",
            r#"{"variant_id": "7", "is_primary": true}"#,
            r#"{"variant_id": 7, "is_primary": "yes"}"#,
            r#"{"variant_id": 7}"#,
            r#"{"variant_id": 1.5, "is_primary": false}"#,
        ] {
            assert!(
                matches!(ImageMetadata::parse(raw, 2), Err(CatalogError::InvalidInput(_))),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn test_parse_metadata_rejects_non_positive_variant() {
        let err = ImageMetadata::parse(r#"{"variant_id": 0, "is_primary": false}"#, 1).unwrap_err();
        assert!(err.to_string().contains("Must be a positive number"));
    }
}
