//! Application Configuration
//!
//! Configuration for the Catalog application layer.

/// Folder every product image is uploaded into
pub const DEFAULT_IMAGE_FOLDER: &str = "mini_feria_products";

/// Per-file ceiling for uploaded images (2 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Files accepted per image batch request
pub const DEFAULT_MAX_IMAGES: usize = 5;

/// Stored when a category or product arrives without a description
pub const DESCRIPTION_PLACEHOLDER: &str = "No description";

/// Room for metadata parts and multipart framing on top of the files
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub image_folder: String,
    pub max_image_bytes: usize,
    pub max_images: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

impl CatalogConfig {
    /// Body limit for the image batch route
    pub fn max_request_bytes(&self) -> usize {
        self.max_images
            .saturating_mul(self.max_image_bytes)
            .saturating_add(MULTIPART_OVERHEAD_BYTES)
    }
}

/// Placeholder for blank descriptions
pub(crate) fn description_or_placeholder(description: Option<String>) -> String {
    description
        .filter(|d| platform::validation::is_non_empty_string(d))
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string())
}
