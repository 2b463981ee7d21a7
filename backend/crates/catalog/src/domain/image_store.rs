//! External image store port

use crate::error::CatalogResult;

/// One file handed to the store
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What the store hands back for an accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Image store trait
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Upload one image into `folder`
    async fn upload(&self, image: &ImageUpload, folder: &str) -> CatalogResult<UploadedImage>;
}
