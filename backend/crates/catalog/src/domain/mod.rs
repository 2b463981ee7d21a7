//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the image store port.

pub mod entity;
pub mod image_store;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::*;
pub use image_store::{ImageStore, ImageUpload, UploadedImage};
pub use repository::{CategoryRepository, ProductRepository};
pub use value_object::{DisplayType, ProductStatus};
