//! Application Layer
//!
//! Use cases and application services.

pub mod category;
pub mod config;
pub mod image_batch;
pub mod product;

// Re-exports
pub use category::{
    AddCategoryInput, AddCategoryOutput, AddCategoryUseCase, DeleteCategoryUseCase,
    ListCategoriesUseCase,
};
pub use config::CatalogConfig;
pub use image_batch::{
    AddImagesUseCase, CompletedImage, ImageBatchSaga, ImageCompensator, ImageMetadata,
    RetainUploads,
};
pub use product::{
    AddAttributeInput, AddAttributeUseCase, AddVariantInput, AddVariantUseCase,
    CreateProductInput, CreateProductUseCase, ProductQueryUseCase,
};
