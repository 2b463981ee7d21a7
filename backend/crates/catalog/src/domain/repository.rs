//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Writes report constraint violations as domain errors so that pre-flight
//! checks losing a race still produce the right status.

use kernel::id::{CategoryId, ImageId, ProductId, VariantId};

use crate::domain::entity::{
    Category, CategorySummary, NewAttribute, NewCategory, NewImage, NewProduct, NewVariant,
    ProductDetails, ProductPreview,
};
use crate::error::CatalogResult;

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Check whether a category with this (lower-cased) name exists
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool>;

    /// Insert a category
    ///
    /// Unique → `Conflict`, missing parent → `InvalidReference`,
    /// self-parent → `InvalidInput`.
    async fn create(&self, category: &NewCategory) -> CatalogResult<CategoryId>;

    async fn list(&self) -> CatalogResult<Vec<Category>>;

    async fn list_summaries(&self) -> CatalogResult<Vec<CategorySummary>>;

    /// Delete a category and, through the cascade, its descendants
    async fn delete(&self, id: CategoryId) -> CatalogResult<bool>;
}

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Case-sensitive name lookup
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool>;

    async fn exists(&self, id: ProductId) -> CatalogResult<bool>;

    async fn category_exists(&self, id: CategoryId) -> CatalogResult<bool>;

    async fn variant_exists(&self, id: VariantId) -> CatalogResult<bool>;

    async fn create(&self, product: &NewProduct) -> CatalogResult<ProductId>;

    async fn create_variant(&self, variant: &NewVariant) -> CatalogResult<VariantId>;

    async fn create_attribute(&self, attribute: &NewAttribute) -> CatalogResult<()>;

    async fn create_image(&self, image: &NewImage) -> CatalogResult<ImageId>;

    /// Active products with a default variant that has a primary image
    async fn list_previews(&self) -> CatalogResult<Vec<ProductPreview>>;

    async fn find_details(&self, id: ProductId) -> CatalogResult<Option<ProductDetails>>;

    /// Soft delete; returns whether a row matched
    async fn deactivate(&self, id: ProductId) -> CatalogResult<bool>;
}
