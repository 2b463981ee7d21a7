//! Product Use Cases
//!
//! The parent product, its variants and their attributes are created by
//! separate requests. Each stage validates and commits on its own, so a
//! failed later stage can be retried without redoing the earlier ones.

use std::str::FromStr;
use std::sync::Arc;

use kernel::id::{CategoryId, ProductId, VariantId};
use platform::validation;
use rust_decimal::Decimal;

use crate::application::config::description_or_placeholder;
use crate::domain::entity::{
    NewAttribute, NewProduct, NewVariant, ProductDetails, ProductPreview,
};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::{DisplayType, ProductStatus};
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Stage 1: parent product
// ============================================================================

pub struct CreateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i32>,
}

/// Create product use case
pub struct CreateProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CreateProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateProductInput) -> CatalogResult<ProductId> {
        let name = input
            .name
            .filter(|n| validation::is_non_empty_string(n))
            .ok_or_else(|| {
                CatalogError::InvalidInput("Product name must not be empty.".to_string())
            })?;

        if self.repo.exists_by_name(&name).await? {
            return Err(CatalogError::Conflict(
                "A product with that name already exists.".to_string(),
            ));
        }

        let status = input
            .status
            .as_deref()
            .and_then(ProductStatus::for_creation)
            .ok_or_else(|| {
                CatalogError::InvalidInput(
                    "Status must be \"active\" or \"draft\" at creation.".to_string(),
                )
            })?;

        let category_id = input.category_id.map(CategoryId::new);
        if let Some(category_id) = category_id {
            if !self.repo.category_exists(category_id).await? {
                return Err(CatalogError::InvalidReference(format!(
                    "Category {category_id} does not exist."
                )));
            }
        }

        let product_id = self
            .repo
            .create(&NewProduct {
                name,
                description: description_or_placeholder(input.description),
                status,
                category_id,
            })
            .await?;

        tracing::info!(product_id = %product_id, status = %status, "Product created");

        Ok(product_id)
    }
}

// ============================================================================
// Stage 2: variant
// ============================================================================

pub struct AddVariantInput {
    pub product_id: Option<i32>,
    pub sku_code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub is_default: Option<bool>,
}

/// Add variant use case
pub struct AddVariantUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> AddVariantUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddVariantInput) -> CatalogResult<VariantId> {
        let missing_product =
            || CatalogError::InvalidReference("The given product_id does not exist.".to_string());
        let product_id = positive_id(input.product_id)
            .map(ProductId::new)
            .ok_or_else(missing_product)?;
        if !self.repo.exists(product_id).await? {
            return Err(missing_product());
        }

        let sku_code = input
            .sku_code
            .filter(|s| validation::is_non_empty_string(s))
            .ok_or_else(|| CatalogError::InvalidInput("sku_code must not be empty.".to_string()))?;

        let price = input.price.and_then(to_price).ok_or_else(|| {
            CatalogError::InvalidInput(
                "Price must be a non-negative amount with at most 10 integer digits and 2 decimals."
                    .to_string(),
            )
        })?;

        let stock = input.stock.and_then(to_stock).ok_or_else(|| {
            CatalogError::InvalidInput("Stock must be a non-negative whole number.".to_string())
        })?;

        let is_default = input.is_default.ok_or_else(|| {
            CatalogError::InvalidInput("is_default must be a boolean.".to_string())
        })?;

        let variant_id = self
            .repo
            .create_variant(&NewVariant {
                product_id,
                sku_code,
                price,
                stock,
                is_default,
            })
            .await?;

        tracing::info!(variant_id = %variant_id, product_id = %product_id, "Variant created");

        Ok(variant_id)
    }
}

/// Validated price as an exact decimal
///
/// The shortest `f64` rendering is what the client sent, so parsing it back
/// keeps 12.34 as 12.34 instead of its binary neighbour.
fn to_price(value: f64) -> Option<Decimal> {
    if !validation::is_valid_number(value) {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Validated stock; the column is a 32-bit integer
fn to_stock(value: f64) -> Option<i32> {
    if !validation::is_valid_number(value) || value.fract() != 0.0 || value > f64::from(i32::MAX)
    {
        return None;
    }
    Some(value as i32)
}

fn positive_id(id: Option<i32>) -> Option<i32> {
    id.filter(|id| *id > 0)
}

// ============================================================================
// Stage 3: attribute
// ============================================================================

pub struct AddAttributeInput {
    pub variant_id: Option<i32>,
    pub attribute_name: Option<String>,
    pub attribute_value: Option<String>,
    pub display_value: Option<String>,
    pub display_type: Option<String>,
    pub is_filterable: Option<bool>,
    pub sort_order: Option<i64>,
}

/// Add attribute use case; checks run in field order and the first failure wins
pub struct AddAttributeUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> AddAttributeUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddAttributeInput) -> CatalogResult<()> {
        let missing_variant =
            || CatalogError::InvalidReference("The given variant_id does not exist.".to_string());
        let variant_id = positive_id(input.variant_id)
            .map(VariantId::new)
            .ok_or_else(missing_variant)?;
        if !self.repo.variant_exists(variant_id).await? {
            return Err(missing_variant());
        }

        let attribute_name = required_text(input.attribute_name, "attribute_name")?;
        let attribute_value = required_text(input.attribute_value, "attribute_value")?;
        let display_value = required_text(input.display_value, "display_value")?;

        let display_type = input
            .display_type
            .as_deref()
            .and_then(DisplayType::from_code)
            .ok_or_else(|| {
                CatalogError::InvalidInput(
                    "display_type must be one of color_swatch, select, image_swatch, text_swatch."
                        .to_string(),
                )
            })?;

        let is_filterable = input.is_filterable.ok_or_else(|| {
            CatalogError::InvalidInput("is_filterable must be a boolean.".to_string())
        })?;

        let sort_order = input
            .sort_order
            .and_then(|n| i32::try_from(n).ok())
            .filter(|n| *n >= 0)
            .ok_or_else(|| {
                CatalogError::InvalidInput(
                    "sort_order must be a non-negative integer.".to_string(),
                )
            })?;

        self.repo
            .create_attribute(&NewAttribute {
                variant_id,
                attribute_name,
                attribute_value,
                display_value,
                display_type,
                is_filterable,
                sort_order,
            })
            .await?;

        tracing::info!(variant_id = %variant_id, display_type = %display_type, "Attribute created");

        Ok(())
    }
}

fn required_text(value: Option<String>, field: &str) -> CatalogResult<String> {
    value
        .filter(|v| validation::is_non_empty_string(v))
        .ok_or_else(|| CatalogError::InvalidInput(format!("{field} must not be empty.")))
}

// ============================================================================
// Reads and soft delete
// ============================================================================

/// Preview list, details and soft delete
pub struct ProductQueryUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> ProductQueryUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn previews(&self) -> CatalogResult<Vec<ProductPreview>> {
        let previews = self.repo.list_previews().await?;
        tracing::debug!(count = previews.len(), "Listed product previews");
        Ok(previews)
    }

    pub async fn details(&self, id: i32) -> CatalogResult<ProductDetails> {
        let id = valid_product_id(id)?;
        self.repo
            .find_details(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Product not found.".to_string()))
    }

    pub async fn deactivate(&self, id: i32) -> CatalogResult<()> {
        let id = valid_product_id(id)?;
        if !self.repo.deactivate(id).await? {
            return Err(CatalogError::NotFound("Product not found.".to_string()));
        }

        tracing::info!(product_id = %id, "Product deactivated");
        Ok(())
    }
}

fn valid_product_id(id: i32) -> CatalogResult<ProductId> {
    Some(ProductId::new(id))
        .filter(ProductId::is_positive)
        .ok_or_else(|| CatalogError::InvalidInput("A valid product id is required.".to_string()))
}
