//! API DTOs (Data Transfer Objects)
//!
//! Request fields are `Option` so that a missing field becomes a specific
//! validation message instead of a generic body rejection.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    Category, CategorySummary, ProductDetails, ProductPreview, VariantAttribute, VariantDetails,
    VariantImage,
};
use crate::domain::value_object::{DisplayType, ProductStatus};

pub use auth::presentation::dto::MessageResponse;

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AddCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddCategoryResponse {
    pub message: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCategoryRequest {
    pub id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.value(),
            name: category.name,
            description: category.description,
            parent_id: category.parent_id.map(|id| id.value()),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummaryResponse {
    pub id: i32,
    pub name: String,
}

impl From<CategorySummary> for CategorySummaryResponse {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id.value(),
            name: summary.name,
        }
    }
}

/// `{"categories": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListResponse<T> {
    pub categories: Vec<T>,
}

// ============================================================================
// Product composite workflow
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AddProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddProductResponse {
    pub message: String,
    pub product_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddVariantRequest {
    pub product_id: Option<i32>,
    pub sku_code: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddVariantResponse {
    pub message: String,
    pub variant_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddAttributeRequest {
    pub variant_id: Option<i32>,
    pub attribute_name: Option<String>,
    pub attribute_value: Option<String>,
    pub display_value: Option<String>,
    pub display_type: Option<String>,
    pub is_filterable: Option<bool>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddImagesResponse {
    pub message: String,
    pub image_ids: Vec<i32>,
}

// ============================================================================
// Reads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProductPreviewResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub url: String,
}

impl From<ProductPreview> for ProductPreviewResponse {
    fn from(preview: ProductPreview) -> Self {
        Self {
            id: preview.id.value(),
            name: preview.name,
            price: preview.price,
            stock: preview.stock,
            url: preview.url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPreviewListResponse {
    pub products: Vec<ProductPreviewResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeResponse {
    pub id: i32,
    pub attribute_name: String,
    pub attribute_value: String,
    pub display_value: String,
    pub display_type: DisplayType,
    pub is_filterable: bool,
    pub sort_order: i32,
}

impl From<VariantAttribute> for AttributeResponse {
    fn from(attribute: VariantAttribute) -> Self {
        Self {
            id: attribute.id,
            attribute_name: attribute.attribute_name,
            attribute_value: attribute.attribute_value,
            display_value: attribute.display_value,
            display_type: attribute.display_type,
            is_filterable: attribute.is_filterable,
            sort_order: attribute.sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub id: i32,
    pub url: String,
    pub is_primary: bool,
    pub public_id: String,
}

impl From<VariantImage> for ImageResponse {
    fn from(image: VariantImage) -> Self {
        Self {
            id: image.id.value(),
            url: image.url,
            is_primary: image.is_primary,
            public_id: image.public_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantResponse {
    pub id: i32,
    pub sku_code: String,
    pub price: Decimal,
    pub stock: i32,
    pub is_default: bool,
    pub attributes: Vec<AttributeResponse>,
    pub images: Vec<ImageResponse>,
}

impl From<VariantDetails> for VariantResponse {
    fn from(details: VariantDetails) -> Self {
        Self {
            id: details.variant.id.value(),
            sku_code: details.variant.sku_code,
            price: details.variant.price,
            stock: details.variant.stock,
            is_default: details.variant.is_default,
            attributes: details.attributes.into_iter().map(Into::into).collect(),
            images: details.images.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailsResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub variants: Vec<VariantResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        let product = details.product;
        Self {
            id: product.id.value(),
            name: product.name,
            description: product.description,
            status: product.status,
            category_id: product.category_id.map(|id| id.value()),
            created_at: product.created_at,
            updated_at: product.updated_at,
            variants: details.variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// `{"success": true, "data": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailsEnvelope {
    pub success: bool,
    pub data: ProductDetailsResponse,
}
