//! Product, variant, attribute and image entities

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ImageId, ProductId, VariantId};
use rust_decimal::Decimal;

use crate::domain::value_object::{DisplayType, ProductStatus};

/// A stored product row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub category_id: Option<CategoryId>,
}

/// A purchasable variant (SKU) of a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku_code: String,
    pub price: Decimal,
    pub stock: i32,
    pub is_default: bool,
}

#[derive(Debug, Clone)]
pub struct NewVariant {
    pub product_id: ProductId,
    pub sku_code: String,
    pub price: Decimal,
    pub stock: i32,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAttribute {
    pub id: i32,
    pub variant_id: VariantId,
    pub attribute_name: String,
    pub attribute_value: String,
    pub display_value: String,
    pub display_type: DisplayType,
    pub is_filterable: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewAttribute {
    pub variant_id: VariantId,
    pub attribute_name: String,
    pub attribute_value: String,
    pub display_value: String,
    pub display_type: DisplayType,
    pub is_filterable: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantImage {
    pub id: ImageId,
    pub variant_id: VariantId,
    pub url: String,
    pub is_primary: bool,
    pub public_id: String,
}

/// Image row to insert once the external store has accepted the upload
#[derive(Debug, Clone)]
pub struct NewImage {
    pub variant_id: VariantId,
    pub url: String,
    pub is_primary: bool,
    pub public_id: String,
}

/// Storefront card: active product, default variant, primary image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPreview {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub url: String,
}

/// A variant with everything hanging off it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetails {
    pub variant: ProductVariant,
    pub attributes: Vec<VariantAttribute>,
    pub images: Vec<VariantImage>,
}

/// Full product tree for the detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub product: Product,
    pub variants: Vec<VariantDetails>,
}
