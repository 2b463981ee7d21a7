//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::db::ConstraintViolation;
use kernel::id::{CategoryId, ImageId, ProductId, VariantId};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entity::{
    Category, CategorySummary, NewAttribute, NewCategory, NewImage, NewProduct, NewVariant,
    Product, ProductDetails, ProductPreview, ProductVariant, VariantAttribute, VariantDetails,
    VariantImage,
};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::domain::value_object::{DisplayType, ProductStatus};
use crate::error::{CatalogError, CatalogResult};

/// Translate a failed write through `map`; unmapped violations stay database errors
fn map_write_error(
    err: sqlx::Error,
    table: &'static str,
    map: impl FnOnce(ConstraintViolation) -> Option<CatalogError>,
) -> CatalogError {
    let Some(violation) = ConstraintViolation::classify(&err) else {
        return CatalogError::Database(err);
    };

    tracing::warn!(
        table,
        ?violation,
        constraint = ConstraintViolation::constraint_name(&err).unwrap_or("unknown"),
        "Constraint violation"
    );

    map(violation).unwrap_or(CatalogError::Database(err))
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

/// PostgreSQL-backed category repository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CategoryRepository for PgCategoryRepository {
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, category: &NewCategory) -> CatalogResult<CategoryId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name, description, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "categories", |violation| match violation {
                ConstraintViolation::Unique => Some(CatalogError::Conflict(format!(
                    "Category \"{}\" already exists.",
                    category.name
                ))),
                ConstraintViolation::ForeignKey => Some(CatalogError::InvalidReference(format!(
                    "Parent category {} does not exist.",
                    category.parent_id.map_or(0, |id| id.value())
                ))),
                ConstraintViolation::Check => Some(CatalogError::InvalidInput(
                    "A category cannot be its own parent.".to_string(),
                )),
                ConstraintViolation::NotNull => None,
            })
        })?;

        Ok(CategoryId::new(id))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                id,
                name,
                description,
                parent_id,
                created_at,
                updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn list_summaries(&self) -> CatalogResult<Vec<CategorySummary>> {
        let rows = sqlx::query_as::<_, (i32, String)>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| CategorySummary {
                id: CategoryId::new(id),
                name,
            })
            .collect())
    }

    async fn delete(&self, id: CategoryId) -> CatalogResult<bool> {
        // Children are removed by ON DELETE CASCADE on parent_id
        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists_in(&self, query: &'static str, id: i32) -> CatalogResult<bool> {
        let exists: bool = sqlx::query_scalar(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

impl ProductRepository for PgProductRepository {
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists(&self, id: ProductId) -> CatalogResult<bool> {
        self.exists_in(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
            id.value(),
        )
        .await
    }

    async fn category_exists(&self, id: CategoryId) -> CatalogResult<bool> {
        self.exists_in(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
            id.value(),
        )
        .await
    }

    async fn variant_exists(&self, id: VariantId) -> CatalogResult<bool> {
        self.exists_in(
            "SELECT EXISTS(SELECT 1 FROM product_variants WHERE id = $1)",
            id.value(),
        )
        .await
    }

    async fn create(&self, product: &NewProduct) -> CatalogResult<ProductId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, status, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.status.code())
        .bind(product.category_id.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "products", |violation| match violation {
                ConstraintViolation::Unique => Some(CatalogError::Conflict(format!(
                    "A product with the name \"{}\" already exists.",
                    product.name
                ))),
                ConstraintViolation::ForeignKey => Some(CatalogError::InvalidReference(format!(
                    "Category {} does not exist.",
                    product.category_id.map_or(0, |id| id.value())
                ))),
                ConstraintViolation::Check => Some(CatalogError::InvalidInput(
                    "Invalid product data.".to_string(),
                )),
                ConstraintViolation::NotNull => None,
            })
        })?;

        Ok(ProductId::new(id))
    }

    async fn create_variant(&self, variant: &NewVariant) -> CatalogResult<VariantId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO product_variants (product_id, sku_code, price, stock, is_default)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(variant.product_id.value())
        .bind(&variant.sku_code)
        .bind(variant.price)
        .bind(variant.stock)
        .bind(variant.is_default)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "product_variants", |violation| match violation {
                ConstraintViolation::Unique => Some(CatalogError::Conflict(format!(
                    "SKU code \"{}\" already exists.",
                    variant.sku_code
                ))),
                ConstraintViolation::ForeignKey => Some(CatalogError::InvalidReference(format!(
                    "Product {} does not exist.",
                    variant.product_id
                ))),
                ConstraintViolation::Check => Some(CatalogError::InvalidInput(
                    "Invalid variant data: price and stock must not be negative.".to_string(),
                )),
                ConstraintViolation::NotNull => None,
            })
        })?;

        Ok(VariantId::new(id))
    }

    async fn create_attribute(&self, attribute: &NewAttribute) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO variant_attributes (
                variant_id,
                attribute_name,
                attribute_value,
                display_value,
                display_type,
                is_filterable,
                sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(attribute.variant_id.value())
        .bind(&attribute.attribute_name)
        .bind(&attribute.attribute_value)
        .bind(&attribute.display_value)
        .bind(attribute.display_type.code())
        .bind(attribute.is_filterable)
        .bind(attribute.sort_order)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "variant_attributes", |violation| match violation {
                ConstraintViolation::Unique => Some(CatalogError::Conflict(format!(
                    "Attribute \"{}\" already exists for this variant.",
                    attribute.attribute_name
                ))),
                ConstraintViolation::ForeignKey => Some(CatalogError::InvalidReference(format!(
                    "Variant {} does not exist.",
                    attribute.variant_id
                ))),
                ConstraintViolation::Check => Some(CatalogError::InvalidInput(
                    "Invalid attribute data.".to_string(),
                )),
                ConstraintViolation::NotNull => None,
            })
        })?;

        Ok(())
    }

    async fn create_image(&self, image: &NewImage) -> CatalogResult<ImageId> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO variant_images (url, is_primary, public_id, variant_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&image.url)
        .bind(image.is_primary)
        .bind(&image.public_id)
        .bind(image.variant_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, "variant_images", |violation| match violation {
                ConstraintViolation::Unique => Some(CatalogError::Conflict(format!(
                    "An image with public_id \"{}\" already exists.",
                    image.public_id
                ))),
                ConstraintViolation::ForeignKey => Some(CatalogError::InvalidReference(format!(
                    "Variant {} does not exist.",
                    image.variant_id
                ))),
                _ => None,
            })
        })?;

        Ok(ImageId::new(id))
    }

    async fn list_previews(&self) -> CatalogResult<Vec<ProductPreview>> {
        // One card per product even if the data holds several defaults/primaries
        let rows = sqlx::query_as::<_, PreviewRow>(
            r#"
            SELECT DISTINCT ON (p.id)
                p.id,
                p.name,
                pv.price,
                pv.stock,
                vi.url
            FROM products p
            JOIN product_variants pv
                ON pv.product_id = p.id AND pv.is_default = TRUE
            JOIN variant_images vi
                ON vi.variant_id = pv.id AND vi.is_primary = TRUE
            WHERE p.status = 'active'
            ORDER BY p.id, pv.id, vi.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PreviewRow::into_preview).collect())
    }

    async fn find_details(&self, id: ProductId) -> CatalogResult<Option<ProductDetails>> {
        let Some(product) = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                name,
                description,
                status,
                category_id,
                created_at,
                updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };
        let product = product.into_product()?;

        let variants = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT id, product_id, sku_code, price, stock, is_default
            FROM product_variants
            WHERE product_id = $1
            ORDER BY is_default DESC, id
            "#,
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        let variant_ids: Vec<i32> = variants.iter().map(|v| v.id).collect();

        let attributes = sqlx::query_as::<_, AttributeRow>(
            r#"
            SELECT
                id,
                variant_id,
                attribute_name,
                attribute_value,
                display_value,
                display_type,
                is_filterable,
                sort_order
            FROM variant_attributes
            WHERE variant_id = ANY($1)
            ORDER BY sort_order, id
            "#,
        )
        .bind(variant_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let images = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT id, variant_id, url, is_primary, public_id
            FROM variant_images
            WHERE variant_id = ANY($1)
            ORDER BY is_primary DESC, id
            "#,
        )
        .bind(variant_ids.as_slice())
        .fetch_all(&self.pool)
        .await?;

        let mut attributes_by_variant: HashMap<i32, Vec<VariantAttribute>> = HashMap::new();
        for row in attributes {
            attributes_by_variant
                .entry(row.variant_id)
                .or_default()
                .push(row.into_attribute()?);
        }

        let mut images_by_variant: HashMap<i32, Vec<VariantImage>> = HashMap::new();
        for row in images {
            images_by_variant
                .entry(row.variant_id)
                .or_default()
                .push(row.into_image());
        }

        let variants = variants
            .into_iter()
            .map(|row| VariantDetails {
                attributes: attributes_by_variant.remove(&row.id).unwrap_or_default(),
                images: images_by_variant.remove(&row.id).unwrap_or_default(),
                variant: row.into_variant(),
            })
            .collect();

        Ok(Some(ProductDetails { product, variants }))
    }

    async fn deactivate(&self, id: ProductId) -> CatalogResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE products
            SET status = $1,
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(ProductStatus::Inactive.code())
        .bind(id.value())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    description: Option<String>,
    parent_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::new(self.id),
            name: self.name,
            description: self.description,
            parent_id: self.parent_id.map(CategoryId::new),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    status: String,
    category_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> CatalogResult<Product> {
        let status = ProductStatus::from_code(&self.status).ok_or_else(|| {
            CatalogError::Internal(format!("Unknown product status: {}", self.status))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            status,
            category_id: self.category_id.map(CategoryId::new),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct VariantRow {
    id: i32,
    product_id: i32,
    sku_code: String,
    price: Decimal,
    stock: i32,
    is_default: bool,
}

impl VariantRow {
    fn into_variant(self) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(self.id),
            product_id: ProductId::new(self.product_id),
            sku_code: self.sku_code,
            price: self.price,
            stock: self.stock,
            is_default: self.is_default,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttributeRow {
    id: i32,
    variant_id: i32,
    attribute_name: String,
    attribute_value: String,
    display_value: String,
    display_type: String,
    is_filterable: bool,
    sort_order: i32,
}

impl AttributeRow {
    fn into_attribute(self) -> CatalogResult<VariantAttribute> {
        let display_type = DisplayType::from_code(&self.display_type).ok_or_else(|| {
            CatalogError::Internal(format!("Unknown display type: {}", self.display_type))
        })?;

        Ok(VariantAttribute {
            id: self.id,
            variant_id: VariantId::new(self.variant_id),
            attribute_name: self.attribute_name,
            attribute_value: self.attribute_value,
            display_value: self.display_value,
            display_type,
            is_filterable: self.is_filterable,
            sort_order: self.sort_order,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i32,
    variant_id: i32,
    url: String,
    is_primary: bool,
    public_id: String,
}

impl ImageRow {
    fn into_image(self) -> VariantImage {
        VariantImage {
            id: ImageId::new(self.id),
            variant_id: VariantId::new(self.variant_id),
            url: self.url,
            is_primary: self.is_primary,
            public_id: self.public_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PreviewRow {
    id: i32,
    name: String,
    price: Decimal,
    stock: i32,
    url: String,
}

impl PreviewRow {
    fn into_preview(self) -> ProductPreview {
        ProductPreview {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.price,
            stock: self.stock,
            url: self.url,
        }
    }
}
