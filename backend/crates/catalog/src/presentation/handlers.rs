//! HTTP Handlers

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{ApiJson, ApiPath};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::application::{
    AddAttributeInput, AddAttributeUseCase, AddCategoryInput, AddCategoryUseCase,
    AddImagesUseCase, AddVariantInput, AddVariantUseCase, CreateProductInput,
    CreateProductUseCase, DeleteCategoryUseCase, ImageCompensator, ListCategoriesUseCase,
    ProductQueryUseCase,
};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AddAttributeRequest, AddCategoryRequest, AddCategoryResponse, AddImagesResponse,
    AddProductRequest, AddProductResponse, AddVariantRequest, AddVariantResponse,
    CategoryListResponse, CategoryResponse, CategorySummaryResponse, DeleteCategoryRequest,
    MessageResponse, ProductDetailsEnvelope, ProductPreviewListResponse,
};
use crate::presentation::upload::read_image_form;

// ============================================================================
// Categories
// ============================================================================

/// Shared state for category handlers
#[derive(Clone)]
pub struct CategoriesAppState<R>
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /api/categories/add-category
pub async fn add_category<R>(
    State(state): State<CategoriesAppState<R>>,
    ApiJson(req): ApiJson<AddCategoryRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    let output = AddCategoryUseCase::new(state.repo.clone())
        .execute(AddCategoryInput {
            name: req.name,
            description: req.description,
            parent_id: req.parent_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddCategoryResponse {
            message: format!("Category \"{}\" created successfully.", output.name),
            category_id: output.category_id.value(),
        }),
    ))
}

/// GET /api/categories/get-categories
pub async fn list_categories<R>(
    State(state): State<CategoriesAppState<R>>,
) -> CatalogResult<Json<CategoryListResponse<CategoryResponse>>>
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(Json(CategoryListResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/categories/get-categories-idname
pub async fn list_category_names<R>(
    State(state): State<CategoriesAppState<R>>,
) -> CatalogResult<Json<CategoryListResponse<CategorySummaryResponse>>>
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    let summaries = ListCategoriesUseCase::new(state.repo.clone())
        .summaries()
        .await?;

    Ok(Json(CategoryListResponse {
        categories: summaries.into_iter().map(Into::into).collect(),
    }))
}

/// DELETE /api/categories/delete-category
pub async fn delete_category<R>(
    State(state): State<CategoriesAppState<R>>,
    ApiJson(req): ApiJson<DeleteCategoryRequest>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    DeleteCategoryUseCase::new(state.repo.clone())
        .execute(req.id)
        .await?;

    Ok(Json(MessageResponse::new("Category deleted successfully.")))
}

// ============================================================================
// Products
// ============================================================================

/// Shared state for product handlers
#[derive(Clone)]
pub struct ProductsAppState<R, S, C>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub images: Arc<S>,
    pub compensator: Arc<C>,
    pub config: Arc<CatalogConfig>,
}

/// POST /api/products/add-product
pub async fn add_product<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    ApiJson(req): ApiJson<AddProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let product_id = CreateProductUseCase::new(state.repo.clone())
        .execute(CreateProductInput {
            name: req.name,
            description: req.description,
            status: req.status,
            category_id: req.category_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddProductResponse {
            message: "Product created. Variants can be added next.".to_string(),
            product_id: product_id.value(),
        }),
    ))
}

/// POST /api/products/add-product-variant
pub async fn add_variant<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    ApiJson(req): ApiJson<AddVariantRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let variant_id = AddVariantUseCase::new(state.repo.clone())
        .execute(AddVariantInput {
            product_id: req.product_id,
            sku_code: req.sku_code,
            price: req.price,
            stock: req.stock,
            is_default: req.is_default,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddVariantResponse {
            message: "Product variant created.".to_string(),
            variant_id: variant_id.value(),
        }),
    ))
}

/// POST /api/products/add-attribute
pub async fn add_attribute<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    ApiJson(req): ApiJson<AddAttributeRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    AddAttributeUseCase::new(state.repo.clone())
        .execute(AddAttributeInput {
            variant_id: req.variant_id,
            attribute_name: req.attribute_name,
            attribute_value: req.attribute_value,
            display_value: req.display_value,
            display_type: req.display_type,
            is_filterable: req.is_filterable,
            sort_order: req.sort_order,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Variant attribute created.")),
    ))
}

/// POST /api/products/add-product-images (multipart)
pub async fn add_images<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let multipart = multipart.map_err(|rejection| {
        CatalogError::InvalidInput(format!("Expected a multipart form: {}", rejection.body_text()))
    })?;
    let form = read_image_form(multipart, &state.config).await?;

    let image_ids = AddImagesUseCase::new(
        state.repo.clone(),
        state.images.clone(),
        state.compensator.clone(),
        &state.config,
    )
    .execute(form.files, form.metadata)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddImagesResponse {
            message: format!(
                "{} images uploaded and associated successfully.",
                image_ids.len()
            ),
            image_ids: image_ids.into_iter().map(|id| id.value()).collect(),
        }),
    ))
}

/// GET /api/products/get-products
pub async fn list_previews<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
) -> CatalogResult<Json<ProductPreviewListResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let previews = ProductQueryUseCase::new(state.repo.clone())
        .previews()
        .await?;

    Ok(Json(ProductPreviewListResponse {
        products: previews.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/products/get-products/{id}
pub async fn product_details<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    ApiPath(id): ApiPath<i32>,
) -> CatalogResult<Json<ProductDetailsEnvelope>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let details = ProductQueryUseCase::new(state.repo.clone())
        .details(id)
        .await?;

    Ok(Json(ProductDetailsEnvelope {
        success: true,
        data: details.into(),
    }))
}

/// PUT /api/products/delete-product/{id}
pub async fn delete_product<R, S, C>(
    State(state): State<ProductsAppState<R, S, C>>,
    ApiPath(id): ApiPath<i32>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    ProductQueryUseCase::new(state.repo.clone())
        .deactivate(id)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "Product {id} deactivated successfully."
    ))))
}
