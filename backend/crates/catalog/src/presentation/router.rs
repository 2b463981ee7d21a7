//! Catalog Routers

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use auth::TokenService;
use auth::presentation::middleware::{STAFF, SUPER_ADMIN_ONLY, guard};

use crate::application::config::CatalogConfig;
use crate::application::image_batch::{ImageCompensator, RetainUploads};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::infra::cloudinary::CloudinaryImageStore;
use crate::infra::postgres::{PgCategoryRepository, PgProductRepository};
use crate::presentation::handlers::{self, CategoriesAppState, ProductsAppState};

/// Create the categories router with PostgreSQL repository
pub fn categories_router(repo: PgCategoryRepository, tokens: Arc<TokenService>) -> Router {
    categories_router_generic(repo, tokens)
}

/// Create a generic categories router for any repository implementation
pub fn categories_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: CategoryRepository + Clone + Send + Sync + 'static,
{
    let state = CategoriesAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/get-categories",
            guard(get(handlers::list_categories::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .route(
            "/get-categories-idname",
            guard(get(handlers::list_category_names::<R>), &tokens, STAFF),
        )
        .route(
            "/add-category",
            guard(post(handlers::add_category::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .route(
            "/delete-category",
            guard(delete(handlers::delete_category::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .with_state(state)
}

/// Create the products router with PostgreSQL, Cloudinary and retained uploads on failure
pub fn products_router(
    repo: PgProductRepository,
    images: CloudinaryImageStore,
    config: CatalogConfig,
    tokens: Arc<TokenService>,
) -> Router {
    products_router_generic(repo, images, RetainUploads, config, tokens)
}

/// Create a generic products router
pub fn products_router_generic<R, S, C>(
    repo: R,
    images: S,
    compensator: C,
    config: CatalogConfig,
    tokens: Arc<TokenService>,
) -> Router
where
    R: ProductRepository + Clone + Send + Sync + 'static,
    S: ImageStore + Clone + Send + Sync + 'static,
    C: ImageCompensator + Clone + Send + Sync + 'static,
{
    let body_limit = DefaultBodyLimit::max(config.max_request_bytes());
    let state = ProductsAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
        compensator: Arc::new(compensator),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/add-product",
            guard(post(handlers::add_product::<R, S, C>), &tokens, STAFF),
        )
        .route(
            "/add-product-variant",
            guard(post(handlers::add_variant::<R, S, C>), &tokens, STAFF),
        )
        .route(
            "/add-attribute",
            guard(post(handlers::add_attribute::<R, S, C>), &tokens, STAFF),
        )
        .route(
            "/add-product-images",
            guard(
                post(handlers::add_images::<R, S, C>).layer(body_limit),
                &tokens,
                STAFF,
            ),
        )
        .route("/get-products", get(handlers::list_previews::<R, S, C>))
        .route("/get-products/{id}", get(handlers::product_details::<R, S, C>))
        .route(
            "/delete-product/{id}",
            guard(put(handlers::delete_product::<R, S, C>), &tokens, STAFF),
        )
        .with_state(state)
}
