//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Categories, products, variants, attributes, images, repository traits
//! - `application/` - Use cases and the image batch saga
//! - `infra/` - PostgreSQL repositories and the Cloudinary client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Product workflow
//! A product is assembled over several requests (parent, variants,
//! attributes, images). Every stage commits on its own; there is no
//! transaction spanning stages.
//!
//! ## Access
//! Routes are gated with `auth`'s role gate; reads of the storefront
//! preview and product details are public.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::cloudinary::{CloudinaryConfig, CloudinaryImageStore};
pub use infra::postgres::{PgCategoryRepository, PgProductRepository};
pub use presentation::router::{
    categories_router, categories_router_generic, products_router, products_router_generic,
};
