//! Presentation Layer
//!
//! HTTP handlers, DTOs, multipart reading and routers.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod upload;

pub use handlers::{CategoriesAppState, ProductsAppState};
pub use router::{
    categories_router, categories_router_generic, products_router, products_router_generic,
};
