//! Infrastructure Layer
//!
//! Database implementations and the external image store client.

pub mod cloudinary;
pub mod postgres;

pub use cloudinary::{CloudinaryConfig, CloudinaryImageStore};
pub use postgres::{PgCategoryRepository, PgProductRepository};
