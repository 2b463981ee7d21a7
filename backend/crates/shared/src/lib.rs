//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed numeric identifiers for catalog and user rows
//! - Store constraint classification (feature `sqlx`)
//! - JSON extraction with uniform error bodies (feature `axum`)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "sqlx")]
pub mod db;
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
