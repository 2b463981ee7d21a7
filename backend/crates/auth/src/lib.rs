//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Staff users, roles, repository traits
//! - `application/` - Use cases, token service, hashing helpers
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, role gate
//!
//! ## Features
//! - Login with username or email, answered with a signed bearer token
//! - Role gate middleware (viewer, admin, super_admin) reusable by other crates
//! - Admin management reserved to super admins
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - HS256 tokens with a fixed lifetime, verified on every gated request
//! - Unknown user and wrong password are indistinguishable to the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Identity, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::{users_router, users_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
