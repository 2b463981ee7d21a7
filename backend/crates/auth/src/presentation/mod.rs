//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::UsersAppState;
pub use middleware::{RoleGate, STAFF, SUPER_ADMIN_ONLY, guard, require_roles};
pub use router::{users_router, users_router_generic};
