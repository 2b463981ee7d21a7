//! API DTOs (Data Transfer Objects)
//!
//! Request fields are `Option` so that a missing field becomes a specific
//! validation message instead of a generic body rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username or email
    pub username_or_email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

// ============================================================================
// Admin management
// ============================================================================

/// Add admin request
#[derive(Debug, Clone, Deserialize)]
pub struct AddAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Add admin response
#[derive(Debug, Clone, Serialize)]
pub struct AddAdminResponse {
    pub message: String,
    pub user_id: i32,
}

/// One row of the admin listing
#[derive(Debug, Clone, Serialize)]
pub struct AdminSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AdminSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Admin listing response
#[derive(Debug, Clone, Serialize)]
pub struct AdminListResponse {
    pub usernames: Vec<AdminSummary>,
}

/// Delete admin request
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteAdminRequest {
    pub id: Option<i32>,
}

/// Edit own super admin profile request
#[derive(Debug, Clone, Deserialize)]
pub struct EditSuperAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Shared
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
