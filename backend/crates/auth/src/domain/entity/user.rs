//! Staff user entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::user_role::UserRole;

/// A stored staff account, without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user together with the stored hash, only loaded for login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: HashedPassword,
}

/// Data needed to insert a user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: HashedPassword,
    pub role: UserRole,
}

/// Replacement profile for an existing user
///
/// `password_hash: None` keeps the stored hash.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub password_hash: Option<HashedPassword>,
}
