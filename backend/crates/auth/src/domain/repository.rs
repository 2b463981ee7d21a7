//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, ProfileUpdate, User, UserCredentials};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a user whose username or email equals `identifier`
    async fn find_credentials(&self, identifier: &str) -> AuthResult<Option<UserCredentials>>;

    /// Check whether `username` or `email` is taken, ignoring `exclude`
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        exclude: Option<UserId>,
    ) -> AuthResult<bool>;

    /// Insert a user; unique violations surface as `AuthError::UserTaken`
    async fn create(&self, user: &NewUser) -> AuthResult<UserId>;

    /// List every user holding `role`
    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>>;

    /// Delete the user only if it holds `role`; returns whether a row went away
    async fn delete_with_role(&self, id: UserId, role: UserRole) -> AuthResult<bool>;

    /// Overwrite username/email (and optionally the hash); returns whether a row matched
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> AuthResult<bool>;
}
