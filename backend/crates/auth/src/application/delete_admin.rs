//! Delete Admin Use Case
//!
//! Only rows holding the `admin` role can be removed through this path.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Delete admin use case
pub struct DeleteAdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Option<i32>) -> AuthResult<()> {
        let id = id
            .map(UserId::new)
            .filter(UserId::is_positive)
            .ok_or_else(|| AuthError::InvalidInput("A valid admin id is required.".to_string()))?;

        if !self.repo.delete_with_role(id, UserRole::Admin).await? {
            return Err(AuthError::AdminNotFound(id.value()));
        }

        tracing::info!(user_id = %id, "Admin deleted");
        Ok(())
    }
}
