//! List Admins Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// List admins use case
pub struct ListAdminsUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ListAdminsUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AuthResult<Vec<User>> {
        let admins = self.repo.list_by_role(UserRole::Admin).await?;
        tracing::debug!(count = admins.len(), "Listed admins");
        Ok(admins)
    }
}
