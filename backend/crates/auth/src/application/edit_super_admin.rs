//! Edit Super Admin Use Case
//!
//! Lets the calling super admin replace their own username, email and,
//! optionally, password.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::validation;

use crate::application::add_admin::PASSWORD_POLICY_MESSAGE;
use crate::application::config::AuthConfig;
use crate::application::credentials::hash_password;
use crate::application::token::Identity;
use crate::domain::entity::user::ProfileUpdate;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Edit super admin input
pub struct EditSuperAdminInput {
    pub username: Option<String>,
    pub email: Option<String>,
    /// `None` or empty keeps the current password
    pub password: Option<String>,
}

/// Edit super admin use case
pub struct EditSuperAdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> EditSuperAdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, caller: &Identity, input: EditSuperAdminInput) -> AuthResult<()> {
        let username = input.username.unwrap_or_default().trim().to_string();
        if !validation::is_non_empty_string(&username) {
            return Err(AuthError::InvalidInput(
                "Invalid username: it must not be blank.".to_string(),
            ));
        }

        let email = input.email.unwrap_or_default().trim().to_string();
        if !validation::is_valid_email(&email) {
            return Err(AuthError::InvalidInput(format!("Invalid email: \"{email}\".")));
        }

        let new_password = match input.password.filter(|p| !p.is_empty()) {
            Some(raw) => Some(
                ClearTextPassword::new(raw)
                    .map_err(|_| AuthError::InvalidInput(PASSWORD_POLICY_MESSAGE.to_string()))?,
            ),
            None => {
                tracing::debug!(user_id = %caller.user_id, "No new password supplied, keeping current one");
                None
            }
        };

        if self
            .repo
            .exists_by_username_or_email(&username, &email, Some(caller.user_id))
            .await?
        {
            return Err(AuthError::UserTaken);
        }

        let password_hash = match new_password {
            Some(password) => Some(hash_password(password, self.config.password_pepper.clone()).await?),
            None => None,
        };

        let updated = self
            .repo
            .update_profile(
                caller.user_id,
                &ProfileUpdate {
                    username,
                    email,
                    password_hash,
                },
            )
            .await?;

        if !updated {
            return Err(AuthError::UserNotFound(caller.user_id.value()));
        }

        tracing::info!(user_id = %caller.user_id, "Super admin profile updated");
        Ok(())
    }
}
