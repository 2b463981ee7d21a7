//! Add Admin Use Case
//!
//! Creates a new `admin` account. Callers are gated to `super_admin`.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use platform::validation;

use crate::application::config::AuthConfig;
use crate::application::credentials::hash_password;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Shown for every password that fails the composition policy
pub const PASSWORD_POLICY_MESSAGE: &str = "Password must be at least 8 characters long and contain \
an uppercase letter, a digit and a special symbol.";

/// Roles this operation may assign
const CREATABLE_ROLES: [UserRole; 1] = [UserRole::Admin];

/// Add admin input
pub struct AddAdminInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Add admin output
pub struct AddAdminOutput {
    pub user_id: UserId,
}

/// Add admin use case
pub struct AddAdminUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AddAdminUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: AddAdminInput) -> AuthResult<AddAdminOutput> {
        let (Some(username), Some(email), Some(password), Some(role)) =
            (input.username, input.email, input.password, input.role)
        else {
            return Err(missing_fields());
        };
        // Stored exactly as compared
        let username = username.trim().to_string();
        let email = email.trim().to_string();
        if username.is_empty() || email.is_empty() || password.is_empty() || role.is_empty() {
            return Err(missing_fields());
        }

        if !validation::is_non_empty_string(&username) {
            return Err(AuthError::InvalidInput(
                "Invalid username: it must not be blank.".to_string(),
            ));
        }
        if !validation::is_valid_email(&email) {
            return Err(AuthError::InvalidInput(format!("Invalid email: \"{email}\".")));
        }
        let password = ClearTextPassword::new(password)
            .map_err(|_| AuthError::InvalidInput(PASSWORD_POLICY_MESSAGE.to_string()))?;

        // Exact match: the role literal is part of the request contract
        let role = CREATABLE_ROLES
            .into_iter()
            .find(|allowed| allowed.code() == role)
            .ok_or_else(|| {
                tracing::debug!(role = %role, "Rejected admin creation with invalid role");
                AuthError::InvalidInput("Invalid role. Allowed roles: admin.".to_string())
            })?;

        if self
            .repo
            .exists_by_username_or_email(&username, &email, None)
            .await?
        {
            return Err(AuthError::UserTaken);
        }

        let password_hash = hash_password(password, self.config.password_pepper.clone()).await?;

        let user_id = self
            .repo
            .create(&NewUser {
                username,
                email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user_id, role = %role, "Admin created");

        Ok(AddAdminOutput { user_id })
    }
}

fn missing_fields() -> AuthError {
    AuthError::InvalidInput("username, email, password and role are required.".to_string())
}
