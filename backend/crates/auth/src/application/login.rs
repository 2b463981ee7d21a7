//! Login Use Case
//!
//! Authenticates a staff user and issues a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::validation;

use crate::application::config::AuthConfig;
use crate::application::credentials::{verify_password, verify_unknown_user};
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    /// Username or email
    pub username_or_email: Option<String>,
    /// Password
    pub password: Option<String>,
}

/// Login output
pub struct LoginOutput {
    /// Signed bearer token
    pub token: String,
    /// The authenticated user
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (identifier, password) = match (input.username_or_email, input.password) {
            (Some(identifier), Some(password))
                if validation::is_non_empty_string(&identifier) && !password.is_empty() =>
            {
                (identifier, password)
            }
            _ => {
                return Err(AuthError::InvalidInput(
                    "Username/Email and password are required.".to_string(),
                ));
            }
        };

        // Unknown user and wrong password share one error, one log line and one hash cost
        let Some(credentials) = self.repo.find_credentials(&identifier).await? else {
            verify_unknown_user(
                ClearTextPassword::for_verification(password),
                self.config.password_pepper.clone(),
            )
            .await?;
            return Err(AuthError::InvalidCredentials);
        };

        let matched = verify_password(
            credentials.password_hash,
            ClearTextPassword::for_verification(password),
            self.config.password_pepper.clone(),
        )
        .await?;

        if !matched {
            return Err(AuthError::InvalidCredentials);
        }

        let user = credentials.user;
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutput { token, user })
    }
}
