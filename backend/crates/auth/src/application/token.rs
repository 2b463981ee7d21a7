//! Bearer Token Service
//!
//! Issues and verifies HS256 tokens carrying `{id, username, email, role}`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims embedded in every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller, attached to the request by the role gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    /// Build from verified claims
    ///
    /// A role code outside the known set can never pass an allow-list,
    /// so it is reported as `Forbidden` rather than as a bad token.
    pub fn from_claims(claims: Claims) -> AuthResult<Self> {
        let role = UserRole::from_code(&claims.role).ok_or_else(|| {
            tracing::warn!(user_id = claims.id, role = %claims.role, "Token carries unknown role");
            AuthError::Forbidden
        })?;

        Ok(Self {
            user_id: UserId::new(claims.id),
            username: claims.username,
            email: claims.email,
            role,
        })
    }
}

/// Signs and verifies bearer tokens with one shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&config.jwt_secret),
            decoding: DecodingKey::from_secret(&config.jwt_secret),
            validation: Validation::new(Algorithm::HS256),
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a token for `user`, valid from now for the configured TTL
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            id: user.id.value(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.code().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))
    }

    /// Verify signature and expiry, then map the claims to an [`Identity`]
    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        Identity::from_claims(data.claims)
    }
}
