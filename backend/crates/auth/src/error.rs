//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// No `Authorization` header
    #[error("Unauthorized: No token provided.")]
    MissingToken,

    /// Malformed header, bad signature, expired or incomplete claims
    #[error("Unauthorized: Invalid or expired token.")]
    InvalidToken,

    /// Authenticated, but the role is not on the route's allow-list
    #[error("Forbidden: You do not have the required permissions.")]
    Forbidden,

    /// Username or email already belongs to another user
    #[error("A user with that username or email already exists.")]
    UserTaken,

    /// No admin row matched
    #[error("Admin with id {0} not found.")]
    AdminNotFound(i32),

    /// No user row matched
    #[error("User with id {0} not found.")]
    UserNotFound(i32),

    /// Argon2 hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserTaken => ErrorKind::Conflict,
            AuthError::AdminNotFound(_) | AuthError::UserNotFound(_) => ErrorKind::NotFound,
            AuthError::PasswordHash(_)
            | AuthError::TokenSigning(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are reported with a generic message; the detail
    /// only goes to the log.
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            AppError::internal("An internal server error occurred.")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(msg) | AuthError::TokenSigning(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Role not permitted for route");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::InvalidInput(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::AdminNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            AuthError::InvalidCredentials.to_app_error().message(),
            "Invalid credentials."
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let err = AuthError::Internal("connection refused on 10.0.0.3".into());
        assert_eq!(err.to_app_error().message(), "An internal server error occurred.");
    }

    #[test]
    fn test_from_bad_request_app_error() {
        let err: AuthError = AppError::bad_request("Malformed JSON body").into();
        assert!(matches!(err, AuthError::InvalidInput(msg) if msg == "Malformed JSON body"));
    }
}
