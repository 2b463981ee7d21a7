//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request body failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// A referenced category, product or variant does not exist
    #[error("{0}")]
    InvalidReference(String),

    /// Unique value already taken
    #[error("{0}")]
    Conflict(String),

    /// Target row does not exist
    #[error("{0}")]
    NotFound(String),

    /// An uploaded file is over the per-file ceiling
    #[error("{0}")]
    PayloadTooLarge(String),

    /// An uploaded file is not an image
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// The external image store failed or answered garbage
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// Some items of an image batch failed
    #[error("{failed} of {total} images could not be uploaded and associated.")]
    ImageBatch { failed: usize, total: usize },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidInput(_) | CatalogError::InvalidReference(_) => {
                ErrorKind::BadRequest
            }
            CatalogError::Conflict(_) => ErrorKind::Conflict,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::PayloadTooLarge(_) => ErrorKind::PayloadTooLarge,
            CatalogError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
            CatalogError::Upload(_)
            | CatalogError::ImageBatch { .. }
            | CatalogError::Database(_)
            | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// The batch summary carries no internals and is passed through; other
    /// server-side detail only goes to the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::ImageBatch { .. } => AppError::internal(self.to_string()),
            _ if self.kind().is_server_error() => {
                AppError::internal("An internal server error occurred.")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Upload(msg) | CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::ImageBatch { failed, total } => {
                tracing::error!(failed, total, "Image batch partially failed");
            }
            CatalogError::Conflict(msg) => {
                tracing::warn!(message = %msg, "Catalog conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => CatalogError::InvalidInput(err.message().to_string()),
            ErrorKind::PayloadTooLarge => CatalogError::PayloadTooLarge(err.message().to_string()),
            ErrorKind::UnsupportedMediaType => {
                CatalogError::UnsupportedMediaType(err.message().to_string())
            }
            _ => CatalogError::Internal(err.to_string()),
        }
    }
}
