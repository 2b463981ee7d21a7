//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("Malformed JSON: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use crate::db::ConstraintViolation;

        // ドメイン層で個別に解釈されなかった制約違反はここで汎用メッセージに落とす
        if let Some(violation) = ConstraintViolation::classify(&err) {
            let app_err = match violation {
                ConstraintViolation::Unique => AppError::conflict("Duplicate value"),
                ConstraintViolation::ForeignKey => {
                    AppError::bad_request("Referenced record does not exist")
                }
                ConstraintViolation::Check => AppError::bad_request("Check constraint violation"),
                ConstraintViolation::NotNull => AppError::bad_request("Required field is null"),
            };
            return app_err.with_source(err);
        }

        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database unavailable").with_source(err)
            }
            _ => AppError::internal("Internal server error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 全エンドポイント共通のエラーボディ
        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}
