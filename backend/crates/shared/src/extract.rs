//! Request extractors with uniform error bodies
//!
//! axum 標準の `Json` / `Path` は失敗時にプレーンテキストを返すため、
//! ここでラップして `AppError`（`{"error": ...}`）に揃えます。

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// JSON ボディ抽出（失敗時は 400）
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_app_error(rejection)),
        }
    }
}

fn json_rejection_to_app_error(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        _ => format!("Malformed JSON body: {}", rejection.body_text()),
    };
    AppError::bad_request(message).with_source(rejection)
}

/// パスパラメータ抽出（失敗時は 400）
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection_to_app_error(rejection)),
        }
    }
}

fn path_rejection_to_app_error(rejection: PathRejection) -> AppError {
    AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
        .with_source(rejection)
}
