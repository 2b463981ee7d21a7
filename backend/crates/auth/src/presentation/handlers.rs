//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::ApiJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{Identity, TokenService};
use crate::application::{
    AddAdminInput, AddAdminUseCase, DeleteAdminUseCase, EditSuperAdminInput,
    EditSuperAdminUseCase, ListAdminsUseCase, LoginInput, LoginUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AddAdminRequest, AddAdminResponse, AdminListResponse, AdminSummary, DeleteAdminRequest,
    EditSuperAdminRequest, LoginRequest, LoginResponse, MessageResponse,
};

/// Shared state for user handlers
#[derive(Clone)]
pub struct UsersAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/users/loginAdminAuth
pub async fn login<R>(
    State(state): State<UsersAppState<R>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username_or_email: req.username_or_email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful.".to_string(),
        token: output.token,
    }))
}

// ============================================================================
// Admin management (super_admin)
// ============================================================================

/// POST /api/users/add-admin
pub async fn add_admin<R>(
    State(state): State<UsersAppState<R>>,
    ApiJson(req): ApiJson<AddAdminRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddAdminUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(AddAdminInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddAdminResponse {
            message: "Admin created successfully.".to_string(),
            user_id: output.user_id.value(),
        }),
    ))
}

/// GET /api/users/getAdminsUsername
pub async fn list_admins<R>(
    State(state): State<UsersAppState<R>>,
) -> AuthResult<Json<AdminListResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let admins = ListAdminsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(AdminListResponse {
        usernames: admins.into_iter().map(AdminSummary::from).collect(),
    }))
}

/// DELETE /api/users/deleteAdmin
pub async fn delete_admin<R>(
    State(state): State<UsersAppState<R>>,
    ApiJson(req): ApiJson<DeleteAdminRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    DeleteAdminUseCase::new(state.repo.clone())
        .execute(req.id)
        .await?;

    Ok(Json(MessageResponse::new("Admin deleted successfully.")))
}

/// PUT /api/users/edit-super-admin
pub async fn edit_super_admin<R>(
    State(state): State<UsersAppState<R>>,
    Extension(identity): Extension<Identity>,
    ApiJson(req): ApiJson<EditSuperAdminRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = EditSuperAdminUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &identity,
            EditSuperAdminInput {
                username: req.username,
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Profile updated successfully.")))
}
