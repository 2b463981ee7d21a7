//! Users Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, UsersAppState};
use crate::presentation::middleware::{SUPER_ADMIN_ONLY, guard};

/// Create the users router with PostgreSQL repository
pub fn users_router(
    repo: PgUserRepository,
    config: AuthConfig,
    tokens: Arc<TokenService>,
) -> Router {
    users_router_generic(repo, config, tokens)
}

/// Create a generic users router for any repository implementation
pub fn users_router_generic<R>(repo: R, config: AuthConfig, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    Router::new()
        .route("/loginAdminAuth", post(handlers::login::<R>))
        .route(
            "/add-admin",
            guard(post(handlers::add_admin::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .route(
            "/getAdminsUsername",
            guard(get(handlers::list_admins::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .route(
            "/deleteAdmin",
            guard(delete(handlers::delete_admin::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .route(
            "/edit-super-admin",
            guard(put(handlers::edit_super_admin::<R>), &tokens, SUPER_ADMIN_ONLY),
        )
        .with_state(state)
}
