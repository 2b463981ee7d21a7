//! Role Gate Middleware
//!
//! `Authorization: Bearer <token>` -> verified [`Identity`] -> allow-list check.
//! On success the identity is stored as a request extension so handlers can
//! take `Extension<Identity>`.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use axum::routing::MethodRouter;

use crate::application::token::{Identity, TokenService};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Routes reserved to super admins
pub const SUPER_ADMIN_ONLY: &[UserRole] = &[UserRole::SuperAdmin];

/// Routes open to any catalog staff member
pub const STAFF: &[UserRole] = &[UserRole::SuperAdmin, UserRole::Admin];

/// Middleware state: token verifier plus the route's allow-list
#[derive(Clone)]
pub struct RoleGate {
    tokens: Arc<TokenService>,
    allowed: &'static [UserRole],
}

impl RoleGate {
    pub fn new(tokens: Arc<TokenService>, allowed: &'static [UserRole]) -> Self {
        Self { tokens, allowed }
    }

    /// Run the full gate against request headers
    pub fn authorize(&self, headers: &HeaderMap) -> AuthResult<Identity> {
        let token = bearer_token(headers)?;
        let identity = self.tokens.verify(token)?;

        if !self.allowed.contains(&identity.role) {
            tracing::warn!(
                user_id = %identity.user_id,
                role = %identity.role,
                "Access denied for role"
            );
            return Err(AuthError::Forbidden);
        }

        Ok(identity)
    }
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::InvalidToken)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

/// Middleware that requires a valid token whose role is on the allow-list
pub async fn require_roles(
    State(gate): State<RoleGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = gate.authorize(req.headers())?;

    tracing::debug!(user_id = %identity.user_id, role = %identity.role, "Request authorized");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Wrap a single route in the role gate
pub fn guard<S>(
    route: MethodRouter<S>,
    tokens: &Arc<TokenService>,
    allowed: &'static [UserRole],
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(
        RoleGate::new(tokens.clone(), allowed),
        require_roles,
    ))
}
