//! Access guard middleware for protected routes
//!
//! Extracts the bearer token from the Authorization header and rejects the
//! request unless the token is unrevoked, verifiable, unexpired, and bound
//! to an existing user. The resolved identity is placed in request
//! extensions for handlers.

use crate::auth::jwt::decode_token;
use crate::auth::service::AuthService;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated identity resolved by the guard
///
/// Handlers receive this via `Extension<AuthenticatedUser>`. The raw token
/// is carried along so logout can blacklist exactly what was presented.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub token: String,
}

/// Authentication middleware that requires a valid, unrevoked token
///
/// Check order: header present, not blacklisted, signature/expiry valid,
/// subject resolves to a user. Each failure short-circuits with 401 and a
/// JSON `{"message": ...}` body.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("User is not authenticated".to_string()))?;

    // Clients may send the raw token or the conventional Bearer form
    let token = auth_header
        .strip_prefix("Bearer ")
        .unwrap_or(auth_header)
        .trim()
        .to_string();

    if token.is_empty() {
        return Err(AppError::Unauthenticated(
            "User is not authenticated".to_string(),
        ));
    }

    let auth_service = AuthService::new(state.db_pool.clone());

    if auth_service.is_blacklisted(&token).await? {
        return Err(AppError::Unauthenticated(
            "User is already logged out, please login".to_string(),
        ));
    }

    let user_id = decode_token(&state.config.auth.secret, &token).map_err(|e| {
        tracing::warn!("rejected token: {e}");
        AppError::Unauthenticated(e.to_string())
    })?;

    let user = auth_service
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("User is not authenticated".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        email: user.email,
        username: user.username,
        token,
    });

    Ok(next.run(request).await)
}
