//! Authentication API handlers
//!
//! Registration, login, password reset, and logout endpoints.
//!
//! Author: hephaex@gmail.com

use crate::auth::jwt::generate_token;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::service::AuthService;
use crate::error::AppError;
use crate::state::AppState;
use crate::validators::{validate_login, validate_password_reset, validate_registration};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Registration request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub secret_word: String,
}

/// Registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}

/// Login request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response with the bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

/// Password-reset request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub email: String,
    pub reset_password: String,
    pub secret_word: String,
}

/// Password-reset response
#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordResetResponse {
    pub id: i64,
    pub email: String,
    pub status: String,
}

/// Logout response
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
    pub status: String,
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 409, description = "Email already registered", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registration = validate_registration(
        &request.email,
        &request.username,
        &request.password,
        &request.secret_word,
    )?;

    let auth_service = AuthService::new(state.db_pool.clone());
    auth_service.register(&registration).await?;

    let response = RegisterResponse {
        message: "Successfully registered".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = crate::error::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_login(&request.email, &request.password)?;

    let auth_service = AuthService::new(state.db_pool.clone());
    let user = auth_service
        .verify_credentials(&email, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("failed login attempt for {email}");
            AppError::Unauthenticated("Invalid login details".to_string())
        })?;

    let access_token = generate_token(
        &state.config.auth.secret,
        state.config.auth.token_ttl_secs,
        user.id,
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {e}")))?;

    tracing::info!("login successful for user {}", user.id);

    Ok(Json(LoginResponse {
        message: "Successful login".to_string(),
        access_token,
    }))
}

/// Reset a password using the account's secret word
#[utoipa::path(
    put,
    path = "/api/v1/auth/password-reset",
    tag = "auth",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Password replaced", body = PasswordResetResponse),
        (status = 400, description = "Invalid input", body = crate::error::ApiError),
        (status = 404, description = "No matching account", body = crate::error::ApiError),
    )
)]
pub async fn password_reset_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reset = validate_password_reset(
        &request.email,
        &request.reset_password,
        &request.secret_word,
    )?;

    let auth_service = AuthService::new(state.db_pool.clone());
    let user = auth_service.reset_password(&reset).await?;

    Ok(Json(PasswordResetResponse {
        id: user.id,
        email: user.email,
        status: "success".to_string(),
    }))
}

/// Logout by blacklisting the presented token
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(state.db_pool.clone());
    auth_service.invalidate_token(&user.token).await?;

    tracing::info!("user {} logged out", user.id);

    Ok(Json(LogoutResponse {
        message: "You logged out successfully.".to_string(),
        status: "success".to_string(),
    }))
}
