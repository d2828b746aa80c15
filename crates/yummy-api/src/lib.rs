//! Yummy API - REST server for recipe categories and recipes
//!
//! Provides token-authenticated CRUD endpoints for users, categories, and
//! recipes, with pagination and substring search.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;
pub mod validators;

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register_handler,
        handlers::auth::login_handler,
        handlers::auth::password_reset_handler,
        handlers::auth::logout_handler,
        handlers::categories::create_category,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::categories::search_categories,
        handlers::recipes::create_recipe,
        handlers::recipes::list_recipes,
        handlers::recipes::get_recipe,
        handlers::recipes::update_recipe,
        handlers::recipes::delete_recipe,
        handlers::recipes::search_recipes,
        handlers::health::health_check,
    ),
    components(schemas(
        handlers::auth::RegisterRequest,
        handlers::auth::RegisterResponse,
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
        handlers::auth::PasswordResetRequest,
        handlers::auth::PasswordResetResponse,
        handlers::auth::LogoutResponse,
        handlers::categories::CategoryRequest,
        handlers::categories::DeleteCategoryResponse,
        handlers::recipes::RecipeRequest,
        handlers::recipes::DeleteRecipeResponse,
        handlers::health::HealthResponse,
        repository::categories::CategoryRow,
        repository::recipes::RecipeRow,
        error::ApiError,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, password reset, logout"),
        (name = "categories", description = "Recipe category management"),
        (name = "recipes", description = "Recipes within a category"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS layer from configured origins; permissive when none are set
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if parsed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(parsed))
    }
}

/// JSON body for unknown paths
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new("Resource not found")),
    )
}
