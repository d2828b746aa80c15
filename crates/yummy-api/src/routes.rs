//! API route definitions
//!
//! Author: hephaex@gmail.com

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, categories, recipes};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Create API v1 routes
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/password-reset", put(auth::password_reset_handler));

    // Protected routes (access guard required)
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout_handler))
        // Category endpoints
        .route(
            "/categories",
            post(categories::create_category).get(categories::list_categories),
        )
        .route("/categories/search", get(categories::search_categories))
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Recipe endpoints
        .route(
            "/categories/:id/recipes",
            post(recipes::create_recipe).get(recipes::list_recipes),
        )
        .route(
            "/categories/:id/recipes/search",
            get(recipes::search_recipes),
        )
        .route(
            "/categories/:id/recipes/:recipe_id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    // Combine routes
    Router::new().merge(public_routes).merge(protected_routes)
}
