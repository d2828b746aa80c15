//! API Integration Tests
//!
//! Note: Tests marked with #[ignore] require a real database; set
//! TEST_DATABASE_URL and run: cargo test -- --ignored
//!
//! The rest exercise the router with a lazy pool and never touch the
//! database: validation, the access guard's missing-token path, health,
//! and routing fallbacks.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;
use yummy_api::{create_router, state::AppState};
use yummy_core::AppConfig;

/// Router over a lazy pool: requests that reach the database will fail,
/// so only DB-free paths are exercised against it.
fn test_app() -> Router {
    let mut config = AppConfig::default();
    config.auth.secret = "integration-test-secret".to_string();

    let db_pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("valid database url");

    create_router(Arc::new(AppState::new(config, db_pool)))
}

/// Helper to create a JSON request
fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Health and routing
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let response = test_app()
        .oneshot(json_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    let response = test_app()
        .oneshot(json_request("GET", "/api/v1/nope", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_wrong_verb_is_405() {
    let response = test_app()
        .oneshot(json_request("GET", "/api/v1/auth/register", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Registration validation (runs before any database access)
// =============================================================================

#[tokio::test]
async fn test_register_short_password_rejected() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "n@n.com",
                "username": "new",
                "password": "4324",
                "secret_word": "secret"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Password should be more than six characters");
}

#[tokio::test]
async fn test_register_empty_secret_word_rejected() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "test@test.com",
                "username": "New User",
                "password": "32eq5646436rw",
                "secret_word": ""
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Kindly provide a secret word");
}

#[tokio::test]
async fn test_register_invalid_email_rejected() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "not-an-email",
                "username": "New User",
                "password": "abcdefg",
                "secret_word": "secret"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "not-an-email is not a valid email");
}

#[tokio::test]
async fn test_register_missing_fields_rejected() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "",
                "username": "user",
                "password": "abcdef",
                "secret_word": "s"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Kindly provide all details");
}

#[tokio::test]
async fn test_login_missing_fields_rejected() {
    let response = test_app()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "", "password": "" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Kindly provide email and password");
}

// =============================================================================
// Access guard (missing token short-circuits before the database)
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_token() {
    for (method, uri) in [
        ("POST", "/api/v1/auth/logout"),
        ("GET", "/api/v1/categories"),
        ("POST", "/api/v1/categories"),
        ("GET", "/api/v1/categories/1"),
        ("GET", "/api/v1/categories/search?q=a"),
        ("GET", "/api/v1/categories/1/recipes"),
        ("GET", "/api/v1/categories/1/recipes/2"),
    ] {
        let response = test_app()
            .oneshot(json_request(method, uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");

        let body = response_json(response).await;
        assert_eq!(body["message"], "User is not authenticated", "{method} {uri}");
    }
}

#[tokio::test]
async fn test_blank_authorization_header_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/categories")
        .header("Authorization", "Bearer ")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Database-backed end-to-end flows
// =============================================================================

async fn db_app() -> Router {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");

    let mut config = AppConfig::default();
    config.auth.secret = "integration-test-secret".to_string();
    config.database.url = url.clone();

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("run migrations");

    create_router(Arc::new(AppState::new(config, db_pool)))
}

/// Unique email per run so repeated test invocations do not collide
fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}@example.com")
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"));

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn test_register_login_category_logout_flow() {
    let app = db_app().await;
    let email = unique_email("flow");

    // Register
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": "flow user",
                "password": "abcdef",
                "secret_word": "s"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Successfully registered");

    // Duplicate registration conflicts
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": "flow user",
                "password": "abcdef",
                "secret_word": "s"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "abcdef" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Successful login");
    let token = body["access_token"].as_str().unwrap().to_string();

    // Create a category
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/categories",
            &token,
            Some(json!({ "category_name": "Lunch" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["category_name"], "Lunch");
    let category_id = body["id"].as_i64().unwrap();

    // Fetch it back
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/v1/categories/{category_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["category_name"], "Lunch");

    // Normalized duplicate conflicts: "  lunch " collapses to "Lunch"
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/categories",
            &token,
            Some(json!({ "category_name": "  lunch " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Category name exists");

    // Logout, then the same token is rejected
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/v1/auth/logout", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");

    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/v1/categories/{category_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "User is already logged out, please login");
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn test_cascade_delete_removes_recipes() {
    let app = db_app().await;
    let email = unique_email("cascade");

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": "cascade user",
                "password": "abcdef",
                "secret_word": "s"
            })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "abcdef" })),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    // Category with one recipe
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/categories",
            &token,
            Some(json!({ "category_name": "Breakfast" })),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let category_id = body["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/categories/{category_id}/recipes"),
            &token,
            Some(json!({
                "recipe_name": "pancakes",
                "recipe_ingredients": "milk, flour",
                "recipe_methods": "cook in a pan till ready"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["recipe_name"], "Pancakes");
    let recipe_id = body["id"].as_i64().unwrap();

    // Delete the category; the recipe goes with it
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/v1/categories/{category_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/v1/categories/{category_id}/recipes/{recipe_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn test_password_reset_with_secret_word() {
    let app = db_app().await;
    let email = unique_email("reset");

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": "reset user",
                "password": "original_pw",
                "secret_word": "TOP SECRET"
            })),
        ))
        .await
        .unwrap();

    // Wrong secret word: no match, 404
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/auth/password-reset",
            Some(json!({
                "email": email,
                "reset_password": "brand_new_pw",
                "secret_word": "wrong"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Correct secret word succeeds
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/auth/password-reset",
            Some(json!({
                "email": email,
                "reset_password": "brand_new_pw",
                "secret_word": "TOP SECRET"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["email"], email);

    // Old password no longer works; the new one does
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "original_pw" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "brand_new_pw" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn test_recipe_crud_and_search() {
    let app = db_app().await;
    let email = unique_email("recipes");

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "username": "recipe user",
                "password": "abcdef",
                "secret_word": "s"
            })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": "abcdef" })),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/categories",
            &token,
            Some(json!({ "category_name": "Desserts" })),
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let category_id = body["id"].as_i64().unwrap();

    // Recipes under a missing category are 404
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/v1/categories/999999/recipes",
            &token,
            Some(json!({
                "recipe_name": "cake",
                "recipe_ingredients": "flour",
                "recipe_methods": "bake"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Create, then duplicate name conflicts
    let recipe = json!({
        "recipe_name": "chocolate cake",
        "recipe_ingredients": "flour, cocoa",
        "recipe_methods": "bake at 180C"
    });
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/categories/{category_id}/recipes"),
            &token,
            Some(recipe.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    let recipe_id = body["id"].as_i64().unwrap();
    assert_eq!(body["recipe_name"], "Chocolate Cake");

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/categories/{category_id}/recipes"),
            &token,
            Some(recipe),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Update
    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/v1/categories/{category_id}/recipes/{recipe_id}"),
            &token,
            Some(json!({
                "recipe_name": "carrot cake",
                "recipe_ingredients": "flour, carrots",
                "recipe_methods": "bake at 170C"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["recipe_name"], "Carrot Cake");

    // Search matches the substring, case-insensitively
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/v1/categories/{category_id}/recipes/search?q=carrot"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Search without a term is a 400
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/v1/categories/{category_id}/recipes/search"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete, then it is gone
    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/v1/categories/{category_id}/recipes/{recipe_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/v1/categories/{category_id}/recipes/{recipe_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
