//! Recipe management handlers
//!
//! Recipes are addressed through their owning category; every handler first
//! resolves the category against the authenticated owner and answers 404
//! when it is absent.
//!
//! Author: hephaex@gmail.com

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::handlers::{parse_pagination, PageQuery, SearchQuery};
use crate::repository::categories::CategoryRepository;
use crate::repository::recipes::{RecipeRepository, RecipeRow};
use crate::state::AppState;
use crate::validators::validate_recipe;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Recipe create/update request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecipeRequest {
    pub recipe_name: String,
    pub recipe_ingredients: String,
    pub recipe_methods: String,
}

/// Recipe delete response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteRecipeResponse {
    pub message: String,
}

/// Resolve the category for the authenticated owner or answer 404
async fn owned_category(
    state: &AppState,
    user: &AuthenticatedUser,
    category_id: i64,
) -> Result<(), AppError> {
    CategoryRepository::new(state.db_pool.clone())
        .find(user.id, category_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("Category".to_string()))
}

/// Add a recipe to a category
#[utoipa::path(
    post,
    path = "/api/v1/categories/{id}/recipes",
    tag = "recipes",
    params(("id" = i64, Path, description = "Category id")),
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeRow),
        (status = 400, description = "Invalid recipe fields", body = crate::error::ApiError),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
        (status = 409, description = "Recipe name exists", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(category_id): Path<i64>,
    Json(request): Json<RecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = validate_recipe(
        &request.recipe_name,
        &request.recipe_ingredients,
        &request.recipe_methods,
    )?;

    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    let created = repo.create(category_id, &recipe).await?;

    tracing::info!(
        "user {} created recipe {} in category {}",
        user.id,
        created.id,
        category_id
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// List a category's recipes, paginated
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/recipes",
    tag = "recipes",
    params(("id" = i64, Path, description = "Category id"), PageQuery),
    responses(
        (status = 200, description = "Recipe list", body = [RecipeRow]),
        (status = 400, description = "Invalid pagination", body = crate::error::ApiError),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(category_id): Path<i64>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = parse_pagination(params.page.as_deref(), params.limit.as_deref())?;

    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    let recipes = repo
        .list(category_id, pagination.page, pagination.limit)
        .await?;

    Ok(Json(recipes))
}

/// Fetch a single recipe by category + recipe id
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/recipes/{recipe_id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Category id"),
        ("recipe_id" = i64, Path, description = "Recipe id"),
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeRow),
        (status = 404, description = "Category or recipe not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((category_id, recipe_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    let recipe = repo
        .find(category_id, recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

    Ok(Json(recipe))
}

/// Rewrite a recipe's fields
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}/recipes/{recipe_id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Category id"),
        ("recipe_id" = i64, Path, description = "Recipe id"),
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeRow),
        (status = 400, description = "Invalid recipe fields", body = crate::error::ApiError),
        (status = 404, description = "Category or recipe not found", body = crate::error::ApiError),
        (status = 409, description = "Recipe name exists", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((category_id, recipe_id)): Path<(i64, i64)>,
    Json(request): Json<RecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = validate_recipe(
        &request.recipe_name,
        &request.recipe_ingredients,
        &request.recipe_methods,
    )?;

    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    let updated = repo.update(category_id, recipe_id, &recipe).await?;

    Ok(Json(updated))
}

/// Delete a recipe
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}/recipes/{recipe_id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Category id"),
        ("recipe_id" = i64, Path, description = "Recipe id"),
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = DeleteRecipeResponse),
        (status = 404, description = "Category or recipe not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((category_id, recipe_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    repo.delete(category_id, recipe_id).await?;

    tracing::info!(
        "user {} deleted recipe {} from category {}",
        user.id,
        recipe_id,
        category_id
    );

    Ok(Json(DeleteRecipeResponse {
        message: "Recipe deleted successfully".to_string(),
    }))
}

/// Search a category's recipes by name substring
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/recipes/search",
    tag = "recipes",
    params(("id" = i64, Path, description = "Category id"), SearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeRow]),
        (status = 400, description = "Missing or invalid query", body = crate::error::ApiError),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(category_id): Path<i64>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::ValidationFailed("No search item provided".to_string()))?;

    let pagination = parse_pagination(params.page.as_deref(), params.limit.as_deref())?;

    owned_category(&state, &user, category_id).await?;

    let repo = RecipeRepository::new(state.db_pool.clone());
    let recipes = repo
        .search(category_id, query, pagination.page, pagination.limit)
        .await?;

    Ok(Json(recipes))
}
