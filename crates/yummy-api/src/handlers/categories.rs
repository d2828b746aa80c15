//! Category management handlers
//!
//! All endpoints require the access guard; every operation is scoped to the
//! authenticated owner.
//!
//! Author: hephaex@gmail.com

use crate::auth::middleware::AuthenticatedUser;
use crate::error::AppError;
use crate::handlers::{parse_pagination, PageQuery, SearchQuery};
use crate::repository::categories::{CategoryRepository, CategoryRow};
use crate::state::AppState;
use crate::validators::validate_category_name;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Category create/update request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub category_name: String,
}

/// Category delete response
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteCategoryResponse {
    pub message: String,
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryRow),
        (status = 400, description = "Invalid category name", body = crate::error::ApiError),
        (status = 409, description = "Category name exists", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category_name = validate_category_name(&request.category_name)?;

    let repo = CategoryRepository::new(state.db_pool.clone());
    let category = repo.create(user.id, &category_name).await?;

    tracing::info!("user {} created category {}", user.id, category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

/// List the caller's categories, paginated
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    params(PageQuery),
    responses(
        (status = 200, description = "Category list", body = [CategoryRow]),
        (status = 400, description = "Invalid pagination", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = parse_pagination(params.page.as_deref(), params.limit.as_deref())?;

    let repo = CategoryRepository::new(state.db_pool.clone());
    let categories = repo
        .list(user.id, pagination.page, pagination.limit)
        .await?;

    Ok(Json(categories))
}

/// Fetch a single category by id
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category details", body = CategoryRow),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CategoryRepository::new(state.db_pool.clone());
    let category = repo
        .find(user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

    Ok(Json(category))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryRow),
        (status = 400, description = "Invalid category name", body = crate::error::ApiError),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
        (status = 409, description = "Category name exists", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category_name = validate_category_name(&request.category_name)?;

    let repo = CategoryRepository::new(state.db_pool.clone());
    let category = repo.update(user.id, id, &category_name).await?;

    Ok(Json(category))
}

/// Delete a category and, by cascade, its recipes
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = DeleteCategoryResponse),
        (status = 404, description = "Category not found", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CategoryRepository::new(state.db_pool.clone());
    repo.delete(user.id, id).await?;

    tracing::info!("user {} deleted category {}", user.id, id);

    Ok(Json(DeleteCategoryResponse {
        message: "Category deleted successfully".to_string(),
    }))
}

/// Search the caller's categories by name substring
#[utoipa::path(
    get,
    path = "/api/v1/categories/search",
    tag = "categories",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching categories", body = [CategoryRow]),
        (status = 400, description = "Missing or invalid query", body = crate::error::ApiError),
    ),
    security(("bearer_auth" = []))
)]
pub async fn search_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::ValidationFailed("No search item provided".to_string()))?;

    let pagination = parse_pagination(params.page.as_deref(), params.limit.as_deref())?;

    let repo = CategoryRepository::new(state.db_pool.clone());
    let categories = repo
        .search(user.id, query, pagination.page, pagination.limit)
        .await?;

    Ok(Json(categories))
}
