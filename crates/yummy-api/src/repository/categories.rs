//! Category persistence
//!
//! Category names arrive normalized (title-cased, whitespace-collapsed),
//! so uniqueness per owner is plain equality on the stored value, enforced
//! both by a pre-check and the unique index.

use crate::error::{is_unique_violation, AppError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// Category as stored and as returned by the API
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CategoryRow {
    pub id: i64,
    pub category_name: String,
    pub created_by: i64,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

const CATEGORY_COLUMNS: &str = "id, category_name, created_by, date_created, date_modified";

/// Repository for a user's recipe categories
#[derive(Clone)]
pub struct CategoryRepository {
    db_pool: PgPool,
}

impl CategoryRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a category for a user; duplicate names yield `Conflict`
    pub async fn create(&self, owner_id: i64, category_name: &str) -> Result<CategoryRow, AppError> {
        if self.name_exists(owner_id, category_name, None).await? {
            return Err(AppError::Conflict("Category name exists".to_string()));
        }

        let category = sqlx::query_as::<_, CategoryRow>(&format!(
            "INSERT INTO categories (category_name, created_by) VALUES ($1, $2) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category_name)
        .bind(owner_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Category name exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(category)
    }

    /// List a user's categories, oldest first, one page at a time
    pub async fn list(
        &self,
        owner_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Vec<CategoryRow>, AppError> {
        let categories = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE created_by = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id)
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(categories)
    }

    /// Fetch one of a user's categories by id
    pub async fn find(&self, owner_id: i64, id: i64) -> Result<Option<CategoryRow>, AppError> {
        let category = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 AND created_by = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(category)
    }

    /// Rename a category, re-checking uniqueness against the user's others
    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        category_name: &str,
    ) -> Result<CategoryRow, AppError> {
        if self.find(owner_id, id).await?.is_none() {
            return Err(AppError::NotFound("Category".to_string()));
        }

        if self.name_exists(owner_id, category_name, Some(id)).await? {
            return Err(AppError::Conflict("Category name exists".to_string()));
        }

        let category = sqlx::query_as::<_, CategoryRow>(&format!(
            "UPDATE categories SET category_name = $1, date_modified = now() \
             WHERE id = $2 AND created_by = $3 \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category_name)
        .bind(id)
        .bind(owner_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Category name exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(category)
    }

    /// Delete a category; owned recipes go with it via the cascade
    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, i64>(
            "DELETE FROM categories WHERE id = $1 AND created_by = $2 RETURNING id",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.db_pool)
        .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Category".to_string())),
        }
    }

    /// Case-insensitive substring search over a user's category names
    pub async fn search(
        &self,
        owner_id: i64,
        query: &str,
        page: i64,
        limit: i64,
    ) -> Result<Vec<CategoryRow>, AppError> {
        let categories = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE created_by = $1 AND category_name ILIKE '%' || $2 || '%' \
             ORDER BY id LIMIT $3 OFFSET $4"
        ))
        .bind(owner_id)
        .bind(query)
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(categories)
    }

    /// Does the user already have a category with this name?
    ///
    /// `exclude_id` lets an update skip the row being renamed.
    async fn name_exists(
        &self,
        owner_id: i64,
        category_name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories \
             WHERE created_by = $1 AND category_name = $2 AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(owner_id)
        .bind(category_name)
        .bind(exclude_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(count > 0)
    }
}
