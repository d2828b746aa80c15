//! Recipe persistence
//!
//! Recipes always belong to a category; handlers resolve category ownership
//! before calling in, so queries here scope by category id alone. Recipe
//! names are normalized before storage, making per-category uniqueness a
//! plain equality check backed by the unique index.

use crate::error::{is_unique_violation, AppError};
use crate::validators::NewRecipe;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

/// Recipe as stored and as returned by the API
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct RecipeRow {
    pub id: i64,
    pub recipe_name: String,
    pub recipe_ingredients: String,
    pub recipe_methods: String,
    pub category_id: i64,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

const RECIPE_COLUMNS: &str =
    "id, recipe_name, recipe_ingredients, recipe_methods, category_id, date_created, date_modified";

/// Repository for the recipes inside a category
#[derive(Clone)]
pub struct RecipeRepository {
    db_pool: PgPool,
}

impl RecipeRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Add a recipe to a category; duplicate names yield `Conflict`
    pub async fn create(&self, category_id: i64, recipe: &NewRecipe) -> Result<RecipeRow, AppError> {
        if self
            .name_exists(category_id, &recipe.recipe_name, None)
            .await?
        {
            return Err(AppError::Conflict("Recipe name exists".to_string()));
        }

        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "INSERT INTO recipes (recipe_name, recipe_ingredients, recipe_methods, category_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(&recipe.recipe_name)
        .bind(&recipe.recipe_ingredients)
        .bind(&recipe.recipe_methods)
        .bind(category_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Recipe name exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(row)
    }

    /// List a category's recipes, oldest first, one page at a time
    pub async fn list(
        &self,
        category_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<Vec<RecipeRow>, AppError> {
        let recipes = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE category_id = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(category_id)
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(recipes)
    }

    /// Fetch one recipe by category + recipe id pair
    pub async fn find(
        &self,
        category_id: i64,
        recipe_id: i64,
    ) -> Result<Option<RecipeRow>, AppError> {
        let recipe = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND category_id = $2"
        ))
        .bind(recipe_id)
        .bind(category_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(recipe)
    }

    /// Rewrite a recipe's fields, re-checking name uniqueness in the category
    pub async fn update(
        &self,
        category_id: i64,
        recipe_id: i64,
        recipe: &NewRecipe,
    ) -> Result<RecipeRow, AppError> {
        if self.find(category_id, recipe_id).await?.is_none() {
            return Err(AppError::NotFound("Recipe".to_string()));
        }

        if self
            .name_exists(category_id, &recipe.recipe_name, Some(recipe_id))
            .await?
        {
            return Err(AppError::Conflict("Recipe name exists".to_string()));
        }

        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "UPDATE recipes SET recipe_name = $1, recipe_ingredients = $2, \
             recipe_methods = $3, date_modified = now() \
             WHERE id = $4 AND category_id = $5 \
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(&recipe.recipe_name)
        .bind(&recipe.recipe_ingredients)
        .bind(&recipe.recipe_methods)
        .bind(recipe_id)
        .bind(category_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Recipe name exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(row)
    }

    /// Delete one recipe by category + recipe id pair
    pub async fn delete(&self, category_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let deleted = sqlx::query_scalar::<_, i64>(
            "DELETE FROM recipes WHERE id = $1 AND category_id = $2 RETURNING id",
        )
        .bind(recipe_id)
        .bind(category_id)
        .fetch_optional(&self.db_pool)
        .await?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("Recipe".to_string())),
        }
    }

    /// Case-insensitive substring search over a category's recipe names
    pub async fn search(
        &self,
        category_id: i64,
        query: &str,
        page: i64,
        limit: i64,
    ) -> Result<Vec<RecipeRow>, AppError> {
        let recipes = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE category_id = $1 AND recipe_name ILIKE '%' || $2 || '%' \
             ORDER BY id LIMIT $3 OFFSET $4"
        ))
        .bind(category_id)
        .bind(query)
        .bind(limit)
        .bind((page - 1) * limit)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(recipes)
    }

    /// Does the category already hold a recipe with this name?
    async fn name_exists(
        &self,
        category_id: i64,
        recipe_name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recipes \
             WHERE category_id = $1 AND recipe_name = $2 AND ($3::BIGINT IS NULL OR id <> $3)",
        )
        .bind(category_id)
        .bind(recipe_name)
        .bind(exclude_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(count > 0)
    }
}
