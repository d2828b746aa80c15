//! Authentication service layer
//!
//! Credential store and session blacklist over PostgreSQL. Inputs arrive
//! already normalized and validated; this layer owns hashing, persistence,
//! and the uniqueness/lookup semantics.

use crate::auth::password::{hash_secret, verify_secret};
use crate::error::{is_unique_violation, AppError};
use crate::validators::{NewRegistration, PasswordReset};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// User record as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub secret_word_hash: String,
    pub created_at: DateTime<Utc>,
}

const USER_COLUMNS: &str = "id, email, username, password_hash, secret_word_hash, created_at";

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db_pool: PgPool,
}

impl AuthService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Register a new user
    ///
    /// Fails with `Conflict` when the normalized email is already taken.
    /// The pre-check keeps the common case friendly; a concurrent duplicate
    /// falls through to the unique index and maps to the same error.
    pub async fn register(&self, registration: &NewRegistration) -> Result<UserRecord, AppError> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&registration.email)
            .fetch_one(&self.db_pool)
            .await?;

        if existing > 0 {
            return Err(AppError::Conflict("User exists, kindly login".to_string()));
        }

        let password_hash = hash_secret(&registration.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;
        let secret_word_hash = hash_secret(&registration.secret_word)
            .map_err(|e| AppError::Internal(format!("Failed to hash secret word: {e}")))?;

        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (email, username, password_hash, secret_word_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&registration.email)
        .bind(&registration.username)
        .bind(&password_hash)
        .bind(&secret_word_hash)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User exists, kindly login".to_string())
            } else {
                e.into()
            }
        })?;

        tracing::info!("registered user {} ({})", user.email, user.id);
        Ok(user)
    }

    /// Verify login credentials
    ///
    /// Returns the user only when the email is known and the password hash
    /// matches; `None` covers both failure cases so callers cannot tell
    /// them apart.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        let valid = verify_secret(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {e}")))?;

        Ok(valid.then_some(user))
    }

    /// Replace a user's password after checking the secret word
    ///
    /// An unknown email and a non-matching secret word both surface as
    /// `NotFound`: the email+secret pair identifies the account.
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<UserRecord, AppError> {
        let user = self
            .find_by_email(&reset.email)
            .await?
            .ok_or_else(|| AppError::NotFound("Email".to_string()))?;

        let secret_matches = verify_secret(&reset.secret_word, &user.secret_word_hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify secret word: {e}")))?;

        if !secret_matches {
            return Err(AppError::NotFound("Matching account".to_string()));
        }

        let password_hash = hash_secret(&reset.reset_password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&password_hash)
            .bind(user.id)
            .execute(&self.db_pool)
            .await?;

        tracing::info!("password reset for user {}", user.id);
        Ok(user)
    }

    /// Fetch a user by normalized email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Fetch a user by id (used by the access guard)
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    /// Record a token as invalidated (logout)
    ///
    /// Append-only; inserting a token that is already blacklisted is a no-op.
    pub async fn invalidate_token(&self, token: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO token_blacklist (token) VALUES ($1) ON CONFLICT (token) DO NOTHING")
            .bind(token)
            .execute(&self.db_pool)
            .await?;

        Ok(())
    }

    /// Check whether a token has been invalidated
    pub async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM token_blacklist WHERE token = $1",
        )
        .bind(token)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(count > 0)
    }
}
