//! Yummy Core - shared error taxonomy, configuration, and text normalization
//!
//! This crate defines the foundation used throughout the yummy system:
//! - Common error types
//! - Configuration management
//! - Normalization helpers for user-supplied text

pub mod config;
pub mod text;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for yummy operations
#[derive(Error, Debug)]
pub enum YummyError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, YummyError>;
