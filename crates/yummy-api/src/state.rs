//! Application state management
//!
//! Author: hephaex@gmail.com

use sqlx::PgPool;
use std::time::Instant;
use yummy_core::AppConfig;

/// Application state shared across handlers
///
/// Constructed once at startup and injected everywhere via `Arc`; nothing
/// in the system reaches for ambient globals.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        Self {
            config,
            db_pool,
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
