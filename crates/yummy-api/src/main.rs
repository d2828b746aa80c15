//! Yummy API Server
//!
//! REST API server for the yummy recipe catalogue.
//!
//! Author: hephaex@gmail.com

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use yummy_api::{create_router, state::AppState};
use yummy_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yummy_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration (APP_SECRET and DATABASE_URL come from the environment)
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Connect to PostgreSQL and bring the schema up to date
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.pool_size)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Create application state
    let state = Arc::new(AppState::new(config, db_pool));

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Yummy API server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
