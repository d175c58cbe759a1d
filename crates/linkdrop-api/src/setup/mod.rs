//! Application startup: configuration checks, telemetry, database, storage,
//! services and routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use axum::Router;
use linkdrop_core::Config;
use std::sync::Arc;

/// Initialize the application and return its state and router
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    validation::validate_config(&config)?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;
    crate::error::set_production_mode(config.is_production());

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        "Starting Document Sharing API"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let state = services::initialize_services(&config, pool, storage);

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
