//! Service wiring and background tasks

use crate::state::AppState;
use linkdrop_core::Config;
use linkdrop_db::{PostgresFileRepository, PostgresLinkRepository};
use linkdrop_services::Storage;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Build application state over Postgres repositories and start the periodic
/// reaper when `CLEANUP_INTERVAL_SECS` is non-zero.
pub fn initialize_services(config: &Config, pool: PgPool, storage: Arc<dyn Storage>) -> Arc<AppState> {
    let link_repository = Arc::new(PostgresLinkRepository::new(pool.clone()));
    let file_repository = Arc::new(PostgresFileRepository::new(pool));

    let mut state = AppState::new(config.clone(), link_repository, file_repository, storage);

    if config.cleanup_interval_secs() > 0 {
        state.start_reaper(Duration::from_secs(config.cleanup_interval_secs()));
        tracing::info!(
            interval_secs = config.cleanup_interval_secs(),
            "Background cleanup task started"
        );
    }

    Arc::new(state)
}
