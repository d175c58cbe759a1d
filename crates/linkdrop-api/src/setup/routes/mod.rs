//! Route configuration and setup.

mod health;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use linkdrop_core::{Config, StorageBackend};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MEDIA_PREFIX: &str = "/media";

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut app = Router::new()
        .route("/", get(handlers::root::root))
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .route(
            "/upload/{link_id}",
            post(handlers::upload::upload_files)
                .layer(DefaultBodyLimit::max(config.max_upload_size_bytes())),
        )
        .route("/files/{link_id}", get(handlers::files::list_files))
        .with_state(state)
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"));

    if let Some(dir) = local_media_dir(config) {
        tracing::info!(dir = %dir, "Serving local storage under {}", MEDIA_PREFIX);
        app = app.nest_service(MEDIA_PREFIX, ServeDir::new(dir));
    }

    Ok(app
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

/// Directory to serve under `/media` when the local backend's URLs point there.
fn local_media_dir(config: &Config) -> Option<String> {
    if config.storage_backend() != StorageBackend::Local {
        return None;
    }
    let base_url = config.local_storage_base_url()?.trim_end_matches('/');
    if !base_url.ends_with(MEDIA_PREFIX) {
        return None;
    }
    config.local_storage_path().map(String::from)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
