//! Test helpers: build AppState and router for integration tests.
//!
//! Repositories are in-memory and blobs go to a temporary directory, so no
//! database or object store is needed.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use linkdrop_api::setup::routes;
use linkdrop_api::state::AppState;
use linkdrop_core::{BaseConfig, Config, LinkDropConfig, StorageBackend};
use linkdrop_db::test_helpers::{InMemoryFileRepository, InMemoryLinkRepository};
use linkdrop_storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;

pub const MEDIA_BASE_URL: &str = "http://localhost:8000/media";

/// Test application: server, repository handles, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub links: InMemoryLinkRepository,
    pub files: InMemoryFileRepository,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(storage_path: &str, max_upload_size_bytes: usize) -> Config {
    Config(Box::new(LinkDropConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            environment: "test".to_string(),
        },
        database_url: "postgres://unused/linkdrop".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: "links".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        s3_access_key_id: None,
        s3_secret_access_key: None,
        local_storage_path: Some(storage_path.to_string()),
        local_storage_base_url: Some(MEDIA_BASE_URL.to_string()),
        max_upload_size_bytes,
        cleanup_interval_secs: 0,
    }))
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limit(1024 * 1024).await
}

pub async fn setup_test_app_with_limit(max_upload_size_bytes: usize) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let storage_path = temp_dir.path().to_string_lossy().to_string();
    let config = test_config(&storage_path, max_upload_size_bytes);

    let storage = LocalStorage::new(temp_dir.path(), MEDIA_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage");
    let links = InMemoryLinkRepository::new();
    let files = InMemoryFileRepository::new();

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(links.clone()),
        Arc::new(files.clone()),
        Arc::new(storage),
    ));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        links,
        files,
        _temp_dir: temp_dir,
    }
}

pub fn file_part(filename: &str, content: &str) -> Part {
    Part::bytes(bytes::Bytes::from(content.as_bytes().to_vec()))
        .file_name(filename.to_string())
        .mime_type("text/plain")
}

/// Multipart form with one `files` part per entry.
pub fn upload_form(files: &[(&str, &str)]) -> MultipartForm {
    files
        .iter()
        .fold(MultipartForm::new(), |form, (name, content)| {
            form.add_part("files", file_part(name, content))
        })
}
