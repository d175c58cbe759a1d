//! Upload API integration tests.
//!
//! Run with: `cargo test -p linkdrop-api --test upload_test`

mod helpers;

use chrono::{Duration, Utc};
use helpers::{setup_test_app, setup_test_app_with_limit, upload_form};
use linkdrop_core::models::Link;

#[tokio::test]
async fn test_anonymous_upload_creates_link_and_customer() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/demo")
        .multipart(upload_form(&[("a.txt", "hello")]))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["link_id"], "demo");
    assert_eq!(body["customer_name"], "customer-1");
    assert_eq!(body["folder_name"], "customer-1");
    assert_eq!(body["files_uploaded"], 1);
    assert_eq!(body["files"][0]["filename"], "a.txt");
    assert!(!body["session_id"].as_str().unwrap_or_default().is_empty());

    assert_eq!(app.links.len().unwrap(), 1);
    let stored = app.files.all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].mimetype, "text/plain");
    assert_eq!(stored[0].size, 5);
}

#[tokio::test]
async fn test_second_anonymous_upload_gets_next_number() {
    let app = setup_test_app().await;

    for _ in 0..2 {
        app.client()
            .post("/upload/demo")
            .multipart(upload_form(&[("a.txt", "hello")]))
            .await
            .assert_status_ok();
    }
    let response = app
        .client()
        .post("/upload/demo")
        .multipart(upload_form(&[("b.txt", "again")]))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["customer_name"], "customer-3");
}

#[tokio::test]
async fn test_customer_name_is_trimmed() {
    let app = setup_test_app().await;

    let form = upload_form(&[("a.txt", "hello")]).add_text("customer_name", "  Bob ");
    let response = app.client().post("/upload/demo").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["customer_name"], "Bob");
    assert_eq!(body["folder_name"], "Bob");
}

#[tokio::test]
async fn test_session_id_is_echoed_and_reuses_folder() {
    let app = setup_test_app().await;

    let form = upload_form(&[("a.txt", "one")]).add_text("customer_name", "Alice");
    let first = app.client().post("/upload/demo").multipart(form).await;
    let first: serde_json::Value = first.json();
    let session_id = first["session_id"].as_str().unwrap().to_string();

    let form = upload_form(&[("b.txt", "two")])
        .add_text("customer_name", "Alice")
        .add_text("session_id", session_id.clone());
    let second = app.client().post("/upload/demo").multipart(form).await;

    assert_eq!(second.status_code(), 200);
    let second: serde_json::Value = second.json();
    assert_eq!(second["session_id"], session_id.as_str());
    assert_eq!(second["folder_name"], "Alice");
    assert_eq!(second["folder_name"], first["folder_name"]);
}

#[tokio::test]
async fn test_multiple_files_share_customer_expiry() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/demo")
        .multipart(upload_form(&[("a.txt", "a"), ("b.txt", "b")]))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["files_uploaded"], 2);

    let stored = app.files.all().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].customer_expires_at, stored[1].customer_expires_at);
    assert_ne!(stored[0].path, stored[1].path);
}

#[tokio::test]
async fn test_short_link_id_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/ab")
        .multipart(upload_form(&[("a.txt", "hello")]))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.links.is_empty().unwrap());
}

#[tokio::test]
async fn test_upload_without_files_rejected() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new().add_text("customer_name", "Bob");
    let response = app.client().post("/upload/demo").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(app.links.is_empty().unwrap());
}

#[tokio::test]
async fn test_upload_to_expired_link_is_gone() {
    let app = setup_test_app().await;
    app.links
        .add_link(Link {
            id: "old-link".to_string(),
            expires_at: Utc::now() - Duration::days(1),
        })
        .unwrap();

    let response = app
        .client()
        .post("/upload/old-link")
        .multipart(upload_form(&[("a.txt", "hello")]))
        .await;

    assert_eq!(response.status_code(), 410);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "LINK_EXPIRED");
    assert!(app.files.all().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_over_body_limit_is_rejected() {
    let app = setup_test_app_with_limit(1024).await;
    let large = "x".repeat(4096);

    let response = app
        .client()
        .post("/upload/demo")
        .multipart(upload_form(&[("big.txt", large.as_str())]))
        .await;

    assert_eq!(response.status_code(), 413);
    assert!(app.files.all().unwrap().is_empty());
}
