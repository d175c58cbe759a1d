//! Upload batches: one customer folder per request, one blob and one
//! metadata record per file.

pub mod folder;

use chrono::{Duration, Utc};
use linkdrop_core::{
    constants::{CUSTOMER_EXPIRY_MINUTES, DEFAULT_CONTENT_TYPE},
    models::{NewFileRecord, UploadResponse, UploadedFile},
    AppError,
};
use linkdrop_db::FileRepositoryTrait;
use linkdrop_storage::{build_file_key, Storage};
use std::sync::Arc;
use uuid::Uuid;

use crate::link::LinkService;
use folder::{normalize_session_id, resolve_folder, validate_link_id};

/// One file part of an upload request
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Everything a single upload request carries
#[derive(Debug, Clone)]
pub struct UploadBatch {
    pub link_id: String,
    pub customer_name: Option<String>,
    pub session_id: Option<String>,
    pub files: Vec<IncomingFile>,
}

#[derive(Clone)]
pub struct UploadService {
    links: LinkService,
    files: Arc<dyn FileRepositoryTrait>,
    storage: Arc<dyn Storage>,
}

impl UploadService {
    pub fn new(
        links: LinkService,
        files: Arc<dyn FileRepositoryTrait>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            links,
            files,
            storage,
        }
    }

    /// Store a batch of files for one customer.
    ///
    /// Files are persisted in order. A storage or database failure aborts the
    /// rest of the batch; files already stored stay stored.
    #[tracing::instrument(skip(self, batch), fields(link_id = %batch.link_id, file_count = batch.files.len()))]
    pub async fn upload_batch(&self, batch: UploadBatch) -> Result<UploadResponse, AppError> {
        validate_link_id(&batch.link_id)?;
        if batch.files.is_empty() {
            return Err(AppError::BadRequest(
                "Invalid request - link_id and files required".to_string(),
            ));
        }

        let now = Utc::now();
        let link = self
            .links
            .ensure_link(&batch.link_id, LinkService::proposed_expiry(now))
            .await?;
        if link.is_expired(now) {
            return Err(AppError::Gone("Link expired".to_string()));
        }

        let session_id = normalize_session_id(batch.session_id.as_deref());
        let resolution = resolve_folder(
            self.files.as_ref(),
            &link.id,
            batch.customer_name.as_deref(),
            session_id.as_deref(),
        )
        .await?;

        let customer_expires_at = Utc::now() + Duration::minutes(CUSTOMER_EXPIRY_MINUTES);
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut uploaded = Vec::with_capacity(batch.files.len());
        for file in batch.files {
            let content_type = file
                .content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let size = file.data.len() as i64;

            let uploaded_at = Utc::now();
            let suffix = Uuid::new_v4().simple().to_string();
            let key = build_file_key(
                &link.id,
                &resolution.folder_name,
                uploaded_at.timestamp(),
                &suffix[..8],
                &file.filename,
            );

            self.storage
                .upload_with_key(&key, file.data, &content_type)
                .await?;

            let record = self
                .files
                .insert(NewFileRecord {
                    link_id: link.id.clone(),
                    customer_name: resolution.customer_name.clone(),
                    filename: file.filename.clone(),
                    path: key,
                    mimetype: content_type,
                    size,
                    uploaded_at,
                    customer_expires_at,
                    session_id: Some(session_id.clone()),
                })
                .await?;

            uploaded.push(UploadedFile {
                id: record.id,
                filename: file.filename,
            });
        }

        tracing::info!(
            folder_name = %resolution.folder_name,
            reused_session_folder = resolution.reused_session_folder,
            files_uploaded = uploaded.len(),
            "Upload batch stored"
        );

        Ok(UploadResponse {
            link_id: link.id,
            customer_name: resolution.customer_name,
            folder_name: resolution.folder_name,
            files_uploaded: uploaded.len(),
            files: uploaded,
            expires_at: link.expires_at,
            customer_expires_at,
            session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkdrop_core::models::Link;
    use linkdrop_db::test_helpers::{InMemoryFileRepository, InMemoryLinkRepository};
    use linkdrop_storage::LocalStorage;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        links: InMemoryLinkRepository,
        files: InMemoryFileRepository,
        service: UploadService,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8000/media".to_string())
            .await
            .unwrap();
        let links = InMemoryLinkRepository::new();
        let files = InMemoryFileRepository::new();
        let service = UploadService::new(
            LinkService::new(Arc::new(links.clone())),
            Arc::new(files.clone()),
            Arc::new(storage),
        );
        Fixture {
            _dir: dir,
            links,
            files,
            service,
        }
    }

    fn batch(
        link_id: &str,
        customer_name: Option<&str>,
        session_id: Option<&str>,
        filenames: &[&str],
    ) -> UploadBatch {
        UploadBatch {
            link_id: link_id.to_string(),
            customer_name: customer_name.map(String::from),
            session_id: session_id.map(String::from),
            files: filenames
                .iter()
                .map(|name| IncomingFile {
                    filename: name.to_string(),
                    content_type: None,
                    data: name.as_bytes().to_vec(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_upload_gets_customer_one_and_session() {
        let fx = fixture().await;
        let response = fx
            .service
            .upload_batch(batch("demo", None, None, &["a.txt"]))
            .await
            .unwrap();

        assert_eq!(response.customer_name, "customer-1");
        assert_eq!(response.folder_name, "customer-1");
        assert_eq!(response.files_uploaded, 1);
        assert!(Uuid::parse_str(&response.session_id).is_ok());

        let stored = fx.files.all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].mimetype, "application/octet-stream");
        assert_eq!(stored[0].size, 5);
        assert!(stored[0].path.starts_with("demo/customer-1/"));
        assert!(stored[0].path.ends_with("_a.txt"));
        assert_eq!(stored[0].session_id.as_deref(), Some(response.session_id.as_str()));
    }

    #[tokio::test]
    async fn test_batch_shares_customer_expiry_and_has_unique_paths() {
        let fx = fixture().await;
        let response = fx
            .service
            .upload_batch(batch("demo", Some("alice"), None, &["a.txt", "a.txt"]))
            .await
            .unwrap();

        assert_eq!(response.files_uploaded, 2);
        let stored = fx.files.all().unwrap();
        assert_eq!(stored[0].customer_expires_at, stored[1].customer_expires_at);
        assert_eq!(stored[0].customer_expires_at, response.customer_expires_at);
        assert_ne!(stored[0].path, stored[1].path);
    }

    #[tokio::test]
    async fn test_link_created_once_and_reused() {
        let fx = fixture().await;
        let first = fx
            .service
            .upload_batch(batch("demo", None, None, &["a.txt"]))
            .await
            .unwrap();
        let second = fx
            .service
            .upload_batch(batch("demo", None, None, &["b.txt"]))
            .await
            .unwrap();

        assert_eq!(first.expires_at, second.expires_at);
        assert_eq!(fx.links.len().unwrap(), 1);
        assert_eq!(second.customer_name, "customer-2");
    }

    #[tokio::test]
    async fn test_session_reuses_folder() {
        let fx = fixture().await;
        let first = fx
            .service
            .upload_batch(batch("demo", Some("alice"), Some("s-1"), &["a.txt"]))
            .await
            .unwrap();
        let second = fx
            .service
            .upload_batch(batch("demo", Some("alice"), Some("s-1"), &["b.txt"]))
            .await
            .unwrap();

        assert_eq!(first.folder_name, "alice");
        assert_eq!(second.folder_name, first.folder_name);
        assert_eq!(second.session_id, "s-1");
    }

    #[tokio::test]
    async fn test_session_id_is_stored_and_echoed_unchanged() {
        let fx = fixture().await;
        let response = fx
            .service
            .upload_batch(batch("demo", Some("alice"), Some(" abc "), &["a.txt"]))
            .await
            .unwrap();

        assert_eq!(response.session_id, " abc ");
        let stored = fx.files.all().unwrap();
        assert_eq!(stored[0].session_id.as_deref(), Some(" abc "));
    }

    #[tokio::test]
    async fn test_blank_inputs_are_treated_as_absent() {
        let fx = fixture().await;
        let response = fx
            .service
            .upload_batch(batch("demo", Some("   "), Some(""), &["a.txt"]))
            .await
            .unwrap();

        assert_eq!(response.customer_name, "customer-1");
        assert!(!response.session_id.is_empty());
    }

    #[tokio::test]
    async fn test_expired_link_is_gone_and_writes_nothing() {
        let fx = fixture().await;
        fx.links
            .add_link(Link {
                id: "old-link".to_string(),
                expires_at: Utc::now() - Duration::days(1),
            })
            .unwrap();

        let result = fx
            .service
            .upload_batch(batch("old-link", None, None, &["a.txt"]))
            .await;

        assert!(matches!(result, Err(AppError::Gone(_))));
        assert!(fx.files.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_short_link_id_and_empty_batch_before_storing() {
        let fx = fixture().await;

        let short = fx
            .service
            .upload_batch(batch("ab", None, None, &["a.txt"]))
            .await;
        assert!(matches!(short, Err(AppError::InvalidInput(_))));

        let empty = fx.service.upload_batch(batch("demo", None, None, &[])).await;
        assert!(matches!(empty, Err(AppError::BadRequest(_))));

        assert!(fx.links.is_empty().unwrap());
        assert!(fx.files.all().unwrap().is_empty());
    }
}
