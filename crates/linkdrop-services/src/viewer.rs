//! Grouped, signed file listing for a link.

use chrono::Utc;
use linkdrop_core::{
    constants::SIGNED_URL_EXPIRY_SECS,
    models::{CustomerFiles, FileSummary, LinkFilesResponse},
    AppError,
};
use linkdrop_db::FileRepositoryTrait;
use linkdrop_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

use crate::cleanup::CleanupService;
use crate::link::LinkService;

/// Group summaries by customer name. Customers appear in the order they are
/// first seen and files keep the input order within each customer.
pub fn group_by_customer(
    entries: impl IntoIterator<Item = (String, FileSummary)>,
) -> CustomerFiles {
    let mut customers = CustomerFiles::new();
    for (customer_name, summary) in entries {
        customers.entry(customer_name).or_default().push(summary);
    }
    customers
}

#[derive(Clone)]
pub struct ViewerService {
    links: LinkService,
    files: Arc<dyn FileRepositoryTrait>,
    storage: Arc<dyn Storage>,
    cleanup: Arc<CleanupService>,
}

impl ViewerService {
    pub fn new(
        links: LinkService,
        files: Arc<dyn FileRepositoryTrait>,
        storage: Arc<dyn Storage>,
        cleanup: Arc<CleanupService>,
    ) -> Self {
        Self {
            links,
            files,
            storage,
            cleanup,
        }
    }

    /// List a link's files grouped by customer, each with a signed download URL.
    ///
    /// Expired records are swept first. An unknown link is `NotFound`; an
    /// expired link yields the expired shape without file data.
    #[tracing::instrument(skip(self))]
    pub async fn list_files(&self, link_id: &str) -> Result<LinkFilesResponse, AppError> {
        self.cleanup.sweep_expired().await?;

        let link = self
            .links
            .get_link(link_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Link not found".to_string()))?;

        if link.is_expired(Utc::now()) {
            return Ok(LinkFilesResponse::expired(link.id));
        }

        let files = self.files.list_for_link(&link.id).await?;
        let url_lifetime = Duration::from_secs(SIGNED_URL_EXPIRY_SECS);

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let download_url = self
                .storage
                .get_presigned_url(&file.path, url_lifetime)
                .await?;
            entries.push((
                file.customer_name,
                FileSummary {
                    id: file.id,
                    filename: file.filename,
                    size: file.size,
                    mimetype: file.mimetype,
                    uploaded_at: file.uploaded_at,
                    customer_expires_at: file.customer_expires_at,
                    download_url,
                },
            ));
        }

        Ok(LinkFilesResponse::active(
            link.id,
            link.expires_at,
            group_by_customer(entries),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration as ChronoDuration};
    use linkdrop_core::models::{FileRecord, Link};
    use linkdrop_db::test_helpers::{InMemoryFileRepository, InMemoryLinkRepository};
    use linkdrop_storage::LocalStorage;
    use uuid::Uuid;

    struct Fixture {
        _dir: tempfile::TempDir,
        links: InMemoryLinkRepository,
        files: InMemoryFileRepository,
        viewer: ViewerService,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(dir.path(), "http://localhost:8000/media".to_string())
                .await
                .unwrap(),
        );
        let links = InMemoryLinkRepository::new();
        let files = InMemoryFileRepository::new();
        let files_repo: Arc<dyn FileRepositoryTrait> = Arc::new(files.clone());
        let cleanup = Arc::new(CleanupService::new(files_repo.clone(), storage.clone()));
        let viewer = ViewerService::new(
            LinkService::new(Arc::new(links.clone())),
            files_repo,
            storage,
            cleanup,
        );
        Fixture {
            _dir: dir,
            links,
            files,
            viewer,
        }
    }

    fn record(customer: &str, filename: &str, uploaded_at: DateTime<Utc>) -> FileRecord {
        FileRecord {
            id: Uuid::new_v4(),
            link_id: "demo".to_string(),
            customer_name: customer.to_string(),
            filename: filename.to_string(),
            path: format!("demo/{}/{}_x_{}", customer, uploaded_at.timestamp(), filename),
            mimetype: "text/plain".to_string(),
            size: 3,
            uploaded_at,
            customer_expires_at: uploaded_at + ChronoDuration::minutes(10),
            session_id: None,
        }
    }

    fn summary(filename: &str) -> FileSummary {
        FileSummary {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            size: 1,
            mimetype: "text/plain".to_string(),
            uploaded_at: Utc::now(),
            customer_expires_at: Utc::now(),
            download_url: String::new(),
        }
    }

    #[test]
    fn test_group_by_customer_keeps_first_seen_customer_order() {
        let grouped = group_by_customer(vec![
            ("bob".to_string(), summary("3.txt")),
            ("alice".to_string(), summary("2.txt")),
            ("bob".to_string(), summary("1.txt")),
        ]);

        let names: Vec<_> = grouped.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        let bob: Vec<_> = grouped["bob"].iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(bob, vec!["3.txt", "1.txt"]);
        assert_eq!(grouped["alice"].len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_link_is_not_found() {
        let fx = fixture().await;
        let result = fx.viewer.list_files("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_expired_link_returns_expired_shape() {
        let fx = fixture().await;
        fx.links
            .add_link(Link {
                id: "demo".to_string(),
                expires_at: Utc::now() - ChronoDuration::seconds(1),
            })
            .unwrap();
        fx.files.add_file(record("alice", "a.txt", Utc::now())).unwrap();

        let response = fx.viewer.list_files("demo").await.unwrap();
        assert!(response.expired);
        assert!(response.customers.is_none());
        assert!(response.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_lists_grouped_newest_first_with_urls() {
        let fx = fixture().await;
        let now = Utc::now();
        fx.links
            .add_link(Link {
                id: "demo".to_string(),
                expires_at: now + ChronoDuration::days(7),
            })
            .unwrap();
        fx.files
            .add_file(record("alice", "old.txt", now - ChronoDuration::minutes(2)))
            .unwrap();
        fx.files
            .add_file(record("alice", "new.txt", now - ChronoDuration::minutes(1)))
            .unwrap();
        fx.files.add_file(record("bob", "b.txt", now)).unwrap();

        let response = fx.viewer.list_files("demo").await.unwrap();
        assert!(!response.expired);
        let customers = response.customers.unwrap();
        let names: Vec<_> = customers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        let alice: Vec<_> = customers["alice"].iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(alice, vec!["new.txt", "old.txt"]);
        assert!(customers["bob"][0]
            .download_url
            .starts_with("http://localhost:8000/media/demo/bob/"));
    }

    #[tokio::test]
    async fn test_listing_sweeps_expired_records_first() {
        let fx = fixture().await;
        let now = Utc::now();
        fx.links
            .add_link(Link {
                id: "demo".to_string(),
                expires_at: now + ChronoDuration::days(7),
            })
            .unwrap();
        fx.files
            .add_file(record("alice", "stale.txt", now - ChronoDuration::minutes(11)))
            .unwrap();
        fx.files.add_file(record("bob", "fresh.txt", now)).unwrap();

        let response = fx.viewer.list_files("demo").await.unwrap();
        let customers = response.customers.unwrap();
        assert!(!customers.contains_key("alice"));
        assert_eq!(customers["bob"].len(), 1);
        assert_eq!(fx.files.all().unwrap().len(), 1);
    }
}
