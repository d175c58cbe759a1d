//! Expiry reaper for file records and their blobs.

use chrono::Utc;
use linkdrop_core::AppError;
use linkdrop_db::FileRepositoryTrait;
use linkdrop_storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Result of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Records whose customer expiry had passed
    pub matched: usize,
    /// Blobs that could not be deleted; their records are removed anyway
    pub blob_failures: usize,
    /// Records removed from the database
    pub deleted: u64,
}

#[derive(Clone)]
pub struct CleanupService {
    files: Arc<dyn FileRepositoryTrait>,
    storage: Arc<dyn Storage>,
}

impl CleanupService {
    pub fn new(files: Arc<dyn FileRepositoryTrait>, storage: Arc<dyn Storage>) -> Self {
        Self { files, storage }
    }

    /// Run [`Self::sweep_expired`] every `every`, in addition to the sweep that
    /// precedes each listing. Returns a JoinHandle for graceful shutdown.
    pub fn start(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut cleanup_interval = interval(every);

            loop {
                cleanup_interval.tick().await;

                tracing::debug!("Starting scheduled sweep of expired files");

                if let Err(e) = self.sweep_expired().await {
                    tracing::error!(error = %e, "Scheduled sweep failed");
                }
            }
        })
    }

    /// Delete every file record whose customer expiry is strictly in the past.
    ///
    /// Blob deletion is best-effort: failures are logged and the records are
    /// still deleted in one bulk statement. Database failures propagate.
    #[tracing::instrument(skip(self), fields(cleanup.operation = "expire_files"))]
    pub async fn sweep_expired(&self) -> Result<SweepReport, AppError> {
        let expired = self.files.list_expired(Utc::now()).await?;
        if expired.is_empty() {
            return Ok(SweepReport::default());
        }

        let mut blob_failures = 0;
        for file in &expired {
            match self.storage.delete(&file.path).await {
                Ok(()) => {
                    tracing::debug!(storage_key = %file.path, "Deleted expired blob");
                }
                Err(e) => {
                    blob_failures += 1;
                    tracing::error!(
                        error = %e,
                        file_id = %file.id,
                        storage_key = %file.path,
                        "Failed to delete file from storage, continuing with database deletion"
                    );
                }
            }
        }

        let ids: Vec<_> = expired.iter().map(|f| f.id).collect();
        let deleted = self.files.delete_by_ids(&ids).await?;

        tracing::info!(
            matched = expired.len(),
            blob_failures,
            deleted,
            "Expired files swept"
        );

        Ok(SweepReport {
            matched: expired.len(),
            blob_failures,
            deleted,
        })
    }
}
