//! Application state shared by all handlers.

use linkdrop_core::Config;
use linkdrop_db::{FileRepositoryTrait, LinkRepositoryTrait};
use linkdrop_services::{CleanupService, LinkService, Storage, UploadService, ViewerService};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub links: LinkService,
    pub uploads: UploadService,
    pub viewer: ViewerService,
    pub cleanup: Arc<CleanupService>,
    /// Background reaper, when one was started
    pub reaper: Option<AbortHandle>,
}

impl AppState {
    /// Wire services over the given repositories and blob store.
    pub fn new(
        config: Config,
        link_repository: Arc<dyn LinkRepositoryTrait>,
        file_repository: Arc<dyn FileRepositoryTrait>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let links = LinkService::new(link_repository);
        let cleanup = Arc::new(CleanupService::new(
            file_repository.clone(),
            storage.clone(),
        ));
        let uploads = UploadService::new(links.clone(), file_repository.clone(), storage.clone());
        let viewer = ViewerService::new(
            links.clone(),
            file_repository,
            storage.clone(),
            cleanup.clone(),
        );

        Self {
            config,
            storage,
            links,
            uploads,
            viewer,
            cleanup,
            reaper: None,
        }
    }

    /// Run the reaper every `every` until [`Self::stop_background_tasks`].
    pub fn start_reaper(&mut self, every: Duration) {
        let handle = self.cleanup.clone().start(every);
        self.reaper = Some(handle.abort_handle());
    }

    /// Abort background tasks. Called once the server has stopped serving.
    pub fn stop_background_tasks(&self) {
        if let Some(reaper) = &self.reaper {
            reaper.abort();
            tracing::info!("Background cleanup task stopped");
        }
    }
}
