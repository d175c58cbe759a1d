use chrono::{DateTime, Duration, Utc};
use linkdrop_core::{constants::LINK_EXPIRY_DAYS, models::Link, AppError};
use linkdrop_db::LinkRepositoryTrait;
use std::sync::Arc;

/// Creates and fetches links.
#[derive(Clone)]
pub struct LinkService {
    links: Arc<dyn LinkRepositoryTrait>,
}

impl LinkService {
    pub fn new(links: Arc<dyn LinkRepositoryTrait>) -> Self {
        Self { links }
    }

    /// Expiry given to a link first seen at `now`.
    pub fn proposed_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(LINK_EXPIRY_DAYS)
    }

    /// Return the link with this id, creating it with `proposed_expiry` if it
    /// does not exist yet. An existing link is returned unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_link(
        &self,
        link_id: &str,
        proposed_expiry: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        if let Some(link) = self.links.get(link_id).await? {
            return Ok(link);
        }

        let link = self.links.create_if_absent(link_id, proposed_expiry).await?;
        tracing::info!(link_id = %link.id, expires_at = %link.expires_at, "Link created");
        Ok(link)
    }

    pub async fn get_link(&self, link_id: &str) -> Result<Option<Link>, AppError> {
        self.links.get(link_id).await
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.links.health_check().await
    }
}
