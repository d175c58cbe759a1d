//! In-memory repository implementations for testing
//!
//! These follow the PostgreSQL repositories' semantics (ordering, strict
//! expiry comparison) so services can be tested without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkdrop_core::models::{ExpiredFile, FileRecord, Link, NewFileRecord};
use linkdrop_core::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::{FileRepositoryTrait, LinkRepositoryTrait};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|_| AppError::Internal("in-memory repository lock poisoned".to_string()))
}

#[derive(Clone, Default)]
pub struct InMemoryLinkRepository {
    links: Arc<Mutex<HashMap<String, Link>>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a link directly, e.g. one that has already expired.
    pub fn add_link(&self, link: Link) -> Result<(), AppError> {
        lock(&self.links)?.insert(link.id.clone(), link);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(lock(&self.links)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(lock(&self.links)?.is_empty())
    }
}

#[async_trait]
impl LinkRepositoryTrait for InMemoryLinkRepository {
    async fn get(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(lock(&self.links)?.get(id).cloned())
    }

    async fn create_if_absent(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        let mut links = lock(&self.links)?;
        let link = links.entry(id.to_string()).or_insert_with(|| Link {
            id: id.to_string(),
            expires_at,
        });
        Ok(link.clone())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryFileRepository {
    files: Arc<Mutex<Vec<FileRecord>>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the upload path.
    pub fn add_file(&self, file: FileRecord) -> Result<(), AppError> {
        lock(&self.files)?.push(file);
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<FileRecord>, AppError> {
        Ok(lock(&self.files)?.clone())
    }
}

#[async_trait]
impl FileRepositoryTrait for InMemoryFileRepository {
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, AppError> {
        let record = file.into_record(Uuid::new_v4());
        lock(&self.files)?.push(record.clone());
        Ok(record)
    }

    async fn list_customer_names(&self, link_id: &str) -> Result<Vec<String>, AppError> {
        let mut names: Vec<String> = lock(&self.files)?
            .iter()
            .filter(|f| f.link_id == link_id)
            .map(|f| f.customer_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn find_session_folder(
        &self,
        link_id: &str,
        session_id: &str,
        customer_name: &str,
    ) -> Result<Option<String>, AppError> {
        Ok(lock(&self.files)?
            .iter()
            .filter(|f| {
                f.link_id == link_id
                    && f.session_id.as_deref() == Some(session_id)
                    && f.customer_name == customer_name
            })
            .max_by_key(|f| f.uploaded_at)
            .map(|f| f.customer_name.clone()))
    }

    async fn list_for_link(&self, link_id: &str) -> Result<Vec<FileRecord>, AppError> {
        let mut files: Vec<FileRecord> = lock(&self.files)?
            .iter()
            .filter(|f| f.link_id == link_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<ExpiredFile>, AppError> {
        Ok(lock(&self.files)?
            .iter()
            .filter(|f| f.customer_expires_at < now)
            .map(|f| ExpiredFile {
                id: f.id,
                path: f.path.clone(),
            })
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        let mut files = lock(&self.files)?;
        let before = files.len();
        files.retain(|f| !ids.contains(&f.id));
        Ok((before - files.len()) as u64)
    }
}
