use chrono::{DateTime, Utc};
use linkdrop_core::{
    models::{ExpiredFile, FileRecord, NewFileRecord},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const FILE_COLUMNS: &str = "id, link_id, customer_name, filename, path, mimetype, size, \
                            uploaded_at, customer_expires_at, session_id";

#[async_trait::async_trait]
pub trait FileRepositoryTrait: Send + Sync {
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, AppError>;

    /// Distinct customer names already used on the link.
    async fn list_customer_names(&self, link_id: &str) -> Result<Vec<String>, AppError>;

    /// Customer name of the most recent file matching the exact
    /// (link, session, customer name) triple.
    async fn find_session_folder(
        &self,
        link_id: &str,
        session_id: &str,
        customer_name: &str,
    ) -> Result<Option<String>, AppError>;

    /// All files of the link, newest first.
    async fn list_for_link(&self, link_id: &str) -> Result<Vec<FileRecord>, AppError>;

    /// Files whose `customer_expires_at` is strictly before `now`.
    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<ExpiredFile>, AppError>;

    /// Delete the given records in one statement; returns the number removed.
    async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError>;
}

/// Repository for file metadata records
#[derive(Clone)]
pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileRepositoryTrait for PostgresFileRepository {
    #[tracing::instrument(skip(self, file), fields(db.table = "files", db.operation = "insert", link_id = %file.link_id))]
    async fn insert(&self, file: NewFileRecord) -> Result<FileRecord, AppError> {
        let query = format!(
            r#"
            INSERT INTO files (link_id, customer_name, filename, path, mimetype, size,
                               uploaded_at, customer_expires_at, session_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            FILE_COLUMNS
        );

        let record = sqlx::query_as::<Postgres, FileRecord>(&query)
            .bind(&file.link_id)
            .bind(&file.customer_name)
            .bind(&file.filename)
            .bind(&file.path)
            .bind(&file.mimetype)
            .bind(file.size)
            .bind(file.uploaded_at)
            .bind(file.customer_expires_at)
            .bind(&file.session_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list_customer_names(&self, link_id: &str) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<Postgres, String>(
            "SELECT DISTINCT customer_name FROM files WHERE link_id = $1",
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn find_session_folder(
        &self,
        link_id: &str,
        session_id: &str,
        customer_name: &str,
    ) -> Result<Option<String>, AppError> {
        let folder = sqlx::query_scalar::<Postgres, String>(
            r#"
            SELECT customer_name FROM files
            WHERE link_id = $1 AND session_id = $2 AND customer_name = $3
            ORDER BY uploaded_at DESC
            LIMIT 1
            "#,
        )
        .bind(link_id)
        .bind(session_id)
        .bind(customer_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(folder)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list_for_link(&self, link_id: &str) -> Result<Vec<FileRecord>, AppError> {
        let query = format!(
            "SELECT {} FROM files WHERE link_id = $1 ORDER BY uploaded_at DESC",
            FILE_COLUMNS
        );

        let files = sqlx::query_as::<Postgres, FileRecord>(&query)
            .bind(link_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(files)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<ExpiredFile>, AppError> {
        let expired = sqlx::query_as::<Postgres, ExpiredFile>(
            "SELECT id, path FROM files WHERE customer_expires_at < $1",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(expired)
    }

    #[tracing::instrument(skip(self, ids), fields(db.table = "files", db.operation = "delete", count = ids.len()))]
    async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM files WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
