use chrono::{DateTime, Utc};
use linkdrop_core::{models::Link, AppError};
use sqlx::{PgPool, Postgres};

#[async_trait::async_trait]
pub trait LinkRepositoryTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Insert the link unless a row with the same id already exists, and
    /// return the stored row either way. An existing row is never modified.
    async fn create_if_absent(&self, id: &str, expires_at: DateTime<Utc>)
        -> Result<Link, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Repository for link records
#[derive(Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LinkRepositoryTrait for PostgresLinkRepository {
    #[tracing::instrument(skip(self), fields(db.table = "links", db.operation = "select"))]
    async fn get(&self, id: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<Postgres, Link>("SELECT id, expires_at FROM links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(link)
    }

    #[tracing::instrument(skip(self), fields(db.table = "links", db.operation = "insert"))]
    async fn create_if_absent(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        // The primary key settles concurrent first uploads: the loser inserts
        // nothing and reads the winner's row below.
        let inserted = sqlx::query_as::<Postgres, Link>(
            r#"
            INSERT INTO links (id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, expires_at
            "#,
        )
        .bind(id)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(link) = inserted {
            return Ok(link);
        }

        self.get(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Link {} vanished after insert", id)))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
