use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one uploaded blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileRecord {
    pub id: Uuid,
    pub link_id: String,
    pub customer_name: String,
    /// Original filename, for display only
    pub filename: String,
    /// Storage key of the blob
    pub path: String,
    pub mimetype: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub customer_expires_at: DateTime<Utc>,
    pub session_id: Option<String>,
}

/// Insert payload for a file record; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub link_id: String,
    pub customer_name: String,
    pub filename: String,
    pub path: String,
    pub mimetype: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub customer_expires_at: DateTime<Utc>,
    pub session_id: Option<String>,
}

impl NewFileRecord {
    pub fn into_record(self, id: Uuid) -> FileRecord {
        FileRecord {
            id,
            link_id: self.link_id,
            customer_name: self.customer_name,
            filename: self.filename,
            path: self.path,
            mimetype: self.mimetype,
            size: self.size,
            uploaded_at: self.uploaded_at,
            customer_expires_at: self.customer_expires_at,
            session_id: self.session_id,
        }
    }
}

/// The id and storage key of an expired record, as selected by the reaper.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExpiredFile {
    pub id: Uuid,
    pub path: String,
}
