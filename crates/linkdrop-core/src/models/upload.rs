use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    pub id: Uuid,
    pub filename: String,
}

/// Response of `POST /upload/{link_id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub link_id: String,
    /// Name recorded on every file of the batch
    pub customer_name: String,
    /// Folder segment used in the storage keys of the batch
    pub folder_name: String,
    pub files_uploaded: usize,
    pub files: Vec<UploadedFile>,
    /// Link expiry
    pub expires_at: DateTime<Utc>,
    /// Shared expiry of every file in the batch
    pub customer_expires_at: DateTime<Utc>,
    /// Reuse on later uploads to keep appending to the same folder
    pub session_id: String,
}
