use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileSummary {
    pub id: Uuid,
    pub filename: String,
    pub size: i64,
    pub mimetype: String,
    pub uploaded_at: DateTime<Utc>,
    pub customer_expires_at: DateTime<Utc>,
    pub download_url: String,
}

/// Files per customer. Customers keep first-seen order over a newest-first
/// listing, so the most recently active customer comes first.
pub type CustomerFiles = IndexMap<String, Vec<FileSummary>>;

/// Response of `GET /files/{link_id}`.
///
/// An expired link serializes as `{"link_id": ..., "expired": true}` only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkFilesResponse {
    pub link_id: String,
    pub expired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Files per customer, newest first within each customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customers: Option<CustomerFiles>,
}

impl LinkFilesResponse {
    pub fn expired(link_id: impl Into<String>) -> Self {
        LinkFilesResponse {
            link_id: link_id.into(),
            expired: true,
            expires_at: None,
            customers: None,
        }
    }

    pub fn active(
        link_id: impl Into<String>,
        expires_at: DateTime<Utc>,
        customers: CustomerFiles,
    ) -> Self {
        LinkFilesResponse {
            link_id: link_id.into(),
            expired: false,
            expires_at: Some(expires_at),
            customers: Some(customers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_shape_omits_file_data() {
        let json = serde_json::to_value(LinkFilesResponse::expired("demo")).unwrap();
        assert_eq!(json, serde_json::json!({"link_id": "demo", "expired": true}));
    }

    #[test]
    fn test_active_shape_includes_empty_customers() {
        let json =
            serde_json::to_value(LinkFilesResponse::active("demo", Utc::now(), CustomerFiles::new()))
                .unwrap();
        assert_eq!(json["expired"], false);
        assert!(json["expires_at"].is_string());
        assert!(json["customers"].as_object().unwrap().is_empty());
    }
}
