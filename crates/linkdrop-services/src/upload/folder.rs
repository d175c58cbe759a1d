//! Customer name and folder resolution for an upload batch.

use linkdrop_core::{constants::ANONYMOUS_CUSTOMER_PREFIX, AppError};
use linkdrop_db::FileRepositoryTrait;
use std::collections::HashSet;
use validator::Validate;

#[derive(Debug, Validate)]
struct LinkTarget {
    #[validate(length(min = 3, message = "Invalid request - link_id must be at least 3 characters"))]
    link_id: String,
}

/// Reject link ids shorter than three characters.
pub fn validate_link_id(link_id: &str) -> Result<(), AppError> {
    LinkTarget {
        link_id: link_id.to_string(),
    }
    .validate()?;
    Ok(())
}

/// Trimmed customer name, or `None` when absent or blank.
pub fn normalize_customer_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
}

/// Blank session ids count as absent. Any other token is kept verbatim.
pub fn normalize_session_id(raw: Option<&str>) -> Option<String> {
    raw.filter(|session_id| !session_id.trim().is_empty())
        .map(String::from)
}

/// `customer-<n>` with the smallest positive `n` not already in `existing`.
pub fn next_anonymous_name(existing: &[String]) -> String {
    let used: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{}{}", ANONYMOUS_CUSTOMER_PREFIX, n);
        if !used.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

/// Outcome of folder resolution for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderResolution {
    /// Recorded as `customer_name` on every file of the batch
    pub customer_name: String,
    /// Path segment of the batch's storage keys
    pub folder_name: String,
    /// Whether a prior upload of the same session and name was found
    pub reused_session_folder: bool,
}

/// Pick the customer name and folder for a batch.
///
/// A supplied non-blank name wins, otherwise the next free `customer-<n>` is
/// synthesized by scanning the link's records. With a session id, the stored
/// name of the latest matching (link, session, name) record becomes the
/// folder; it equals the candidate name by construction.
pub async fn resolve_folder(
    files: &dyn FileRepositoryTrait,
    link_id: &str,
    customer_name: Option<&str>,
    session_id: Option<&str>,
) -> Result<FolderResolution, AppError> {
    let candidate = match normalize_customer_name(customer_name) {
        Some(name) => name,
        None => {
            let existing = files.list_customer_names(link_id).await?;
            next_anonymous_name(&existing)
        }
    };

    let session_folder = match session_id {
        Some(session_id) => {
            files
                .find_session_folder(link_id, session_id, &candidate)
                .await?
        }
        None => None,
    };

    let reused_session_folder = session_folder.is_some();
    let folder_name = session_folder.unwrap_or_else(|| candidate.clone());

    Ok(FolderResolution {
        customer_name: candidate,
        folder_name,
        reused_session_folder,
    })
}
