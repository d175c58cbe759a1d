//! Fixed constants of the drop-box domain.

/// Days a link accepts uploads after its first upload.
pub const LINK_EXPIRY_DAYS: i64 = 7;

/// Minutes an upload batch stays visible before the reaper removes it.
pub const CUSTOMER_EXPIRY_MINUTES: i64 = 10;

/// Lifetime of a generated download URL.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

pub const DEFAULT_BUCKET_NAME: &str = "links";

/// Prefix of synthesized customer names (`customer-1`, `customer-2`, ...).
pub const ANONYMOUS_CUSTOMER_PREFIX: &str = "customer-";

pub const SERVICE_NAME: &str = "Document Sharing API";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
