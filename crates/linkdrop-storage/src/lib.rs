//! LinkDrop Storage Library
//!
//! Blob storage abstraction with S3 (via `object_store`) and local filesystem
//! implementations.
//!
//! # Storage key format
//!
//! Every uploaded file lives at `{link_id}/{folder}/{epoch_secs}_{suffix}_{filename}`.
//! Keys never contain `..` or a leading `/`; see [`keys`].

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

pub use factory::create_storage;
pub use keys::build_file_key;
pub use linkdrop_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
