//! LinkDrop Core Library
//!
//! Domain models, error types, configuration and constants shared by every
//! LinkDrop crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

pub use config::{BaseConfig, Config, LinkDropConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
