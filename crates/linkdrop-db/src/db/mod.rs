//! Database repositories for data access layer
//!
//! `links` and `files` are the only two tables. Every method maps store
//! failures to `AppError::Database` and performs no retries.

mod file;
mod link;

pub use file::{FileRepositoryTrait, PostgresFileRepository};
pub use link::{LinkRepositoryTrait, PostgresLinkRepository};
