//! LinkDrop Database Library
//!
//! Repository traits for links and file records, their PostgreSQL
//! implementations, and in-memory implementations for tests.

pub mod db;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use db::{
    FileRepositoryTrait, LinkRepositoryTrait, PostgresFileRepository, PostgresLinkRepository,
};
