//! Data models for the application
//!
//! Stored records (`Link`, `FileRecord`) and the JSON shapes returned by the
//! upload and viewer endpoints.

mod file;
mod link;
mod upload;
mod viewer;

pub use file::*;
pub use link::*;
pub use upload::*;
pub use viewer::*;
