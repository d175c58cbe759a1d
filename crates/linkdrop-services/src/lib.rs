//! LinkDrop Services Layer
//!
//! Business logic of the drop-box: link lifecycle, upload batches and folder
//! resolution, the grouped file listing, and the expiry reaper. HTTP handling
//! stays in `linkdrop-api`.

pub mod cleanup;
pub mod link;
pub mod upload;
pub mod viewer;

pub use cleanup::{CleanupService, SweepReport};
pub use link::LinkService;
pub use upload::{IncomingFile, UploadBatch, UploadService};
pub use viewer::ViewerService;

pub use linkdrop_storage::{create_storage, Storage, StorageBackend, StorageError};
