//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use linkdrop_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Document Sharing API",
        description = "Link-based drop-box: customers upload files to a shared link, the owner lists them grouped by customer.",
    ),
    paths(
        handlers::root::root,
        handlers::upload::upload_files,
        handlers::files::list_files,
    ),
    components(
        schemas(
            models::UploadResponse,
            models::UploadedFile,
            models::LinkFilesResponse,
            models::FileSummary,
            handlers::root::ServiceStatus,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "status", description = "Service liveness"),
        (name = "upload", description = "Customer file uploads to a link"),
        (name = "files", description = "Owner view of the files behind a link"),
    )
)]
pub struct ApiDoc;
