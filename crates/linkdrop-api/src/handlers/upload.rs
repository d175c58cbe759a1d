use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use linkdrop_core::models::UploadResponse;
use linkdrop_services::{IncomingFile, UploadBatch};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload/{link_id}",
    tag = "upload",
    params(
        ("link_id" = String, Path, description = "Link identifier, at least 3 characters")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Parts: `files` (repeatable), optional `customer_name` and `session_id`"),
    responses(
        (status = 200, description = "Files stored", body = UploadResponse),
        (status = 400, description = "Invalid link id or no files", body = ErrorResponse),
        (status = 410, description = "Link expired", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 503, description = "Database or storage unavailable", body = ErrorResponse)
    )
)]
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let batch = read_batch(link_id, multipart).await?;
    let response = state.uploads.upload_batch(batch).await?;
    Ok(Json(response))
}

async fn read_batch(link_id: String, mut multipart: Multipart) -> Result<UploadBatch, HttpAppError> {
    let mut batch = UploadBatch {
        link_id,
        customer_name: None,
        session_id: None,
        files: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "customer_name" => batch.customer_name = Some(field.text().await?),
            "session_id" => batch.session_id = Some(field.text().await?),
            "files" | "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                batch.files.push(IncomingFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(batch)
}
