use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use linkdrop_core::models::LinkFilesResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/files/{link_id}",
    tag = "files",
    params(
        ("link_id" = String, Path, description = "Link identifier")
    ),
    responses(
        (status = 200, description = "Files grouped by customer, or the expired marker", body = LinkFilesResponse),
        (status = 404, description = "Link not found", body = ErrorResponse),
        (status = 503, description = "Database or storage unavailable", body = ErrorResponse)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(link_id): Path<String>,
) -> Result<Json<LinkFilesResponse>, HttpAppError> {
    let response = state.viewer.list_files(&link_id).await?;
    Ok(Json(response))
}
