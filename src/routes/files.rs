use axum::{extract::State, Json};
use tracing::error;

use super::RouteState;
use crate::http_objects::FilegateAPIError;

/// List all stored files
#[utoipa::path(
    get,
    path = "/files",
    tag = "retrieve",
    responses(
        (status = 200, description = "Names of all stored files", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Error listing objects")
    ),
)]
pub async fn list_files(
    State(state): State<RouteState>,
) -> Result<Json<Vec<String>>, FilegateAPIError> {
    let keys = state.blob_storage.list().await.map_err(|e| {
        error!(bucket = state.blob_storage.bucket(), "error listing objects: {}", e);
        FilegateAPIError::internal_error("Error listing objects")
    })?;
    Ok(Json(keys))
}
