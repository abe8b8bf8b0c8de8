use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use blob_store::BlobError;
use tracing::{error, warn};

use super::RouteState;
use crate::http_objects::FilegateAPIError;

/// Download a stored file
#[utoipa::path(
    get,
    path = "/download/{name}",
    tag = "retrieve",
    params(
        ("name" = String, Path, description = "Name of the stored file")
    ),
    responses(
        (status = 200, description = "File contents", content_type = "application/octet-stream"),
        (status = 400, description = "Missing or invalid filename"),
        (status = 404, description = "File not found"),
        (status = INTERNAL_SERVER_ERROR, description = "Error retrieving file")
    ),
)]
pub async fn download_file(
    Path(name): Path<String>,
    State(state): State<RouteState>,
) -> Result<Response<Body>, FilegateAPIError> {
    let object = state
        .blob_storage
        .get(&name)
        .await
        .map_err(|e| match e {
            e if e.is_not_found() => {
                warn!(name = %name, "file not found");
                FilegateAPIError::not_found("File not found")
            }
            BlobError::InvalidKey { .. } => FilegateAPIError::bad_request("Invalid filename"),
            e => {
                error!(name = %name, "error retrieving file: {}", e);
                FilegateAPIError::internal_error("Error retrieving file")
            }
        })?;

    let mut response = Response::builder()
        .header(header::CONTENT_TYPE, object.metadata.content_type_or_default())
        .header(header::CONTENT_LENGTH, object.metadata.size_bytes);
    if let Some(etag) = object.metadata.etag.as_deref() {
        response = response.header(header::ETAG, quoted_etag(etag));
    }
    response.body(Body::from_stream(object.stream)).map_err(|e| {
        error!(name = %name, "error building download response: {}", e);
        FilegateAPIError::internal_error("Error retrieving file")
    })
}

// S3 sends quoted entity-tags; other stores may hand back a bare value.
fn quoted_etag(etag: &str) -> String {
    let opaque = etag.strip_prefix("W/").unwrap_or(etag);
    if opaque.len() >= 2 && opaque.starts_with('"') && opaque.ends_with('"') {
        return etag.to_string();
    }
    format!("\"{}\"", etag.trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_etag() {
        assert_eq!(quoted_etag("0"), "\"0\"");
        assert_eq!(
            quoted_etag("\"9b2cf535f27731c974343645a3985328\""),
            "\"9b2cf535f27731c974343645a3985328\""
        );
        assert_eq!(quoted_etag("W/\"abc\""), "W/\"abc\"");
        assert_eq!(quoted_etag("abc\""), "\"abc\"");
        assert_eq!(quoted_etag("\""), "\"\"");
    }
}
