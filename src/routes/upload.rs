use axum::extract::{multipart::MultipartRejection, Multipart, State};
use blob_store::{BlobError, DEFAULT_CONTENT_TYPE};
use bytes::Bytes;
use tracing::{error, info};

use super::RouteState;
use crate::http_objects::FilegateAPIError;

const FILE_FIELD: &str = "file";

struct UploadedFile {
    name: String,
    content_type: String,
    data: Bytes,
}

/// Strips any client-side directory from a submitted filename. Both
/// separators are handled since browsers on Windows may send either.
fn object_name(file_name: &str) -> Result<String, FilegateAPIError> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return Err(FilegateAPIError::bad_request("Invalid filename"));
    }
    Ok(name.to_string())
}

async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, FilegateAPIError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?;
        return Ok(UploadedFile {
            name: object_name(&file_name)?,
            content_type,
            data,
        });
    }
    Err(FilegateAPIError::bad_request("Error retrieving the file"))
}

/// Upload a file
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "multipart/form-data", content = inline(crate::http_objects::UploadFile)),
    tag = "ingestion",
    responses(
        (status = 200, description = "File uploaded", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing file part or malformed form"),
        (status = 413, description = "File too large"),
        (status = INTERNAL_SERVER_ERROR, description = "Internal Server Error")
    ),
)]
pub async fn upload_file(
    State(state): State<RouteState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, FilegateAPIError> {
    let file = read_file_field(multipart?).await?;
    let storage = &state.blob_storage;

    // Two concurrent first uploads may both try to create the bucket; the
    // loser gets a 500.
    let exists = storage.bucket_exists().await.map_err(|e| {
        error!(bucket = storage.bucket(), "error checking bucket: {}", e);
        FilegateAPIError::internal_error("Error checking bucket")
    })?;
    if !exists {
        storage.create_bucket().await.map_err(|e| {
            error!(bucket = storage.bucket(), "error creating bucket: {}", e);
            FilegateAPIError::internal_error("Error creating bucket")
        })?;
        info!(bucket = storage.bucket(), "created bucket");
    }

    let put_result = storage
        .put(&file.name, file.data, &file.content_type)
        .await
        .map_err(|e| match e {
            BlobError::InvalidKey { .. } => FilegateAPIError::bad_request("Invalid filename"),
            e => {
                error!(name = %file.name, "error uploading file: {}", e);
                FilegateAPIError::internal_error("Error uploading file")
            }
        })?;

    info!(
        name = %put_result.key,
        size_bytes = put_result.size_bytes,
        sha256 = %put_result.sha256_hash,
        content_type = %file.content_type,
        "file uploaded"
    );
    Ok(format!(
        "File {} uploaded to bucket '{}' successfully!",
        put_result.key,
        storage.bucket()
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_object_name_strips_directories() {
        assert_eq!(object_name("report.pdf").unwrap(), "report.pdf");
        assert_eq!(object_name("/home/me/report.pdf").unwrap(), "report.pdf");
        assert_eq!(object_name(r"C:\Users\me\report.pdf").unwrap(), "report.pdf");
        assert_eq!(
            object_name("holiday video #1.mp4").unwrap(),
            "holiday video #1.mp4"
        );
        assert_eq!(object_name("docs/ spaced.txt ").unwrap(), " spaced.txt ");
    }

    #[test]
    fn test_object_name_rejects_empty_and_dots() {
        for name in ["", "dir/", "..", "a/.", "C:\\tmp\\.."] {
            let err = object_name(name).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{:?}", name);
        }
    }
}
