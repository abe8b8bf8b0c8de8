use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, ToSchema, Serialize, Deserialize)]
pub struct FilegateAPIError {
    #[serde(skip)]
    status_code: StatusCode,
    message: String,
}

impl FilegateAPIError {
    pub fn new(status_code: StatusCode, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for FilegateAPIError {
    fn into_response(self) -> Response {
        error!("API Error: {} - {}", self.status_code, self.message);
        (self.status_code, self.message).into_response()
    }
}

// A body that overruns the upload limit keeps its 413; every other
// malformed form is a client error.
impl From<MultipartError> for FilegateAPIError {
    fn from(e: MultipartError) -> Self {
        error!("error reading multipart body: {}", e.body_text());
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(StatusCode::PAYLOAD_TOO_LARGE, "File too large");
        }
        Self::bad_request("Error parsing form data")
    }
}

impl From<MultipartRejection> for FilegateAPIError {
    fn from(e: MultipartRejection) -> Self {
        error!("invalid multipart request: {}", e.body_text());
        Self::bad_request("Error parsing form data")
    }
}

/// Multipart body accepted by `POST /upload`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadFile {
    #[schema(format = "binary")]
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_is_plain_message() {
        let response = FilegateAPIError::not_found("File not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_constructors() {
        let err = FilegateAPIError::bad_request("Missing filename");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing filename");

        let err = FilegateAPIError::internal_error("Error listing objects");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
