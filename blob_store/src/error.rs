//! Error types for blob store operations.

use std::fmt;

/// Result type for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur during blob store operations.
#[derive(Debug)]
pub enum BlobError {
    /// No object stored under the key.
    NotFound { key: String },

    /// The configured bucket does not exist in the store.
    BucketNotFound { bucket: String },

    /// Key cannot be used as an object name.
    InvalidKey { key: String, reason: String },

    /// Storage configuration is incomplete or malformed.
    InvalidConfig { reason: String },

    /// Network or service error talking to the object store.
    NetworkError { source: anyhow::Error },

    /// Generic error.
    Other { source: anyhow::Error },
}

impl BlobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlobError::NotFound { .. })
    }
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::NotFound { key } => write!(f, "Blob not found: {}", key),
            BlobError::BucketNotFound { bucket } => write!(f, "Bucket not found: {}", bucket),
            BlobError::InvalidKey { key, reason } => {
                write!(f, "Invalid key '{}': {}", key, reason)
            }
            BlobError::InvalidConfig { reason } => {
                write!(f, "Invalid blob storage config: {}", reason)
            }
            BlobError::NetworkError { source } => write!(f, "Network error: {}", source),
            BlobError::Other { source } => write!(f, "Blob store error: {}", source),
        }
    }
}

impl std::error::Error for BlobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BlobError::NetworkError { source } => Some(source.as_ref()),
            BlobError::Other { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for BlobError {
    fn from(err: anyhow::Error) -> Self {
        BlobError::Other { source: err }
    }
}

impl From<object_store::Error> for BlobError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => BlobError::NotFound { key: path },
            _ => BlobError::NetworkError {
                source: anyhow::Error::from(err),
            },
        }
    }
}

impl From<object_store::path::Error> for BlobError {
    fn from(err: object_store::path::Error) -> Self {
        let key = match &err {
            object_store::path::Error::EmptySegment { path } |
            object_store::path::Error::BadSegment { path, .. } => path.clone(),
            _ => String::new(),
        };
        BlobError::InvalidKey {
            key,
            reason: err.to_string(),
        }
    }
}
