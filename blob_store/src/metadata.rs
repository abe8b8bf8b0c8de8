//! Blob metadata structures.

use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::BlobResult;

/// Content type used when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Metadata about a stored object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlobMetadata {
    /// Size in bytes.
    pub size_bytes: u64,

    /// Content type recorded at upload time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// ETag from the object store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl BlobMetadata {
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// An object opened for reading: its metadata and a stream over its bytes.
pub struct BlobObject {
    pub metadata: BlobMetadata,
    pub stream: BoxStream<'static, BlobResult<Bytes>>,
}

impl std::fmt::Debug for BlobObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobObject")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
