//! Core blob store trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{BlobObject, BlobResult};

/// Object operations against a single bucket.
///
/// Backends are bound to the bucket they were built for. Callers are expected
/// to check [`bucket_exists`](BlobStore::bucket_exists) and create the bucket
/// before the first write; none of the other operations create it implicitly.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Name of the bucket this store reads and writes.
    fn bucket(&self) -> &str;

    async fn bucket_exists(&self) -> BlobResult<bool>;

    async fn create_bucket(&self) -> BlobResult<()>;

    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> BlobResult<()>;

    /// Every key in the bucket, in the order the store returns them.
    async fn list(&self) -> BlobResult<Vec<String>>;

    /// Open an object for streaming.
    ///
    /// Returns `BlobError::NotFound` if the object doesn't exist.
    async fn get(&self, key: &str) -> BlobResult<BlobObject>;
}
