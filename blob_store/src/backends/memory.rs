//! In-memory blob store backend.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{memory::InMemory, ObjectStore, PutPayload};

use super::{into_blob_object, object_path, put_options};
use crate::{BlobError, BlobObject, BlobResult, BlobStore};

/// Blob store kept in process memory.
///
/// Behaves like an S3 bucket that starts out missing: writes and listings
/// fail with `BucketNotFound` until [`create_bucket`](BlobStore::create_bucket)
/// has run, and reads report `NotFound`.
pub struct MemoryBlobStore {
    object_store: Arc<InMemory>,
    bucket: String,
    bucket_created: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            object_store: Arc::new(InMemory::new()),
            bucket: bucket.to_string(),
            bucket_created: AtomicBool::new(false),
        }
    }

    fn require_bucket(&self) -> BlobResult<()> {
        if self.bucket_created.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(BlobError::BucketNotFound {
                bucket: self.bucket.clone(),
            })
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> BlobResult<bool> {
        Ok(self.bucket_created.load(Ordering::Acquire))
    }

    async fn create_bucket(&self) -> BlobResult<()> {
        self.bucket_created.store(true, Ordering::Release);
        Ok(())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> BlobResult<()> {
        let path = object_path(key)?;
        self.require_bucket()?;
        self.object_store
            .put_opts(&path, PutPayload::from(data), put_options(content_type))
            .await?;
        Ok(())
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
        self.require_bucket()?;
        let keys: Vec<String> = self
            .object_store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await?;
        Ok(keys)
    }

    async fn get(&self, key: &str) -> BlobResult<BlobObject> {
        let path = object_path(key)?;
        if self.require_bucket().is_err() {
            return Err(BlobError::NotFound {
                key: key.to_string(),
            });
        }
        let result = self.object_store.get(&path).await?;
        Ok(into_blob_object(result))
    }
}
