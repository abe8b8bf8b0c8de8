//! High-level blob storage used by the gateway.

use std::sync::Arc;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::{
    backends::{memory::MemoryBlobStore, s3::S3BlobStore},
    BlobObject,
    BlobResult,
    BlobStorageConfig,
    BlobStore,
    BlobStoreBackend,
};

/// Result of a PUT operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResult {
    /// Key the object was stored under.
    pub key: String,

    /// Size in bytes.
    pub size_bytes: u64,

    /// SHA256 hash of the data.
    pub sha256_hash: String,
}

/// Blob storage bound to the configured bucket.
///
/// This wraps a [`BlobStore`] backend; it is cheap to share behind an `Arc`
/// and safe to use from concurrent requests.
#[derive(Clone)]
pub struct BlobStorage {
    store: Arc<dyn BlobStore>,
}

impl BlobStorage {
    pub async fn new(config: &BlobStorageConfig) -> BlobResult<Self> {
        config.validate()?;
        let store: Arc<dyn BlobStore> = match config.backend {
            BlobStoreBackend::S3 => Arc::new(S3BlobStore::new(config).await?),
            BlobStoreBackend::Memory => Arc::new(MemoryBlobStore::new(&config.bucket)),
        };
        info!(
            backend = ?config.backend,
            bucket = %config.bucket,
            "using blob storage"
        );
        Ok(Self { store })
    }

    pub fn from_store(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    pub async fn bucket_exists(&self) -> BlobResult<bool> {
        self.store.bucket_exists().await
    }

    pub async fn create_bucket(&self) -> BlobResult<()> {
        self.store.create_bucket().await
    }

    pub async fn put(&self, key: &str, data: Bytes, content_type: &str) -> BlobResult<PutResult> {
        let size_bytes = data.len() as u64;
        let sha256_hash = format!("{:x}", Sha256::digest(&data));
        self.store.put(key, data, content_type).await?;
        Ok(PutResult {
            key: key.to_string(),
            size_bytes,
            sha256_hash,
        })
    }

    pub async fn list(&self) -> BlobResult<Vec<String>> {
        self.store.list().await
    }

    pub async fn get(&self, key: &str) -> BlobResult<BlobObject> {
        self.store.get(key).await
    }

    #[cfg(test)]
    pub async fn read_bytes(&self, key: &str) -> BlobResult<Bytes> {
        use bytes::BytesMut;
        use futures::StreamExt;

        let mut reader = self.get(key).await?.stream;
        let mut bytes = BytesMut::new();
        while let Some(chunk) = reader.next().await {
            bytes.extend_from_slice(&chunk?);
        }
        Ok(bytes.into())
    }
}
