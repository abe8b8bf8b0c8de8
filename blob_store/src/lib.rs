//! Object storage for the filegate gateway.
//!
//! The gateway keeps every uploaded file in a single bucket of an
//! S3-compatible store. This crate provides:
//!
//! - [`BlobStore`]: the per-bucket operations a backend implements
//! - [`S3BlobStore`]: S3/MinIO backend (object_store for data, aws-sdk-s3 for
//!   bucket management)
//! - [`MemoryBlobStore`]: in-process backend for local runs and tests
//! - [`BlobStorage`]: the handle the HTTP layer shares between requests
//!
//! # Usage
//!
//! ```rust,no_run
//! use blob_store::{BlobStorage, BlobStorageConfig};
//! use bytes::Bytes;
//!
//! # async fn example() -> Result<(), blob_store::BlobError> {
//! let config = BlobStorageConfig {
//!     endpoint: Some("localhost:9000".to_string()),
//!     access_key: Some("minioadmin".to_string()),
//!     secret_key: Some("minioadmin".to_string()),
//!     ..Default::default()
//! };
//! let storage = BlobStorage::new(&config).await?;
//! if !storage.bucket_exists().await? {
//!     storage.create_bucket().await?;
//! }
//! storage
//!     .put("notes.txt", Bytes::from_static(b"hi"), "text/plain")
//!     .await?;
//! let keys = storage.list().await?;
//! # Ok(())
//! # }
//! ```

mod backends;
mod config;
mod error;
mod metadata;
mod storage;
mod traits;

pub use backends::{memory::MemoryBlobStore, s3::S3BlobStore};
pub use config::{BlobStorageConfig, BlobStoreBackend, DEFAULT_BUCKET, DEFAULT_REGION};
pub use error::{BlobError, BlobResult};
pub use metadata::{BlobMetadata, BlobObject, DEFAULT_CONTENT_TYPE};
pub use storage::{BlobStorage, PutResult};
pub use traits::BlobStore;
