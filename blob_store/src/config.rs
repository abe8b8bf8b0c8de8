//! Blob storage configuration.

use serde::{Deserialize, Serialize};

use crate::{BlobError, BlobResult};

pub const DEFAULT_BUCKET: &str = "uploads";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Which backend holds the objects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlobStoreBackend {
    /// S3-compatible service (AWS S3, MinIO, ...).
    #[default]
    S3,
    /// Process-local in-memory store.
    Memory,
}

/// Configuration for blob storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobStorageConfig {
    pub backend: BlobStoreBackend,

    /// Store endpoint, either `host:port` or a full URL.
    pub endpoint: Option<String>,

    pub access_key: Option<String>,

    pub secret_key: Option<String>,

    pub region: String,

    /// Bucket holding every uploaded object.
    pub bucket: String,

    /// Scheme used when `endpoint` has none.
    pub use_ssl: bool,
}

impl Default for BlobStorageConfig {
    fn default() -> Self {
        Self {
            backend: BlobStoreBackend::default(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            region: DEFAULT_REGION.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            use_ssl: false,
        }
    }
}

impl BlobStorageConfig {
    /// In-memory storage for the given bucket.
    pub fn memory(bucket: &str) -> Self {
        Self {
            backend: BlobStoreBackend::Memory,
            bucket: bucket.to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> BlobResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(BlobError::InvalidConfig {
                reason: "bucket name must not be empty".to_string(),
            });
        }
        if self.backend == BlobStoreBackend::S3 {
            for (name, value) in [
                ("endpoint", &self.endpoint),
                ("access_key", &self.access_key),
                ("secret_key", &self.secret_key),
            ] {
                if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                    return Err(BlobError::InvalidConfig {
                        reason: format!("{} is required for the s3 backend", name),
                    });
                }
            }
        }
        Ok(())
    }

    /// Endpoint as a URL. A bare `host:port` gets a scheme from `use_ssl`.
    pub fn endpoint_url(&self) -> BlobResult<String> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| BlobError::InvalidConfig {
                reason: "endpoint is required for the s3 backend".to_string(),
            })?;
        if endpoint.contains("://") {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
        let scheme = if self.use_ssl { "https" } else { "http" };
        Ok(format!("{}://{}", scheme, endpoint.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_config(endpoint: &str) -> BlobStorageConfig {
        BlobStorageConfig {
            endpoint: Some(endpoint.to_string()),
            access_key: Some("minioadmin".to_string()),
            secret_key: Some("minioadmin".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = BlobStorageConfig::default();
        assert_eq!(config.backend, BlobStoreBackend::S3);
        assert_eq!(config.bucket, "uploads");
        assert_eq!(config.region, "us-east-1");
        assert!(!config.use_ssl);
    }

    #[test]
    fn test_endpoint_url_adds_scheme() {
        let mut config = s3_config("minio:9000");
        assert_eq!(config.endpoint_url().unwrap(), "http://minio:9000");

        config.use_ssl = true;
        assert_eq!(config.endpoint_url().unwrap(), "https://minio:9000");
    }

    #[test]
    fn test_endpoint_url_keeps_explicit_scheme() {
        let config = s3_config("https://s3.example.com/");
        assert_eq!(config.endpoint_url().unwrap(), "https://s3.example.com");
    }

    #[test]
    fn test_validate_requires_credentials_for_s3() {
        assert!(s3_config("minio:9000").validate().is_ok());

        let mut config = s3_config("minio:9000");
        config.secret_key = None;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("secret_key"));

        let mut config = s3_config("minio:9000");
        config.endpoint = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let config = BlobStorageConfig::memory("uploads");
        assert!(config.validate().is_ok());

        let config = BlobStorageConfig::memory("");
        assert!(config.validate().is_err());
    }
}
