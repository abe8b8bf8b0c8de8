//! S3 blob store backend using object_store for object I/O and aws-sdk-s3 for
//! bucket management.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::SdkError,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client as S3Client,
};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    aws::{AmazonS3, AmazonS3Builder},
    ObjectStore,
    PutPayload,
};
use tracing::debug;

use super::{into_blob_object, object_path, put_options};
use crate::{config::DEFAULT_REGION, BlobError, BlobObject, BlobResult, BlobStorageConfig, BlobStore};

/// S3 blob store backend.
pub struct S3BlobStore {
    /// object_store client for data I/O.
    object_store: Arc<AmazonS3>,

    /// AWS SDK S3 client for bucket existence checks and creation.
    s3_client: S3Client,

    bucket: String,

    region: String,
}

impl S3BlobStore {
    /// Build both clients from the storage config. No request is sent to the
    /// store here; bad credentials surface on the first operation.
    pub async fn new(config: &BlobStorageConfig) -> BlobResult<Self> {
        config.validate()?;
        let endpoint = config.endpoint_url()?;
        let access_key = config.access_key.clone().unwrap_or_default();
        let secret_key = config.secret_key.clone().unwrap_or_default();

        let object_store = AmazonS3Builder::new()
            .with_endpoint(&endpoint)
            .with_allow_http(endpoint.starts_with("http://"))
            .with_virtual_hosted_style_request(false)
            .with_region(&config.region)
            .with_access_key_id(&access_key)
            .with_secret_access_key(&secret_key)
            .with_bucket_name(&config.bucket)
            .build()
            .map_err(|e| BlobError::InvalidConfig {
                reason: format!("failed to build object store client: {}", e),
            })?;

        let credentials = Credentials::new(access_key, secret_key, None, None, "filegate");
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(credentials)
            .load()
            .await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();
        let s3_client = S3Client::from_conf(s3_config);

        debug!(
            endpoint = %endpoint,
            bucket = %config.bucket,
            region = %config.region,
            "Created S3 blob store"
        );

        Ok(Self {
            object_store: Arc::new(object_store),
            s3_client,
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        })
    }

    fn create_bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        // us-east-1 rejects an explicit location constraint.
        if self.region == DEFAULT_REGION {
            return None;
        }
        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build(),
        )
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> BlobResult<bool> {
        match self.s3_client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(e)) if e.err().is_not_found() => Ok(false),
            Err(e) => Err(BlobError::NetworkError {
                source: anyhow!("failed to check bucket {}: {}", self.bucket, e),
            }),
        }
    }

    async fn create_bucket(&self) -> BlobResult<()> {
        self.s3_client
            .create_bucket()
            .bucket(&self.bucket)
            .set_create_bucket_configuration(self.create_bucket_configuration())
            .send()
            .await
            .map_err(|e| BlobError::NetworkError {
                source: anyhow!("failed to create bucket {}: {}", self.bucket, e),
            })?;
        debug!(bucket = %self.bucket, "Created bucket");
        Ok(())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> BlobResult<()> {
        let path = object_path(key)?;
        self.object_store
            .put_opts(&path, PutPayload::from(data), put_options(content_type))
            .await?;
        Ok(())
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
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
        let result = self.object_store.get(&path).await?;
        Ok(into_blob_object(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(region: &str) -> BlobStorageConfig {
        BlobStorageConfig {
            endpoint: Some("localhost:9000".to_string()),
            access_key: Some("minioadmin".to_string()),
            secret_key: Some("minioadmin".to_string()),
            region: region.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_new_builds_without_contacting_store() {
        let store = S3BlobStore::new(&config(DEFAULT_REGION)).await.unwrap();
        assert_eq!(store.bucket(), "uploads");
        assert!(store.create_bucket_configuration().is_none());
    }

    #[tokio::test]
    async fn test_location_constraint_outside_us_east_1() {
        let store = S3BlobStore::new(&config("eu-west-1")).await.unwrap();
        let configuration = store.create_bucket_configuration().unwrap();
        assert_eq!(
            configuration.location_constraint(),
            Some(&BucketLocationConstraint::EuWest1)
        );
    }

    #[tokio::test]
    async fn test_new_rejects_missing_credentials() {
        let mut cfg = config(DEFAULT_REGION);
        cfg.access_key = None;
        let err = S3BlobStore::new(&cfg).await.err().unwrap();
        assert!(matches!(err, BlobError::InvalidConfig { .. }));
    }
}
