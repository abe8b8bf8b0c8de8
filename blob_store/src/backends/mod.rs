//! Blob store backend implementations.

pub mod memory;
pub mod s3;

use futures::{StreamExt, TryStreamExt};
use object_store::{
    path::Path as ObjectPath,
    Attribute,
    AttributeValue,
    Attributes,
    GetResult,
    PutOptions,
};

use crate::{BlobError, BlobMetadata, BlobObject, BlobResult};

/// Parse a key into an object path without re-encoding it, so listed keys
/// round-trip to the same path on download.
pub(crate) fn object_path(key: &str) -> BlobResult<ObjectPath> {
    if key.trim().is_empty() {
        return Err(BlobError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".to_string(),
        });
    }
    Ok(ObjectPath::parse(key)?)
}

pub(crate) fn put_options(content_type: &str) -> PutOptions {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    PutOptions {
        attributes,
        ..Default::default()
    }
}

pub(crate) fn into_blob_object(result: GetResult) -> BlobObject {
    let content_type = result
        .attributes
        .get(&Attribute::ContentType)
        .map(|value| {
            let value: &str = value.as_ref();
            value.to_string()
        });
    let metadata = BlobMetadata {
        size_bytes: result.meta.size,
        content_type,
        etag: result.meta.e_tag.clone(),
    };
    let stream = result.into_stream().map_err(BlobError::from).boxed();
    BlobObject { metadata, stream }
}
