//! S3 object store module
//!
//! The storage provider is consumed through the `ObjectStore` trait: an
//! existence probe, a put with a canned ACL, bucket creation, and
//! versioning enable. Production code uses the aws-sdk-s3 backed
//! [`AwsObjectStore`]; tests swap in a mock.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

mod aws;

pub use aws::{AwsObjectStore, DEFAULT_REGION};

/// Object store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// The destination bucket does not exist. Recoverable when bucket
    /// auto-creation is enabled.
    #[error("Bucket {bucket} does not exist")]
    NoSuchBucket { bucket: String },

    /// Any other provider failure: permission, throttling, transport.
    /// Never conflated with "object does not exist".
    #[error("S3 request failed: {0}")]
    Request(String),
}

/// Canned ACL applied to uploaded objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAcl {
    PublicRead,
    Private,
}

/// Capability interface over the object storage provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Probe whether `key` exists in `bucket`.
    ///
    /// Only a genuine not-found maps to `Ok(false)`; every other provider
    /// error surfaces as `Err`.
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError>;

    /// Write `body` to `bucket`/`key` with the given canned ACL.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        acl: ObjectAcl,
    ) -> Result<(), StoreError>;

    /// Create `bucket`, with a location constraint for every region except
    /// the provider's default region.
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError>;

    /// Enable versioning on `bucket`.
    async fn enable_versioning(&self, bucket: &str) -> Result<(), StoreError>;
}
