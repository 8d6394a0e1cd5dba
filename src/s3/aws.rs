//! aws-sdk-s3 backed object store

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration, ObjectCannedAcl,
    VersioningConfiguration,
};
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::{ObjectAcl, ObjectStore, StoreError};

/// The provider's default region. CreateBucket in this region must not carry
/// a location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

const TEMPLATE_CONTENT_TYPE: &str = "application/json";

/// Object store backed by the AWS SDK, scoped to one region.
pub struct AwsObjectStore {
    client: Client,
}

impl AwsObjectStore {
    /// Create a store for `region` using the default credential chain.
    pub async fn for_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

impl From<ObjectAcl> for ObjectCannedAcl {
    fn from(acl: ObjectAcl) -> Self {
        match acl {
            ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
            ObjectAcl::Private => ObjectCannedAcl::Private,
        }
    }
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        match self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            // Only a modeled NotFound means absent; permission or throttling
            // failures must not be read as "does not exist".
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(StoreError::Request(err.to_string())),
        }
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        acl: ObjectAcl,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .acl(acl.into())
            .content_type(TEMPLATE_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|err| {
                // NoSuchBucket is not a modeled PutObject variant; match on
                // the service error code.
                let code = err.as_service_error().and_then(|e| e.code());
                if code == Some("NoSuchBucket") {
                    StoreError::NoSuchBucket {
                        bucket: bucket.to_string(),
                    }
                } else {
                    StoreError::Request(err.to_string())
                }
            })
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError> {
        let mut request = self.client.create_bucket().bucket(bucket);

        if let Some(constraint) = location_constraint(region) {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(constraint)
                    .build(),
            );
        }

        request
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StoreError::Request(err.to_string()))
    }

    async fn enable_versioning(&self, bucket: &str) -> Result<(), StoreError> {
        self.client
            .put_bucket_versioning()
            .bucket(bucket)
            .versioning_configuration(
                VersioningConfiguration::builder()
                    .status(BucketVersioningStatus::Enabled)
                    .build(),
            )
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StoreError::Request(err.to_string()))
    }
}

/// Location constraint for CreateBucket: required everywhere except the
/// provider's default region.
fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    (region != DEFAULT_REGION).then(|| BucketLocationConstraint::from(region))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_location_constraint_in_default_region() {
        assert!(location_constraint("us-east-1").is_none());
    }

    #[test]
    fn test_location_constraint_outside_default_region() {
        assert_eq!(
            location_constraint("eu-west-1"),
            Some(BucketLocationConstraint::from("eu-west-1"))
        );
    }

    #[test]
    fn test_acl_conversion() {
        assert_eq!(
            ObjectCannedAcl::from(ObjectAcl::PublicRead),
            ObjectCannedAcl::PublicRead
        );
        assert_eq!(
            ObjectCannedAcl::from(ObjectAcl::Private),
            ObjectCannedAcl::Private
        );
    }
}
