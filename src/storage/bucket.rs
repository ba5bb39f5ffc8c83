use crate::storage::error::BoxError;
use crate::storage::models::S3ObjectStore;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use tracing::debug;

impl S3ObjectStore {
    /// Check whether a bucket exists, without creating it
    pub fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError> {
        self.runtime.block_on(async {
            debug!(bucket, "Probing bucket");

            match self.client.head_bucket().bucket(bucket).send().await {
                Ok(_) => Ok(true),
                Err(e) if e.as_service_error().is_some_and(is_missing_bucket) => Ok(false),
                Err(e) => Err(e.into()),
            }
        })
    }
}

fn is_missing_bucket(err: &HeadBucketError) -> bool {
    err.is_not_found() || err.code() == Some("NoSuchBucket")
}
