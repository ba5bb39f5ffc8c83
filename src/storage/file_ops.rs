use crate::storage::error::BoxError;
use crate::storage::models::S3ObjectStore;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;
use tracing::debug;

impl S3ObjectStore {
    /// Check if an object exists
    ///
    /// Only "not found" maps to `false`; every other failure is an error.
    pub fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, BoxError> {
        self.runtime.block_on(async {
            let result = self.client.head_object().bucket(bucket).key(key).send().await;

            match result {
                Ok(head) => {
                    debug!(bucket, key, size = ?head.content_length(), "Object exists");
                    Ok(true)
                }
                Err(e) if e.as_service_error().is_some_and(is_missing_object) => {
                    debug!(bucket, key, "Object does not exist");
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Sign a GET request for `key`, valid for `expires_in`
    ///
    /// Signing is local; the object is not looked up.
    pub fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, BoxError> {
        self.runtime.block_on(async {
            let presigning = PresigningConfig::expires_in(expires_in)?;
            let request = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .presigned(presigning)
                .await?;

            debug!(bucket, key, expires_in_secs = expires_in.as_secs(), "Presigned download URL");
            Ok::<String, BoxError>(request.uri().to_string())
        })
    }
}

fn is_missing_object(err: &HeadObjectError) -> bool {
    err.is_not_found() || err.code() == Some("NoSuchKey")
}
