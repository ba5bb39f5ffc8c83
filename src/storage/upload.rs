use crate::storage::error::BoxError;
use crate::storage::models::S3ObjectStore;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use tracing::debug;

impl S3ObjectStore {
    /// Upload a local file, replacing any object already stored under `key`
    pub fn put_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        self.runtime.block_on(async {
            // Stream from disk rather than loading the whole file
            let body = ByteStream::from_path(local_path).await?;

            debug!(bucket, key, path = %local_path.display(), "Uploading object");

            let response = self
                .client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(body)
                .send()
                .await?;

            debug!(bucket, key, etag = ?response.e_tag(), "Upload complete");
            Ok::<(), BoxError>(())
        })
    }
}
