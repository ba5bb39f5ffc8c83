use crate::storage::error::BoxError;
use crate::storage::models::S3ObjectStore;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

impl S3ObjectStore {
    /// Write an object's bytes to `local_path`
    ///
    /// The file is only created once the service has answered the GET, so a
    /// missing object leaves nothing behind on disk.
    pub fn get_to_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        self.runtime.block_on(async {
            debug!(bucket, key, path = %local_path.display(), "Downloading object");

            let response = self.client.get_object().bucket(bucket).key(key).send().await?;

            debug!(
                bucket,
                key,
                content_length = ?response.content_length(),
                etag = ?response.e_tag(),
                "Download response received"
            );

            let mut body = response.body;
            let mut file = tokio::fs::File::create(local_path).await?;
            let mut written: u64 = 0;
            while let Some(chunk) = body.try_next().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;

            debug!(bucket, key, bytes = written, "Download complete");
            Ok::<(), BoxError>(())
        })
    }
}
