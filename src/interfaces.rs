use crate::storage::{BoxError, S3ObjectStore};
use mockall::automock;
use std::path::Path;
use std::time::Duration;

/// Blocking object-storage calls the facade is built on, to facilitate testing
///
/// Implementations report "bucket/object absent" as `Ok(false)` from the two
/// existence checks and every other failure as `Err`.
#[automock]
pub trait ObjectStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError>;
    fn put_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError>;
    fn get_to_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError>;
    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, BoxError>;
    fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, BoxError>;
}

/// Default implementation of ObjectStore that uses the S3 SDK client
impl ObjectStore for S3ObjectStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool, BoxError> {
        S3ObjectStore::bucket_exists(self, bucket)
    }

    fn put_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        S3ObjectStore::put_file(self, bucket, key, local_path)
    }

    fn get_to_file(&self, bucket: &str, key: &str, local_path: &Path) -> Result<(), BoxError> {
        S3ObjectStore::get_to_file(self, bucket, key, local_path)
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, BoxError> {
        S3ObjectStore::object_exists(self, bucket, key)
    }

    fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, BoxError> {
        S3ObjectStore::presign_get(self, bucket, key, expires_in)
    }
}
