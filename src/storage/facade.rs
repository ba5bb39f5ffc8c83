use crate::config::StorageConfig;
use crate::interfaces::ObjectStore;
use crate::storage::error::{Operation, StorageError};
use crate::storage::models::S3ObjectStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Upload/download/exists/presign against the single configured bucket
///
/// Holds no mutable state after construction. Whether it can be shared across
/// threads depends on `S`; the S3 backend is `Send + Sync`. Calls on the same
/// object name are not ordered against each other.
pub struct StorageFacade<S = S3ObjectStore> {
    config: StorageConfig,
    store: S,
}

impl StorageFacade<S3ObjectStore> {
    /// Load the config file, connect, and make sure the bucket is there
    ///
    /// # Errors
    ///
    /// - `StorageError::Config` if the file or its `[minio]` section is unusable
    /// - `StorageError::BucketNotFound` if the bucket does not exist (it is never created)
    /// - `StorageError::Operation` if the bucket probe itself fails
    pub fn initialize<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config = StorageConfig::load(config_path)?;
        let store = S3ObjectStore::new(&config)?;
        Self::with_store(config, store)
    }
}

impl<S: ObjectStore> StorageFacade<S> {
    /// Wrap an existing store, probing the configured bucket once
    pub fn with_store(config: StorageConfig, store: S) -> Result<Self> {
        let exists = store
            .bucket_exists(&config.bucket)
            .map_err(|e| StorageError::operation(Operation::ProbeBucket, &config.bucket, e))?;

        if !exists {
            return Err(StorageError::BucketNotFound(config.bucket));
        }

        info!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            secure = config.secure,
            "Storage facade ready"
        );

        Ok(Self { config, store })
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    /// Backend the facade forwards to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Upload a local file as `object_name`, overwriting any existing object
    ///
    /// Returns `object_name` unchanged.
    pub fn upload<P: AsRef<Path>>(&self, object_name: &str, local_path: P) -> Result<String> {
        let path = local_path.as_ref();

        if !path.is_file() {
            return Err(StorageError::LocalFileNotFound(path.to_path_buf()));
        }

        self.store
            .put_file(self.bucket(), object_name, path)
            .map_err(|e| StorageError::operation(Operation::Upload, object_name, e))?;

        Ok(object_name.to_string())
    }

    /// Download `object_name` into `local_path`, replacing whatever is there
    ///
    /// An existing file is removed before the fetch starts. If the fetch then
    /// fails, `local_path` is left absent.
    pub fn download<P: AsRef<Path>>(&self, object_name: &str, local_path: P) -> Result<PathBuf> {
        let path = local_path.as_ref();

        if path.exists() {
            fs::remove_file(path)
                .map_err(|e| StorageError::operation(Operation::Download, object_name, e))?;
        }

        self.store
            .get_to_file(self.bucket(), object_name, path)
            .map_err(|e| StorageError::operation(Operation::Download, object_name, e))?;

        Ok(path.to_path_buf())
    }

    /// Check whether `object_name` is present in the bucket
    pub fn exists(&self, object_name: &str) -> Result<bool> {
        self.store
            .object_exists(self.bucket(), object_name)
            .map_err(|e| StorageError::operation(Operation::Stat, object_name, e))
    }

    /// Signed, time-limited GET URL for `object_name`
    ///
    /// The object does not have to exist; a URL for a missing object fails
    /// only when it is fetched.
    pub fn presigned_download_url(&self, object_name: &str) -> Result<String> {
        let expires_in = Duration::from_secs(self.config.presign_expiry_secs);

        self.store
            .presign_get(self.bucket(), object_name, expires_in)
            .map_err(|e| StorageError::operation(Operation::Presign, object_name, e))
    }
}
