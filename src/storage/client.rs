use crate::config::StorageConfig;
use crate::storage::error::StorageError;
use crate::storage::models::S3ObjectStore;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use tracing::debug;

impl S3ObjectStore {
    /// Build an S3 client for the configured endpoint
    ///
    /// No request is sent here; the bucket probe is the facade's job.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let endpoint = config.endpoint_url();

        // Runtime is reused for every call made through this store
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| StorageError::Runtime(format!("Failed to create runtime: {e}")))?;

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "MinioStaticCredentials",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(credentials)
            // MinIO serves buckets under the path, not as subdomains
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .behavior_version(BehaviorVersion::latest())
            .build();

        debug!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Created S3-compatible client"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            runtime,
            endpoint,
        })
    }

    /// Endpoint URL this store talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
