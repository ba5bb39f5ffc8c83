use aws_sdk_s3::Client;

/// `ObjectStore` backed by the AWS S3 SDK, pointed at a MinIO-style endpoint
pub struct S3ObjectStore {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) endpoint: String,
}
