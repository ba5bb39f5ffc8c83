pub mod bucket;
pub mod client;
pub mod download;
pub mod error;
pub mod facade;
pub mod file_ops;
pub mod models;
pub mod upload;

// Re-export types for convenient access from other modules
pub use error::{BoxError, Operation, StorageError};
pub use facade::StorageFacade;
pub use models::S3ObjectStore;
