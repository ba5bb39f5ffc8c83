pub mod app;
pub mod args;
pub mod config;
pub mod interfaces;
pub mod storage;
pub mod utils {
    pub mod log_utils;
}

pub use app::run_app;
pub use args::Args;
pub use config::{ConfigError, FieldError, StorageConfig};
pub use storage::{Operation, S3ObjectStore, StorageError, StorageFacade};
