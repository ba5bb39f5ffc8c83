use crate::config::ConfigError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Cause carried by a failed backend call
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The storage call that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ProbeBucket,
    Upload,
    Download,
    Stat,
    Presign,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ProbeBucket => "probe bucket",
            Operation::Upload => "upload",
            Operation::Download => "download",
            Operation::Stat => "stat",
            Operation::Presign => "presign",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bucket does not exist: {0}")]
    BucketNotFound(String),

    #[error("Local file does not exist: {}", .0.display())]
    LocalFileNotFound(PathBuf),

    #[error("Failed to {operation} '{target}': {}", error_chain(.source.as_ref()))]
    Operation {
        operation: Operation,
        target: String,
        #[source]
        source: BoxError,
    },

    /// The tokio runtime behind the blocking calls could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl StorageError {
    pub fn operation(operation: Operation, target: &str, source: impl Into<BoxError>) -> Self {
        StorageError::Operation {
            operation,
            target: target.to_string(),
            source: source.into(),
        }
    }

    /// The failed call, for `Operation` errors
    pub fn failed_operation(&self) -> Option<Operation> {
        match self {
            StorageError::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

// SDK errors print a bare "service error" at the top level; the useful part
// (error code, message) sits further down the chain.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = cause.source();
    }
    rendered
}
