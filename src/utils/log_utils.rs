//! Logging setup for the binary

use tracing_subscriber::EnvFilter;

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Normal execution, no verbose flag: warnings only
    Normal = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

impl LogLevel {
    /// Map a `-v` count onto a level
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Normal,
            1 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    /// Filter directive for this level
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Normal => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over the verbosity count. Calling this twice is
/// harmless; the second call leaves the first subscriber in place.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LogLevel::from_verbosity(verbosity).directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
