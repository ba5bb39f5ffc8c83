use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::validators::{expand_home, validate};
use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Operation to run against the configured bucket
    #[arg(short, long, value_enum)]
    pub mode: Mode,

    /// Object name (key) inside the bucket, e.g. reports/2024/q1.xlsx
    #[arg(short, long, value_name = "NAME")]
    pub object: String,

    /// Local file to upload from (upload) or write to (download)
    #[arg(short, long, value_name = "PATH")]
    pub local_path: Option<PathBuf>,

    /// INI file holding the [minio] section
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        value_parser = expand_home
    )]
    pub config: PathBuf,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Upload --local-path as --object
    Upload,
    /// Download --object into --local-path
    Download,
    /// Print whether --object exists
    Exists,
    /// Print a presigned download URL for --object
    Url,
}

impl Mode {
    /// Whether this mode reads or writes a local file
    #[must_use]
    pub fn needs_local_path(self) -> bool {
        matches!(self, Mode::Upload | Mode::Download)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Exists,
            object: String::new(),
            local_path: None,
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            verbose: 0,
        }
    }
}

impl Args {
    /// Validates the arguments
    ///
    /// # Returns
    ///
    /// * `Result<(), String>` - Ok if valid, Err with message if invalid
    ///
    /// # Errors
    ///
    /// Returns an error if the combination of arguments is invalid.
    pub fn validate(&self) -> Result<(), String> {
        // Call the validate function from validators.rs
        validate(self)
    }
}
