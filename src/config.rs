use ini::{Ini, ParseOption, Properties};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Section of the INI file holding the storage settings
pub const CONFIG_SECTION: &str = "minio";

/// Where the binary looks for its config when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/app/conf/config.ini";

pub const DEFAULT_REGION: &str = "us-east-1";

/// Longest validity a SigV4 presigned URL may carry (7 days)
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 604_800;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Config file must be in .ini format: {}", .0.display())]
    NotIni(PathBuf),

    #[error("INI parsing error: {0}")]
    IniParse(String),

    #[error("Config file has no [{0}] section")]
    MissingSection(String),

    #[error("Invalid [minio] settings: {}", join_field_errors(.0))]
    InvalidFields(Vec<FieldError>),
}

/// A single violation found while validating the `[minio]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing(&'static str),
    InvalidEndpoint(String),
    InvalidBool { key: &'static str, value: String },
    InvalidExpiry(String),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing(key) => write!(f, "'{key}' is missing or empty"),
            FieldError::InvalidEndpoint(value) => {
                write!(f, "'endpoint' must be host:port without scheme or path, got '{value}'")
            }
            FieldError::InvalidBool { key, value } => {
                write!(f, "'{key}' is not a boolean: '{value}'")
            }
            FieldError::InvalidExpiry(value) => write!(
                f,
                "'presign_expiry_secs' must be between 1 and {MAX_PRESIGN_EXPIRY_SECS}, got '{value}'"
            ),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated connection settings for one bucket
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// `host:port` of the storage service
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// Use https instead of http
    pub secure: bool,
    pub region: String,
    /// Lifetime of presigned download URLs, in seconds
    pub presign_expiry_secs: u64,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_prefix: String = self.access_key.chars().take(4).collect();
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &format!("{key_prefix}****"))
            .field("secret_key", &"****")
            .field("bucket", &self.bucket)
            .field("secure", &self.secure)
            .field("region", &self.region)
            .field("presign_expiry_secs", &self.presign_expiry_secs)
            .finish()
    }
}

impl StorageConfig {
    /// Load and validate the `[minio]` section of an INI file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file is absent, is not an `.ini` file,
    /// cannot be parsed, lacks the section, or has invalid settings.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let path = config_path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let is_ini = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"));
        if !is_ini {
            return Err(ConfigError::NotIni(path.to_path_buf()));
        }

        let conf = Ini::load_from_file_opt(path, raw_values())
            .map_err(|e| ConfigError::IniParse(e.to_string()))?;
        Self::from_ini(&conf)
    }

    /// Same as `load`, for INI text already in memory
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let conf = Ini::load_from_str_opt(content, raw_values())
            .map_err(|e| ConfigError::IniParse(e.to_string()))?;
        Self::from_ini(&conf)
    }

    /// Build a config from an already parsed INI document
    ///
    /// All fields are checked in one pass so the error lists every problem.
    pub fn from_ini(conf: &Ini) -> Result<Self, ConfigError> {
        let section = conf
            .section(Some(CONFIG_SECTION))
            .ok_or_else(|| ConfigError::MissingSection(CONFIG_SECTION.to_string()))?;

        let mut errors = Vec::new();
        let mut require = |key: &'static str| match lookup(section, key) {
            Some(value) => value.to_string(),
            None => {
                errors.push(FieldError::Missing(key));
                String::new()
            }
        };
        let endpoint = require("endpoint");
        let access_key = require("access_key");
        let secret_key = require("secret_key");
        let bucket = require("bucket");

        if !endpoint.is_empty() && !is_valid_endpoint(&endpoint) {
            errors.push(FieldError::InvalidEndpoint(endpoint.clone()));
        }

        let secure = match lookup(section, "secure") {
            None => false,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                errors.push(FieldError::InvalidBool {
                    key: "secure",
                    value: raw.to_string(),
                });
                false
            }),
        };

        let region = lookup(section, "region").unwrap_or(DEFAULT_REGION).to_string();

        let presign_expiry_secs = match lookup(section, "presign_expiry_secs") {
            None => MAX_PRESIGN_EXPIRY_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if (1..=MAX_PRESIGN_EXPIRY_SECS).contains(&secs) => secs,
                _ => {
                    errors.push(FieldError::InvalidExpiry(raw.to_string()));
                    MAX_PRESIGN_EXPIRY_SECS
                }
            },
        };

        if !errors.is_empty() {
            return Err(ConfigError::InvalidFields(errors));
        }

        Ok(Self {
            endpoint,
            access_key,
            secret_key,
            bucket,
            secure,
            region,
            presign_expiry_secs,
        })
    }

    /// Full endpoint URL handed to the S3 client
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }
}

// Credentials are taken verbatim: no backslash escapes, no quote stripping.
fn raw_values() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// Case-insensitive key lookup; blank values count as absent
fn lookup<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

/// Parse the usual INI boolean spellings
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn is_valid_endpoint(endpoint: &str) -> bool {
    if endpoint.contains("://") || endpoint.contains(char::is_whitespace) {
        return false;
    }
    match Url::parse(&format!("http://{endpoint}")) {
        Ok(url) => url.host_str().is_some() && url.path() == "/" && url.query().is_none(),
        Err(_) => false,
    }
}
