use home::home_dir;
use std::path::{Path, PathBuf};

use super::types::Args;

/// Expands a leading `~` to the home directory
///
/// # Arguments
///
/// * `raw` - Path as typed on the command line
///
/// # Returns
///
/// * `Result<PathBuf, String>` - The expanded PathBuf or an error message
pub fn expand_home(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);

    if !path.starts_with("~") {
        return Ok(path);
    }

    match home_dir() {
        Some(home) => Ok(home.join(path.strip_prefix("~").unwrap_or(Path::new("")))),
        None => Err("Home directory could not be determined.".to_string()),
    }
}

/// Checks that the arguments make sense together
///
/// File-level checks (config readable, upload source present) are left to the
/// storage layer so they surface as typed errors.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.object.trim().is_empty() {
        return Err("--object must not be empty.".to_string());
    }

    match (&args.local_path, args.mode.needs_local_path()) {
        (None, true) => Err(format!(
            "--local-path is required for {:?} mode.",
            args.mode
        )),
        (Some(_), false) => Err(format!(
            "--local-path is not used in {:?} mode.",
            args.mode
        )),
        (Some(path), true) if path.as_os_str().is_empty() => {
            Err("--local-path must not be empty.".to_string())
        }
        _ => Ok(()),
    }
}
