// Public modules
pub mod types;
mod validators;

// Re-export everything from the submodules
pub use types::*;
pub use validators::*;

use clap::Parser;
use std::process;

/// Parse command line arguments and perform validation
///
/// # Returns
///
/// * `Args` - The validated arguments
///
/// Exits the process with status 1 if validation fails.
#[must_use]
pub fn args_checks() -> Args {
    let args = Args::parse();

    // Validate the arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
