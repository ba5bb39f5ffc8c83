use minio_object_mgr::{args, run_app};

fn main() {
    // Parse and validate command-line arguments
    let args = args::args_checks();

    // Run the requested storage command
    if let Err(e) = run_app(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
