//! Subcommand implementations.

pub mod ast;
pub mod check;
pub mod symbols;

use crate::cli::SourceArgs;

/// Resolve the program text from a source file or inline `--source` text.
/// The two inputs are mutually exclusive at the clap level.
fn load_source(args: &SourceArgs) -> Result<String, String> {
    match (&args.source_path, &args.source_text) {
        (Some(path), None) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        (None, Some(text)) => Ok(text.clone()),
        _ => Err("no input; pass a source file or --source".to_string()),
    }
}

/// Load the source or exit with a usage error.
fn load_source_or_exit(args: &SourceArgs) -> String {
    match load_source(args) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}
