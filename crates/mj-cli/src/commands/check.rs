use mj_frontend::{AnalyzerOptions, Frontend};

use crate::cli::SourceArgs;

use super::load_source_or_exit;

pub fn run(source: &SourceArgs, warn_unused: bool) {
    let source = load_source_or_exit(source);

    let analyzed = Frontend::new(source)
        .options(AnalyzerOptions { warn_unused })
        .parse()
        .analyze();

    // Diagnostics go to stdout in the fixed format; the test harness diffs
    // this transcript.
    print!("{}", analyzed.render_diagnostics());

    if !analyzed.is_valid() {
        std::process::exit(1);
    }
    // Silent on success (like cargo check).
}
