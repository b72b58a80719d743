//! Shared helpers for unit tests.

use crate::{Analyzed, Frontend};

/// Run the full pipeline over a source snippet.
pub fn analyzed(source: &str) -> Analyzed {
    Frontend::new(source).parse().analyze()
}

/// Run the pipeline and return the diagnostic transcript.
pub fn transcript(source: &str) -> String {
    analyzed(source).render_diagnostics()
}

/// Run the pipeline and assert it produced no findings.
pub fn expect_clean(source: &str) -> Analyzed {
    let result = analyzed(source);
    assert!(
        result.is_valid(),
        "expected a clean program, got:\n{}",
        result.render_diagnostics()
    );
    result
}
