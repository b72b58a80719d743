//! Fixed-format rendering of collected diagnostics.
//!
//! The output format is pinned by golden tests that diff the transcript, so
//! every semantic line renders as
//!
//! ```text
//! Semantic Error--line: <L>, <message>.
//! ```
//!
//! and every syntax line as `Syntax Error--line: <L>, <message>.`.

use std::fmt;

use mj_core::Interner;

use super::message::{Detail, Diagnostic};

/// Renders diagnostics to the fixed transcript format via [`fmt::Display`].
pub struct DiagnosticsPrinter<'a> {
    messages: &'a [Diagnostic],
    interner: &'a Interner,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub(crate) fn new(messages: &'a [Diagnostic], interner: &'a Interner) -> Self {
        Self { messages, interner }
    }
}

impl fmt::Display for DiagnosticsPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for msg in self.messages {
            match &msg.detail {
                Detail::Semantic { kind, name, seq } => {
                    let text = name.and_then(|n| self.interner.try_resolve(n));
                    writeln!(
                        f,
                        "Semantic Error--line: {}, {}.",
                        msg.line,
                        kind.render(text, *seq)
                    )?;
                }
                Detail::Syntax { message } => {
                    writeln!(f, "Syntax Error--line: {}, {}.", msg.line, message)?;
                }
            }
        }
        Ok(())
    }
}
