//! Compiler diagnostics infrastructure.
//!
//! This module provides types for collecting and rendering diagnostic
//! messages. Recoverable findings are accumulated here; hard failures
//! additionally unwind the analyzer through [`FatalError`](crate::FatalError)
//! after the abort-severity diagnostic has been recorded.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use mj_core::{Interner, NameId};

pub use message::{DiagnosticKind, Severity};
pub use printer::DiagnosticsPrinter;

use message::{Detail, Diagnostic};

/// Collection of diagnostic messages from parsing and analysis.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

/// Builder for constructing a semantic diagnostic.
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Start a semantic diagnostic for the given taxonomy code and line.
    pub fn report(&mut self, kind: DiagnosticKind, line: u32) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: Diagnostic {
                severity: Severity::Continue,
                line,
                detail: Detail::Semantic {
                    kind,
                    name: None,
                    seq: None,
                },
            },
        }
    }

    /// Record a syntax error from the parser.
    pub fn syntax(&mut self, line: u32, message: impl Into<String>) {
        self.messages.push(Diagnostic {
            severity: Severity::Continue,
            line,
            detail: Detail::Syntax {
                message: message.into(),
            },
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Whether an abort-severity diagnostic has been recorded.
    pub fn is_aborted(&self) -> bool {
        self.messages.iter().any(Diagnostic::is_abort)
    }

    pub fn error_count(&self) -> usize {
        self.messages.len()
    }

    /// Count of diagnostics with the given taxonomy code.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.messages
            .iter()
            .filter(|d| matches!(d.detail, Detail::Semantic { kind: k, .. } if k == kind))
            .count()
    }

    pub fn printer<'a>(&'a self, interner: &'a Interner) -> DiagnosticsPrinter<'a> {
        DiagnosticsPrinter::new(&self.messages, interner)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Attach the interned name the message is about.
    pub fn named(mut self, name: NameId) -> Self {
        if let Detail::Semantic { name: slot, .. } = &mut self.message.detail {
            *slot = Some(name);
        }
        self
    }

    /// Attach the name only when one is known.
    pub fn maybe_named(self, name: Option<NameId>) -> Self {
        match name {
            Some(name) => self.named(name),
            None => self,
        }
    }

    /// Attach a sequence number, rendered as an English ordinal.
    pub fn seq(mut self, seq: u32) -> Self {
        if let Detail::Semantic { seq: slot, .. } = &mut self.message.detail {
            *slot = Some(seq);
        }
        self
    }

    /// Mark the diagnostic abort-severity.
    pub fn abort(mut self) -> Self {
        self.message.severity = Severity::Abort;
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
