//! MJ compiler front-end: lexer, parser, symbol table, and semantic analyzer.
//!
//! This crate provides the analysis pipeline for MJ programs:
//! - `parser` - lexer and AST construction
//! - `ast` - tagged tree nodes, constructors, and accessors
//! - `symtab` - symbol table, scope stack, and attribute store
//! - `analyze` - semantic analysis (name resolution, access validation)
//! - `diagnostics` - error reporting
//!
//! The stages are driven through the [`Frontend`] facade:
//!
//! ```
//! use mj_frontend::Frontend;
//!
//! let analyzed = Frontend::new("program p; class c { int x; }")
//!     .parse()
//!     .analyze();
//! assert!(analyzed.is_valid());
//! ```

pub mod analyze;
pub mod ast;
pub mod diagnostics;
mod frontend;
pub mod parser;
pub mod symtab;

#[cfg(test)]
mod frontend_tests;
#[cfg(test)]
pub mod test_utils;

pub use analyze::{Analysis, AnalyzerOptions};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use frontend::{Analyzed, Frontend, Parsed};
pub use mj_core::{Interner, NameId};

/// Hard failures that abort analysis.
///
/// Recoverable findings go through [`Diagnostics`]; these unwind the analyzer
/// with `?`. Each is recorded in the diagnostics collection with
/// [`Severity::Abort`] before the unwind starts, so the printed transcript is
/// complete even when analysis stops early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FatalError {
    /// Scope stack exceeded its frame capacity.
    #[error("scope stack overflow")]
    StackOverflow,

    /// Symbol table exceeded its entry capacity.
    #[error("symbol table overflow")]
    SymbolTableOverflow,

    /// Shared attribute pool exceeded its cell capacity.
    #[error("attribute pool overflow")]
    AttributeOverflow,

    /// A member or index access was applied to a method.
    #[error("member access on a routine")]
    RoutineAccess,
}
