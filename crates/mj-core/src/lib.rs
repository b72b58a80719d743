//! Core data structures shared across the MJ front-end.
//!
//! Currently this is just the name interner. The parser interns every
//! identifier it sees (the interner folds MJ's case-insensitive names) and
//! every string literal (kept verbatim); everything downstream (symbol
//! table, analyzer, diagnostics) traffics in [`NameId`] handles and resolves
//! them back to text only at the edges.

mod interner;

#[cfg(test)]
mod interner_tests;

pub use interner::{Interner, NameId};
