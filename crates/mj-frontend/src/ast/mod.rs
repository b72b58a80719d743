//! Abstract syntax tree: tagged nodes, the arena, and structural operations.

mod node;
mod print;
mod tree;

#[cfg(test)]
mod tree_tests;

pub use node::{NodeKind, OpKind};
pub use print::TreePrinter;
pub use tree::{Ast, NodeId};
