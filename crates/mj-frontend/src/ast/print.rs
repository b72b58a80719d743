//! Sideways tree dump.
//!
//! Prints the right subtree above its parent and the left subtree below, so
//! the tree reads left-to-right when the head is tilted: the root is at the
//! left margin and children grow to the right.

use std::fmt;

use mj_core::Interner;

use super::node::NodeKind;
use super::tree::{Ast, NodeId};

const INDENT: usize = 4;

/// Renders a subtree via [`fmt::Display`].
pub struct TreePrinter<'a> {
    ast: &'a Ast,
    interner: &'a Interner,
    root: NodeId,
}

impl<'a> TreePrinter<'a> {
    pub fn new(ast: &'a Ast, interner: &'a Interner, root: NodeId) -> Self {
        Self {
            ast,
            interner,
            root,
        }
    }

    fn node(&self, f: &mut fmt::Formatter<'_>, n: NodeId, depth: usize) -> fmt::Result {
        if self.ast.is_null(n) {
            return Ok(());
        }
        self.node(f, self.ast.right(n), depth + 1)?;
        writeln!(f, "{:pad$}{}", "", self.label(n), pad = depth * INDENT)?;
        self.node(f, self.ast.left(n), depth + 1)
    }

    fn label(&self, n: NodeId) -> String {
        match self.ast.kind(n) {
            NodeKind::Dummy => "Dummy".to_string(),
            NodeKind::IdRef(name) => {
                format!("IdRef({})", self.interner.try_resolve(name).unwrap_or("?"))
            }
            NodeKind::SymRef(sym) => format!("SymRef(#{})", sym.as_u32()),
            NodeKind::IntLit(v) => format!("IntLit({v})"),
            NodeKind::CharLit(v) => match char::from_u32(v as u32) {
                Some(c) => format!("CharLit('{c}')"),
                None => format!("CharLit({v})"),
            },
            NodeKind::StringLit(name) => format!(
                "StringLit(\"{}\")",
                self.interner.try_resolve(name).unwrap_or("?")
            ),
            NodeKind::IntType => "IntType".to_string(),
            NodeKind::Op { op, .. } => op.name().to_string(),
        }
    }
}

impl fmt::Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node(f, self.root, 0)
    }
}
