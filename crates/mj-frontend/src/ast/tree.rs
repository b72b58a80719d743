//! The AST arena: node storage, constructors, and structural operations.
//!
//! All nodes live in one arena owned by [`Ast`]; [`NodeId`] is an index into
//! it and node 0 is the shared `Dummy` sentinel. The analyzer rewrites nodes
//! in place under a stable `NodeId`, and dropping the arena frees the whole
//! tree at once, which discharges the subtree-ownership rule of the node
//! model.

use mj_core::NameId;

use crate::symtab::SymId;

use super::node::{NodeKind, OpKind};

/// Index of a node in the [`Ast`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    /// The shared sentinel node.
    pub const DUMMY: NodeId = NodeId(0);

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    line: u32,
}

/// Arena of AST nodes.
///
/// The accessor API is total: child accessors on non-internal nodes yield
/// [`NodeId::DUMMY`], and `is_null` is the single test for absence.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<NodeData>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Dummy,
                line: 0,
            }],
        }
    }

    /// The shared dummy sentinel.
    #[inline]
    pub fn null_node(&self) -> NodeId {
        NodeId::DUMMY
    }

    /// The single test for node absence.
    #[inline]
    pub fn is_null(&self, n: NodeId) -> bool {
        n == NodeId::DUMMY
    }

    /// Number of nodes in the arena, sentinel included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the arena holds at least the sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Create a new leaf node carrying its payload and source line.
    ///
    /// # Panics
    /// Debug-panics when handed the internal variant; use [`Ast::make_op`].
    pub fn make_leaf(&mut self, kind: NodeKind, line: u32) -> NodeId {
        debug_assert!(!kind.is_op(), "make_leaf given an operator node");
        self.push(kind, line)
    }

    /// Create a new internal node taking ownership of both children.
    pub fn make_op(&mut self, op: OpKind, left: NodeId, right: NodeId, line: u32) -> NodeId {
        self.push(NodeKind::Op { op, left, right }, line)
    }

    fn push(&mut self, kind: NodeKind, line: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData { kind, line });
        id
    }

    /// The shape of a node.
    #[inline]
    pub fn kind(&self, n: NodeId) -> NodeKind {
        self.nodes[n.index()].kind
    }

    /// The operator tag of an internal node, `None` for leaves.
    #[inline]
    pub fn op_of(&self, n: NodeId) -> Option<OpKind> {
        match self.nodes[n.index()].kind {
            NodeKind::Op { op, .. } => Some(op),
            _ => None,
        }
    }

    /// Left child; `Dummy` for non-internal nodes.
    #[inline]
    pub fn left(&self, n: NodeId) -> NodeId {
        match self.nodes[n.index()].kind {
            NodeKind::Op { left, .. } => left,
            _ => NodeId::DUMMY,
        }
    }

    /// Right child; `Dummy` for non-internal nodes.
    #[inline]
    pub fn right(&self, n: NodeId) -> NodeId {
        match self.nodes[n.index()].kind {
            NodeKind::Op { right, .. } => right,
            _ => NodeId::DUMMY,
        }
    }

    /// Integer payload of a literal leaf; 0 for other shapes.
    #[inline]
    pub fn int_of(&self, n: NodeId) -> i32 {
        match self.nodes[n.index()].kind {
            NodeKind::IntLit(v) | NodeKind::CharLit(v) => v,
            _ => 0,
        }
    }

    /// Interned name of an `IdRef` or `StringLit` leaf.
    #[inline]
    pub fn name_of(&self, n: NodeId) -> Option<NameId> {
        match self.nodes[n.index()].kind {
            NodeKind::IdRef(name) | NodeKind::StringLit(name) => Some(name),
            _ => None,
        }
    }

    /// Symbol-table reference of a resolved leaf.
    #[inline]
    pub fn sym_of(&self, n: NodeId) -> Option<SymId> {
        match self.nodes[n.index()].kind {
            NodeKind::SymRef(sym) => Some(sym),
            _ => None,
        }
    }

    /// Source line the node was built from.
    #[inline]
    pub fn line(&self, n: NodeId) -> u32 {
        self.nodes[n.index()].line
    }

    /// Replace the left child of an internal node. No-op on leaves.
    ///
    /// The displaced subtree stays in the arena; callers that care about it
    /// must have taken its id beforehand.
    pub fn set_left(&mut self, n: NodeId, child: NodeId) {
        if let NodeKind::Op { left, .. } = &mut self.nodes[n.index()].kind {
            *left = child;
        }
    }

    /// Replace the right child of an internal node. No-op on leaves.
    pub fn set_right(&mut self, n: NodeId, child: NodeId) {
        if let NodeKind::Op { right, .. } = &mut self.nodes[n.index()].kind {
            *right = child;
        }
    }

    /// Rewrite a node's shape in place, keeping its id and line.
    ///
    /// This is how the analyzer turns `IdRef` leaves into `SymRef` leaves
    /// without disturbing the structure around them.
    pub fn replace(&mut self, n: NodeId, kind: NodeKind) {
        debug_assert!(!self.is_null(n), "cannot replace the dummy sentinel");
        self.nodes[n.index()].kind = kind;
    }

    /// Walk `t2` down its left spine to the first `Dummy` child and install
    /// `t1` there. If `t2` is itself `Dummy`, returns `t1`.
    ///
    /// Together with [`Ast::attach_rightmost`] this is how the parser
    /// assembles every multi-element list.
    pub fn attach_leftmost(&mut self, t1: NodeId, t2: NodeId) -> NodeId {
        if self.is_null(t2) {
            return t1;
        }
        let mut cur = t2;
        loop {
            if !self.kind(cur).is_op() {
                return t2;
            }
            let l = self.left(cur);
            if self.is_null(l) {
                self.set_left(cur, t1);
                return t2;
            }
            cur = l;
        }
    }

    /// Walk `t2` down its right spine to the first `Dummy` child and install
    /// `t1` there. If `t2` is itself `Dummy`, returns `t1`.
    pub fn attach_rightmost(&mut self, t1: NodeId, t2: NodeId) -> NodeId {
        if self.is_null(t2) {
            return t1;
        }
        let mut cur = t2;
        loop {
            if !self.kind(cur).is_op() {
                return t2;
            }
            let r = self.right(cur);
            if self.is_null(r) {
                self.set_right(cur, t1);
                return t2;
            }
            cur = r;
        }
    }

    /// Count consecutive left children until a `Dummy`.
    ///
    /// For a list built by repeated left extension this is the element count.
    pub fn left_depth(&self, n: NodeId) -> u32 {
        let mut depth = 0;
        let mut cur = n;
        while !self.is_null(cur) {
            depth += 1;
            cur = self.left(cur);
        }
        depth
    }
}
