//! Attribute vocabulary: per-symbol attribute kinds, values, and cells.

use mj_core::NameId;

use crate::ast::NodeId;

use super::SymId;

/// The closed set of per-symbol attribute kinds.
///
/// Numbering matters twice: attribute lists are kept sorted by ascending
/// kind (the debug dump relies on the iteration order), and smaller values
/// are the more common attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttrKind {
    /// The declared name.
    Name = 1,
    /// Nesting depth at declaration.
    Nest = 2,
    /// Back-pointer into the AST. Reserved for the back-end.
    Tree = 3,
    /// Installed by `init`, not declared in source.
    Predefined = 4,
    /// The symbol's [`SymKind`].
    Kind = 5,
    /// The declared type subtree (a `TypeIdOp` node).
    Type = 6,
    /// For constants only: the literal node.
    Value = 7,
    /// Reserved for the back-end.
    Offset = 8,
    /// Number of array dimensions.
    Dimen = 9,
    /// Parameter count for routines.
    ArgNum = 10,
}

/// A typed attribute value.
///
/// The original design stored AST pointers as integers; here every payload
/// keeps its own shape and callers match on what they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue {
    Int(i32),
    Bool(bool),
    Name(NameId),
    Node(NodeId),
    Sym(SymId),
    Kind(SymKind),
}

impl AttrValue {
    pub fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_name(self) -> Option<NameId> {
        match self {
            Self::Name(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_node(self) -> Option<NodeId> {
        match self {
            Self::Node(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sym(self) -> Option<SymId> {
        match self {
            Self::Sym(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_kind(self) -> Option<SymKind> {
        match self {
            Self::Kind(v) => Some(v),
            _ => None,
        }
    }
}

/// What a symbol is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymKind {
    Const,
    Var,
    FuncForward,
    Func,
    RefArg,
    ValueArg,
    Field,
    TypeDef,
    ProcForward,
    Proc,
    Class,
    Arr,
}

impl SymKind {
    /// The kind string used by the table dump. Pinned by golden tests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Const => "constant",
            Self::Var => "variable",
            Self::FuncForward => "funcforw",
            Self::Func => "function",
            Self::RefArg => "ref_arg",
            Self::ValueArg => "val_arg",
            Self::Field => "field",
            Self::TypeDef => "typedef",
            Self::ProcForward => "procforw",
            Self::Proc => "procedure",
            Self::Class => "class",
            Self::Arr => "array",
        }
    }
}

impl serde::Serialize for SymKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One cell in the shared attribute pool.
///
/// Cells form singly-linked per-symbol lists ordered by ascending kind. The
/// pool is append-only and never compacted.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AttrCell {
    pub(crate) kind: AttrKind,
    pub(crate) value: AttrValue,
    pub(crate) next: Option<u32>,
}
