//! The tagged node vocabulary: leaf shapes and the operator taxonomy.

use mj_core::NameId;

use crate::symtab::SymId;

use super::tree::NodeId;

/// The shape of an AST node.
///
/// Leaves carry their payload directly; the single internal variant carries
/// an operator tag plus two children. Absent children are [`NodeKind::Dummy`]
/// (node 0 in the arena), never a missing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Sentinel for "no child". One shared arena slot.
    Dummy,
    /// A bare identifier leaf emitted by the parser, before resolution.
    IdRef(NameId),
    /// Post-analysis leaf pointing at a symbol-table entry.
    SymRef(SymId),
    /// Integer literal.
    IntLit(i32),
    /// Character literal, stored as its code point.
    CharLit(i32),
    /// String literal, stored as an interned index.
    StringLit(NameId),
    /// The primitive integer type marker.
    IntType,
    /// An internal expression node: operator tag plus two children.
    Op {
        op: OpKind,
        left: NodeId,
        right: NodeId,
    },
}

impl NodeKind {
    /// Whether this is the internal (operator) variant.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, NodeKind::Op { .. })
    }
}

/// The closed operator taxonomy for internal nodes.
///
/// Structural operators shape programs, classes, declarations, and
/// statements; the expression operators mirror the surface operator set.
/// Several structural variants are reserved grammar vocabulary that the
/// current analyzer never dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OpKind {
    // Program and class structure
    ProgramOp,
    BodyOp,
    ClassOp,
    ClassDefOp,
    MethodOp,
    HeadOp,
    SpecOp,

    // Declarations and type constructors
    DeclOp,
    CommaOp,
    TypeIdOp,
    ArrayTypeOp,
    BoundOp,
    RecompOp,
    RArgTypeOp,
    VArgTypeOp,

    // Statements
    StmtOp,
    IfElseOp,
    LoopOp,
    ReturnOp,
    AssignOp,
    RoutineCallOp,

    // Variable access
    VarOp,
    SelectOp,
    IndexOp,
    FieldOp,

    // Reserved structural vocabulary
    SubrangeOp,
    ExitOp,
    ToOp,
    DownToOp,
    ConstantIdOp,
    ProceOp,
    FuncOp,

    // Binary expression operators
    AddOp,
    SubOp,
    MultOp,
    DivOp,
    LTOp,
    GTOp,
    EQOp,
    NEOp,
    LEOp,
    GEOp,
    AndOp,
    OrOp,

    // Unary expression operators
    UnaryNegOp,
    NotOp,
}

impl OpKind {
    /// The operator name used by the tree dump.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProgramOp => "ProgramOp",
            Self::BodyOp => "BodyOp",
            Self::ClassOp => "ClassOp",
            Self::ClassDefOp => "ClassDefOp",
            Self::MethodOp => "MethodOp",
            Self::HeadOp => "HeadOp",
            Self::SpecOp => "SpecOp",
            Self::DeclOp => "DeclOp",
            Self::CommaOp => "CommaOp",
            Self::TypeIdOp => "TypeIdOp",
            Self::ArrayTypeOp => "ArrayTypeOp",
            Self::BoundOp => "BoundOp",
            Self::RecompOp => "RecompOp",
            Self::RArgTypeOp => "RArgTypeOp",
            Self::VArgTypeOp => "VArgTypeOp",
            Self::StmtOp => "StmtOp",
            Self::IfElseOp => "IfElseOp",
            Self::LoopOp => "LoopOp",
            Self::ReturnOp => "ReturnOp",
            Self::AssignOp => "AssignOp",
            Self::RoutineCallOp => "RoutineCallOp",
            Self::VarOp => "VarOp",
            Self::SelectOp => "SelectOp",
            Self::IndexOp => "IndexOp",
            Self::FieldOp => "FieldOp",
            Self::SubrangeOp => "SubrangeOp",
            Self::ExitOp => "ExitOp",
            Self::ToOp => "ToOp",
            Self::DownToOp => "DownToOp",
            Self::ConstantIdOp => "ConstantIdOp",
            Self::ProceOp => "ProceOp",
            Self::FuncOp => "FuncOp",
            Self::AddOp => "AddOp",
            Self::SubOp => "SubOp",
            Self::MultOp => "MultOp",
            Self::DivOp => "DivOp",
            Self::LTOp => "LTOp",
            Self::GTOp => "GTOp",
            Self::EQOp => "EQOp",
            Self::NEOp => "NEOp",
            Self::LEOp => "LEOp",
            Self::GEOp => "GEOp",
            Self::AndOp => "AndOp",
            Self::OrOp => "OrOp",
            Self::UnaryNegOp => "UnaryNegOp",
            Self::NotOp => "NotOp",
        }
    }
}
