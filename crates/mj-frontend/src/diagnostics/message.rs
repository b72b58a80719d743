//! Diagnostic message types: the semantic error taxonomy and severities.

use mj_core::NameId;

/// Severity level of a diagnostic.
///
/// `Continue` findings are reported and analysis moves on to the next
/// construct. `Abort` findings stop analysis; the matching
/// [`FatalError`](crate::FatalError) unwinds the analyzer and the driver
/// exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Continue,
    Abort,
}

/// The closed set of semantic error codes.
///
/// The code names are stable identifiers used in test transcripts. Several
/// codes are reserved vocabulary with no emitter in the current analyzer
/// (`MultiMain` in particular: duplicate `main` methods report
/// `Redeclaration`, matching the observed behavior of the language).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DiagnosticKind {
    StackOverflow,
    Redeclaration,
    STOverflow,
    Undeclared,
    AttrOverflow,
    NotUsed,
    ArgumentsNum1,
    ArgumentsNum2,
    Bound,
    ProcMismatch,
    VarValMismatch,
    ConstantVar,
    ExprVar,
    ConstantAssign,
    IndexMismatch,
    FieldMismatch,
    ForwardRedeclare,
    RecordTypeMismatch,
    ArrayTypeMismatch,
    VariableMisuse,
    FuncMismatch,
    TypeMismatch,
    NotType,
    ArrayDimMismatch,
    MultiMain,
}

impl DiagnosticKind {
    /// Stable code string, as it appears in error-taxonomy documentation.
    pub fn code(self) -> &'static str {
        match self {
            Self::StackOverflow => "StackOverflow",
            Self::Redeclaration => "Redeclaration",
            Self::STOverflow => "STOverflow",
            Self::Undeclared => "Undeclared",
            Self::AttrOverflow => "AttrOverflow",
            Self::NotUsed => "NotUsed",
            Self::ArgumentsNum1 => "ArgumentsNum1",
            Self::ArgumentsNum2 => "ArgumentsNum2",
            Self::Bound => "Bound",
            Self::ProcMismatch => "ProcMismatch",
            Self::VarValMismatch => "VarValMismatch",
            Self::ConstantVar => "ConstantVar",
            Self::ExprVar => "ExprVar",
            Self::ConstantAssign => "ConstantAssign",
            Self::IndexMismatch => "IndexMismatch",
            Self::FieldMismatch => "FieldMismatch",
            Self::ForwardRedeclare => "ForwardRedeclare",
            Self::RecordTypeMismatch => "RecordTypeMismatch",
            Self::ArrayTypeMismatch => "ArrayTypeMismatch",
            Self::VariableMisuse => "VariableMisuse",
            Self::FuncMismatch => "FuncMismatch",
            Self::TypeMismatch => "TypeMismatch",
            Self::NotType => "NotType",
            Self::ArrayDimMismatch => "ArrayDimMismatch",
            Self::MultiMain => "MultiMain",
        }
    }

    /// Render the human-readable message for this code.
    ///
    /// `name` is the resolved identifier text, when the code mentions one;
    /// `seq` is a position rendered as an English ordinal.
    pub(crate) fn render(self, name: Option<&str>, seq: Option<u32>) -> String {
        let name = name.unwrap_or("?");
        match self {
            Self::StackOverflow => "scope stack overflow".to_string(),
            Self::Redeclaration => format!("identifier {name} is redeclared"),
            Self::STOverflow => "symbol table overflow".to_string(),
            Self::Undeclared => format!("identifier {name} is undeclared"),
            Self::AttrOverflow => "attribute pool overflow".to_string(),
            Self::NotUsed => format!("identifier {name} is declared but never used"),
            Self::ArgumentsNum1 => format!("routine {name} is called with too few arguments"),
            Self::ArgumentsNum2 => format!("routine {name} is called with too many arguments"),
            Self::Bound => format!("array bound of {name} must be an integer constant"),
            Self::ProcMismatch => format!("procedure {name} cannot return a value"),
            Self::VarValMismatch => format!(
                "the {} argument of {name} cannot be passed by reference",
                ordinal(seq.unwrap_or(0))
            ),
            Self::ConstantVar => format!("constant {name} cannot be used as a variable"),
            Self::ExprVar => "an expression cannot be used as a variable".to_string(),
            Self::ConstantAssign => format!("constant {name} cannot be assigned to"),
            Self::IndexMismatch => {
                format!("array {name} is indexed with the wrong number of dimensions")
            }
            Self::FieldMismatch => format!("identifier {name} has no fields"),
            Self::ForwardRedeclare => format!("forward declaration of {name} is redeclared"),
            Self::RecordTypeMismatch => format!("identifier {name} is not of class type"),
            Self::ArrayTypeMismatch => format!("identifier {name} is not of array type"),
            Self::VariableMisuse => format!("method {name} members cannot be accessed"),
            Self::FuncMismatch => format!("function {name} must return a value"),
            Self::TypeMismatch => format!("type mismatch at {name}"),
            Self::NotType => format!("identifier {name} does not name a type"),
            Self::ArrayDimMismatch => format!(
                "the {} dimension of array {name} is out of range",
                ordinal(seq.unwrap_or(0))
            ),
            Self::MultiMain => "only one method main may be declared".to_string(),
        }
    }
}

/// Render a sequence number as an English ordinal: 1st, 2nd, 3rd, Nth.
pub(crate) fn ordinal(n: u32) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// A single collected diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diagnostic {
    pub(crate) severity: Severity,
    pub(crate) line: u32,
    pub(crate) detail: Detail,
}

/// What the diagnostic is about.
///
/// Semantic findings carry a taxonomy code plus optional interned name and
/// sequence number; syntax findings from the parser carry free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Detail {
    Semantic {
        kind: DiagnosticKind,
        name: Option<NameId>,
        seq: Option<u32>,
    },
    Syntax {
        message: String,
    },
}

impl Diagnostic {
    pub(crate) fn is_abort(&self) -> bool {
        self.severity == Severity::Abort
    }
}
