use mj_core::Interner;

use super::message::ordinal;
use super::{DiagnosticKind, Diagnostics};

#[test]
fn semantic_line_format() {
    let mut interner = Interner::new();
    let x = interner.intern("x");

    let mut diag = Diagnostics::new();
    diag.report(DiagnosticKind::Undeclared, 7).named(x).emit();

    assert_eq!(
        diag.printer(&interner).to_string(),
        "Semantic Error--line: 7, identifier x is undeclared.\n"
    );
}

#[test]
fn syntax_line_format() {
    let interner = Interner::new();

    let mut diag = Diagnostics::new();
    diag.syntax(3, "expected `;`, found `}`");

    assert_eq!(
        diag.printer(&interner).to_string(),
        "Syntax Error--line: 3, expected `;`, found `}`.\n"
    );
}

#[test]
fn abort_marks_collection_aborted() {
    let mut diag = Diagnostics::new();
    assert!(!diag.is_aborted());

    diag.report(DiagnosticKind::STOverflow, 1).abort().emit();
    assert!(diag.is_aborted());
    assert_eq!(diag.error_count(), 1);
}

#[test]
fn count_of_filters_by_kind() {
    let mut interner = Interner::new();
    let x = interner.intern("x");

    let mut diag = Diagnostics::new();
    diag.report(DiagnosticKind::Undeclared, 1).named(x).emit();
    diag.report(DiagnosticKind::Undeclared, 2).named(x).emit();
    diag.report(DiagnosticKind::Redeclaration, 3).named(x).emit();

    assert_eq!(diag.count_of(DiagnosticKind::Undeclared), 2);
    assert_eq!(diag.count_of(DiagnosticKind::Redeclaration), 1);
    assert_eq!(diag.count_of(DiagnosticKind::MultiMain), 0);
}

#[test]
fn ordinals() {
    assert_eq!(ordinal(0), "0th");
    assert_eq!(ordinal(1), "1st");
    assert_eq!(ordinal(2), "2nd");
    assert_eq!(ordinal(3), "3rd");
    assert_eq!(ordinal(4), "4th");
    assert_eq!(ordinal(12), "12th");
}

#[test]
fn routine_access_message_is_literal() {
    let mut interner = Interner::new();
    let f = interner.intern("f");

    let mut diag = Diagnostics::new();
    diag.report(DiagnosticKind::VariableMisuse, 9)
        .named(f)
        .abort()
        .emit();

    assert_eq!(
        diag.printer(&interner).to_string(),
        "Semantic Error--line: 9, method f members cannot be accessed.\n"
    );
}
