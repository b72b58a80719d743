use indoc::indoc;

use crate::FatalError;
use crate::diagnostics::DiagnosticKind;
use crate::symtab::SymKind;
use crate::test_utils::{analyzed, expect_clean, transcript};

#[test]
fn array_indexed_with_parameter() {
    let result = expect_clean(indoc! {"
        program p;
        class a {
            int arr[5];
            method int f(val int i) {
                return arr[i];
            }
        }
    "});

    let rows = result.symbol_rows();
    let arr = rows.iter().find(|r| r.name == "arr").unwrap();
    assert_eq!(arr.kind, Some(SymKind::Arr));
    assert_eq!(arr.dimension, Some(1));
    let i = rows.iter().find(|r| r.name == "i").unwrap();
    assert_eq!(i.kind, Some(SymKind::ValueArg));
}

#[test]
fn scalar_has_no_fields() {
    let output = transcript(indoc! {"
        program p;
        class a {
            int x;
            method void g() {
                x.y := 1;
            }
        }
    "});
    insta::assert_snapshot!(output, @"Semantic Error--line: 5, identifier x has no fields.");
}

#[test]
fn index_arity_is_checked_both_ways() {
    let result = analyzed(indoc! {"
        program p;
        class a {
            int m[2][3];
            method void g() {
                m[1][2][3] := 0;
                m[1] := 0;
                m[1][2] := 0;
            }
        }
    "});

    insta::assert_snapshot!(result.render_diagnostics(), @r"
    Semantic Error--line: 5, array m is indexed with the wrong number of dimensions.
    Semantic Error--line: 6, array m is indexed with the wrong number of dimensions.
    ");
    assert_eq!(result.diagnostics().count_of(DiagnosticKind::IndexMismatch), 2);
}

#[test]
fn bare_array_use_needs_indices() {
    let output = transcript(indoc! {"
        program p;
        class a {
            int arr[5];
            method void g() {
                arr := 0;
            }
        }
    "});
    insta::assert_snapshot!(
        output,
        @"Semantic Error--line: 5, array arr is indexed with the wrong number of dimensions."
    );
}

#[test]
fn array_length_is_the_one_legal_field() {
    expect_clean(indoc! {"
        program p;
        class a {
            int arr[5];
            int m[2][3];
            method int f() {
                return arr.length + m.length;
            }
        }
    "});
}

#[test]
fn array_length_must_end_the_chain() {
    let output = transcript(indoc! {"
        program p;
        class a {
            int arr[5];
            method void g() {
                arr.length.x := 1;
            }
        }
    "});
    insta::assert_snapshot!(output, @"Semantic Error--line: 5, type mismatch at arr.");
}

#[test]
fn member_access_on_a_routine_is_fatal() {
    let result = analyzed(indoc! {"
        program p;
        class a {
            method int f() { return 0; }
            method void g() {
                f.x := 1;
            }
        }
    "});

    assert!(result.aborted());
    assert_eq!(result.fatal(), Some(FatalError::RoutineAccess));
    assert_eq!(
        result.render_diagnostics(),
        "Semantic Error--line: 5, method f members cannot be accessed.\n"
    );
}

#[test]
fn class_fields_resolve_through_the_entry_scan() {
    expect_clean(indoc! {"
        program p;
        class node {
            int v;
            node next;
        }
        class a {
            node n;
            method int f() {
                return n.next.v;
            }
        }
    "});
}

#[test]
fn unknown_field_of_class_reports_undeclared() {
    let output = transcript(indoc! {"
        program p;
        class node {
            int v;
        }
        class a {
            node n;
            method void g() {
                n.w := 1;
            }
        }
    "});
    insta::assert_snapshot!(output, @"Semantic Error--line: 8, identifier w is undeclared.");
}

#[test]
fn indexing_a_class_variable_mismatches() {
    let output = transcript(indoc! {"
        program p;
        class node {
            int v;
        }
        class a {
            node n;
            method void g() {
                n[1] := 0;
            }
        }
    "});
    insta::assert_snapshot!(output, @"Semantic Error--line: 8, type mismatch at node.");
}

#[test]
fn arrays_of_class_elements_expose_element_fields() {
    expect_clean(indoc! {"
        program p;
        class node {
            int v;
        }
        class a {
            node ring[4];
            method int f(val int i) {
                return ring[i].v;
            }
        }
    "});
}

#[test]
fn element_field_needs_full_indexing() {
    let output = transcript(indoc! {"
        program p;
        class node {
            int v;
        }
        class a {
            node grid[2][2];
            method int f() {
                return grid[1].v;
            }
        }
    "});
    insta::assert_snapshot!(output, @"Semantic Error--line: 8, type mismatch at grid.");
}

#[test]
fn undeclared_base_reported_once_per_scope() {
    let result = analyzed(indoc! {"
        program p;
        class a {
            method void g() {
                ghost := 1;
                ghost := 2;
            }
        }
    "});
    assert_eq!(result.diagnostics().count_of(DiagnosticKind::Undeclared), 1);
}

#[test]
fn predefined_system_calls_resolve() {
    expect_clean(indoc! {"
        program p;
        class a {
            method void g() {
                system.println(1);
                system.readln(2);
            }
        }
    "});
}

#[test]
fn calls_inside_expressions_resolve() {
    expect_clean(indoc! {"
        program p;
        class a {
            method int f(val int i) { return i; }
            method int g() {
                return f(1) + f(2);
            }
        }
    "});
}
