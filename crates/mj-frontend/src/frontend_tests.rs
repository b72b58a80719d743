use indoc::indoc;

use crate::Frontend;

#[test]
fn pipeline_runs_end_to_end() {
    let analyzed = Frontend::new(indoc! {"
        program p;
        class a {
            int x;
            method void g() {
                x := 1;
            }
        }
    "})
    .parse()
    .analyze();

    assert!(analyzed.is_valid());
    assert!(!analyzed.aborted());
    assert!(analyzed.render_diagnostics().is_empty());
}

#[test]
fn parsed_tree_dump_reads_sideways() {
    let parsed = Frontend::new("program p; class c { }").parse();
    insta::assert_snapshot!(parsed.dump_ast(), @r"
        IdRef(p)
    ProgramOp
                IdRef(c)
            ClassDefOp
        ClassOp
    ");
}

#[test]
fn analysis_rewrites_name_leaves_in_place() {
    let analyzed = Frontend::new("program p; class c { }").parse().analyze();
    insta::assert_snapshot!(analyzed.dump_ast(), @r"
        IdRef(p)
    ProgramOp
                SymRef(#4)
            ClassDefOp
        ClassOp
    ");
}

#[test]
fn syntax_errors_flow_into_the_transcript() {
    let analyzed = Frontend::new("program p class c { }").parse().analyze();
    assert!(!analyzed.is_valid());
    assert!(
        analyzed
            .render_diagnostics()
            .starts_with("Syntax Error--line: 1, expected `;`")
    );
}

#[test]
fn invalid_programs_still_produce_a_table() {
    let analyzed = Frontend::new(indoc! {"
        program p;
        class a {
            method void g() {
                ghost := 1;
            }
        }
    "})
    .parse()
    .analyze();

    assert!(!analyzed.is_valid());
    let names: Vec<_> = analyzed
        .symbol_rows()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert!(names.contains(&"a".to_string()));
    assert!(names.contains(&"g".to_string()));
}
