use mj_core::Interner;

use crate::FatalError;
use crate::ast::NodeId;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

use super::{
    AttrKind, AttrValue, MAX_SCOPE_FRAMES, MAX_SYMBOLS, SymKind, SymbolTable,
};

fn setup() -> (SymbolTable, Interner, Diagnostics) {
    let mut table = SymbolTable::new();
    let mut interner = Interner::new();
    let mut diag = Diagnostics::new();
    table.init(&mut interner, &mut diag).unwrap();
    assert!(diag.is_empty());
    (table, interner, diag)
}

#[test]
fn init_installs_predefined_names() {
    let (table, interner, _) = setup();
    assert_eq!(table.len(), 3);

    let names: Vec<_> = table
        .ids()
        .map(|s| interner.resolve(table.name_of(s).unwrap()).to_string())
        .collect();
    assert_eq!(names, vec!["system", "readln", "println"]);

    let kinds: Vec<_> = table.ids().map(|s| table.kind_of(s).unwrap()).collect();
    assert_eq!(kinds, vec![SymKind::Class, SymKind::Proc, SymKind::Proc]);

    // readln and println sit one level inside system.
    let nests: Vec<_> = table.ids().map(|s| table.nest_of(s)).collect();
    assert_eq!(nests, vec![0, 1, 1]);

    for s in table.ids() {
        assert_eq!(
            table.attr(s, AttrKind::Predefined),
            Some(AttrValue::Bool(true))
        );
    }
}

#[test]
fn every_entry_has_name_and_nest() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");
    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();

    assert!(table.is_attr(sym, AttrKind::Name));
    assert!(table.is_attr(sym, AttrKind::Nest));
}

#[test]
fn insert_then_lookup() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");

    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();
    let found = table.lookup(x, 2, &mut diag).unwrap();
    assert_eq!(found, Some(sym));
    assert!(diag.is_empty());
}

#[test]
fn redeclaration_in_same_scope_reports() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");

    assert!(table.insert_entry(x, 1, &mut diag).unwrap().is_some());
    assert!(table.insert_entry(x, 2, &mut diag).unwrap().is_none());
    assert_eq!(diag.count_of(DiagnosticKind::Redeclaration), 1);
}

#[test]
fn inner_scope_shadows_outer() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");

    let outer = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();
    table.open_block(2, &mut diag).unwrap();
    let inner = table.insert_entry(x, 2, &mut diag).unwrap().unwrap();
    assert_ne!(outer, inner);

    // Innermost binding wins.
    assert_eq!(table.lookup(x, 3, &mut diag).unwrap(), Some(inner));

    table.close_block(false, 4, &mut diag);
    assert_eq!(table.lookup(x, 5, &mut diag).unwrap(), Some(outer));
    assert!(diag.is_empty());
}

#[test]
fn close_block_restores_stack_and_nesting() {
    let (mut table, mut interner, mut diag) = setup();
    let frames = table.frame_count();
    let nesting = table.nesting();

    table.open_block(1, &mut diag).unwrap();
    for name in ["a", "b", "c"] {
        let id = interner.intern(name);
        table.insert_entry(id, 1, &mut diag).unwrap();
    }
    assert_eq!(table.frame_count(), frames + 4);
    assert_eq!(table.nesting(), nesting + 1);

    table.close_block(false, 2, &mut diag);
    assert_eq!(table.frame_count(), frames);
    assert_eq!(table.nesting(), nesting);

    // Entries survive the scope; visibility does not.
    assert_eq!(table.len(), 6);
    let a = interner.intern("a");
    assert_eq!(table.lookup(a, 3, &mut diag).unwrap(), None);
    assert_eq!(diag.count_of(DiagnosticKind::Undeclared), 1);
}

#[test]
fn lookup_miss_reports_once_per_scope() {
    let (mut table, mut interner, mut diag) = setup();
    let ghost = interner.intern("ghost");

    assert_eq!(table.lookup(ghost, 1, &mut diag).unwrap(), None);
    assert_eq!(table.lookup(ghost, 2, &mut diag).unwrap(), None);
    assert_eq!(table.lookup(ghost, 3, &mut diag).unwrap(), None);
    assert_eq!(diag.count_of(DiagnosticKind::Undeclared), 1);
}

#[test]
fn lookup_here_stops_at_block_marker() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");

    let outer = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();
    assert_eq!(table.lookup_here(x), Some(outer));

    table.open_block(2, &mut diag).unwrap();
    assert_eq!(table.lookup_here(x), None);

    table.close_block(false, 3, &mut diag);
    assert_eq!(table.lookup_here(x), Some(outer));
}

#[test]
fn lookup_here_ignores_dummy_frames() {
    let (mut table, mut interner, mut diag) = setup();
    let ghost = interner.intern("ghost");

    table.lookup(ghost, 1, &mut diag).unwrap();
    assert_eq!(table.lookup_here(ghost), None);
}

#[test]
fn attributes_iterate_in_ascending_kind_order() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");
    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();

    // Insert out of order; the list stays sorted.
    table
        .set_attr(sym, AttrKind::ArgNum, AttrValue::Int(2), 1, &mut diag)
        .unwrap();
    table
        .set_attr(
            sym,
            AttrKind::Kind,
            AttrValue::Kind(SymKind::Func),
            1,
            &mut diag,
        )
        .unwrap();
    table
        .set_attr(sym, AttrKind::Dimen, AttrValue::Int(1), 1, &mut diag)
        .unwrap();

    let kinds: Vec<_> = table.attrs_of(sym).map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        vec![
            AttrKind::Name,
            AttrKind::Nest,
            AttrKind::Kind,
            AttrKind::Dimen,
            AttrKind::ArgNum,
        ]
    );
}

#[test]
fn set_attr_overwrites_existing() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");
    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();

    table
        .set_attr(sym, AttrKind::Offset, AttrValue::Int(4), 1, &mut diag)
        .unwrap();
    table
        .set_attr(sym, AttrKind::Offset, AttrValue::Int(8), 1, &mut diag)
        .unwrap();

    assert_eq!(table.attr(sym, AttrKind::Offset), Some(AttrValue::Int(8)));
    assert_eq!(table.attrs_of(sym).count(), 3);
}

#[test]
fn get_attr_defaults_to_zero() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");
    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();

    assert!(!table.is_attr(sym, AttrKind::Dimen));
    assert_eq!(table.get_attr(sym, AttrKind::Dimen), AttrValue::Int(0));
}

#[test]
fn node_valued_attributes_round_trip() {
    let (mut table, mut interner, mut diag) = setup();
    let x = interner.intern("x");
    let sym = table.insert_entry(x, 1, &mut diag).unwrap().unwrap();

    let node = NodeId::from_raw(17);
    table
        .set_attr(sym, AttrKind::Type, AttrValue::Node(node), 1, &mut diag)
        .unwrap();
    assert_eq!(table.attr(sym, AttrKind::Type), Some(AttrValue::Node(node)));
}

#[test]
fn unused_binding_warning_is_opt_in() {
    let (mut table, mut interner, mut diag) = setup();
    let used = interner.intern("used");
    let idle = interner.intern("idle");

    table.open_block(1, &mut diag).unwrap();
    table.insert_entry(used, 1, &mut diag).unwrap();
    table.insert_entry(idle, 1, &mut diag).unwrap();
    table.lookup(used, 2, &mut diag).unwrap();
    table.close_block(false, 3, &mut diag);
    assert_eq!(diag.count_of(DiagnosticKind::NotUsed), 0);

    table.open_block(4, &mut diag).unwrap();
    table.insert_entry(used, 4, &mut diag).unwrap();
    table.insert_entry(idle, 4, &mut diag).unwrap();
    table.lookup(used, 5, &mut diag).unwrap();
    table.close_block(true, 6, &mut diag);
    assert_eq!(diag.count_of(DiagnosticKind::NotUsed), 1);
}

#[test]
fn stack_overflow_on_frame_cap() {
    let mut table = SymbolTable::new();
    let mut diag = Diagnostics::new();

    for i in 0..MAX_SCOPE_FRAMES {
        assert!(table.open_block(i as u32, &mut diag).is_ok());
    }
    let err = table.open_block(999, &mut diag);
    assert_eq!(err, Err(FatalError::StackOverflow));
    assert!(diag.is_aborted());
    assert_eq!(diag.count_of(DiagnosticKind::StackOverflow), 1);
}

#[test]
fn symbol_table_overflow_on_entry_cap() {
    let mut table = SymbolTable::new();
    let mut interner = Interner::new();
    let mut diag = Diagnostics::new();

    // Entries persist after their scope closes, so capacity is reachable
    // without overflowing the much smaller frame stack.
    let names: Vec<_> = (0..50).map(|i| interner.intern(&format!("n{i}"))).collect();
    for _ in 0..10 {
        table.open_block(1, &mut diag).unwrap();
        for &name in &names {
            table.insert_entry(name, 1, &mut diag).unwrap();
        }
        table.close_block(false, 1, &mut diag);
    }
    assert_eq!(table.len(), MAX_SYMBOLS);

    let extra = interner.intern("extra");
    let err = table.insert_entry(extra, 2, &mut diag);
    assert_eq!(err, Err(FatalError::SymbolTableOverflow));
    assert_eq!(diag.count_of(DiagnosticKind::STOverflow), 1);
}

#[test]
fn attribute_pool_overflow_on_cell_cap() {
    let mut table = SymbolTable::new();
    let mut interner = Interner::new();
    let mut diag = Diagnostics::new();

    // 500 entries cost 1000 cells (Name + Nest); two more attributes per
    // entry fill the pool exactly.
    let names: Vec<_> = (0..50).map(|i| interner.intern(&format!("n{i}"))).collect();
    for _ in 0..10 {
        table.open_block(1, &mut diag).unwrap();
        for &name in &names {
            table.insert_entry(name, 1, &mut diag).unwrap();
        }
        table.close_block(false, 1, &mut diag);
    }
    let ids: Vec<_> = table.ids().collect();
    for &sym in &ids {
        table
            .set_attr(
                sym,
                AttrKind::Kind,
                AttrValue::Kind(SymKind::Var),
                1,
                &mut diag,
            )
            .unwrap();
        table
            .set_attr(sym, AttrKind::Offset, AttrValue::Int(0), 1, &mut diag)
            .unwrap();
    }

    // Overwrites are free; a fresh attribute kind is not.
    table
        .set_attr(ids[0], AttrKind::Offset, AttrValue::Int(1), 1, &mut diag)
        .unwrap();
    let err = table.set_attr(ids[0], AttrKind::Dimen, AttrValue::Int(1), 1, &mut diag);
    assert_eq!(err, Err(FatalError::AttributeOverflow));
    assert_eq!(diag.count_of(DiagnosticKind::AttrOverflow), 1);
}
