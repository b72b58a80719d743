use mj_core::Interner;

use super::{Ast, NodeId, NodeKind, OpKind, TreePrinter};

fn int_leaf(ast: &mut Ast, v: i32) -> NodeId {
    ast.make_leaf(NodeKind::IntLit(v), 1)
}

#[test]
fn accessors_are_total() {
    let mut ast = Ast::new();
    let leaf = int_leaf(&mut ast, 7);

    assert_eq!(ast.op_of(leaf), None);
    assert!(ast.is_null(ast.left(leaf)));
    assert!(ast.is_null(ast.right(leaf)));
    assert_eq!(ast.int_of(leaf), 7);

    let dummy = ast.null_node();
    assert!(ast.is_null(dummy));
    assert!(ast.is_null(ast.left(dummy)));
    assert_eq!(ast.int_of(dummy), 0);
}

#[test]
fn make_op_owns_children() {
    let mut ast = Ast::new();
    let l = int_leaf(&mut ast, 1);
    let r = int_leaf(&mut ast, 2);
    let add = ast.make_op(OpKind::AddOp, l, r, 3);

    assert_eq!(ast.op_of(add), Some(OpKind::AddOp));
    assert_eq!(ast.left(add), l);
    assert_eq!(ast.right(add), r);
    assert_eq!(ast.line(add), 3);
}

#[test]
fn replace_keeps_id_and_line() {
    let mut ast = Ast::new();
    let mut interner = Interner::new();
    let x = interner.intern("x");

    let leaf = ast.make_leaf(NodeKind::IdRef(x), 9);
    ast.replace(leaf, NodeKind::IntType);

    assert_eq!(ast.kind(leaf), NodeKind::IntType);
    assert_eq!(ast.line(leaf), 9);
}

#[test]
fn attach_leftmost_to_dummy_returns_new_tree() {
    let mut ast = Ast::new();
    let t1 = int_leaf(&mut ast, 1);
    let dummy = ast.null_node();

    assert_eq!(ast.attach_leftmost(t1, dummy), t1);
}

#[test]
fn attach_leftmost_builds_left_spine() {
    let mut ast = Ast::new();

    // Simulate the parser extending a comma list three times.
    let mut list = ast.null_node();
    for v in 1..=3 {
        let item = int_leaf(&mut ast, v);
        let wrapper = ast.make_op(OpKind::CommaOp, ast.null_node(), item, 1);
        list = ast.attach_leftmost(list, wrapper);
    }

    // The head is the last wrapper; the first element sits deepest.
    assert_eq!(ast.left_depth(list), 3);
    assert_eq!(ast.int_of(ast.right(list)), 3);
    assert_eq!(ast.int_of(ast.right(ast.left(list))), 2);
    assert_eq!(ast.int_of(ast.right(ast.left(ast.left(list)))), 1);
}

#[test]
fn attach_rightmost_links_on_right_spine() {
    let mut ast = Ast::new();

    let mut chain = ast.null_node();
    for v in 1..=3 {
        let bound = int_leaf(&mut ast, v);
        let dim = ast.make_op(OpKind::IndexOp, bound, ast.null_node(), 1);
        chain = ast.attach_rightmost(dim, chain);
    }

    // First dimension stays the head; later ones hang off the right spine.
    assert_eq!(ast.int_of(ast.left(chain)), 1);
    let second = ast.right(chain);
    assert_eq!(ast.int_of(ast.left(second)), 2);
    let third = ast.right(second);
    assert_eq!(ast.int_of(ast.left(third)), 3);
    assert!(ast.is_null(ast.right(third)));
}

#[test]
fn left_depth_of_dummy_is_zero() {
    let ast = Ast::new();
    assert_eq!(ast.left_depth(ast.null_node()), 0);
}

#[test]
fn set_left_is_noop_on_leaves() {
    let mut ast = Ast::new();
    let leaf = int_leaf(&mut ast, 1);
    let other = int_leaf(&mut ast, 2);

    ast.set_left(leaf, other);
    assert!(ast.is_null(ast.left(leaf)));
}

#[test]
fn print_tree_puts_right_subtree_first() {
    let mut ast = Ast::new();
    let mut interner = Interner::new();
    let x = interner.intern("x");

    let var = ast.make_leaf(NodeKind::IdRef(x), 1);
    let var_op = ast.make_op(OpKind::VarOp, var, ast.null_node(), 1);
    let lit = int_leaf(&mut ast, 5);
    let assign = ast.make_op(OpKind::AssignOp, var_op, lit, 1);

    insta::assert_snapshot!(TreePrinter::new(&ast, &interner, assign).to_string(), @r"
        IntLit(5)
    AssignOp
        VarOp
            IdRef(x)
    ");
}
