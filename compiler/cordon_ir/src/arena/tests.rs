use super::*;
use crate::{ExprKind, Span};
use pretty_assertions::assert_eq;

#[test]
fn alloc_and_get_expr() {
    let mut arena = ExprArena::new();
    let id = arena.alloc_expr(Expr::new(ExprKind::Int(7), Span::new(0, 1)));
    assert_eq!(arena.expr(id).kind, ExprKind::Int(7));
    assert_eq!(arena.expr_count(), 1);
}

#[test]
fn expr_lists_are_contiguous() {
    let mut arena = ExprArena::new();
    let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::DUMMY));
    let b = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::DUMMY));
    let first = arena.alloc_expr_list([a, b]);
    let second = arena.alloc_expr_list([b]);
    assert_eq!(arena.expr_list(first), &[a, b]);
    assert_eq!(arena.expr_list(second), &[b]);
    assert!(arena.expr_list(ExprRange::EMPTY).is_empty());
}

#[test]
fn interning_dedupes() {
    let mut arena = ExprArena::new();
    let x1 = arena.intern("x");
    let y = arena.intern("y");
    let x2 = arena.intern("x");
    assert_eq!(x1, x2);
    assert_ne!(x1, y);
    assert_eq!(arena.name(y), "y");
    assert_eq!(arena.name(Name::EMPTY), "");
}

#[test]
fn foreign_name_resolves_empty() {
    let mut big = ExprArena::new();
    for i in 0..10 {
        big.intern(&i.to_string());
    }
    let foreign = big.intern("far");
    let small = ExprArena::new();
    assert_eq!(small.name(foreign), "");
}
