use pretty_assertions::assert_eq;

use super::{parse_expr, sexpr};
use cordon_ir::{Mode, Root, Span};

#[test]
fn arithmetic_precedence() {
    assert_eq!(sexpr("x + y * 2"), "(+ x (* y 2))");
    assert_eq!(sexpr("(x + y) * 2"), "(* (+ x y) 2)");
    assert_eq!(sexpr("a - b - c"), "(- (- a b) c)");
    assert_eq!(sexpr("a // b % c"), "(% (// a b) c)");
}

#[test]
fn power_is_right_associative_and_binds_tighter_than_unary_minus() {
    assert_eq!(sexpr("2 ** 3 ** 2"), "(** 2 (** 3 2))");
    assert_eq!(sexpr("-2 ** 2"), "(- (** 2 2))");
    assert_eq!(sexpr("2 ** -1"), "(** 2 (- 1))");
}

#[test]
fn bitwise_levels() {
    assert_eq!(sexpr("a | b ^ c & d << 1"), "(| a (^ b (& c (<< d 1))))");
    assert_eq!(sexpr("~a"), "(~ a)");
}

#[test]
fn boolean_chains_are_flat() {
    assert_eq!(sexpr("a and b and c"), "(and a b c)");
    assert_eq!(sexpr("a or b and c"), "(or a (and b c))");
    assert_eq!(sexpr("not a or b"), "(or (not a) b)");
}

#[test]
fn comparison_chains() {
    assert_eq!(sexpr("a < b <= c"), "(cmp a < b <= c)");
    assert_eq!(sexpr("x not in y"), "(cmp x not in y)");
    assert_eq!(sexpr("x is not None"), "(cmp x is not None)");
    assert_eq!(sexpr("not x == y"), "(not (cmp x == y))");
}

#[test]
fn conditional_expression() {
    assert_eq!(sexpr("a if c else b"), "(if c a b)");
    assert_eq!(sexpr("a if c else b if d else e"), "(if c a (if d b e))");
}

#[test]
fn lambda_with_defaults() {
    assert_eq!(sexpr("lambda: 1"), "(lambda [] 1)");
    assert_eq!(sexpr("lambda x, y=2: x + y"), "(lambda [x y=2] (+ x y))");
}

#[test]
fn literals() {
    assert_eq!(sexpr("0x10"), "16");
    assert_eq!(sexpr("2.5"), "2.5");
    assert_eq!(sexpr("'a' \"b\""), "\"ab\"");
}

#[test]
fn trailers_chain_left_to_right() {
    assert_eq!(sexpr("a.b(c)[d]"), "([] (call (. a b) c) d)");
    assert_eq!(sexpr("x.upper()"), "(call (. x upper))");
}

#[test]
fn call_arguments() {
    assert_eq!(sexpr("f(1, k=2)"), "(call f 1 k=2)");
    assert_eq!(sexpr("f(a,)"), "(call f a)");
    assert_eq!(sexpr("sum(x for x in y)"), "(call sum (genexp x for x in y))");
}

#[test]
fn slices() {
    assert_eq!(sexpr("s[1:2]"), "([] s (: 1 2 _))");
    assert_eq!(sexpr("s[::2]"), "([] s (: _ _ 2))");
    assert_eq!(sexpr("s[:]"), "([] s (: _ _ _))");
    assert_eq!(sexpr("d[1, 2]"), "([] d (tuple 1 2))");
}

#[test]
fn displays() {
    assert_eq!(sexpr("[]"), "[]");
    assert_eq!(sexpr("[1, 2,]"), "[1 2]");
    assert_eq!(sexpr("()"), "(tuple )");
    assert_eq!(sexpr("(1,)"), "(tuple 1)");
    assert_eq!(sexpr("(1)"), "1");
    assert_eq!(sexpr("{}"), "{}");
    assert_eq!(sexpr("{1: 'a', 2: 'b'}"), "{1:\"a\" 2:\"b\"}");
    assert_eq!(sexpr("{1, 2}"), "{1 2}");
    assert_eq!(sexpr("1, 2"), "(tuple 1 2)");
}

#[test]
fn comprehensions() {
    assert_eq!(
        sexpr("[x * 2 for x in xs if x if x > 1]"),
        "(listcomp (* x 2) for x in xs if x if (cmp x > 1))"
    );
    assert_eq!(
        sexpr("{k: v for k, v in items}"),
        "(dictcomp k:v for (tuple k v) in items)"
    );
    assert_eq!(sexpr("{x for x in s}"), "(setcomp x for x in s)");
    assert_eq!(
        sexpr("[(a, b) for a in x for b in y]"),
        "(listcomp (tuple a b) for a in x for b in y)"
    );
}

#[test]
fn surrounding_blank_lines_are_allowed() {
    assert_eq!(sexpr("\n\n  x + 1  # trailing\n\n"), "(+ x 1)");
}

#[test]
fn multiline_inside_brackets() {
    assert_eq!(sexpr("f(\n  1,\n  2\n)"), "(call f 1 2)");
}

#[test]
fn spans_cover_the_expression() {
    let tree = parse_expr("  a + bc");
    let Root::Expression(root) = tree.root() else {
        panic!("expected expression root");
    };
    assert_eq!(tree.arena().expr(root).span, Span::new(2, 8));
    assert_eq!(tree.mode(), Mode::Expression);
}

#[test]
fn deeply_nested_parentheses() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(sexpr(&source), "1");
}

#[test]
fn long_operator_chain() {
    let source = vec!["x"; 10_000].join(" + ");
    let tree = parse_expr(&source);
    assert_eq!(tree.arena().expr_count(), 10_000 * 2 - 1);
}
