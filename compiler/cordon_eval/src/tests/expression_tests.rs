use pretty_assertions::assert_eq;

use super::{eval, eval_in, eval_repr};
use crate::{Environment, ExceptionKind, Value};

#[test]
fn arithmetic_follows_python() {
    assert_eq!(eval_repr("7 // 2, -7 // 2, -7 % 3, 7 / 2"), "(3, -4, 2, 3.5)");
    assert_eq!(eval_repr("2 ** 10, 2 ** -1, -2 ** 2"), "(1024, 0.5, -4)");
    assert_eq!(eval_repr("1 << 4, 0xff & 0x0f, 5 ^ 1, ~0"), "(16, 15, 4, -1)");
    assert_eq!(eval_repr("1 + 2.5, 3 * 1.0"), "(3.5, 3.0)");
}

#[test]
fn integer_overflow_raises() {
    let err = eval("9223372036854775807 + 1").unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::OverflowError);
}

#[test]
fn division_by_zero() {
    for source in ["1 / 0", "1 // 0", "1 % 0", "1.0 / 0"] {
        let err = eval(source).unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::ZeroDivisionError, "{source}");
    }
}

#[test]
fn comparisons_chain() {
    assert_eq!(eval("1 < 2 < 3").unwrap(), Value::Bool(true));
    assert_eq!(eval("1 < 3 < 2").unwrap(), Value::Bool(false));
    assert_eq!(eval("'b' in 'abc' and 4 not in [1, 2]").unwrap(), Value::Bool(true));
    assert_eq!(eval("None is None and 1 is not None").unwrap(), Value::Bool(true));
    assert_eq!(eval("(1, 2) < (1, 3)").unwrap(), Value::Bool(true));
}

#[test]
fn boolean_operators_return_operands() {
    assert_eq!(eval_repr("0 or 'x'"), "'x'");
    assert_eq!(eval_repr("[] and 1"), "[]");
    assert_eq!(eval_repr("not ''"), "True");
}

#[test]
fn conditional_expression() {
    assert_eq!(eval_repr("'yes' if 2 > 1 else 'no'"), "'yes'");
}

#[test]
fn displays() {
    assert_eq!(eval_repr("[1, (2,), {'k': [3]}]"), "[1, (2,), {'k': [3]}]");
    assert_eq!(eval_repr("{1, 2, 2}"), "{1, 2}");
    assert_eq!(eval_repr("{}"), "{}");
}

#[test]
fn strings() {
    assert_eq!(eval_repr("'ab' 'cd'"), "'abcd'");
    assert_eq!(eval_repr("'ab' * 3"), "'ababab'");
    assert_eq!(eval_repr("'%s=%d' % ('x', 4)"), "'x=4'");
    assert_eq!(eval_repr("'{0}-{1}'.format('a', 2)"), "'a-2'");
    assert_eq!(eval_repr("'Hello'[1:4], 'Hello'[::-1]"), "('ell', 'olleH')");
}

#[test]
fn subscripts_and_slices() {
    assert_eq!(eval_repr("[0, 1, 2, 3, 4][1:4:2]"), "[1, 3]");
    assert_eq!(eval_repr("(1, 2, 3)[-1]"), "3");
    assert_eq!(eval_repr("{'a': 1}['a']"), "1");
    let err = eval("[1][5]").unwrap_err();
    assert_eq!(err.to_string(), "IndexError: list index out of range");
    let err = eval("{}['missing']").unwrap_err();
    assert_eq!(err.to_string(), "KeyError: 'missing'");
}

#[test]
fn comprehensions() {
    assert_eq!(eval_repr("[x * x for x in range(5) if x % 2 == 0]"), "[0, 4, 16]");
    assert_eq!(
        eval_repr("[(x, y) for x in range(2) for y in 'ab']"),
        "[(0, 'a'), (0, 'b'), (1, 'a'), (1, 'b')]"
    );
    assert_eq!(eval_repr("{k: v for k, v in [('a', 1), ('b', 2)]}"), "{'a': 1, 'b': 2}");
    assert_eq!(eval_repr("{c for c in 'aab'}"), "{'a', 'b'}");
    assert_eq!(eval_repr("sum(x for x in range(4))"), "6");
}

#[test]
fn comprehension_variables_do_not_leak() {
    let env = Environment::new();
    eval_in("[x for x in range(3)]", &env).unwrap();
    assert!(!env.contains("x"));
}

#[test]
fn lambdas_and_closures() {
    assert_eq!(eval_repr("(lambda x, y=10: x + y)(1)"), "11");
    assert_eq!(eval_repr("(lambda n: (lambda m: n * m))(3)(4)"), "12");
    assert_eq!(eval_repr("map(lambda s: s.upper(), ['a', 'b'])"), "['A', 'B']");
}

#[test]
fn caller_bindings_are_visible() {
    let env: Environment = [("price", Value::Float(2.5)), ("qty", Value::Int(4))]
        .into_iter()
        .collect();
    assert_eq!(eval_in("price * qty", &env).unwrap(), Value::Float(10.0));
}

#[test]
fn builtins_in_expressions() {
    assert_eq!(eval_repr("len('abc'), abs(-2), max(3, 7), sorted([3, 1, 2])"), "(3, 2, 7, [1, 2, 3])");
    assert_eq!(eval_repr("isinstance(1, (str, int))"), "True");
    assert_eq!(eval_repr("list(range(10, 0, -3))"), "[10, 7, 4, 1]");
    assert_eq!(eval_repr("dict(zip('ab', [1, 2]))"), "{'a': 1, 'b': 2}");
    assert_eq!(eval_repr("sorted(['bb', 'a', 'ccc'], key=len, reverse=True)"), "['ccc', 'bb', 'a']");
}

#[test]
fn unknown_names_raise_name_error() {
    let err = eval("undefined_thing + 1").unwrap_err();
    assert_eq!(err.to_string(), "NameError: name 'undefined_thing' is not defined");
}

#[test]
fn type_errors_name_operands() {
    let err = eval("1 + 'a'").unwrap_err();
    assert_eq!(err.message(), "unsupported operand type(s) for +: 'int' and 'str'");
}

#[test]
fn deeply_nested_expression_does_not_overflow() {
    let source = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
    assert_eq!(eval(&source).unwrap(), Value::Int(1));
    let sum = vec!["1"; 3000].join(" + ");
    assert_eq!(eval(&sum).unwrap(), Value::Int(3000));
}
