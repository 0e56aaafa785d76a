use std::sync::Arc;

use cordon_ir::{Mode, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::exceptions::ExceptionKind;
use crate::print_handler::buffer_handler;

fn tree(source: &str, mode: Mode) -> Arc<SyntaxTree> {
    Arc::new(cordon_parse::parse(source, mode).unwrap())
}

fn run(source: &str, mode: Mode, env: &Environment) -> EvalResult {
    Interpreter::default().run(&tree(source, mode), env)
}

#[test]
fn expression_mode_yields_its_value() {
    let env = Environment::new();
    assert_eq!(run("1 + 2 * 3", Mode::Expression, &env).unwrap(), Value::Int(7));
}

#[test]
fn statement_mode_yields_none_and_keeps_bindings() {
    let env = Environment::new();
    let result = run("x = 4\ny = x * 2\n", Mode::Statements, &env).unwrap();
    assert!(matches!(result, Value::None));
    assert_eq!(env.get("y"), Some(Value::Int(8)));
}

#[test]
fn trees_can_run_many_times() {
    let tree = tree("n * 2", Mode::Expression);
    let mut interp = Interpreter::default();
    for n in 0..3 {
        let env: Environment = [("n", Value::Int(n))].into_iter().collect();
        assert_eq!(interp.run(&tree, &env).unwrap(), Value::Int(n * 2));
    }
}

#[test]
fn recursion_limit_raises() {
    let env = Environment::new();
    let source = "def f(n):\n    return f(n + 1)\nf(0)\n";
    let mut interp = Interpreter::new(EvalOptions::default().with_max_call_depth(50));
    let err = interp.run(&tree(source, Mode::Statements), &env).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::RecursionError);
}

#[test]
fn depth_is_restored_after_an_error() {
    let env = Environment::new();
    let mut interp = Interpreter::new(EvalOptions::default().with_max_call_depth(10));
    let failing = tree("def f():\n    return 1 / 0\nf()\n", Mode::Statements);
    for _ in 0..20 {
        assert!(interp.run(&failing, &env).is_err());
    }
    let ok = tree("f2 = lambda: 1\nresult = f2()\n", Mode::Statements);
    interp.run(&ok, &env).unwrap();
    assert_eq!(env.get("result"), Some(Value::Int(1)));
}

#[test]
fn keyword_binding() {
    let env = Environment::new();
    run("def f(a, b=2, c=3):\n    return (a, b, c)\n", Mode::Statements, &env).unwrap();
    assert_eq!(run("f(1, c=9)", Mode::Expression, &env).unwrap().repr(), "(1, 2, 9)");

    let err = run("f()", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.message(), "f() takes at least 1 argument (0 given)");
    let err = run("f(1, 2, 3, 4)", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.message(), "f() takes at most 3 arguments (4 given)");
    let err = run("f(1, d=4)", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.message(), "f() got an unexpected keyword argument 'd'");
    let err = run("f(1, a=4)", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.message(), "f() got multiple values for keyword argument 'a'");
}

#[test]
fn exact_arity_message() {
    let env = Environment::new();
    let err = run("(lambda x: x)()", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.message(), "<lambda>() takes exactly 1 argument (0 given)");
}

#[test]
fn calling_a_non_callable() {
    let env = Environment::new();
    let err = run("3()", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.to_string(), "TypeError: 'int' object is not callable");
}

#[test]
fn errors_carry_the_raising_span() {
    let env = Environment::new();
    let err = run("1 + (2 / 0)", Mode::Expression, &env).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ZeroDivisionError);
    assert_eq!(err.span, Span::new(5, 10));
}

#[test]
fn eval_sees_the_calling_scope() {
    let env = Environment::new();
    let source = "def f(x):\n    return eval('x * 10')\nr = f(4)\n";
    run(source, Mode::Statements, &env).unwrap();
    assert_eq!(env.get("r"), Some(Value::Int(40)));
}

#[test]
fn exec_writes_back_into_a_dict() {
    let env = Environment::new();
    run("d = {'a': 1}\nexec 'b = a + 1' in d\n", Mode::Statements, &env).unwrap();
    assert_eq!(run("d['b']", Mode::Expression, &env).unwrap(), Value::Int(2));
    assert!(!env.contains("b"));
}

#[test]
fn exec_without_dict_uses_current_scope() {
    let env = Environment::new();
    run("exec 'z = 5'\n", Mode::Statements, &env).unwrap();
    assert_eq!(env.get("z"), Some(Value::Int(5)));
}

#[test]
fn exec_reports_syntax_errors() {
    let env = Environment::new();
    let err = run("exec 'x = = 1'\n", Mode::Statements, &env).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::SyntaxError);
}

#[test]
fn print_goes_to_the_configured_handler() {
    let handler = buffer_handler();
    let mut interp = Interpreter::new(EvalOptions::default().with_print(handler.clone()));
    let env = Environment::new();
    interp
        .run(&tree("print('a', 1)\nprint()\n", Mode::Statements), &env)
        .unwrap();
    assert_eq!(handler.output(), "a 1\n\n");
}

#[test]
fn exception_classes_construct_instances() {
    let env = Environment::new();
    let value = run("ValueError('bad', 2)", Mode::Expression, &env).unwrap();
    assert_eq!(value.repr(), "ValueError(\"('bad', 2)\")");
    let value = run("KeyError()", Mode::Expression, &env).unwrap();
    assert_eq!(value.repr(), "KeyError()");
}
