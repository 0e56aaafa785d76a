use cordon_eval::{buffer_handler, EvalOptions, ExceptionKind, Interpreter, Value};
use pretty_assertions::assert_eq;

use crate::common::{env, vet, vet_statements};

#[test]
fn expression_uses_caller_bindings() {
    let compiled = vet("x + y * 2").unwrap();
    let bindings = env(&[("x", Value::Int(3)), ("y", Value::Int(4))]);
    assert_eq!(compiled.eval(&bindings).unwrap(), Value::Int(11));
}

#[test]
fn one_compilation_many_runs() {
    let compiled = vet("x * x").unwrap();
    for x in 0..5 {
        let bindings = env(&[("x", Value::Int(x))]);
        assert_eq!(compiled.eval(&bindings).unwrap(), Value::Int(x * x));
    }
}

#[test]
fn statements_write_back_into_the_environment() {
    let compiled = vet_statements(
        "\
def poly(v):
    return [c * v ** i for i, c in enumerate(coeffs)]
y = sum(poly(x))
",
    )
    .unwrap();
    let bindings = env(&[
        ("coeffs", Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)])),
        ("x", Value::Int(2)),
    ]);
    assert!(matches!(compiled.eval(&bindings).unwrap(), Value::None));
    assert_eq!(bindings.get("y"), Some(Value::Int(17)));
    assert!(bindings.contains("poly"));
}

#[test]
fn missing_binding_is_a_runtime_error_not_a_compile_error() {
    let compiled = vet("undefined_name + 1").unwrap();
    let err = compiled.eval(&env(&[])).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NameError);
}

#[test]
fn math_prelude_bindings_are_usable() {
    let compiled = vet("floor(sqrt(x) * 10)").unwrap();
    let bindings: cordon_eval::Environment = cordon_eval::prelude::math_bindings()
        .into_iter()
        .chain([("x", Value::Int(2))])
        .collect();
    assert_eq!(compiled.eval(&bindings).unwrap(), Value::Int(14));
}

#[test]
fn eval_with_uses_the_given_interpreter() {
    let handler = buffer_handler();
    let mut interp = Interpreter::new(EvalOptions::default().with_print(handler.clone()));
    let compiled = vet_statements("for i in range(3):\n    print(i, end=' ')\n").unwrap();
    compiled.eval_with(&mut interp, &env(&[])).unwrap();
    assert_eq!(handler.output(), "0 1 2 ");
}

#[test]
fn accepted_loops_are_not_bounded_but_recursion_is() {
    let compiled = vet_statements("def f(n):\n    return f(n + 1)\nf(0)\n").unwrap();
    let mut interp = Interpreter::new(EvalOptions::default().with_max_call_depth(64));
    let err = compiled.eval_with(&mut interp, &env(&[])).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::RecursionError);
}
