use super::*;
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, EvalOptions, Interpreter};
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn call(name: &str, args: Vec<Value>) -> Result<Value, crate::errors::EvalError> {
    let func = lookup(name).unwrap_or_else(|| panic!("{name} is not ambient"));
    Interpreter::default().call(&func, Args::new(args))
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn every_ambient_name_resolves() {
    for name in ambient_names() {
        assert!(lookup(name).is_some(), "{name}");
        assert!(is_ambient(name), "{name}");
    }
}

#[test]
fn ambient_names_are_unique() {
    let mut names: Vec<_> = ambient_names().collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn namespace_carries_escape_hatches() {
    for name in ["open", "eval", "globals", "__import__", "getattr", "SystemExit"] {
        assert!(is_ambient(name), "{name}");
    }
    assert!(lookup("definitely_not_a_builtin").is_none());
}

#[test]
fn constants_and_types() {
    assert_eq!(lookup("True").unwrap(), Value::Bool(true));
    assert!(matches!(lookup("None"), Some(Value::None)));
    assert!(matches!(lookup("long"), Some(Value::Type(TypeKind::Int))));
    assert!(matches!(
        lookup("KeyError"),
        Some(Value::ExceptionType(ExceptionKind::KeyError))
    ));
}

#[test]
fn int_constructor() {
    let int = Value::Type(TypeKind::Int);
    let mut interp = Interpreter::default();
    let mut int_of = |args: Vec<Value>| interp.call(&int, Args::new(args));
    assert_eq!(int_of(vec![Value::str(" 42 ")]).unwrap(), Value::Int(42));
    assert_eq!(int_of(vec![Value::Float(-3.9)]).unwrap(), Value::Int(-3));
    assert_eq!(int_of(vec![Value::str("ff"), Value::Int(16)]).unwrap(), Value::Int(255));
    assert_eq!(int_of(vec![Value::str("0b101"), Value::Int(0)]).unwrap(), Value::Int(5));
    let err = int_of(vec![Value::str("abc")]).unwrap_err();
    assert_eq!(err.message(), "invalid literal for int() with base 10: 'abc'");
    let err = int_of(vec![Value::Float(f64::INFINITY)]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::OverflowError);
}

#[test]
fn collection_constructors() {
    let mut interp = Interpreter::default();
    let dict = interp
        .call(
            &Value::Type(TypeKind::Dict),
            Args::new(vec![Value::list(vec![Value::tuple(vec![
                Value::str("a"),
                Value::Int(1),
            ])])])
            .with_keyword("b", Value::Int(2)),
        )
        .unwrap();
    assert_eq!(dict.repr(), "{'a': 1, 'b': 2}");
    let set = interp
        .call(&Value::Type(TypeKind::Set), Args::new(vec![ints(&[1, 1, 2])]))
        .unwrap();
    assert_eq!(set.repr(), "{1, 2}");
    let err = interp
        .call(
            &Value::Type(TypeKind::Range),
            Args::new(vec![Value::Int(0), Value::Int(5), Value::Int(0)]),
        )
        .unwrap_err();
    assert_eq!(err.message(), "range() arg 3 must not be zero");
}

#[test]
fn numeric_helpers() {
    assert_eq!(call("abs", vec![Value::Int(-4)]).unwrap(), Value::Int(4));
    assert_eq!(
        call("divmod", vec![Value::Int(-7), Value::Int(2)]).unwrap().repr(),
        "(-4, 1)"
    );
    assert_eq!(
        call("pow", vec![Value::Int(3), Value::Int(4), Value::Int(5)]).unwrap(),
        Value::Int(1)
    );
    assert_eq!(call("round", vec![Value::Float(2.5)]).unwrap(), Value::Int(2));
    assert_eq!(
        call("round", vec![Value::Float(1.25), Value::Int(1)]).unwrap(),
        Value::Float(1.2)
    );
    assert_eq!(call("hex", vec![Value::Int(-255)]).unwrap(), Value::str("-0xff"));
    assert_eq!(call("bin", vec![Value::Int(5)]).unwrap(), Value::str("0b101"));
    assert_eq!(call("chr", vec![Value::Int(97)]).unwrap(), Value::str("a"));
    assert_eq!(call("ord", vec![Value::str("a")]).unwrap(), Value::Int(97));
    assert_eq!(call("hash", vec![Value::Float(3.0)]).unwrap(), Value::Int(3));
}

#[test]
fn abs_overflows_on_min_int() {
    let err = call("abs", vec![Value::Int(i64::MIN)]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::OverflowError);
}

#[test]
fn sequence_helpers() {
    assert_eq!(call("sum", vec![ints(&[1, 2, 3])]).unwrap(), Value::Int(6));
    assert_eq!(call("max", vec![ints(&[3, 9, 2])]).unwrap(), Value::Int(9));
    assert_eq!(call("min", vec![Value::Int(3), Value::Int(-1)]).unwrap(), Value::Int(-1));
    assert_eq!(
        call("zip", vec![ints(&[1, 2, 3]), Value::str("ab")]).unwrap().repr(),
        "[(1, 'a'), (2, 'b')]"
    );
    assert_eq!(call("sorted", vec![ints(&[3, 1, 2])]).unwrap().repr(), "[1, 2, 3]");
    assert_eq!(
        call("map", vec![Value::None, ints(&[1, 2]), ints(&[3])]).unwrap().repr(),
        "[(1, 3), (2, None)]"
    );
    let enumerated = call("enumerate", vec![Value::str("ab"), Value::Int(1)]).unwrap();
    assert_eq!(enumerated.to_vec().unwrap(), vec![
        Value::tuple(vec![Value::Int(1), Value::str("a")]),
        Value::tuple(vec![Value::Int(2), Value::str("b")]),
    ]);
}

#[test]
fn empty_sequence_errors() {
    let err = call("max", vec![ints(&[])]).unwrap_err();
    assert_eq!(err.message(), "max() arg is an empty sequence");
    let add = Value::builtin("add", |_, args| {
        crate::operators::evaluate_binary(&args.positional[0], &args.positional[1], cordon_ir::BinaryOp::Add)
    });
    let err = call("reduce", vec![add, ints(&[])]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::TypeError);
    let err = call("sum", vec![ints(&[]), Value::str("")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::TypeError);
}

#[test]
fn next_and_iter_share_state() {
    let it = call("iter", vec![ints(&[1, 2])]).unwrap();
    assert_eq!(call("next", vec![it.clone()]).unwrap(), Value::Int(1));
    assert_eq!(call("next", vec![it.clone()]).unwrap(), Value::Int(2));
    assert_eq!(call("next", vec![it.clone(), Value::str("done")]).unwrap(), Value::str("done"));
    let err = call("next", vec![it]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::StopIteration);
}

#[test]
fn isinstance_and_issubclass() {
    let int = lookup("int").unwrap();
    assert_eq!(call("isinstance", vec![Value::Bool(true), int.clone()]).unwrap(), Value::Bool(true));
    assert_eq!(call("issubclass", vec![lookup("bool").unwrap(), int]).unwrap(), Value::Bool(true));
    assert_eq!(
        call("issubclass", vec![lookup("KeyError").unwrap(), lookup("LookupError").unwrap()])
            .unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn print_writes_to_handler() {
    let handler = buffer_handler();
    let mut interp = Interpreter::new(EvalOptions::default().with_print(handler.clone()));
    let args = Args::new(vec![Value::Int(1), Value::str("a")])
        .with_keyword("sep", Value::str("-"))
        .with_keyword("end", Value::str("!"));
    interp.call(&lookup("print").unwrap(), args).unwrap();
    assert_eq!(handler.output(), "1-a!");
}

#[test]
fn exit_raises_system_exit() {
    let err = call("exit", vec![Value::Int(3)]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::SystemExit);
    assert_eq!(err.message(), "3");
    assert!(!err.kind().is_subclass_of(ExceptionKind::Exception));
}

#[test]
fn import_is_refused() {
    let err = call("__import__", vec![Value::str("os")]).unwrap_err();
    assert_eq!(err.to_string(), "ImportError: No module named os");
}

#[test]
fn eval_runs_in_a_given_dict() {
    let mut globals = crate::value::DictValue::new();
    globals.insert(Value::str("x"), Value::Int(20)).unwrap();
    let result = call("eval", vec![Value::str(" x + 1 "), Value::dict(globals)]).unwrap();
    assert_eq!(result, Value::Int(21));
    let err = call("eval", vec![Value::str("1 +")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::SyntaxError);
}

#[test]
fn open_refuses_write_modes_and_missing_files() {
    let err = call("open", vec![Value::str("x.txt"), Value::str("w")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ValueError);
    let err = call("open", vec![Value::str("/nonexistent/cordon/file")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::IOError);
}

#[test]
fn getattr_default_only_covers_missing_attributes() {
    let value = call("getattr", vec![Value::Int(1), Value::str("nope"), Value::Int(0)]).unwrap();
    assert_eq!(value, Value::Int(0));
    assert_eq!(
        call("hasattr", vec![Value::str("s"), Value::str("upper")]).unwrap(),
        Value::Bool(true)
    );
}
