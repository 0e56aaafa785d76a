use super::*;
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, Interpreter};
use crate::value::{DictValue, SetValue};
use pretty_assertions::assert_eq;

fn call_method(receiver: &Value, name: &str, args: Vec<Value>) -> EvalResult {
    let method = get_attribute(receiver, name)?;
    Interpreter::default().call(&method, Args::new(args))
}

fn s(text: &str) -> Value {
    Value::str(text)
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn string_case_methods() {
    assert_eq!(call_method(&s("Hello"), "upper", vec![]).unwrap(), s("HELLO"));
    assert_eq!(call_method(&s("hello world"), "title", vec![]).unwrap(), s("Hello World"));
    assert_eq!(call_method(&s("hELLO"), "capitalize", vec![]).unwrap(), s("Hello"));
    assert_eq!(call_method(&s("123"), "isdigit", vec![]).unwrap(), Value::Bool(true));
    assert_eq!(call_method(&s(""), "isdigit", vec![]).unwrap(), Value::Bool(false));
}

#[test]
fn string_split_and_join() {
    assert_eq!(
        call_method(&s("  a b   c "), "split", vec![]).unwrap().repr(),
        "['a', 'b', 'c']"
    );
    assert_eq!(
        call_method(&s("a,b,c"), "split", vec![s(","), Value::Int(1)])
            .unwrap()
            .repr(),
        "['a', 'b,c']"
    );
    assert_eq!(
        call_method(&s("-"), "join", vec![Value::tuple(vec![s("x"), s("y")])]).unwrap(),
        s("x-y")
    );
    let err = call_method(&s(","), "join", vec![ints(&[1])]).unwrap_err();
    assert_eq!(err.message(), "sequence item 0: expected string, int found");
}

#[test]
fn string_search_counts_characters() {
    assert_eq!(call_method(&s("héllo"), "find", vec![s("l")]).unwrap(), Value::Int(2));
    assert_eq!(call_method(&s("hello"), "rfind", vec![s("l")]).unwrap(), Value::Int(3));
    assert_eq!(call_method(&s("hello"), "find", vec![s("z")]).unwrap(), Value::Int(-1));
    let err = call_method(&s("hello"), "index", vec![s("z")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::ValueError);
}

#[test]
fn string_affixes_accept_tuples() {
    let options = Value::tuple(vec![s("x"), s("he")]);
    assert_eq!(call_method(&s("hello"), "startswith", vec![options]).unwrap(), Value::Bool(true));
    assert_eq!(call_method(&s("hello"), "endswith", vec![s("lo")]).unwrap(), Value::Bool(true));
}

#[test]
fn string_padding() {
    assert_eq!(call_method(&s("ab"), "center", vec![Value::Int(5), s("*")]).unwrap(), s("**ab*"));
    assert_eq!(call_method(&s("-42"), "zfill", vec![Value::Int(6)]).unwrap(), s("-00042"));
    assert_eq!(call_method(&s("ab"), "rjust", vec![Value::Int(4)]).unwrap(), s("  ab"));
}

#[test]
fn string_format_method() {
    let method = get_attribute(&s("{0}-{name}"), "format").unwrap();
    let args = Args::new(vec![Value::Int(1)]).with_keyword("name", s("x"));
    assert_eq!(Interpreter::default().call(&method, args).unwrap(), s("1-x"));
}

#[test]
fn list_mutation() {
    let list = ints(&[3, 1, 2]);
    call_method(&list, "append", vec![Value::Int(0)]).unwrap();
    call_method(&list, "insert", vec![Value::Int(-100), Value::Int(9)]).unwrap();
    assert_eq!(list.repr(), "[9, 3, 1, 2, 0]");
    assert_eq!(call_method(&list, "pop", vec![]).unwrap(), Value::Int(0));
    call_method(&list, "remove", vec![Value::Int(9)]).unwrap();
    call_method(&list, "extend", vec![list.clone()]).unwrap();
    assert_eq!(list.repr(), "[3, 1, 2, 3, 1, 2]");
}

#[test]
fn list_sort_is_stable_and_reversible() {
    let list = Value::list(vec![
        Value::tuple(vec![Value::Int(1), s("a")]),
        Value::tuple(vec![Value::Int(0), s("b")]),
        Value::tuple(vec![Value::Int(1), s("c")]),
    ]);
    let key = Value::builtin("first", |_, args| Ok(args.positional[0].to_vec()?[0].clone()));
    let method = get_attribute(&list, "sort").unwrap();
    let args = Args::default()
        .with_keyword("key", key)
        .with_keyword("reverse", Value::Bool(true));
    Interpreter::default().call(&method, args).unwrap();
    assert_eq!(list.repr(), "[(1, 'a'), (1, 'c'), (0, 'b')]");
}

#[test]
fn list_sort_propagates_comparison_errors() {
    let list = Value::list(vec![Value::Int(1), s("a")]);
    let err = call_method(&list, "sort", vec![]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::TypeError);
    assert_eq!(list.repr(), "[1, 'a']");
}

#[test]
fn list_errors() {
    let err = call_method(&ints(&[]), "pop", vec![]).unwrap_err();
    assert_eq!(err.message(), "pop from empty list");
    let err = call_method(&ints(&[1]), "index", vec![Value::Int(5)]).unwrap_err();
    assert_eq!(err.message(), "5 is not in list");
}

#[test]
fn dict_methods() {
    let dict = Value::dict(DictValue::new());
    call_method(&dict, "setdefault", vec![s("a"), Value::Int(1)]).unwrap();
    call_method(&dict, "update", vec![Value::list(vec![Value::tuple(vec![s("b"), Value::Int(2)])])])
        .unwrap();
    assert_eq!(call_method(&dict, "get", vec![s("zz"), Value::Int(7)]).unwrap(), Value::Int(7));
    assert_eq!(call_method(&dict, "keys", vec![]).unwrap().repr(), "['a', 'b']");
    assert_eq!(call_method(&dict, "items", vec![]).unwrap().repr(), "[('a', 1), ('b', 2)]");
    assert_eq!(call_method(&dict, "has_key", vec![s("a")]).unwrap(), Value::Bool(true));
    assert_eq!(call_method(&dict, "pop", vec![s("a")]).unwrap(), Value::Int(1));
    let err = call_method(&dict, "pop", vec![s("a")]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::KeyError);
}

#[test]
fn dict_update_rejects_bad_pairs() {
    let dict = Value::dict(DictValue::new());
    let err = call_method(&dict, "update", vec![Value::list(vec![ints(&[1, 2, 3])])]).unwrap_err();
    assert_eq!(
        err.message(),
        "dictionary update sequence element #0 has length 3; 2 is required"
    );
}

#[test]
fn set_methods() {
    let set = Value::set(SetValue::from_values([Value::Int(1), Value::Int(2)]).unwrap());
    call_method(&set, "add", vec![Value::Int(3)]).unwrap();
    let union = call_method(&set, "union", vec![ints(&[4])]).unwrap();
    assert_eq!(union.len().unwrap(), 4);
    let common = call_method(&set, "intersection", vec![ints(&[2, 3, 9])]).unwrap();
    assert_eq!(common.repr(), "{2, 3}");
    assert_eq!(call_method(&set, "issubset", vec![ints(&[1, 2, 3, 4])]).unwrap(), Value::Bool(true));
    let err = call_method(&set, "remove", vec![Value::Int(42)]).unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::KeyError);
}

#[test]
fn data_attributes() {
    let e = Value::exception(ExceptionKind::ValueError, "bad");
    assert_eq!(get_attribute(&e, "args").unwrap().repr(), "('bad',)");
    assert_eq!(get_attribute(&Value::Int(5), "real").unwrap(), Value::Int(5));
    assert_eq!(get_attribute(&Value::Float(2.5), "imag").unwrap(), Value::Float(0.0));
    assert_eq!(call_method(&Value::Int(255), "bit_length", vec![]).unwrap(), Value::Int(8));
}

#[test]
fn missing_attribute() {
    let err = get_attribute(&Value::Int(1), "nope").unwrap_err();
    assert_eq!(err.to_string(), "AttributeError: 'int' object has no attribute 'nope'");
    assert!(!has_attribute(&Value::None, "x"));
}

#[test]
fn attribute_names_are_sorted() {
    let names = attribute_names(&ints(&[]));
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"append"));
}
