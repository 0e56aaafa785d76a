use super::*;
use crate::value::{DictValue, SliceValue};
use pretty_assertions::assert_eq;

fn bin(left: Value, op: BinaryOp, right: Value) -> Result<Value, ExceptionKind> {
    evaluate_binary(&left, &right, op).map_err(|e| e.kind())
}

fn ints(items: &[i64]) -> Vec<Value> {
    items.iter().copied().map(Value::int).collect()
}

#[test]
fn integer_arithmetic() {
    assert_eq!(bin(Value::int(3), BinaryOp::Add, Value::int(4)), Ok(Value::int(7)));
    assert_eq!(bin(Value::int(7), BinaryOp::Div, Value::int(2)), Ok(Value::float(3.5)));
    assert_eq!(bin(Value::int(-7), BinaryOp::FloorDiv, Value::int(2)), Ok(Value::int(-4)));
    assert_eq!(bin(Value::int(-7), BinaryOp::Mod, Value::int(3)), Ok(Value::int(2)));
    assert_eq!(bin(Value::int(7), BinaryOp::Mod, Value::int(-3)), Ok(Value::int(-2)));
    assert_eq!(bin(Value::int(2), BinaryOp::Pow, Value::int(10)), Ok(Value::int(1024)));
    assert_eq!(bin(Value::int(2), BinaryOp::Pow, Value::int(-1)), Ok(Value::float(0.5)));
    assert_eq!(bin(Value::int(1), BinaryOp::Shl, Value::int(4)), Ok(Value::int(16)));
    assert_eq!(bin(Value::int(-16), BinaryOp::Shr, Value::int(2)), Ok(Value::int(-4)));
    assert_eq!(bin(Value::Bool(true), BinaryOp::Add, Value::Bool(true)), Ok(Value::int(2)));
    assert_eq!(
        bin(Value::Bool(true), BinaryOp::BitAnd, Value::Bool(false)),
        Ok(Value::Bool(false))
    );
}

#[test]
fn integer_errors() {
    assert_eq!(
        bin(Value::int(i64::MAX), BinaryOp::Add, Value::int(1)),
        Err(ExceptionKind::OverflowError)
    );
    assert_eq!(
        bin(Value::int(i64::MIN), BinaryOp::FloorDiv, Value::int(-1)),
        Err(ExceptionKind::OverflowError)
    );
    assert_eq!(
        bin(Value::int(1), BinaryOp::Mod, Value::int(0)),
        Err(ExceptionKind::ZeroDivisionError)
    );
    assert_eq!(
        bin(Value::int(1), BinaryOp::Div, Value::int(0)),
        Err(ExceptionKind::ZeroDivisionError)
    );
    assert_eq!(
        bin(Value::int(1), BinaryOp::Shl, Value::int(-1)),
        Err(ExceptionKind::ValueError)
    );
    assert_eq!(
        bin(Value::int(1), BinaryOp::Shl, Value::int(64)),
        Err(ExceptionKind::OverflowError)
    );
}

#[test]
fn float_arithmetic() {
    assert_eq!(bin(Value::float(1.5), BinaryOp::Add, Value::int(1)), Ok(Value::float(2.5)));
    assert_eq!(bin(Value::float(-7.0), BinaryOp::Mod, Value::int(3)), Ok(Value::float(2.0)));
    assert_eq!(
        bin(Value::float(1.0), BinaryOp::Div, Value::float(0.0)),
        Err(ExceptionKind::ZeroDivisionError)
    );
    assert_eq!(
        bin(Value::float(1.0), BinaryOp::BitOr, Value::int(1)),
        Err(ExceptionKind::TypeError)
    );
    assert_eq!(
        bin(Value::float(1e308), BinaryOp::Pow, Value::int(2)),
        Err(ExceptionKind::OverflowError)
    );
}

#[test]
fn sequences() {
    assert_eq!(bin(Value::str("ab"), BinaryOp::Add, Value::str("c")), Ok(Value::str("abc")));
    assert_eq!(bin(Value::str("ab"), BinaryOp::Mul, Value::int(3)), Ok(Value::str("ababab")));
    assert_eq!(bin(Value::int(2), BinaryOp::Mul, Value::str("x")), Ok(Value::str("xx")));
    assert_eq!(bin(Value::str("x"), BinaryOp::Mul, Value::int(-1)), Ok(Value::str("")));
    assert_eq!(
        bin(Value::list(ints(&[1])), BinaryOp::Add, Value::list(ints(&[2]))),
        Ok(Value::list(ints(&[1, 2])))
    );
    assert_eq!(
        bin(Value::tuple(ints(&[0])), BinaryOp::Mul, Value::int(3)),
        Ok(Value::tuple(ints(&[0, 0, 0])))
    );
    assert_eq!(
        bin(Value::str("a"), BinaryOp::Add, Value::int(1)),
        Err(ExceptionKind::TypeError)
    );
    assert_eq!(
        bin(Value::list(ints(&[1])), BinaryOp::Mul, Value::int(i64::MAX)),
        Err(ExceptionKind::OverflowError)
    );
}

#[test]
fn string_interpolation() {
    assert_eq!(
        bin(Value::str("%s=%d"), BinaryOp::Mod, Value::tuple(vec![Value::str("x"), Value::int(1)])),
        Ok(Value::str("x=1"))
    );
}

#[test]
fn sets() {
    let a = Value::set(SetValue::from_values(ints(&[1, 2])).unwrap_or_default());
    let b = Value::set(SetValue::from_values(ints(&[2, 3])).unwrap_or_default());
    let union = bin(a.clone(), BinaryOp::BitOr, b.clone()).map(|v| v.repr());
    assert_eq!(union, Ok("{1, 2, 3}".to_owned()));
    let diff = bin(a.clone(), BinaryOp::Sub, b.clone()).map(|v| v.repr());
    assert_eq!(diff, Ok("{1}".to_owned()));
    assert_eq!(evaluate_compare(&a, &b, CmpOp::Lt).ok(), Some(false));
    assert_eq!(evaluate_compare(&a, &a, CmpOp::LtEq).ok(), Some(true));
}

#[test]
fn unary() {
    assert_eq!(evaluate_unary(&Value::int(5), UnaryOp::Neg).ok(), Some(Value::int(-5)));
    assert_eq!(evaluate_unary(&Value::int(5), UnaryOp::Invert).ok(), Some(Value::int(-6)));
    assert_eq!(evaluate_unary(&Value::str(""), UnaryOp::Not).ok(), Some(Value::Bool(true)));
    assert_eq!(
        evaluate_unary(&Value::int(i64::MIN), UnaryOp::Neg).map_err(|e| e.kind()),
        Err(ExceptionKind::OverflowError)
    );
    assert_eq!(
        evaluate_unary(&Value::str("a"), UnaryOp::Neg).map_err(|e| e.to_string()),
        Err("TypeError: bad operand type for unary -: 'str'".to_owned())
    );
}

#[test]
fn comparisons() {
    let cmp = |l: Value, op, r: Value| evaluate_compare(&l, &r, op).map_err(|e| e.kind());
    assert_eq!(cmp(Value::int(1), CmpOp::Lt, Value::float(1.5)), Ok(true));
    assert_eq!(cmp(Value::str("b"), CmpOp::GtEq, Value::str("a")), Ok(true));
    assert_eq!(cmp(Value::float(f64::NAN), CmpOp::Lt, Value::int(1)), Ok(false));
    assert_eq!(cmp(Value::int(1), CmpOp::Lt, Value::str("a")), Err(ExceptionKind::TypeError));
    assert_eq!(cmp(Value::str("ell"), CmpOp::In, Value::str("hello")), Ok(true));
    assert_eq!(cmp(Value::int(3), CmpOp::NotIn, Value::list(ints(&[1, 2]))), Ok(true));
    assert_eq!(cmp(Value::None, CmpOp::Is, Value::None), Ok(true));
    assert_eq!(cmp(Value::int(1), CmpOp::In, Value::str("abc")), Err(ExceptionKind::TypeError));
}

#[test]
fn indexing() {
    let list = Value::list(ints(&[10, 20, 30]));
    assert_eq!(get_item(&list, &Value::int(-1)).ok(), Some(Value::int(30)));
    assert_eq!(
        get_item(&list, &Value::int(3)).map_err(|e| e.to_string()),
        Err("IndexError: list index out of range".to_owned())
    );
    assert_eq!(get_item(&Value::str("héllo"), &Value::int(1)).ok(), Some(Value::str("é")));

    let rev = Value::Slice(Rc::new(SliceValue {
        start: Value::None,
        stop: Value::None,
        step: Value::int(-1),
    }));
    assert_eq!(get_item(&Value::str("abc"), &rev).ok(), Some(Value::str("cba")));

    let mut dict = DictValue::new();
    dict.insert(Value::str("k"), Value::int(1)).ok();
    let dict = Value::dict(dict);
    assert_eq!(get_item(&dict, &Value::str("k")).ok(), Some(Value::int(1)));
    assert_eq!(
        get_item(&dict, &Value::str("z")).map_err(|e| e.to_string()),
        Err("KeyError: 'z'".to_owned())
    );
    assert_eq!(
        get_item(&Value::int(1), &Value::int(0)).map_err(|e| e.kind()),
        Err(ExceptionKind::TypeError)
    );
}

#[test]
fn slice_assignment_and_deletion() {
    let list = Value::list(ints(&[1, 2, 3, 4]));
    let middle = Value::Slice(Rc::new(SliceValue {
        start: Value::int(1),
        stop: Value::int(3),
        step: Value::None,
    }));
    assert!(set_item(&list, &middle, Value::list(ints(&[9]))).is_ok());
    assert_eq!(list, Value::list(ints(&[1, 9, 4])));
    assert!(del_item(&list, &Value::int(0)).is_ok());
    assert_eq!(list, Value::list(ints(&[9, 4])));
    assert!(set_item(&Value::tuple(ints(&[1])), &Value::int(0), Value::None).is_err());
}
