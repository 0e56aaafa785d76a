//! Equality and ordering.

use std::cmp::Ordering;

use super::Value;
use crate::errors::{type_error, EvalError};

/// `==` semantics: structural for containers, numeric across int/float/bool.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::List(x), Value::List(y)) => {
            std::rc::Rc::ptr_eq(x, y) || seq_equal(&x.borrow(), &y.borrow())
        }
        (Value::Tuple(x), Value::Tuple(y)) => seq_equal(x, y),
        (Value::Dict(x), Value::Dict(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len()
                && x.items().iter().all(|(k, v)| {
                    matches!(y.get(k), Ok(Some(other)) if values_equal(v, &other))
                })
        }
        (Value::Set(x), Value::Set(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len() && x.is_subset(&y)
        }
        (Value::Range(x), Value::Range(y)) => x == y,
        (Value::Type(x), Value::Type(y)) => x == y,
        (Value::ExceptionType(x), Value::ExceptionType(y)) => x == y,
        (Value::Exception(x), Value::Exception(y)) => std::rc::Rc::ptr_eq(x, y),
        (Value::Float(_), _) | (_, Value::Float(_)) => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => match (a.as_int(), b.as_int()) {
            (Some(x), Some(y)) => x == y,
            _ => a.is_same(b),
        },
    }
}

fn seq_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

/// Ordering for `<`, `<=`, `>`, `>=`, `sorted()`, `min()` and `max()`.
///
/// `op` names the operator in the error for unorderable operands.
pub fn compare_values(a: &Value, b: &Value, op: &str) -> Result<Ordering, EvalError> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::List(x), Value::List(y)) => compare_seq(&x.borrow(), &y.borrow(), op),
        (Value::Tuple(x), Value::Tuple(y)) => compare_seq(x, y, op),
        (Value::Set(x), Value::Set(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            Ok(match (x.is_subset(&y), y.is_subset(&x)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => {
                    return Err(type_error("sets are not totally ordered"));
                }
            })
        }
        _ => {
            if let (Some(x), Some(y)) = (a.as_int(), b.as_int()) {
                return Ok(x.cmp(&y));
            }
            if let (Some(x), Some(y)) = (a.as_float(), b.as_float()) {
                return x
                    .partial_cmp(&y)
                    .ok_or_else(|| type_error("cannot order NaN"));
            }
            Err(type_error(format!(
                "'{op}' not supported between instances of '{}' and '{}'",
                a.type_name(),
                b.type_name()
            )))
        }
    }
}

fn compare_seq(a: &[Value], b: &[Value], op: &str) -> Result<Ordering, EvalError> {
    for (x, y) in a.iter().zip(b) {
        if !values_equal(x, y) {
            return compare_values(x, y, op);
        }
    }
    Ok(a.len().cmp(&b.len()))
}
