//! Attribute access and built-in methods.
//!
//! The type set is closed, so attributes resolve against static per-type
//! tables of native functions instead of a dynamic registry. A table hit
//! yields a [`BoundMethod`] carrying the receiver; data attributes such as
//! `slice.start` or `e.args` are computed on access.
//!
//! # Module Structure
//!
//! - `strings`: methods on `str`
//! - `collections`: methods on `list`, `tuple`, `dict` and `set`
//! - `scalars`: methods on numbers and files
//! - `sort`: the fallible stable sort behind `list.sort` and `sorted`

mod collections;
mod scalars;
mod sort;
mod strings;

pub(crate) use collections::mapping_pairs;
pub(crate) use sort::sort_values;

use std::rc::Rc;

use crate::errors::{attribute_error, type_error, EvalError, EvalResult};
use crate::exceptions::Exception;
use crate::value::{BoundMethod, MethodFn, Value};

/// Methods of one type, sorted by name.
type MethodTable = &'static [(&'static str, MethodFn)];

/// `object.attr` for built-in values.
pub fn get_attribute(object: &Value, attr: &str) -> EvalResult {
    if let Some(value) = data_attribute(object, attr) {
        return Ok(value);
    }
    match method_table(object).iter().find(|(name, _)| *name == attr) {
        Some(&(name, func)) => Ok(Value::BoundMethod(Rc::new(BoundMethod {
            receiver: object.clone(),
            name,
            func,
        }))),
        None => Err(attribute_error(object.type_name(), attr)),
    }
}

/// Whether `object.attr` would resolve.
pub fn has_attribute(object: &Value, attr: &str) -> bool {
    data_attribute(object, attr).is_some()
        || method_table(object).iter().any(|(name, _)| *name == attr)
}

/// Attribute names visible on `object`, sorted, for `dir()`.
pub fn attribute_names(object: &Value) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = data_attribute_names(object)
        .iter()
        .copied()
        .chain(method_table(object).iter().map(|(name, _)| *name))
        .collect();
    names.sort_unstable();
    names
}

fn method_table(object: &Value) -> MethodTable {
    match object {
        Value::Str(_) => strings::METHODS,
        Value::List(_) => collections::LIST_METHODS,
        Value::Tuple(_) => collections::TUPLE_METHODS,
        Value::Dict(_) => collections::DICT_METHODS,
        Value::Set(_) => collections::SET_METHODS,
        Value::Int(_) | Value::Bool(_) => scalars::INT_METHODS,
        Value::Float(_) => scalars::FLOAT_METHODS,
        Value::File(_) => scalars::FILE_METHODS,
        _ => &[],
    }
}

fn data_attribute_names(object: &Value) -> &'static [&'static str] {
    match object {
        Value::Int(_) | Value::Bool(_) | Value::Float(_) => &["imag", "real"],
        Value::Slice(_) | Value::Range(_) => &["start", "step", "stop"],
        Value::Exception(_) => &["args", "message"],
        Value::File(_) => &["closed", "name"],
        Value::Function(_) | Value::Builtin(_) | Value::Type(_) | Value::ExceptionType(_) => {
            &["__name__"]
        }
        _ => &[],
    }
}

fn data_attribute(object: &Value, attr: &str) -> Option<Value> {
    Some(match (object, attr) {
        (Value::Int(_) | Value::Bool(_), "real") => Value::Int(object.as_int()?),
        (Value::Int(_) | Value::Bool(_), "imag") => Value::Int(0),
        (Value::Float(f), "real") => Value::Float(*f),
        (Value::Float(_), "imag") => Value::Float(0.0),
        (Value::Slice(s), "start") => s.start.clone(),
        (Value::Slice(s), "stop") => s.stop.clone(),
        (Value::Slice(s), "step") => s.step.clone(),
        (Value::Range(r), "start") => Value::Int(r.start),
        (Value::Range(r), "stop") => Value::Int(r.stop),
        (Value::Range(r), "step") => Value::Int(r.step),
        (Value::Exception(e), "args") => exception_args(e),
        (Value::Exception(e), "message") => Value::str(&e.message),
        (Value::File(f), "name") => Value::str(&f.path),
        (Value::File(f), "closed") => Value::Bool(f.is_closed()),
        (Value::Function(f), "__name__") => Value::Str(Rc::clone(&f.name)),
        (Value::Builtin(b), "__name__") => Value::str(b.name),
        (Value::Type(kind), "__name__") => Value::str(kind.name()),
        (Value::ExceptionType(kind), "__name__") => Value::str(kind.name()),
        _ => return None,
    })
}

fn exception_args(exception: &Exception) -> Value {
    if exception.message.is_empty() {
        Value::tuple(Vec::new())
    } else {
        Value::tuple(vec![Value::str(&exception.message)])
    }
}

// Argument helpers shared by the method tables

/// A `str` argument, or a `TypeError` naming the method.
pub(super) fn expect_str<'a>(func: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value.as_str().ok_or_else(|| {
        type_error(format!(
            "{func}() argument must be str, not {}",
            value.type_name()
        ))
    })
}

/// An integer argument, or a `TypeError` naming the method.
pub(super) fn expect_int(func: &str, value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or_else(|| {
        type_error(format!(
            "{func}() argument must be int, not {}",
            value.type_name()
        ))
    })
}

/// The receiver did not have the type its table was chosen for.
#[cold]
pub(super) fn wrong_receiver(expected: &str, receiver: &Value) -> EvalError {
    type_error(format!(
        "descriptor requires a '{expected}' object but received a '{}'",
        receiver.type_name()
    ))
}

/// Clamp a possibly negative index into `0..=len`.
pub(super) fn clamp_index(index: i64, len: usize) -> usize {
    let magnitude = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
    if index < 0 {
        len.saturating_sub(magnitude)
    } else {
        magnitude.min(len)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
