//! Calling a type: `int('12')`, `dict(a=1)`, `range(3)`.

use std::rc::Rc;

use crate::errors::{arity_error, overflow_error, type_error, value_error, EvalError, EvalResult};
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, Interpreter};
use crate::methods::mapping_pairs;
use crate::value::{DictValue, RangeValue, SetValue, SliceValue, TypeKind, Value};

/// Construct a value of a built-in type.
pub(crate) fn construct(_interp: &mut Interpreter, kind: TypeKind, args: Args) -> EvalResult {
    let name = kind.name();
    match kind {
        TypeKind::Bool => {
            let args = args.between(name, 0, 1)?;
            Ok(Value::Bool(args.first().is_some_and(Value::is_truthy)))
        }
        TypeKind::Int => to_int(&args),
        TypeKind::Float => {
            let args = args.between(name, 0, 1)?;
            match args.first() {
                None => Ok(Value::Float(0.0)),
                Some(value) => to_float(value).map(Value::Float),
            }
        }
        TypeKind::Str => {
            let args = args.between(name, 0, 1)?;
            Ok(Value::str(args.first().map(Value::to_str).unwrap_or_default()))
        }
        TypeKind::List => Ok(Value::list(items_of(name, &args)?)),
        TypeKind::Tuple => match args.between(name, 0, 1)? {
            [tuple @ Value::Tuple(_)] => Ok(tuple.clone()),
            _ => Ok(Value::tuple(items_of(name, &args)?)),
        },
        TypeKind::Set => Ok(Value::set(SetValue::from_values(items_of(name, &args)?)?)),
        TypeKind::Dict => {
            args.count_between(name, 0, 1)?;
            let mut dict = DictValue::new();
            if let Some(source) = args.get(0) {
                for (key, value) in mapping_pairs(source, "dictionary")? {
                    dict.insert(key, value)?;
                }
            }
            for (key, value) in args.keywords {
                dict.insert(Value::Str(key), value)?;
            }
            Ok(Value::dict(dict))
        }
        TypeKind::Range => to_range(&args),
        TypeKind::Slice => {
            let parts = args.between(name, 1, 3)?;
            let slice = match parts {
                [stop] => SliceValue {
                    start: Value::None,
                    stop: stop.clone(),
                    step: Value::None,
                },
                [start, stop] => SliceValue {
                    start: start.clone(),
                    stop: stop.clone(),
                    step: Value::None,
                },
                [start, stop, step, ..] => SliceValue {
                    start: start.clone(),
                    stop: stop.clone(),
                    step: step.clone(),
                },
                [] => return Err(arity_error(name, "at least 1", 0)),
            };
            Ok(Value::Slice(Rc::new(slice)))
        }
    }
}

fn items_of(name: &str, args: &Args) -> Result<Vec<Value>, EvalError> {
    match args.between(name, 0, 1)? {
        [] => Ok(Vec::new()),
        [iterable, ..] => iterable.to_vec(),
    }
}

fn to_int(args: &Args) -> EvalResult {
    let parts = args.between("int", 0, 2)?;
    match parts {
        [] => Ok(Value::Int(0)),
        [value] => match value {
            Value::Int(_) | Value::Bool(_) => Ok(Value::Int(value.as_int().unwrap_or(0))),
            Value::Float(f) => float_to_int(*f).map(Value::Int),
            Value::Str(s) => parse_int(s, 10).map(Value::Int),
            other => Err(type_error(format!(
                "int() argument must be a string or a number, not '{}'",
                other.type_name()
            ))),
        },
        [value, base, ..] => {
            let Value::Str(s) = value else {
                return Err(type_error("int() can't convert non-string with explicit base"));
            };
            let base = base.as_index("int() base")?;
            match u32::try_from(base) {
                Ok(b) if b == 0 || (2..=36).contains(&b) => parse_int(s, b).map(Value::Int),
                _ => Err(value_error("int() base must be >= 2 and <= 36")),
            }
        }
    }
}

/// Truncate toward zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "range is checked against the exact i64 bounds first"
)]
pub(super) fn float_to_int(f: f64) -> Result<i64, EvalError> {
    if f.is_nan() {
        return Err(value_error("cannot convert float NaN to integer"));
    }
    if f.is_infinite() {
        return Err(EvalError::new(
            ExceptionKind::OverflowError,
            "cannot convert float infinity to integer",
        ));
    }
    let truncated = f.trunc();
    // -2^63 is exact in f64; 2^63 is one past i64::MAX.
    let bound = 2.0_f64.powi(63);
    if truncated >= bound || truncated < -bound {
        return Err(overflow_error());
    }
    Ok(truncated as i64)
}

/// Parse an integer literal the way `int(text, base)` does.
///
/// Base 0 infers the base from a `0x`, `0o` or `0b` prefix.
pub(super) fn parse_int(text: &str, base: u32) -> Result<i64, EvalError> {
    let invalid = || {
        value_error(format!(
            "invalid literal for int() with base {base}: {}",
            Value::str(text).repr()
        ))
    };
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let lower = digits.to_ascii_lowercase();
    let prefixed = |prefix: &str, radix: u32| {
        lower
            .strip_prefix(prefix)
            .filter(|_| base == radix || base == 0)
            .map(|rest| (rest.to_owned(), radix))
    };
    let (digits, radix) = prefixed("0x", 16)
        .or_else(|| prefixed("0o", 8))
        .or_else(|| prefixed("0b", 2))
        .unwrap_or_else(|| (lower.clone(), if base == 0 { 10 } else { base }));
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    let magnitude = i128::from_str_radix(&digits, radix).map_err(|_| invalid())?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).map_err(|_| overflow_error())
}

pub(super) fn to_float(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Str(s) => {
            let text = s.trim();
            text.parse::<f64>().map_err(|_| {
                value_error(format!(
                    "could not convert string to float: {}",
                    Value::str(text).repr()
                ))
            })
        }
        other => other.as_float().ok_or_else(|| {
            type_error(format!(
                "float() argument must be a string or a number, not '{}'",
                other.type_name()
            ))
        }),
    }
}

fn to_range(args: &Args) -> EvalResult {
    let parts = args.between("range", 1, 3)?;
    let mut ints = Vec::with_capacity(parts.len());
    for part in parts {
        ints.push(part.as_int().ok_or_else(|| {
            type_error(format!(
                "range() integer argument expected, got {}",
                part.type_name()
            ))
        })?);
    }
    let (start, stop, step) = match ints.as_slice() {
        [stop] => (0, *stop, 1),
        [start, stop] => (*start, *stop, 1),
        [start, stop, step, ..] => (*start, *stop, *step),
        [] => return Err(arity_error("range", "at least 1", 0)),
    };
    if step == 0 {
        return Err(value_error("range() arg 3 must not be zero"));
    }
    Ok(Value::Range(RangeValue { start, stop, step }))
}
