//! Methods on numbers and files.

use super::{wrong_receiver, MethodTable};
use crate::errors::{EvalError, EvalResult};
use crate::interpreter::{Args, Interpreter};
use crate::value::{FileValue, Value};

pub(super) const INT_METHODS: MethodTable =
    &[("bit_length", int_bit_length), ("conjugate", int_conjugate)];

pub(super) const FLOAT_METHODS: MethodTable =
    &[("conjugate", float_conjugate), ("is_integer", float_is_integer)];

pub(super) const FILE_METHODS: MethodTable = &[
    ("close", file_close),
    ("read", file_read),
    ("readline", file_readline),
    ("readlines", file_readlines),
];

fn int_bit_length(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("bit_length", 0)?;
    let n = receiver.as_int().ok_or_else(|| wrong_receiver("int", receiver))?;
    Ok(Value::Int(i64::from(u64::BITS - n.unsigned_abs().leading_zeros())))
}

fn int_conjugate(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("conjugate", 0)?;
    let n = receiver.as_int().ok_or_else(|| wrong_receiver("int", receiver))?;
    Ok(Value::Int(n))
}

fn this_float(receiver: &Value) -> Result<f64, EvalError> {
    match receiver {
        Value::Float(f) => Ok(*f),
        other => Err(wrong_receiver("float", other)),
    }
}

fn float_conjugate(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("conjugate", 0)?;
    Ok(Value::Float(this_float(receiver)?))
}

fn float_is_integer(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("is_integer", 0)?;
    let f = this_float(receiver)?;
    Ok(Value::Bool(f.is_finite() && f.fract() == 0.0))
}

fn this_file(receiver: &Value) -> Result<&FileValue, EvalError> {
    match receiver {
        Value::File(file) => Ok(file),
        other => Err(wrong_receiver("file", other)),
    }
}

/// Unread text; reading consumes it.
fn take_rest(file: &FileValue) -> Result<String, EvalError> {
    let rest = file.read()?;
    *file.contents.borrow_mut() = Some(String::new());
    Ok(rest)
}

fn file_read(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("read", 0)?;
    Ok(Value::str(take_rest(this_file(receiver)?)?))
}

fn file_readline(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("readline", 0)?;
    let file = this_file(receiver)?;
    let rest = file.read()?;
    let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
    let (line, tail) = rest.split_at(end);
    let line = Value::str(line);
    *file.contents.borrow_mut() = Some(tail.to_owned());
    Ok(line)
}

fn file_readlines(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("readlines", 0)?;
    let rest = take_rest(this_file(receiver)?)?;
    Ok(Value::list(rest.split_inclusive('\n').map(Value::str).collect()))
}

fn file_close(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("close", 0)?;
    this_file(receiver)?.close();
    Ok(Value::None)
}
