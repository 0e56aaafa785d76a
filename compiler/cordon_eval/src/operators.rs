//! Operator implementations.
//!
//! Direct enum dispatch over the closed set of value types. Integer
//! arithmetic is checked: a result outside `i64` raises `OverflowError`
//! rather than wrapping.

mod subscript;

use std::rc::Rc;

use cordon_ir::{BinaryOp, CmpOp, UnaryOp};

use crate::errors::{
    overflow_error, type_error, unsupported_operands, value_error, zero_division, EvalError,
    EvalResult,
};
use crate::exceptions::ExceptionKind;
use crate::format::percent_format;
use crate::value::{compare_values, values_equal, SetValue, Value};

pub use subscript::{del_item, get_item, set_item};

// Integer arithmetic

#[inline]
fn checked(result: Option<i64>) -> EvalResult {
    result.map(Value::Int).ok_or_else(overflow_error)
}

/// Floor division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        return Err(zero_division("integer division or modulo by zero"));
    }
    let q = a.checked_div(b).ok_or_else(overflow_error)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        checked(q.checked_sub(1))
    } else {
        Ok(Value::Int(q))
    }
}

/// Modulo taking the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        return Err(zero_division("integer division or modulo by zero"));
    }
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && ((r < 0) != (b < 0)) {
        checked(r.checked_add(b))
    } else {
        Ok(Value::Int(r))
    }
}

#[allow(clippy::cast_precision_loss, reason = "negative exponents produce floats")]
fn int_pow(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        if a == 0 {
            return Err(zero_division("0.0 cannot be raised to a negative power"));
        }
        let exp = i32::try_from(b).unwrap_or(i32::MIN);
        return Ok(Value::Float((a as f64).powi(exp)));
    }
    let exp = u32::try_from(b).map_err(|_| overflow_error())?;
    checked(a.checked_pow(exp))
}

fn shift_left(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        return Err(value_error("negative shift count"));
    }
    if a == 0 {
        return Ok(Value::Int(0));
    }
    if b >= 63 {
        return Err(overflow_error());
    }
    checked(a.checked_mul(1i64 << b))
}

fn shift_right(a: i64, b: i64) -> EvalResult {
    if b < 0 {
        return Err(value_error("negative shift count"));
    }
    if b >= 64 {
        return Ok(Value::Int(if a < 0 { -1 } else { 0 }));
    }
    Ok(Value::Int(a >> b))
}

#[allow(clippy::cast_precision_loss, reason = "true division always yields a float")]
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked(a.checked_add(b)),
        BinaryOp::Sub => checked(a.checked_sub(b)),
        BinaryOp::Mul => checked(a.checked_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                Err(zero_division("division by zero"))
            } else {
                Ok(Value::Float(a as f64 / b as f64))
            }
        }
        BinaryOp::FloorDiv => floor_div(a, b),
        BinaryOp::Mod => floor_mod(a, b),
        BinaryOp::Pow => int_pow(a, b),
        BinaryOp::Shl => shift_left(a, b),
        BinaryOp::Shr => shift_right(a, b),
        BinaryOp::BitAnd => Ok(Value::Int(a & b)),
        BinaryOp::BitOr => Ok(Value::Int(a | b)),
        BinaryOp::BitXor => Ok(Value::Int(a ^ b)),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(zero_division("float division by zero"));
            }
            a / b
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                return Err(zero_division("float divmod()"));
            }
            (a / b).floor()
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(zero_division("float modulo"));
            }
            let r = a % b;
            if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                r + b
            } else {
                r
            }
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(zero_division("0.0 cannot be raised to a negative power"));
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err(value_error(
                    "negative number cannot be raised to a fractional power",
                ));
            }
            a.powf(b)
        }
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor => {
            return Err(unsupported_operands(op.as_symbol(), left, right));
        }
    };
    if op == BinaryOp::Pow && value.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(EvalError::new(
            ExceptionKind::OverflowError,
            "numerical result out of range",
        ));
    }
    Ok(Value::Float(value))
}

// Sequences

/// `seq * n`, refusing results that could not be allocated.
fn repeat<T: Clone>(items: &[T], count: i64) -> Result<Vec<T>, EvalError> {
    let count = usize::try_from(count).unwrap_or(0);
    let total = items.len().checked_mul(count).ok_or_else(too_long)?;
    if total > isize::MAX as usize / 64 {
        return Err(too_long());
    }
    let mut out = Vec::with_capacity(total);
    for _ in 0..count {
        out.extend_from_slice(items);
    }
    Ok(out)
}

fn too_long() -> EvalError {
    EvalError::new(ExceptionKind::OverflowError, "repeated sequence is too long")
}

fn repeat_str(s: &str, count: i64) -> EvalResult {
    let count = usize::try_from(count).unwrap_or(0);
    let total = s.len().checked_mul(count).ok_or_else(too_long)?;
    if total > isize::MAX as usize / 64 {
        return Err(too_long());
    }
    Ok(Value::str(s.repeat(count)))
}

fn eval_set_binary(a: &SetValue, b: &SetValue, op: BinaryOp) -> Option<SetValue> {
    Some(match op {
        BinaryOp::BitOr => a.union(b),
        BinaryOp::BitAnd => a.intersection(b),
        BinaryOp::Sub => a.difference(b),
        BinaryOp::BitXor => a.symmetric_difference(b),
        _ => return None,
    })
}

/// Evaluate a binary operator.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b))
            if matches!(op, BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor) =>
        {
            Ok(Value::Bool(match op {
                BinaryOp::BitAnd => a & b,
                BinaryOp::BitOr => a | b,
                _ => a ^ b,
            }))
        }
        (Value::Int(_) | Value::Bool(_), Value::Int(_) | Value::Bool(_)) => {
            let (a, b) = (left.as_int().unwrap_or(0), right.as_int().unwrap_or(0));
            eval_int_binary(a, b, op)
        }
        (Value::Float(_), Value::Int(_) | Value::Bool(_) | Value::Float(_))
        | (Value::Int(_) | Value::Bool(_), Value::Float(_)) => {
            let (a, b) = (left.as_float().unwrap_or(0.0), right.as_float().unwrap_or(0.0));
            eval_float_binary(a, b, op, left, right)
        }
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::str(joined))
        }
        (Value::Str(s), n) | (n, Value::Str(s))
            if op == BinaryOp::Mul && matches!(n, Value::Int(_) | Value::Bool(_)) =>
        {
            repeat_str(s, n.as_int().unwrap_or(0))
        }
        (Value::Str(template), args) if op == BinaryOp::Mod => {
            Ok(Value::str(percent_format(template, args)?))
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (Value::Tuple(a), Value::Tuple(b)) if op == BinaryOp::Add => {
            Ok(Value::Tuple(a.iter().chain(b.iter()).cloned().collect()))
        }
        (Value::List(items), n) | (n, Value::List(items))
            if op == BinaryOp::Mul && matches!(n, Value::Int(_) | Value::Bool(_)) =>
        {
            let items = items.borrow();
            Ok(Value::list(repeat(items.as_slice(), n.as_int().unwrap_or(0))?))
        }
        (Value::Tuple(items), n) | (n, Value::Tuple(items))
            if op == BinaryOp::Mul && matches!(n, Value::Int(_) | Value::Bool(_)) =>
        {
            Ok(Value::Tuple(Rc::from(repeat(&items[..], n.as_int().unwrap_or(0))?)))
        }
        (Value::Set(a), Value::Set(b)) => eval_set_binary(&a.borrow(), &b.borrow(), op)
            .map(Value::set)
            .ok_or_else(|| unsupported_operands(op.as_symbol(), left, right)),
        _ => Err(unsupported_operands(op.as_symbol(), left, right)),
    }
}

/// Evaluate a prefix operator.
#[allow(clippy::cast_precision_loss, reason = "bool negation follows int rules")]
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(_) | Value::Bool(_)) => {
            checked(operand.as_int().unwrap_or(0).checked_neg())
        }
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, Value::Int(_) | Value::Bool(_)) => {
            Ok(Value::Int(operand.as_int().unwrap_or(0)))
        }
        (UnaryOp::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        (UnaryOp::Invert, Value::Int(_) | Value::Bool(_)) => {
            Ok(Value::Int(!operand.as_int().unwrap_or(0)))
        }
        (op, v) => Err(type_error(format!(
            "bad operand type for unary {}: '{}'",
            op.as_symbol(),
            v.type_name()
        ))),
    }
}

/// `item in container`.
pub fn contains(container: &Value, item: &Value) -> Result<bool, EvalError> {
    match container {
        Value::Str(haystack) => match item {
            Value::Str(needle) => Ok(haystack.contains(&**needle)),
            other => Err(type_error(format!(
                "'in <string>' requires string as left operand, not {}",
                other.type_name()
            ))),
        },
        Value::List(items) => Ok(items.borrow().iter().any(|v| values_equal(v, item))),
        Value::Tuple(items) => Ok(items.iter().any(|v| values_equal(v, item))),
        Value::Dict(d) => d.borrow().contains(item),
        Value::Set(s) => s.borrow().contains(item),
        Value::Range(r) => Ok(match item {
            Value::Int(_) | Value::Bool(_) => r.contains(item.as_int().unwrap_or(0)),
            Value::Float(f) if f.fract() == 0.0 => {
                #[allow(clippy::cast_possible_truncation, reason = "integral float")]
                let n = *f as i64;
                r.contains(n)
            }
            _ => false,
        }),
        Value::Iterator(_) | Value::File(_) => {
            let mut iter = container.iter()?;
            Ok(iter.any(|v| values_equal(&v, item)))
        }
        other => Err(type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

/// Evaluate one link of a comparison chain.
pub fn evaluate_compare(left: &Value, right: &Value, op: CmpOp) -> Result<bool, EvalError> {
    match op {
        CmpOp::Eq => Ok(values_equal(left, right)),
        CmpOp::NotEq => Ok(!values_equal(left, right)),
        CmpOp::Is => Ok(left.is_same(right)),
        CmpOp::IsNot => Ok(!left.is_same(right)),
        CmpOp::In => contains(right, left),
        CmpOp::NotIn => contains(right, left).map(|found| !found),
        CmpOp::Lt | CmpOp::LtEq | CmpOp::Gt | CmpOp::GtEq => ordering(left, right, op),
    }
}

fn ordering(left: &Value, right: &Value, op: CmpOp) -> Result<bool, EvalError> {
    use std::cmp::Ordering;

    // NaN and proper-subset comparisons are false rather than errors.
    if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) {
        if let (Some(a), Some(b)) = (left.as_float(), right.as_float()) {
            return Ok(match op {
                CmpOp::Lt => a < b,
                CmpOp::LtEq => a <= b,
                CmpOp::Gt => a > b,
                _ => a >= b,
            });
        }
    }
    if let (Value::Set(a), Value::Set(b)) = (left, right) {
        let (a, b) = (a.borrow(), b.borrow());
        return Ok(match op {
            CmpOp::Lt => a.len() < b.len() && a.is_subset(&b),
            CmpOp::LtEq => a.is_subset(&b),
            CmpOp::Gt => b.len() < a.len() && b.is_subset(&a),
            _ => b.is_subset(&a),
        });
    }
    let order = compare_values(left, right, op.as_symbol())?;
    Ok(match op {
        CmpOp::Lt => order == Ordering::Less,
        CmpOp::LtEq => order != Ordering::Greater,
        CmpOp::Gt => order == Ordering::Greater,
        _ => order != Ordering::Less,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
