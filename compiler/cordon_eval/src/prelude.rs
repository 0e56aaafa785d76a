//! Math helpers for hosts to bind into an [`Environment`](crate::Environment).
//!
//! These are ordinary bindings, not ambient builtins, so vetted sources may
//! use them once a host has added them:
//!
//! ```ignore
//! let env: Environment = math_bindings().into_iter().collect();
//! ```

use crate::errors::{type_error, value_error, EvalError, EvalResult};
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, Interpreter};
use crate::value::{BuiltinFn, Value};

fn number(func: &str, value: &Value) -> Result<f64, EvalError> {
    value.as_float().ok_or_else(|| {
        type_error(format!(
            "{func}() argument must be a number, not '{}'",
            value.type_name()
        ))
    })
}

/// A finite result, or `ValueError` when the input was outside the domain.
fn checked(result: f64, inputs: &[f64]) -> EvalResult {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(value_error("math domain error"));
    }
    Ok(Value::Float(result))
}

macro_rules! unary_math {
    ($($name:ident => $op:expr;)*) => {$(
        fn $name(_: &mut Interpreter, args: Args) -> EvalResult {
            let args = args.exact(stringify!($name), 1)?;
            let x = number(stringify!($name), &args[0])?;
            let op: fn(f64) -> f64 = $op;
            checked(op(x), &[x])
        }
    )*};
}

macro_rules! binary_math {
    ($($name:ident => $op:expr;)*) => {$(
        fn $name(_: &mut Interpreter, args: Args) -> EvalResult {
            let args = args.exact(stringify!($name), 2)?;
            let x = number(stringify!($name), &args[0])?;
            let y = number(stringify!($name), &args[1])?;
            let op: fn(f64, f64) -> f64 = $op;
            checked(op(x, y), &[x, y])
        }
    )*};
}

unary_math! {
    sin => f64::sin;
    cos => f64::cos;
    tan => f64::tan;
    asin => f64::asin;
    acos => f64::acos;
    atan => f64::atan;
    sqrt => f64::sqrt;
    exp => f64::exp;
    log10 => |x| if x > 0.0 { x.log10() } else { f64::NAN };
    fabs => f64::abs;
    degrees => f64::to_degrees;
    radians => f64::to_radians;
}

binary_math! {
    atan2 => f64::atan2;
    hypot => f64::hypot;
}

/// `log(x[, base])`.
fn log(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("log", 1, 2)?;
    let x = number("log", &args[0])?;
    if x <= 0.0 {
        return Err(value_error("math domain error"));
    }
    match args.get(1) {
        None => checked(x.ln(), &[x]),
        Some(base) => {
            let base = number("log", base)?;
            if base <= 0.0 || base == 1.0 {
                return Err(value_error("math domain error"));
            }
            checked(x.ln() / base.ln(), &[x, base])
        }
    }
}

/// `floor` and `ceil` return integers.
fn rounding(func: &str, args: &Args, op: fn(f64) -> f64) -> EvalResult {
    let args = args.exact(func, 1)?;
    if let Some(n) = args[0].as_int() {
        return Ok(Value::Int(n));
    }
    let x = number(func, &args[0])?;
    let rounded = op(x);
    if !rounded.is_finite() || rounded.abs() >= 2.0_f64.powi(63) {
        return Err(EvalError::new(
            ExceptionKind::OverflowError,
            "cannot convert float to integer",
        ));
    }
    #[allow(clippy::cast_possible_truncation, reason = "bounds checked above")]
    let n = rounded as i64;
    Ok(Value::Int(n))
}

fn floor(_: &mut Interpreter, args: Args) -> EvalResult {
    rounding("floor", &args, f64::floor)
}

fn ceil(_: &mut Interpreter, args: Args) -> EvalResult {
    rounding("ceil", &args, f64::ceil)
}

/// Math functions and constants, ready to extend an environment with.
pub fn math_bindings() -> Vec<(&'static str, Value)> {
    let functions: [(&'static str, BuiltinFn); 21] = [
        ("sin", sin),
        ("cos", cos),
        ("tan", tan),
        ("asin", asin),
        ("acos", acos),
        ("atan", atan),
        ("atan2", atan2),
        ("sqrt", sqrt),
        ("exp", exp),
        ("log", log),
        ("log10", log10),
        ("floor", floor),
        ("ceil", ceil),
        ("fabs", fabs),
        ("hypot", hypot),
        ("degrees", degrees),
        ("radians", radians),
        ("pow", math_pow),
        ("trunc", trunc),
        ("isnan", isnan),
        ("isinf", isinf),
    ];
    let mut bindings: Vec<(&'static str, Value)> = functions
        .into_iter()
        .map(|(name, func)| (name, Value::builtin(name, func)))
        .collect();
    bindings.extend([
        ("pi", Value::Float(std::f64::consts::PI)),
        ("e", Value::Float(std::f64::consts::E)),
        ("inf", Value::Float(f64::INFINITY)),
        ("nan", Value::Float(f64::NAN)),
    ]);
    bindings
}

/// Float power; unlike `**` it never returns an int.
fn math_pow(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("pow", 2)?;
    let x = number("pow", &args[0])?;
    let y = number("pow", &args[1])?;
    if x < 0.0 && y.fract() != 0.0 {
        return Err(value_error("math domain error"));
    }
    let result = x.powf(y);
    if result.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(EvalError::new(ExceptionKind::OverflowError, "math range error"));
    }
    Ok(Value::Float(result))
}

fn trunc(_: &mut Interpreter, args: Args) -> EvalResult {
    rounding("trunc", &args, f64::trunc)
}

fn isnan(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("isnan", 1)?;
    Ok(Value::Bool(number("isnan", &args[0])?.is_nan()))
}

fn isinf(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("isinf", 1)?;
    Ok(Value::Bool(number("isinf", &args[0])?.is_infinite()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::Environment;
    use pretty_assertions::assert_eq;

    fn call(env: &Environment, name: &str, args: Vec<Value>) -> EvalResult {
        let func = env.get(name).unwrap_or_else(|| panic!("{name} missing"));
        Interpreter::default().call(&func, Args::new(args))
    }

    #[test]
    fn bindings_extend_an_environment() {
        let env: Environment = math_bindings().into_iter().collect();
        assert!(env.contains("sqrt"));
        assert_eq!(env.get("pi"), Some(Value::Float(std::f64::consts::PI)));
    }

    #[test]
    fn functions_compute() {
        let env: Environment = math_bindings().into_iter().collect();
        assert_eq!(call(&env, "sqrt", vec![Value::Int(16)]).unwrap(), Value::Float(4.0));
        assert_eq!(call(&env, "floor", vec![Value::Float(-1.5)]).unwrap(), Value::Int(-2));
        assert_eq!(call(&env, "log", vec![Value::Int(8), Value::Int(2)]).unwrap(), Value::Float(3.0));
        assert_eq!(call(&env, "hypot", vec![Value::Int(3), Value::Int(4)]).unwrap(), Value::Float(5.0));
    }

    #[test]
    fn domain_errors() {
        let env: Environment = math_bindings().into_iter().collect();
        for (name, arg) in [("sqrt", -1.0), ("log", 0.0), ("acos", 2.0)] {
            let err = call(&env, name, vec![Value::Float(arg)]).unwrap_err();
            assert_eq!(err.kind(), ExceptionKind::ValueError, "{name}");
            assert_eq!(err.message(), "math domain error");
        }
    }

    #[test]
    fn nan_input_is_not_a_domain_error() {
        let env: Environment = math_bindings().into_iter().collect();
        let result = call(&env, "sin", vec![Value::Float(f64::NAN)]).unwrap();
        assert!(matches!(result, Value::Float(f) if f.is_nan()));
    }
}
