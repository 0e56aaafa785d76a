//! Builtin functions that only compute on their arguments.
//!
//! Sequence helpers (`map`, `filter`, `zip`) return lists.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use cordon_ir::{BinaryOp, CmpOp};
use rustc_hash::FxHasher;

use super::constructors::float_to_int;
use crate::errors::{
    arity_error, overflow_error, stop_iteration, type_error, value_error, EvalError, EvalResult,
};
use crate::format::format_value;
use crate::interpreter::{Args, Interpreter};
use crate::methods::sort_values;
use crate::operators::{evaluate_binary, evaluate_compare};
use crate::value::{
    compare_values, values_equal, BuiltinFn, HashKey, TypeKind, Value, ValueIter,
};

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("abs", abs),
    ("all", all),
    ("any", any),
    ("apply", apply),
    ("bin", bin),
    ("callable", callable),
    ("chr", chr),
    ("cmp", cmp),
    ("divmod", divmod),
    ("enumerate", enumerate),
    ("filter", filter),
    ("format", format),
    ("hash", hash),
    ("hex", hex),
    ("id", id),
    ("isinstance", isinstance),
    ("issubclass", issubclass),
    ("iter", iter),
    ("len", len),
    ("map", map),
    ("max", max),
    ("min", min),
    ("next", next),
    ("oct", oct),
    ("ord", ord),
    ("pow", pow),
    ("print", print),
    ("reduce", reduce),
    ("repr", repr),
    ("reversed", reversed),
    ("round", round),
    ("sorted", sorted),
    ("sum", sum),
    ("unichr", chr),
    ("zip", zip),
];

fn int_value(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn expect_int(func: &str, value: &Value) -> Result<i64, EvalError> {
    value.as_int().ok_or_else(|| {
        type_error(format!(
            "{func}() argument must be an integer, not '{}'",
            value.type_name()
        ))
    })
}

// Numbers

fn abs(_: &mut Interpreter, args: Args) -> EvalResult {
    match args.exact("abs", 1)? {
        [Value::Float(f)] => Ok(Value::Float(f.abs())),
        [value] => match value.as_int() {
            Some(n) => n.checked_abs().map(Value::Int).ok_or_else(overflow_error),
            None => Err(type_error(format!(
                "bad operand type for abs(): '{}'",
                value.type_name()
            ))),
        },
        _ => Ok(Value::None),
    }
}

fn divmod(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("divmod", 2)?;
    let quotient = evaluate_binary(&args[0], &args[1], BinaryOp::FloorDiv)?;
    let remainder = evaluate_binary(&args[0], &args[1], BinaryOp::Mod)?;
    Ok(Value::tuple(vec![quotient, remainder]))
}

fn pow(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("pow", 2, 3)?;
    let Some(modulus) = args.get(2).filter(|m| !matches!(m, Value::None)) else {
        return evaluate_binary(&args[0], &args[1], BinaryOp::Pow);
    };
    let (Some(base), Some(exp), Some(modulus)) =
        (args[0].as_int(), args[1].as_int(), modulus.as_int())
    else {
        return Err(type_error(
            "pow() 3rd argument not allowed unless all arguments are integers",
        ));
    };
    if modulus == 0 {
        return Err(value_error("pow() 3rd argument cannot be 0"));
    }
    if exp < 0 {
        return Err(value_error(
            "pow() 2nd argument cannot be negative when 3rd argument specified",
        ));
    }
    let m = i128::from(modulus);
    let mut result: i128 = 1;
    let mut base = i128::from(base).rem_euclid(m);
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * base).rem_euclid(m);
        }
        base = (base * base).rem_euclid(m);
        exp >>= 1;
    }
    // The result takes the sign of the modulus.
    if modulus < 0 && result != 0 {
        result += m;
    }
    i64::try_from(result).map(Value::Int).map_err(|_| overflow_error())
}

fn round(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("round", 1, 2)?;
    let Some(x) = args[0].as_float() else {
        return Err(type_error(format!(
            "type {} doesn't define __round__ method",
            args[0].type_name()
        )));
    };
    match args.get(1).filter(|d| !matches!(d, Value::None)) {
        None => float_to_int(x.round_ties_even()).map(Value::Int),
        Some(digits) => {
            let digits = expect_int("round", digits)?;
            let digits = i32::try_from(digits.clamp(-308, 308)).unwrap_or(0);
            let scale = 10f64.powi(digits);
            let rounded = (x * scale).round_ties_even() / scale;
            let rounded = if rounded.is_finite() { rounded } else { x };
            match &args[0] {
                Value::Float(_) => Ok(Value::Float(rounded)),
                _ => float_to_int(rounded).map(Value::Int),
            }
        }
    }
}

/// `bin`, `oct` and `hex` share sign handling.
fn radix_string(func: &str, args: &Args, prefix: &str, render: fn(u64) -> String) -> EvalResult {
    let args = args.exact(func, 1)?;
    let n = expect_int(func, &args[0])?;
    let sign = if n < 0 { "-" } else { "" };
    Ok(Value::str(format!(
        "{sign}{prefix}{}",
        render(n.unsigned_abs())
    )))
}

fn bin(_: &mut Interpreter, args: Args) -> EvalResult {
    radix_string("bin", &args, "0b", |n| format!("{n:b}"))
}

fn oct(_: &mut Interpreter, args: Args) -> EvalResult {
    radix_string("oct", &args, "0o", |n| format!("{n:o}"))
}

fn hex(_: &mut Interpreter, args: Args) -> EvalResult {
    radix_string("hex", &args, "0x", |n| format!("{n:x}"))
}

fn chr(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("chr", 1)?;
    let code = expect_int("chr", &args[0])?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(|c| Value::str(c.to_string()))
        .ok_or_else(|| value_error("chr() arg not in range(0x110000)"))
}

fn ord(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("ord", 1)?;
    let Some(text) = args[0].as_str() else {
        return Err(type_error(format!(
            "ord() expected string of length 1, but {} found",
            args[0].type_name()
        )));
    };
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Int(i64::from(u32::from(c)))),
        _ => Err(type_error(format!(
            "ord() expected a character, but string of length {} found",
            text.chars().count()
        ))),
    }
}

// Comparison and identity

fn cmp(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("cmp", 2)?;
    if values_equal(&args[0], &args[1]) {
        return Ok(Value::Int(0));
    }
    Ok(Value::Int(match compare_values(&args[0], &args[1], "cmp")? {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }))
}

fn hash(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("hash", 1)?;
    let key = args[0].hash_key()?;
    if let HashKey::Int(n) = key {
        return Ok(Value::Int(n));
    }
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    Ok(Value::Int(i64::from_ne_bytes(hasher.finish().to_ne_bytes())))
}

fn id(interp: &mut Interpreter, args: Args) -> EvalResult {
    let parts = args.exact("id", 1)?;
    match parts[0].identity() {
        Some(address) => Ok(int_value(address)),
        None => hash(interp, args),
    }
}

fn callable(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("callable", 1)?;
    Ok(Value::Bool(args[0].is_callable()))
}

fn isinstance(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("isinstance", 2)?;
    Ok(Value::Bool(args[0].is_instance(&args[1])?))
}

fn issubclass(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("issubclass", 2)?;
    Ok(Value::Bool(is_subclass(&args[0], &args[1])?))
}

fn is_subclass(class: &Value, of: &Value) -> Result<bool, EvalError> {
    match (class, of) {
        (_, Value::Tuple(options)) => {
            for option in options.iter() {
                if is_subclass(class, option)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        (Value::ExceptionType(a), Value::ExceptionType(b)) => Ok(a.is_subclass_of(*b)),
        (Value::Type(TypeKind::Bool), Value::Type(TypeKind::Int)) => Ok(true),
        (Value::Type(a), Value::Type(b)) => Ok(a == b),
        (Value::Type(_) | Value::ExceptionType(_), Value::Type(_) | Value::ExceptionType(_)) => {
            Ok(false)
        }
        (Value::Type(_) | Value::ExceptionType(_), _) => Err(type_error(
            "issubclass() arg 2 must be a class or tuple of classes",
        )),
        _ => Err(type_error("issubclass() arg 1 must be a class")),
    }
}

fn len(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("len", 1)?;
    Ok(int_value(args[0].len()?))
}

fn repr(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("repr", 1)?;
    Ok(Value::str(args[0].repr()))
}

fn format(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("format", 1, 2)?;
    let spec = match args.get(1) {
        Some(spec) => spec.as_str().ok_or_else(|| {
            type_error(format!(
                "format() argument 2 must be str, not {}",
                spec.type_name()
            ))
        })?,
        None => "",
    };
    Ok(Value::str(format_value(&args[0], spec)?))
}

// Iteration

fn all(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("all", 1)?;
    Ok(Value::Bool(args[0].iter()?.all(|v| v.is_truthy())))
}

fn any(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("any", 1)?;
    Ok(Value::Bool(args[0].iter()?.any(|v| v.is_truthy())))
}

fn iter(_: &mut Interpreter, args: Args) -> EvalResult {
    match args.exact("iter", 1)? {
        [shared @ Value::Iterator(_)] => Ok(shared.clone()),
        [value] => Ok(Value::iterator(value.iter()?)),
        _ => Ok(Value::None),
    }
}

fn next(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("next", 1, 2)?;
    let Value::Iterator(shared) = &args[0] else {
        return Err(type_error(format!(
            "'{}' object is not an iterator",
            args[0].type_name()
        )));
    };
    let item = shared.borrow_mut().next();
    match (item, args.get(1)) {
        (Some(item), _) => Ok(item),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(stop_iteration()),
    }
}

fn enumerate(_: &mut Interpreter, mut args: Args) -> EvalResult {
    let keyword_start = args.take_keyword("start");
    let parts = args.between("enumerate", 1, 2)?;
    let start = match parts.get(1).or(keyword_start.as_ref()) {
        Some(v) => expect_int("enumerate", v)?,
        None => 0,
    };
    let mut pairs = Vec::new();
    let mut index = start;
    for item in parts[0].iter()? {
        pairs.push(Value::tuple(vec![Value::Int(index), item]));
        index = index.checked_add(1).ok_or_else(overflow_error)?;
    }
    Ok(Value::iterator(ValueIter::from_items(pairs)))
}

fn reversed(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("reversed", 1)?;
    match &args[0] {
        Value::Dict(_) | Value::Set(_) | Value::Iterator(_) => Err(type_error(
            "argument to reversed() must be a sequence",
        )),
        sequence => {
            let mut items = sequence.to_vec()?;
            items.reverse();
            Ok(Value::iterator(ValueIter::from_items(items)))
        }
    }
}

fn zip(_: &mut Interpreter, args: Args) -> EvalResult {
    args.no_keywords("zip")?;
    let mut iters = args
        .positional
        .iter()
        .map(Value::iter)
        .collect::<Result<Vec<_>, _>>()?;
    let mut rows = Vec::new();
    if iters.is_empty() {
        return Ok(Value::list(rows));
    }
    'rows: loop {
        let mut row = Vec::with_capacity(iters.len());
        for iter in &mut iters {
            match iter.next() {
                Some(item) => row.push(item),
                None => break 'rows,
            }
        }
        rows.push(Value::tuple(row));
    }
    Ok(Value::list(rows))
}

/// `map(func, *iterables)`; shorter iterables are padded with `None`.
fn map(interp: &mut Interpreter, args: Args) -> EvalResult {
    args.no_keywords("map")?;
    let Some((func, iterables)) = args.positional.split_first() else {
        return Err(arity_error("map", "at least 2", 0));
    };
    if iterables.is_empty() {
        return Err(type_error("map() requires at least two args"));
    }
    let columns = iterables
        .iter()
        .map(Value::to_vec)
        .collect::<Result<Vec<_>, _>>()?;
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = Vec::with_capacity(rows);
    for row in 0..rows {
        let values: Vec<Value> = columns
            .iter()
            .map(|column| column.get(row).cloned().unwrap_or(Value::None))
            .collect();
        out.push(match func {
            Value::None if values.len() == 1 => values.into_iter().next().unwrap_or(Value::None),
            Value::None => Value::tuple(values),
            func => interp.call(func, Args::new(values))?,
        });
    }
    Ok(Value::list(out))
}

fn filter(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("filter", 2)?;
    let mut kept = Vec::new();
    for item in args[1].iter()? {
        let keep = match &args[0] {
            Value::None => item.is_truthy(),
            func => interp.call(func, Args::new(vec![item.clone()]))?.is_truthy(),
        };
        if keep {
            kept.push(item);
        }
    }
    Ok(match &args[1] {
        Value::Str(_) => Value::str(kept.iter().map(Value::to_str).collect::<String>()),
        Value::Tuple(_) => Value::tuple(kept),
        _ => Value::list(kept),
    })
}

fn reduce(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("reduce", 2, 3)?;
    let mut items = args[1].iter()?;
    let mut acc = match args.get(2).cloned().or_else(|| items.next()) {
        Some(initial) => initial,
        None => {
            return Err(type_error(
                "reduce() of empty sequence with no initial value",
            ))
        }
    };
    for item in items {
        acc = interp.call(&args[0], Args::new(vec![acc, item]))?;
    }
    Ok(acc)
}

fn apply(interp: &mut Interpreter, args: Args) -> EvalResult {
    let parts = args.between("apply", 1, 3)?;
    let mut call_args = match parts.get(1) {
        Some(positional) => Args::new(positional.to_vec()?),
        None => Args::default(),
    };
    if let Some(keywords) = parts.get(2) {
        let Value::Dict(dict) = keywords else {
            return Err(type_error("apply() arg 3 expected dictionary"));
        };
        for (key, value) in dict.borrow().items() {
            let Value::Str(name) = key else {
                return Err(type_error("keywords must be strings"));
            };
            call_args.keywords.push((name, value));
        }
    }
    interp.call(&parts[0], call_args)
}

fn sum(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("sum", 1, 2)?;
    let mut acc = args.get(1).cloned().unwrap_or(Value::Int(0));
    if matches!(acc, Value::Str(_)) {
        return Err(type_error(
            "sum() can't sum strings [use ''.join(seq) instead]",
        ));
    }
    for item in args[0].iter()? {
        acc = evaluate_binary(&acc, &item, BinaryOp::Add)?;
    }
    Ok(acc)
}

fn sorted(interp: &mut Interpreter, mut args: Args) -> EvalResult {
    let key = args.take_keyword("key").filter(|k| !matches!(k, Value::None));
    let reverse = args.take_keyword("reverse").is_some_and(|r| r.is_truthy());
    let parts = args.exact("sorted", 1)?;
    let items = parts[0].to_vec()?;
    Ok(Value::list(sort_values(interp, items, key.as_ref(), reverse)?))
}

/// `max`/`min` over one iterable or several arguments, with optional `key`.
fn extreme(interp: &mut Interpreter, mut args: Args, func: &str, want: CmpOp) -> EvalResult {
    let key = args.take_keyword("key").filter(|k| !matches!(k, Value::None));
    args.no_keywords(func)?;
    let candidates = match args.positional.as_slice() {
        [] => return Err(arity_error(func, "at least 1", 0)),
        [iterable] => iterable.to_vec()?,
        many => many.to_vec(),
    };
    let mut best: Option<(Value, Value)> = None;
    for item in candidates {
        let score = match &key {
            Some(func) => interp.call(func, Args::new(vec![item.clone()]))?,
            None => item.clone(),
        };
        let better = match &best {
            None => true,
            Some((best_score, _)) => evaluate_compare(&score, best_score, want)?,
        };
        if better {
            best = Some((score, item));
        }
    }
    best.map(|(_, item)| item)
        .ok_or_else(|| value_error(format!("{func}() arg is an empty sequence")))
}

fn max(interp: &mut Interpreter, args: Args) -> EvalResult {
    extreme(interp, args, "max", CmpOp::Gt)
}

fn min(interp: &mut Interpreter, args: Args) -> EvalResult {
    extreme(interp, args, "min", CmpOp::Lt)
}

// Output

fn print(interp: &mut Interpreter, mut args: Args) -> EvalResult {
    let separator = |value: Option<Value>, default: &str| -> Result<String, EvalError> {
        match value {
            None | Some(Value::None) => Ok(default.to_owned()),
            Some(Value::Str(s)) => Ok(s.to_string()),
            Some(other) => Err(type_error(format!(
                "sep and end must be None or a string, not {}",
                other.type_name()
            ))),
        }
    };
    let sep = separator(args.take_keyword("sep"), " ")?;
    let end = separator(args.take_keyword("end"), "\n")?;
    args.no_keywords("print")?;
    let line = args
        .positional
        .iter()
        .map(Value::to_str)
        .collect::<Vec<_>>()
        .join(&sep);
    let handler = interp.print_handler();
    handler.write(&line);
    handler.write(&end);
    Ok(Value::None)
}
