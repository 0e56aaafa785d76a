//! Methods on `str`.
//!
//! Positions reported to scripts (`find`, `index`) count characters, not
//! bytes.

use super::{clamp_index, expect_int, expect_str, wrong_receiver, MethodTable};
use crate::errors::{type_error, value_error, EvalError, EvalResult};
use crate::format::str_format;
use crate::interpreter::{Args, Interpreter};
use crate::value::Value;

pub(super) const METHODS: MethodTable = &[
    ("capitalize", capitalize),
    ("center", center),
    ("count", count),
    ("endswith", endswith),
    ("find", find),
    ("format", format),
    ("index", index),
    ("isalnum", isalnum),
    ("isalpha", isalpha),
    ("isdigit", isdigit),
    ("islower", islower),
    ("isspace", isspace),
    ("isupper", isupper),
    ("join", join),
    ("ljust", ljust),
    ("lower", lower),
    ("lstrip", lstrip),
    ("partition", partition),
    ("replace", replace),
    ("rfind", rfind),
    ("rindex", rindex),
    ("rjust", rjust),
    ("rstrip", rstrip),
    ("split", split),
    ("splitlines", splitlines),
    ("startswith", startswith),
    ("strip", strip),
    ("swapcase", swapcase),
    ("title", title),
    ("upper", upper),
    ("zfill", zfill),
];

fn this(receiver: &Value) -> Result<&str, EvalError> {
    receiver.as_str().ok_or_else(|| wrong_receiver("str", receiver))
}

/// Methods that take no arguments and map the receiver to a value.
macro_rules! unary_methods {
    ($($name:ident => $body:expr;)*) => {$(
        fn $name(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
            args.exact(stringify!($name), 0)?;
            let apply: fn(&str) -> Value = $body;
            Ok(apply(this(receiver)?))
        }
    )*};
}

unary_methods! {
    upper => |s| Value::str(s.to_uppercase());
    lower => |s| Value::str(s.to_lowercase());
    swapcase => |s| Value::str(swap_case(s));
    title => |s| Value::str(title_case(s));
    capitalize => |s| Value::str(capitalized(s));
    isdigit => |s| Value::Bool(!s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
    isalpha => |s| Value::Bool(!s.is_empty() && s.chars().all(char::is_alphabetic));
    isalnum => |s| Value::Bool(!s.is_empty() && s.chars().all(char::is_alphanumeric));
    isspace => |s| Value::Bool(!s.is_empty() && s.chars().all(char::is_whitespace));
    isupper => |s| Value::Bool(has_cased(s) && !s.chars().any(char::is_lowercase));
    islower => |s| Value::Bool(has_cased(s) && !s.chars().any(char::is_uppercase));
}

fn has_cased(s: &str) -> bool {
    s.chars().any(|c| c.is_uppercase() || c.is_lowercase())
}

fn swap_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
    out
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    out
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// Stripping

fn strip_chars(func: &str, receiver: &Value, args: &Args, left: bool, right: bool) -> EvalResult {
    let args = args.between(func, 0, 1)?;
    let s = this(receiver)?;
    let out = match args.first() {
        None | Some(Value::None) => {
            let s = if left { s.trim_start() } else { s };
            if right {
                s.trim_end()
            } else {
                s
            }
        }
        Some(chars) => {
            let set = expect_str(func, chars)?;
            let s = if left {
                s.trim_start_matches(|c| set.contains(c))
            } else {
                s
            };
            if right {
                s.trim_end_matches(|c| set.contains(c))
            } else {
                s
            }
        }
    };
    Ok(Value::str(out))
}

fn strip(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    strip_chars("strip", receiver, &args, true, true)
}

fn lstrip(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    strip_chars("lstrip", receiver, &args, true, false)
}

fn rstrip(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    strip_chars("rstrip", receiver, &args, false, true)
}

// Splitting and joining

/// `maxsplit` argument: negative or absent means unlimited.
fn max_split(args: &[Value], index: usize) -> Result<Option<usize>, EvalError> {
    match args.get(index) {
        None | Some(Value::None) => Ok(None),
        Some(v) => Ok(usize::try_from(expect_int("split", v)?).ok()),
    }
}

fn split(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("split", 0, 2)?;
    let s = this(receiver)?;
    let limit = max_split(args, 1)?;
    let parts = match args.first() {
        None | Some(Value::None) => split_whitespace(s, limit),
        Some(sep) => {
            let sep = expect_str("split", sep)?;
            if sep.is_empty() {
                return Err(value_error("empty separator"));
            }
            match limit {
                Some(n) => s.splitn(n.saturating_add(1), sep).map(Value::str).collect(),
                None => s.split(sep).map(Value::str).collect(),
            }
        }
    };
    Ok(Value::list(parts))
}

/// Whitespace split with runs collapsed; the last piece keeps its tail.
fn split_whitespace(s: &str, limit: Option<usize>) -> Vec<Value> {
    let mut out = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        if limit.is_some_and(|n| out.len() >= n) {
            out.push(Value::str(rest));
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                out.push(Value::str(&rest[..end]));
                rest = rest[end..].trim_start();
            }
            None => {
                out.push(Value::str(rest));
                break;
            }
        }
    }
    out
}

fn splitlines(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("splitlines", 0, 1)?;
    let s = this(receiver)?;
    let keep_ends = args.first().is_some_and(Value::is_truthy);
    let lines = if keep_ends {
        s.split_inclusive('\n').map(Value::str).collect()
    } else {
        s.lines().map(Value::str).collect()
    };
    Ok(Value::list(lines))
}

fn partition(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("partition", 1)?;
    let s = this(receiver)?;
    let sep = expect_str("partition", &args[0])?;
    if sep.is_empty() {
        return Err(value_error("empty separator"));
    }
    let parts = match s.split_once(sep) {
        Some((head, tail)) => [Value::str(head), Value::str(sep), Value::str(tail)],
        None => [Value::str(s), Value::str(""), Value::str("")],
    };
    Ok(Value::tuple(parts.to_vec()))
}

fn join(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("join", 1)?;
    let sep = this(receiver)?;
    let mut out = String::new();
    for (i, item) in args[0].iter()?.enumerate() {
        let Some(piece) = item.as_str() else {
            return Err(type_error(format!(
                "sequence item {i}: expected string, {} found",
                item.type_name()
            )));
        };
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(piece);
    }
    Ok(Value::str(out))
}

fn replace(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("replace", 2, 3)?;
    let s = this(receiver)?;
    let old = expect_str("replace", &args[0])?;
    let new = expect_str("replace", &args[1])?;
    let out = match max_split(args, 2)? {
        Some(count) => s.replacen(old, new, count),
        None => s.replace(old, new),
    };
    Ok(Value::str(out))
}

// Searching

fn affix_matches(
    func: &str,
    receiver: &Value,
    args: &Args,
    test: fn(&str, &str) -> bool,
) -> EvalResult {
    let args = args.exact(func, 1)?;
    let s = this(receiver)?;
    match &args[0] {
        Value::Tuple(options) => {
            for option in options.iter() {
                if test(s, expect_str(func, option)?) {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        affix => Ok(Value::Bool(test(s, expect_str(func, affix)?))),
    }
}

fn startswith(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    affix_matches("startswith", receiver, &args, |s, p| s.starts_with(p))
}

fn endswith(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    affix_matches("endswith", receiver, &args, |s, p| s.ends_with(p))
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(b, _)| b)
}

/// Character position of `sub` within `s[start:end]`.
fn search(func: &str, receiver: &Value, args: &Args, from_end: bool) -> Result<Option<usize>, EvalError> {
    let args = args.between(func, 1, 3)?;
    let s = this(receiver)?;
    let sub = expect_str(func, &args[0])?;
    let len = s.chars().count();
    let bound = |i: usize, default: usize| -> Result<usize, EvalError> {
        match args.get(i) {
            None | Some(Value::None) => Ok(default),
            Some(v) => Ok(clamp_index(v.as_index("slice indices")?, len)),
        }
    };
    let start = bound(1, 0)?;
    let end = bound(2, len)?;
    if start > end {
        return Ok(None);
    }
    let window = &s[byte_offset(s, start)..byte_offset(s, end)];
    let found = if from_end {
        window.rfind(sub)
    } else {
        window.find(sub)
    };
    Ok(found.map(|b| start + window[..b].chars().count()))
}

fn position(found: Option<usize>) -> Value {
    found.map_or(Value::Int(-1), |i| {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    })
}

fn find(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    Ok(position(search("find", receiver, &args, false)?))
}

fn rfind(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    Ok(position(search("rfind", receiver, &args, true)?))
}

fn index(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    match search("index", receiver, &args, false)? {
        Some(i) => Ok(position(Some(i))),
        None => Err(value_error("substring not found")),
    }
}

fn rindex(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    match search("rindex", receiver, &args, true)? {
        Some(i) => Ok(position(Some(i))),
        None => Err(value_error("substring not found")),
    }
}

fn count(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("count", 1)?;
    let s = this(receiver)?;
    let sub = expect_str("count", &args[0])?;
    let n = if sub.is_empty() {
        s.chars().count() + 1
    } else {
        s.matches(sub).count()
    };
    Ok(Value::Int(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn format(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let template = this(receiver)?;
    Ok(Value::str(str_format(template, &args.positional, &args.keywords)?))
}

// Padding

/// Width and fill character for `center`, `ljust` and `rjust`.
fn padding(func: &str, receiver: &Value, args: &Args) -> Result<(usize, usize, char), EvalError> {
    let args = args.between(func, 1, 2)?;
    let s = this(receiver)?;
    let width = usize::try_from(expect_int(func, &args[0])?).unwrap_or(0);
    let fill = match args.get(1) {
        None => ' ',
        Some(v) => {
            let text = expect_str(func, v)?;
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(type_error(
                        "The fill character must be exactly one character long",
                    ))
                }
            }
        }
    };
    Ok((width.saturating_sub(s.chars().count()), width, fill))
}

fn padded(s: &str, left: usize, right: usize, fill: char) -> Value {
    let mut out = String::with_capacity(s.len() + left + right);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(s);
    out.extend(std::iter::repeat(fill).take(right));
    Value::str(out)
}

fn center(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let (pad, width, fill) = padding("center", receiver, &args)?;
    let left = pad / 2 + (pad & width & 1);
    Ok(padded(this(receiver)?, left, pad - left, fill))
}

fn ljust(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let (pad, _, fill) = padding("ljust", receiver, &args)?;
    Ok(padded(this(receiver)?, 0, pad, fill))
}

fn rjust(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let (pad, _, fill) = padding("rjust", receiver, &args)?;
    Ok(padded(this(receiver)?, pad, 0, fill))
}

fn zfill(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("zfill", 1)?;
    let s = this(receiver)?;
    let width = usize::try_from(expect_int("zfill", &args[0])?).unwrap_or(0);
    let pad = width.saturating_sub(s.chars().count());
    let (sign, digits) = match s.strip_prefix(['+', '-']) {
        Some(rest) => (&s[..1], rest),
        None => ("", s),
    };
    Ok(Value::str(format!("{sign}{}{digits}", "0".repeat(pad))))
}
