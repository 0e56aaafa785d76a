//! String formatting.
//!
//! Three entry points share one renderer:
//! - `"%5.2f" % x` via [`percent_format`]
//! - `"{0:>8}".format(x)` via [`str_format`]
//! - `format(x, ",d")` via [`format_value`]
//!
//! Replacement fields in `str.format` may name an argument by position or
//! keyword, but attribute and item access inside a field (`{0.attr}`,
//! `{0[k]}`) are refused: they would reach attributes the guard never saw.

use std::rc::Rc;

use crate::errors::{index_error, key_error, type_error, value_error, EvalError};
use crate::value::{format_float, Value};

/// Parsed format specification: `[[fill]align][sign][#][0][width][,][.precision][type]`.
#[derive(Clone, Debug, Default, PartialEq)]
struct Spec {
    fill: Option<char>,
    align: Option<char>,
    sign: Option<char>,
    alternate: bool,
    zero: bool,
    width: usize,
    grouping: bool,
    precision: Option<usize>,
    ty: Option<char>,
}

fn parse_spec(spec: &str) -> Result<Spec, EvalError> {
    let chars: Vec<char> = spec.chars().collect();
    let mut out = Spec::default();
    let mut i = 0;
    let is_align = |c: char| matches!(c, '<' | '>' | '^' | '=');

    if chars.len() >= 2 && is_align(chars[1]) {
        out.fill = Some(chars[0]);
        out.align = Some(chars[1]);
        i = 2;
    } else if chars.first().copied().is_some_and(is_align) {
        out.align = Some(chars[0]);
        i = 1;
    }
    if let Some(&c @ ('+' | '-' | ' ')) = chars.get(i) {
        out.sign = Some(c);
        i += 1;
    }
    if chars.get(i) == Some(&'#') {
        out.alternate = true;
        i += 1;
    }
    if chars.get(i) == Some(&'0') {
        out.zero = true;
        i += 1;
    }
    let (width, next) = read_number(&chars, i);
    out.width = width.unwrap_or(0);
    i = next;
    if chars.get(i) == Some(&',') {
        out.grouping = true;
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        let (precision, next) = read_number(&chars, i + 1);
        if precision.is_none() {
            return Err(value_error("Format specifier missing precision"));
        }
        out.precision = precision;
        i = next;
    }
    match &chars[i..] {
        [] => {}
        [ty] => out.ty = Some(*ty),
        _ => return Err(value_error("Invalid format specifier")),
    }
    Ok(out)
}

fn read_number(chars: &[char], mut i: usize) -> (Option<usize>, usize) {
    let start = i;
    let mut n: usize = 0;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as usize);
        i += 1;
    }
    ((i > start).then_some(n), i)
}

// Numeric rendering

fn fixed(f: f64, precision: usize) -> String {
    format!("{:.*}", precision, f.abs())
}

/// Scientific notation with a signed, at least two-digit exponent.
fn scientific(f: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, f.abs());
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((&raw, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{:02}", exponent.unsigned_abs())
}

fn general(f: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let p = precision.max(1);
    if f == 0.0 {
        return if alternate {
            format!("{:.*}", p - 1, 0.0)
        } else {
            "0".to_owned()
        };
    }
    let sci = scientific(f, p - 1, upper);
    let exponent: i64 = sci
        .rsplit_once(['e', 'E'])
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    let p = i64::try_from(p).unwrap_or(i64::MAX);
    let body = if (-4..p).contains(&exponent) {
        let decimals = usize::try_from(p - 1 - exponent).unwrap_or(0);
        fixed(f, decimals)
    } else {
        sci
    };
    if alternate {
        return body;
    }
    match body.find(['e', 'E']) {
        Some(pos) => {
            let (mantissa, exp) = body.split_at(pos);
            format!("{}{exp}", strip_zeros(mantissa))
        }
        None => strip_zeros(&body).to_owned(),
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn group_thousands(digits: &str) -> String {
    let (int_part, rest) = match digits.find(|c: char| !c.is_ascii_digit()) {
        Some(pos) => digits.split_at(pos),
        None => (digits, ""),
    };
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + rest.len());
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}

fn non_finite(f: f64, upper: bool) -> Option<String> {
    let text = if f.is_nan() {
        "nan"
    } else if f.is_infinite() {
        "inf"
    } else {
        return None;
    };
    Some(if upper { text.to_uppercase() } else { text.to_owned() })
}

/// How a `%`-style conversion treats its operand.
#[derive(Copy, Clone, Eq, PartialEq)]
enum Origin {
    Percent,
    Format,
}

fn unknown_code(ty: char, value: &Value) -> EvalError {
    value_error(format!(
        "Unknown format code '{ty}' for object of type '{}'",
        value.type_name()
    ))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "%d truncates floats toward zero"
)]
fn int_operand(value: &Value, ty: char, origin: Origin) -> Result<i64, EvalError> {
    match value {
        Value::Float(f) if origin == Origin::Percent => {
            if f.is_finite() {
                Ok(f.trunc() as i64)
            } else {
                Err(EvalError::new(
                    crate::exceptions::ExceptionKind::OverflowError,
                    "cannot convert float infinity or NaN to integer",
                ))
            }
        }
        v => v.as_int().ok_or_else(|| match origin {
            Origin::Percent => type_error(format!(
                "%{ty} format: a number is required, not {}",
                value.type_name()
            )),
            Origin::Format => unknown_code(ty, v),
        }),
    }
}

fn float_operand(value: &Value, ty: char, origin: Origin) -> Result<f64, EvalError> {
    value.as_float().ok_or_else(|| match origin {
        Origin::Percent => type_error(format!(
            "float argument required, not {}",
            value.type_name()
        )),
        Origin::Format => unknown_code(ty, value),
    })
}

/// Render `value` under `spec`, returning `(is_negative, body, is_numeric)`.
fn render_body(
    value: &Value,
    spec: &Spec,
    origin: Origin,
) -> Result<(bool, String, bool), EvalError> {
    let Some(ty) = spec.ty else {
        return Ok(match value {
            Value::Float(f) if spec.precision.is_some() => {
                let p = spec.precision.unwrap_or(6);
                (f.is_sign_negative(), general(*f, p, spec.alternate, false), true)
            }
            Value::Int(n) => (*n < 0, n.unsigned_abs().to_string(), true),
            Value::Float(f) if f.is_finite() => {
                (f.is_sign_negative() && *f != 0.0, format_float(f.abs()), true)
            }
            other => (false, truncate(&other.to_str(), spec.precision), false),
        });
    };
    let upper = ty.is_ascii_uppercase();
    Ok(match ty {
        's' => {
            if origin == Origin::Format && !matches!(value, Value::Str(_)) {
                return Err(unknown_code(ty, value));
            }
            (false, truncate(&value.to_str(), spec.precision), false)
        }
        'r' if origin == Origin::Percent => (false, truncate(&value.repr(), spec.precision), false),
        'd' => {
            let n = int_operand(value, ty, origin)?;
            (n < 0, n.unsigned_abs().to_string(), true)
        }
        'x' | 'X' | 'o' | 'b' => {
            let n = int_operand(value, ty, origin)?;
            let magnitude = n.unsigned_abs();
            let (digits, prefix) = match ty {
                'x' => (format!("{magnitude:x}"), "0x"),
                'X' => (format!("{magnitude:X}"), "0X"),
                'o' => (format!("{magnitude:o}"), "0o"),
                _ => (format!("{magnitude:b}"), "0b"),
            };
            let body = if spec.alternate {
                format!("{prefix}{digits}")
            } else {
                digits
            };
            (n < 0, body, true)
        }
        'c' => {
            let c = match value {
                Value::Str(s) if s.chars().count() == 1 => s.to_string(),
                v => {
                    let code = int_operand(v, ty, origin)?;
                    u32::try_from(code)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or_else(|| EvalError::new(
                            crate::exceptions::ExceptionKind::OverflowError,
                            "%c arg not in range(0x110000)",
                        ))?
                        .to_string()
                }
            };
            (false, c, false)
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' | '%' => {
            let f = float_operand(value, ty, origin)?;
            let negative = f.is_sign_negative() && f != 0.0 && !f.is_nan();
            let precision = spec.precision.unwrap_or(6);
            let body = match non_finite(f, upper) {
                Some(text) => text,
                None => match ty {
                    'f' | 'F' => fixed(f, precision),
                    'e' | 'E' => scientific(f, precision, upper),
                    'g' | 'G' => general(f, precision, spec.alternate, upper),
                    _ => format!("{}%", fixed(f * 100.0, precision)),
                },
            };
            (negative, body, true)
        }
        other => {
            return Err(match origin {
                Origin::Percent => value_error(format!(
                    "unsupported format character '{other}' (0x{:x})",
                    u32::from(other)
                )),
                Origin::Format => unknown_code(other, value),
            })
        }
    })
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_owned(),
    }
}

fn render(value: &Value, spec: &Spec, origin: Origin) -> Result<String, EvalError> {
    let (negative, mut body, numeric) = render_body(value, spec, origin)?;
    if spec.grouping && numeric {
        body = group_thousands(&body);
    }
    let sign = match (negative, spec.sign) {
        (true, _) => "-",
        (false, Some('+')) if numeric => "+",
        (false, Some(' ')) if numeric => " ",
        _ => "",
    };
    let len = sign.chars().count() + body.chars().count();
    let pad = spec.width.saturating_sub(len);
    if pad == 0 {
        return Ok(format!("{sign}{body}"));
    }
    let zero_fill = spec.zero && numeric && spec.align.is_none();
    if zero_fill {
        return Ok(format!("{sign}{}{body}", "0".repeat(pad)));
    }
    let fill = spec.fill.unwrap_or(' ');
    let fill_n = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
    let default_align = if numeric || origin == Origin::Percent { '>' } else { '<' };
    Ok(match spec.align.unwrap_or(default_align) {
        '<' => format!("{sign}{body}{}", fill_n(pad)),
        '^' => format!("{}{sign}{body}{}", fill_n(pad / 2), fill_n(pad - pad / 2)),
        '=' => format!("{sign}{}{body}", fill_n(pad)),
        _ => format!("{}{sign}{body}", fill_n(pad)),
    })
}

/// `format(value, spec)`.
pub fn format_value(value: &Value, spec: &str) -> Result<String, EvalError> {
    render(value, &parse_spec(spec)?, Origin::Format)
}

/// `template % args`.
pub fn percent_format(template: &str, args: &Value) -> Result<String, EvalError> {
    let positional: Vec<Value> = match args {
        Value::Tuple(items) => items.to_vec(),
        other => vec![other.clone()],
    };
    let mapping = match args {
        Value::Dict(d) => Some(d),
        _ => None,
    };
    let mut next = 0;
    let mut take = || -> Result<Value, EvalError> {
        let value = positional
            .get(next)
            .cloned()
            .ok_or_else(|| type_error("not enough arguments for format string"))?;
        next += 1;
        Ok(value)
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut used_mapping = false;
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut spec = Spec::default();
        let mut key = None;
        if chars.peek() == Some(&'(') {
            chars.next();
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some(')') => break,
                    Some(c) => name.push(c),
                    None => return Err(value_error("incomplete format key")),
                }
            }
            key = Some(name);
        }
        let mut left = false;
        while let Some(&flag @ ('-' | '+' | ' ' | '#' | '0')) = chars.peek() {
            match flag {
                '-' => left = true,
                '0' => spec.zero = true,
                '#' => spec.alternate = true,
                _ => spec.sign = Some(flag),
            }
            chars.next();
        }
        if chars.peek() == Some(&'*') {
            chars.next();
            spec.width = usize::try_from(take()?.as_index("* wants int")?).unwrap_or(0);
        } else {
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                spec.width = spec.width.saturating_mul(10).saturating_add(d as usize);
                chars.next();
            }
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision: usize = 0;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                precision = precision.saturating_mul(10).saturating_add(d as usize);
                chars.next();
            }
            spec.precision = Some(precision);
        }
        let Some(ty) = chars.next() else {
            return Err(value_error("incomplete format"));
        };
        if ty == '%' {
            out.push('%');
            continue;
        }
        if left {
            spec.align = Some('<');
            spec.zero = false;
        }
        spec.ty = Some(match ty {
            'i' | 'u' => 'd',
            other => other,
        });
        let value = match key {
            Some(name) => {
                let Some(dict) = mapping else {
                    return Err(type_error("format requires a mapping"));
                };
                used_mapping = true;
                let key = Value::str(&name);
                let found = dict.borrow().get(&key)?;
                found.ok_or_else(|| key_error(&key))?
            }
            None => take()?,
        };
        out.push_str(&render(&value, &spec, Origin::Percent)?);
    }
    if !used_mapping && mapping.is_none() && next < positional.len() {
        return Err(type_error(
            "not all arguments converted during string formatting",
        ));
    }
    Ok(out)
}

/// `template.format(*positional, **keywords)`.
pub fn str_format(
    template: &str,
    positional: &[Value],
    keywords: &[(Rc<str>, Value)],
) -> Result<String, EvalError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut auto_index = 0usize;
    let mut manual = false;
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(value_error("Single '}' encountered in format string")),
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => {
                            return Err(value_error("expected '}' before end of string"));
                        }
                    }
                }
                let (head, spec) = field.split_once(':').unwrap_or((&field, ""));
                let (name, conversion) = match head.split_once('!') {
                    Some((name, conv)) => (name, Some(conv)),
                    None => (head, None),
                };
                if name.contains(['.', '[']) {
                    return Err(value_error(
                        "attribute and item access in format fields is not supported",
                    ));
                }
                let value = if name.is_empty() {
                    if manual {
                        return Err(value_error(
                            "cannot switch from manual field specification to automatic field numbering",
                        ));
                    }
                    auto_index += 1;
                    positional_arg(positional, auto_index - 1)?
                } else if let Ok(index) = name.parse::<usize>() {
                    if auto_index > 0 {
                        return Err(value_error(
                            "cannot switch from automatic field numbering to manual field specification",
                        ));
                    }
                    manual = true;
                    positional_arg(positional, index)?
                } else {
                    keywords
                        .iter()
                        .find(|(k, _)| &**k == name)
                        .map(|(_, v)| v.clone())
                        .ok_or_else(|| key_error(&Value::str(name)))?
                };
                let value = match conversion {
                    None => value,
                    Some("r") => Value::str(value.repr()),
                    Some("s") => Value::str(value.to_str()),
                    Some(other) => {
                        return Err(value_error(format!(
                            "Unknown conversion specifier {other}"
                        )))
                    }
                };
                out.push_str(&format_value(&value, spec)?);
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

fn positional_arg(positional: &[Value], index: usize) -> Result<Value, EvalError> {
    positional
        .get(index)
        .cloned()
        .ok_or_else(|| index_error("tuple index out of range"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
