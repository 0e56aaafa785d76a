//! `repr()` and `str()` rendering.

use std::fmt::Write;

use super::Value;

impl Value {
    /// `repr(value)`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        write_repr(self, &mut out, &mut Vec::new());
        out
    }

    /// `str(value)`.
    pub fn to_str(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            Value::Exception(e) => e.message.clone(),
            other => other.repr(),
        }
    }
}

/// Render a float the way Python's `repr` does.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{f:e}");
        let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(d) => ('-', d),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }
    if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

fn write_str_repr(s: &str, out: &mut String) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

fn write_seq<'a>(
    items: impl IntoIterator<Item = &'a Value>,
    out: &mut String,
    seen: &mut Vec<usize>,
) {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(item, out, seen);
    }
}

fn write_repr(value: &Value, out: &mut String, seen: &mut Vec<usize>) {
    // Containers can hold themselves; print `[...]` on re-entry.
    let id = match value {
        Value::List(_) | Value::Dict(_) | Value::Set(_) => value.identity(),
        _ => None,
    };
    if let Some(id) = id {
        if seen.contains(&id) {
            out.push_str(match value {
                Value::List(_) => "[...]",
                _ => "{...}",
            });
            return;
        }
        seen.push(id);
    }

    match value {
        Value::None => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) => write_str_repr(s, out),
        Value::List(items) => {
            out.push('[');
            write_seq(items.borrow().iter(), out, seen);
            out.push(']');
        }
        Value::Tuple(items) => {
            out.push('(');
            write_seq(items.iter(), out, seen);
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Value::Dict(d) => {
            out.push('{');
            for (i, (k, v)) in d.borrow().items().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(k, out, seen);
                out.push_str(": ");
                write_repr(v, out, seen);
            }
            out.push('}');
        }
        Value::Set(s) => {
            let items = s.borrow().values();
            if items.is_empty() {
                out.push_str("set()");
            } else {
                out.push('{');
                write_seq(items.iter(), out, seen);
                out.push('}');
            }
        }
        Value::Range(r) => {
            if r.step == 1 {
                let _ = write!(out, "range({}, {})", r.start, r.stop);
            } else {
                let _ = write!(out, "range({}, {}, {})", r.start, r.stop, r.step);
            }
        }
        Value::Slice(s) => {
            out.push_str("slice(");
            write_repr(&s.start, out, seen);
            out.push_str(", ");
            write_repr(&s.stop, out, seen);
            out.push_str(", ");
            write_repr(&s.step, out, seen);
            out.push(')');
        }
        Value::Iterator(_) => out.push_str("<iterator object>"),
        Value::Function(f) => {
            let _ = write!(out, "<function {}>", f.name);
        }
        Value::Builtin(b) => {
            let _ = write!(out, "<built-in function {}>", b.name);
        }
        Value::BoundMethod(m) => {
            let _ = write!(
                out,
                "<built-in method {} of {} object>",
                m.name,
                m.receiver.type_name()
            );
        }
        Value::Type(kind) => {
            let _ = write!(out, "<type '{}'>", kind.name());
        }
        Value::ExceptionType(kind) => {
            let _ = write!(out, "<class '{}'>", kind.name());
        }
        Value::Exception(e) => {
            out.push_str(e.kind.name());
            out.push('(');
            if !e.message.is_empty() {
                write_str_repr(&e.message, out);
            }
            out.push(')');
        }
        Value::File(f) => {
            let state = if f.contents.borrow().is_some() {
                "open"
            } else {
                "closed"
            };
            let _ = write!(out, "<{state} file '{}'>", f.path);
        }
    }

    if id.is_some() {
        seen.pop();
    }
}
