//! Builtins that reach outside the expression.
//!
//! These read files or stdin, evaluate more source, expose scopes, or stop
//! the program. None of them is on the allowlist; vetted sources cannot
//! name them, so they only run for trusted callers.

use std::io::BufRead;
use std::rc::Rc;

use cordon_ir::Mode;
use tracing::debug;

use crate::environment::{root_of, Scope, ScopeRef};
use crate::errors::{import_error, type_error, value_error, EvalError, EvalResult};
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, Interpreter};
use crate::methods::{attribute_names, get_attribute, has_attribute};
use crate::value::{BuiltinFn, DictValue, FileValue, Value};

pub(super) const FUNCTIONS: &[(&str, BuiltinFn)] = &[
    ("__import__", import),
    ("dir", dir),
    ("eval", eval),
    ("execfile", execfile),
    ("exit", exit),
    ("getattr", getattr),
    ("globals", globals),
    ("hasattr", hasattr),
    ("input", input),
    ("locals", locals),
    ("open", open),
    ("quit", exit),
    ("raw_input", raw_input),
    ("vars", vars),
];

fn expect_str<'a>(func: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value.as_str().ok_or_else(|| {
        type_error(format!(
            "{func}() argument 1 must be string, not {}",
            value.type_name()
        ))
    })
}

/// Scope of the calling frame, or an empty one for host-level calls.
fn calling_scope(interp: &Interpreter) -> ScopeRef {
    interp
        .caller_scope()
        .unwrap_or_else(|| Scope::new().new_ref())
}

fn bindings_dict(scope: &ScopeRef) -> EvalResult {
    let mut dict = DictValue::new();
    for (name, value) in scope.borrow().bindings() {
        dict.insert(Value::Str(name), value)?;
    }
    Ok(Value::dict(dict))
}

// Files and input

fn read_file(path: &str) -> Result<String, EvalError> {
    std::fs::read_to_string(path).map_err(|err| {
        debug!(path, %err, "open failed");
        EvalError::new(ExceptionKind::IOError, format!("{err}: '{path}'"))
    })
}

fn open(_: &mut Interpreter, mut args: Args) -> EvalResult {
    let keyword_mode = args.take_keyword("mode");
    let parts = args.between("open", 1, 3)?;
    let path = expect_str("open", &parts[0])?;
    let mode = match parts.get(1).or(keyword_mode.as_ref()) {
        Some(mode) => expect_str("open", mode)?.to_owned(),
        None => "r".to_owned(),
    };
    if !mode.starts_with('r') || mode.contains(['w', 'a', '+', 'x']) {
        return Err(value_error(format!("file mode '{mode}' is not readable")));
    }
    let contents = read_file(path)?;
    Ok(Value::File(Rc::new(FileValue::new(path, contents))))
}

fn read_line(interp: &Interpreter, prompt: Option<&Value>) -> Result<String, EvalError> {
    if let Some(prompt) = prompt {
        interp.print_handler().write(&prompt.to_str());
    }
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| EvalError::new(ExceptionKind::IOError, err.to_string()))?;
    if read == 0 {
        return Err(EvalError::new(
            ExceptionKind::IOError,
            "EOF when reading a line",
        ));
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn raw_input(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("raw_input", 0, 1)?;
    Ok(Value::str(read_line(interp, args.first())?))
}

/// `input()` evaluates the line it reads.
fn input(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("input", 0, 1)?;
    let line = read_line(interp, args.first())?;
    let scope = calling_scope(interp);
    interp.run_source(line.trim(), Mode::Expression, scope, None, None)
}

// Running more source

fn eval(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("eval", 1, 3)?;
    let source = expect_str("eval", &args[0])?;
    let scope = calling_scope(interp);
    interp.run_source(
        source.trim(),
        Mode::Expression,
        scope,
        args.get(1),
        args.get(2),
    )
}

fn execfile(interp: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("execfile", 1, 3)?;
    let source = read_file(expect_str("execfile", &args[0])?)?;
    let scope = calling_scope(interp);
    interp.run_source(&source, Mode::Statements, scope, args.get(1), args.get(2))
}

fn import(_: &mut Interpreter, args: Args) -> EvalResult {
    let parts = args.between("__import__", 1, 5)?;
    let name = expect_str("__import__", &parts[0])?;
    Err(import_error(format!("No module named {name}")))
}

// Scopes and introspection

/// Snapshot of the module-level bindings.
fn globals(interp: &mut Interpreter, args: Args) -> EvalResult {
    args.exact("globals", 0)?;
    bindings_dict(&root_of(&calling_scope(interp)))
}

/// Snapshot of the innermost scope's bindings.
fn locals(interp: &mut Interpreter, args: Args) -> EvalResult {
    args.exact("locals", 0)?;
    bindings_dict(&calling_scope(interp))
}

fn vars(interp: &mut Interpreter, args: Args) -> EvalResult {
    match args.between("vars", 0, 1)? {
        [] => bindings_dict(&calling_scope(interp)),
        _ => Err(type_error("vars() argument must have __dict__ attribute")),
    }
}

fn dir(interp: &mut Interpreter, args: Args) -> EvalResult {
    let names: Vec<Value> = match args.between("dir", 0, 1)? {
        [] => calling_scope(interp)
            .borrow()
            .bindings()
            .into_iter()
            .map(|(name, _)| Value::Str(name))
            .collect(),
        [object, ..] => attribute_names(object).into_iter().map(Value::str).collect(),
    };
    Ok(Value::list(names))
}

fn getattr(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("getattr", 2, 3)?;
    let name = args[1]
        .as_str()
        .ok_or_else(|| type_error("getattr(): attribute name must be string"))?;
    match (get_attribute(&args[0], name), args.get(2)) {
        (Err(err), Some(default)) if err.kind() == ExceptionKind::AttributeError => {
            Ok(default.clone())
        }
        (result, _) => result,
    }
}

fn hasattr(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.exact("hasattr", 2)?;
    let name = args[1]
        .as_str()
        .ok_or_else(|| type_error("hasattr(): attribute name must be string"))?;
    Ok(Value::Bool(has_attribute(&args[0], name)))
}

// Termination

fn exit(_: &mut Interpreter, args: Args) -> EvalResult {
    let args = args.between("exit", 0, 1)?;
    let message = match args.first() {
        None | Some(Value::None) => String::new(),
        Some(code) => code.to_str(),
    };
    Err(EvalError::new(ExceptionKind::SystemExit, message))
}
