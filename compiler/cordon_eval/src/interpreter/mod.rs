//! Tree-walking interpreter.
//!
//! # Architecture
//!
//! An [`Interpreter`] owns the per-evaluation state: options, call depth,
//! and the exception being handled (for bare `raise`). Evaluating a tree
//! pushes a `Frame` that pairs the interpreter with the tree being walked
//! and the scope names resolve in. Calling a user function pushes a new
//! frame over the *function's* tree, since a closure may come from a
//! different source than its caller.
//!
//! - `expr` - expression evaluation, calls, comprehensions
//! - `stmt` - statements and control flow
//! - `assign` - assignment, augmented assignment and `del` targets
//!
//! The interpreter never vets what it runs. Callers hand it trees that
//! have already passed the guard, or trees they trust.

mod args;
mod assign;
mod expr;
mod stmt;

pub use args::Args;

use std::rc::Rc;
use std::sync::Arc;

use cordon_ir::{ensure_sufficient_stack, ExprArena, Mode, Name, Root, SyntaxTree};
use tracing::debug;

use crate::environment::{Environment, Scope, ScopeRef};
use crate::errors::{recursion_error, syntax_error, type_error, EvalError, EvalResult};
use crate::exceptions::Exception;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::{FunctionBody, FunctionValue, Value};

use stmt::Flow;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Evaluation settings.
#[derive(Clone)]
pub struct EvalOptions {
    /// Nested calls beyond this raise `RecursionError`.
    pub max_call_depth: usize,
    /// Where `print()` writes.
    pub print: SharedPrintHandler,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            print: stdout_handler(),
        }
    }
}

impl EvalOptions {
    #[must_use]
    pub fn with_print(mut self, print: SharedPrintHandler) -> Self {
        self.print = print;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

/// Interpreter state for one evaluation.
pub struct Interpreter {
    options: EvalOptions,
    depth: usize,
    /// Scope of the frame that made the current native call, for
    /// `globals()`, `locals()` and `eval()`.
    caller_scope: Option<ScopeRef>,
    /// Exceptions currently being handled, innermost last.
    handling: Vec<Exception>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(EvalOptions::default())
    }
}

impl Interpreter {
    pub fn new(options: EvalOptions) -> Self {
        Interpreter {
            options,
            depth: 0,
            caller_scope: None,
            handling: Vec::new(),
        }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.options.print
    }

    /// Evaluate `tree` against `env`.
    ///
    /// An expression tree yields its value. A statement tree yields `None`
    /// and leaves its bindings in `env`.
    #[tracing::instrument(level = "debug", skip_all, fields(mode = %tree.mode()))]
    pub fn run(&mut self, tree: &Arc<SyntaxTree>, env: &Environment) -> EvalResult {
        let result = self.run_in_scope(tree, Rc::clone(env.scope()));
        if let Err(err) = &result {
            debug!(error = %err, "uncaught exception");
        }
        result
    }

    pub(crate) fn run_in_scope(&mut self, tree: &Arc<SyntaxTree>, scope: ScopeRef) -> EvalResult {
        let mut frame = Frame::new(self, tree, scope);
        match tree.root() {
            Root::Expression(id) => frame.eval(id),
            Root::Statements(body) => {
                frame.exec_block(body)?;
                Ok(Value::None)
            }
        }
    }

    /// Parse and run `source` for `eval()` and `exec`.
    ///
    /// Without `globals` the code runs in `scope`. A `globals` (and
    /// optionally `locals`) dict gets a fresh scope seeded from it, and the
    /// resulting bindings are written back to the dict afterwards.
    pub(crate) fn run_source(
        &mut self,
        source: &str,
        mode: Mode,
        scope: ScopeRef,
        globals: Option<&Value>,
        locals: Option<&Value>,
    ) -> EvalResult {
        let tree = cordon_parse::parse(source, mode).map_err(|e| syntax_error(e.message))?;
        let tree = Arc::new(tree);

        let mut scope = scope;
        let mut sinks = Vec::new();
        for (dict, nested) in [(globals, false), (locals, true)] {
            let Some(dict) = dict.filter(|d| !matches!(d, Value::None)) else {
                continue;
            };
            let parent = nested.then(|| Rc::clone(&scope));
            let seeded = scope_from_dict(dict, parent)?;
            sinks.push((Rc::clone(&seeded), dict.clone()));
            scope = seeded;
        }

        let result = self.run_in_scope(&tree, scope);
        for (scope, dict) in sinks {
            write_back(&scope, &dict)?;
        }
        result
    }

    /// Call any callable value.
    pub fn call(&mut self, callee: &Value, args: Args) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::Builtin(builtin) => (builtin.func)(self, args),
            Value::BoundMethod(method) => (method.func)(self, &method.receiver, args),
            Value::Type(kind) => crate::builtins::construct(self, *kind, args),
            Value::ExceptionType(kind) => {
                args.no_keywords(kind.name())?;
                let message = match args.positional.as_slice() {
                    [] => String::new(),
                    [single] => single.to_str(),
                    many => Value::tuple(many.to_vec()).repr(),
                };
                Ok(Value::exception(*kind, message))
            }
            other => Err(type_error(format!(
                "'{}' object is not callable",
                other.type_name()
            ))),
        }
    }

    fn call_function(&mut self, func: &Rc<FunctionValue>, args: Args) -> EvalResult {
        if self.depth >= self.options.max_call_depth {
            return Err(recursion_error());
        }
        let scope = bind_params(func, args)?;
        self.depth += 1;
        let result = ensure_sufficient_stack(|| {
            let mut frame = Frame::new(self, &func.tree, scope);
            match func.body {
                FunctionBody::Expr(id) => frame.eval(id),
                FunctionBody::Block(body) => match frame.exec_block(body)? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal | Flow::Break | Flow::Continue => Ok(Value::None),
                },
            }
        });
        self.depth -= 1;
        result
    }

    /// Scope of the frame making the current native call.
    pub(crate) fn caller_scope(&self) -> Option<ScopeRef> {
        self.caller_scope.clone()
    }
}

/// Bind call arguments to a fresh scope under the function's closure.
fn bind_params(func: &FunctionValue, args: Args) -> Result<ScopeRef, EvalError> {
    let Args {
        positional,
        keywords,
    } = args;
    let params = &func.params;
    let given = positional.len() + keywords.len();
    let arity = || {
        let required = params.iter().filter(|p| p.default.is_none()).count();
        let bound = if required == params.len() {
            "exactly"
        } else if positional.len() > params.len() {
            "at most"
        } else {
            "at least"
        };
        let count = if bound == "at least" {
            required
        } else {
            params.len()
        };
        let noun = if count == 1 { "argument" } else { "arguments" };
        type_error(format!(
            "{}() takes {bound} {count} {noun} ({given} given)",
            func.name
        ))
    };

    if positional.len() > params.len() {
        return Err(arity());
    }
    let mut slots: Vec<Option<Value>> = vec![None; params.len()];
    for (slot, value) in slots.iter_mut().zip(positional.iter()) {
        *slot = Some(value.clone());
    }
    for (name, value) in keywords {
        let Some(index) = params.iter().position(|p| p.name == name) else {
            return Err(type_error(format!(
                "{}() got an unexpected keyword argument '{name}'",
                func.name
            )));
        };
        if slots[index].is_some() {
            return Err(type_error(format!(
                "{}() got multiple values for keyword argument '{name}'",
                func.name
            )));
        }
        slots[index] = Some(value);
    }

    let mut scope = Scope::with_parent(Rc::clone(&func.closure));
    for (param, slot) in params.iter().zip(slots) {
        let value = match slot.or_else(|| param.default.clone()) {
            Some(value) => value,
            None => return Err(arity()),
        };
        scope.define(Rc::clone(&param.name), value);
    }
    Ok(scope.new_ref())
}

fn scope_from_dict(dict: &Value, parent: Option<ScopeRef>) -> Result<ScopeRef, EvalError> {
    let Value::Dict(entries) = dict else {
        return Err(type_error(format!(
            "globals and locals must be dicts, not {}",
            dict.type_name()
        )));
    };
    let mut scope = match parent {
        Some(parent) => Scope::with_parent(parent),
        None => Scope::new(),
    };
    for (key, value) in entries.borrow().items() {
        if let Value::Str(name) = key {
            scope.define(name, value);
        }
    }
    Ok(scope.new_ref())
}

fn write_back(scope: &ScopeRef, dict: &Value) -> Result<(), EvalError> {
    if let Value::Dict(entries) = dict {
        let bindings = scope.borrow().bindings();
        let mut entries = entries.borrow_mut();
        for (name, value) in bindings {
            entries.insert(Value::Str(name), value)?;
        }
    }
    Ok(())
}

/// One activation: a tree being walked and the scope names resolve in.
struct Frame<'i, 't> {
    interp: &'i mut Interpreter,
    tree: &'t Arc<SyntaxTree>,
    scope: ScopeRef,
}

impl<'i, 't> Frame<'i, 't> {
    fn new(interp: &'i mut Interpreter, tree: &'t Arc<SyntaxTree>, scope: ScopeRef) -> Self {
        Frame {
            interp,
            tree,
            scope,
        }
    }

    #[inline]
    fn arena(&self) -> &'t ExprArena {
        self.tree.arena()
    }

    #[inline]
    fn name(&self, name: Name) -> &'t str {
        self.tree.arena().name(name)
    }

    /// Run `f` with a child scope pushed, restoring the current one after.
    fn with_child_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let child = Scope::with_parent(Rc::clone(&self.scope)).new_ref();
        let saved = std::mem::replace(&mut self.scope, child);
        let result = f(self);
        self.scope = saved;
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
