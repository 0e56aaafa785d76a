//! Statement execution and control flow.

use std::rc::Rc;

use cordon_ir::{
    ensure_sufficient_stack, ExprId, HandlerRange, Mode, StmtId, StmtKind, StmtRange,
};

use super::Frame;
use crate::errors::{import_error, runtime_error, type_error, EvalError};
use crate::exceptions::ExceptionKind;
use crate::value::{FunctionBody, Value};

/// How a statement finished.
#[derive(Debug)]
pub(super) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

impl<'i, 't> Frame<'i, 't> {
    pub(super) fn exec_block(&mut self, body: StmtRange) -> Result<Flow, EvalError> {
        for &id in self.arena().stmt_list(body) {
            match self.exec(id)? {
                Flow::Normal => {}
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec(&mut self, id: StmtId) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| {
            let stmt = *self.arena().stmt(id);
            self.exec_kind(stmt.kind).map_err(|e| e.or_span(stmt.span))
        })
    }

    fn exec_kind(&mut self, kind: StmtKind) -> Result<Flow, EvalError> {
        match kind {
            StmtKind::Expr(expr) => {
                self.eval(expr)?;
            }
            StmtKind::Assign { targets, value } => {
                let value = self.eval(value)?;
                for &target in self.arena().expr_list(targets) {
                    self.assign(target, value.clone())?;
                }
            }
            StmtKind::AugAssign { target, op, value } => self.aug_assign(target, op, value)?,
            StmtKind::Pass => {}
            StmtKind::Break => return Ok(Flow::Break),
            StmtKind::Continue => return Ok(Flow::Continue),
            StmtKind::If { test, body, orelse } => {
                return if self.eval(test)?.is_truthy() {
                    self.exec_block(body)
                } else {
                    self.exec_block(orelse)
                };
            }
            StmtKind::While { test, body } => {
                while self.eval(test)?.is_truthy() {
                    match self.exec_block(body)? {
                        Flow::Break => break,
                        Flow::Normal | Flow::Continue => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
            }
            StmtKind::For { target, iter, body } => {
                let iterable = self.eval(iter)?;
                let span = self.arena().expr(iter).span;
                for item in iterable.iter().map_err(|e| e.or_span(span))? {
                    self.assign(target, item)?;
                    match self.exec_block(body)? {
                        Flow::Break => break,
                        Flow::Normal | Flow::Continue => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }
            }
            StmtKind::FunctionDef { name, params, body } => {
                let params = self.eval_params(params)?;
                let name = self.name(name.name);
                let function = self.make_function(Rc::from(name), params, FunctionBody::Block(body));
                self.store(name, function);
            }
            StmtKind::Return(value) => {
                let value = match value.get() {
                    Some(id) => self.eval(id)?,
                    None => Value::None,
                };
                return Ok(Flow::Return(value));
            }
            StmtKind::Delete(targets) => {
                for &target in self.arena().expr_list(targets) {
                    self.delete(target)?;
                }
            }
            StmtKind::Assert { test, msg } => {
                if !self.eval(test)?.is_truthy() {
                    let message = match msg.get() {
                        Some(id) => self.eval(id)?.to_str(),
                        None => String::new(),
                    };
                    return Err(EvalError::new(ExceptionKind::AssertionError, message));
                }
            }
            StmtKind::Raise(exc) => return Err(self.raise(exc)),
            StmtKind::Try {
                body,
                handlers,
                finalbody,
            } => return self.exec_try(body, handlers, finalbody),
            StmtKind::Import(aliases) => {
                let module = self
                    .arena()
                    .aliases(aliases)
                    .first()
                    .map_or("", |alias| self.name(alias.path));
                return Err(import_error(format!("No module named {module}")));
            }
            StmtKind::ImportFrom { module, level, .. } => {
                return Err(if level > 0 {
                    import_error("Attempted relative import in non-package")
                } else {
                    import_error(format!("No module named {}", self.name(module)))
                });
            }
            StmtKind::Global(names) => {
                for ident in self.arena().idents(names) {
                    let name = self.name(ident.name);
                    self.scope.borrow_mut().declare_global(Rc::from(name));
                }
            }
            StmtKind::Exec {
                body,
                globals,
                locals,
            } => self.exec_code(body, globals, locals)?,
        }
        Ok(Flow::Normal)
    }

    /// Build the error for `raise [exc]`.
    fn raise(&mut self, exc: ExprId) -> EvalError {
        let Some(id) = exc.get() else {
            return match self.interp.handling.last() {
                Some(current) => EvalError::from_exception(current.clone()),
                None => runtime_error("No active exception to reraise"),
            };
        };
        match self.eval(id) {
            Ok(Value::ExceptionType(kind)) => EvalError::new(kind, ""),
            Ok(Value::Exception(exception)) => EvalError::from_exception((*exception).clone()),
            Ok(other) => type_error(format!(
                "exceptions must derive from BaseException, not {}",
                other.type_name()
            )),
            Err(err) => err,
        }
    }

    fn exec_try(
        &mut self,
        body: StmtRange,
        handlers: HandlerRange,
        finalbody: StmtRange,
    ) -> Result<Flow, EvalError> {
        let outcome = match self.exec_block(body) {
            Err(err) => self.handle(err, handlers),
            finished => finished,
        };
        if !finalbody.is_empty() {
            match self.exec_block(finalbody)? {
                Flow::Normal => {}
                // Control flow out of `finally` discards the pending outcome.
                jump => return Ok(jump),
            }
        }
        outcome
    }

    /// Find the first handler matching `err` and run it.
    fn handle(&mut self, err: EvalError, handlers: HandlerRange) -> Result<Flow, EvalError> {
        for handler in self.arena().handlers(handlers) {
            let matches = match handler.ty.get() {
                None => true,
                Some(ty) => {
                    let class = self.eval(ty)?;
                    exception_matches(&class, err.kind())?
                }
            };
            if !matches {
                continue;
            }
            if !handler.name.is_empty() {
                let bound = Value::Exception(Rc::new(err.exception.clone()));
                self.store(self.name(handler.name.name), bound);
            }
            self.interp.handling.push(err.exception.clone());
            let result = self.exec_block(handler.body);
            self.interp.handling.pop();
            return result;
        }
        Err(err)
    }

    /// `exec code [in globals[, locals]]`.
    fn exec_code(&mut self, body: ExprId, globals: ExprId, locals: ExprId) -> Result<(), EvalError> {
        let code = self.eval(body)?;
        let source = match &code {
            Value::Str(source) => source.to_string(),
            Value::File(file) => file.read()?,
            other => {
                return Err(type_error(format!(
                    "exec: arg 1 must be a string or file, not {}",
                    other.type_name()
                )))
            }
        };
        let globals = self.eval_optional_value(globals)?;
        let locals = self.eval_optional_value(locals)?;
        let scope = Rc::clone(&self.scope);
        self.interp
            .run_source(&source, Mode::Statements, scope, globals.as_ref(), locals.as_ref())?;
        Ok(())
    }

    fn eval_optional_value(&mut self, id: ExprId) -> Result<Option<Value>, EvalError> {
        id.get().map(|id| self.eval(id)).transpose()
    }
}

/// Whether an `except` clause naming `class` catches `kind`.
fn exception_matches(class: &Value, kind: ExceptionKind) -> Result<bool, EvalError> {
    match class {
        Value::ExceptionType(caught) => Ok(kind.is_subclass_of(*caught)),
        Value::Tuple(classes) => {
            for class in classes.iter() {
                if exception_matches(class, kind)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        other => Err(type_error(format!(
            "catching '{}' objects is not allowed; except clauses need exception classes",
            other.type_name()
        ))),
    }
}
