//! Expression evaluation.

use std::rc::Rc;
use std::sync::Arc;

use cordon_ir::{
    ensure_sufficient_stack, BoolOp, Comprehension, ComprehensionRange, ExprId, ExprKind,
    ExprRange, KeywordRange, ParamRange,
};

use super::{Args, Frame};
use crate::errors::{name_error, EvalError, EvalResult};
use crate::value::{
    DictValue, FunctionBody, FunctionValue, ParamValue, SetValue, SliceValue, Value, ValueIter,
};
use crate::{builtins, methods, operators};

/// Emits one comprehension element from the innermost clause.
type Emit<'f, 'i, 't> = dyn FnMut(&mut Frame<'i, 't>) -> Result<(), EvalError> + 'f;

impl<'i, 't> Frame<'i, 't> {
    /// Evaluate an expression, attaching its span to any error it raises.
    pub(super) fn eval(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let expr = *self.arena().expr(id);
            self.eval_kind(expr.kind).map_err(|e| e.or_span(expr.span))
        })
    }

    /// Evaluate an optional child; absent children are `None`.
    fn eval_optional(&mut self, id: ExprId) -> EvalResult {
        match id.get() {
            Some(id) => self.eval(id),
            None => Ok(Value::None),
        }
    }

    pub(super) fn eval_list(&mut self, range: ExprRange) -> Result<Vec<Value>, EvalError> {
        let ids = self.arena().expr_list(range);
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            values.push(self.eval(id)?);
        }
        Ok(values)
    }

    /// Resolve a name: enclosing scopes first, then the builtin namespace.
    pub(super) fn lookup(&self, name: &str) -> EvalResult {
        if let Some(value) = self.scope.borrow().lookup(name) {
            return Ok(value);
        }
        builtins::lookup(name).ok_or_else(|| name_error(name))
    }

    fn eval_kind(&mut self, kind: ExprKind) -> EvalResult {
        match kind {
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(bits) => Ok(Value::Float(f64::from_bits(bits))),
            ExprKind::Str(text) => Ok(Value::str(self.name(text))),
            ExprKind::Name(name) => self.lookup(self.name(name)),
            ExprKind::Attribute { value, attr } => {
                let object = self.eval(value)?;
                methods::get_attribute(&object, self.name(attr))
            }
            ExprKind::Subscript { value, index } => {
                let container = self.eval(value)?;
                let index = self.eval(index)?;
                operators::get_item(&container, &index)
            }
            ExprKind::Slice { lower, upper, step } => Ok(Value::Slice(Rc::new(SliceValue {
                start: self.eval_optional(lower)?,
                stop: self.eval_optional(upper)?,
                step: self.eval_optional(step)?,
            }))),
            ExprKind::Call {
                func,
                args,
                keywords,
            } => self.eval_call(func, args, keywords),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                operators::evaluate_unary(&operand, op)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_binary(&left, &right, op)
            }
            ExprKind::BoolOp { op, values } => {
                let mut last = Value::None;
                for &id in self.arena().expr_list(values) {
                    last = self.eval(id)?;
                    let truthy = last.is_truthy();
                    if (op == BoolOp::And && !truthy) || (op == BoolOp::Or && truthy) {
                        break;
                    }
                }
                Ok(last)
            }
            ExprKind::Compare {
                left,
                ops,
                comparators,
            } => {
                let mut left = self.eval(left)?;
                let ops = self.arena().cmp_ops(ops);
                let rights = self.arena().expr_list(comparators);
                for (&op, &right) in ops.iter().zip(rights) {
                    let right = self.eval(right)?;
                    if !operators::evaluate_compare(&left, &right, op)? {
                        return Ok(Value::Bool(false));
                    }
                    left = right;
                }
                Ok(Value::Bool(true))
            }
            ExprKind::IfExp { test, body, orelse } => {
                if self.eval(test)?.is_truthy() {
                    self.eval(body)
                } else {
                    self.eval(orelse)
                }
            }
            ExprKind::Lambda { params, body } => {
                let params = self.eval_params(params)?;
                Ok(self.make_function(Rc::from("<lambda>"), params, FunctionBody::Expr(body)))
            }
            ExprKind::List(items) => Ok(Value::list(self.eval_list(items)?)),
            ExprKind::Tuple(items) => Ok(Value::tuple(self.eval_list(items)?)),
            ExprKind::Set(items) => Ok(Value::set(SetValue::from_values(self.eval_list(items)?)?)),
            ExprKind::Dict { keys, values } => {
                let keys = self.arena().expr_list(keys);
                let values = self.arena().expr_list(values);
                let mut dict = DictValue::new();
                for (&key, &value) in keys.iter().zip(values) {
                    let key = self.eval(key)?;
                    let value = self.eval(value)?;
                    dict.insert(key, value)?;
                }
                Ok(Value::dict(dict))
            }
            ExprKind::ListComp { elt, generators } => {
                Ok(Value::list(self.comprehension(generators, |f| f.eval(elt))?))
            }
            ExprKind::Generator { elt, generators } => {
                let items = self.comprehension(generators, |f| f.eval(elt))?;
                Ok(Value::iterator(ValueIter::from_items(items)))
            }
            ExprKind::SetComp { elt, generators } => {
                let items = self.comprehension(generators, |f| f.eval(elt))?;
                Ok(Value::set(SetValue::from_values(items)?))
            }
            ExprKind::DictComp {
                key,
                value,
                generators,
            } => {
                let pairs = self.comprehension(generators, |f| {
                    let k = f.eval(key)?;
                    let v = f.eval(value)?;
                    Ok((k, v))
                })?;
                let mut dict = DictValue::new();
                for (k, v) in pairs {
                    dict.insert(k, v)?;
                }
                Ok(Value::dict(dict))
            }
        }
    }

    fn eval_call(&mut self, func: ExprId, args: ExprRange, keywords: KeywordRange) -> EvalResult {
        let callee = self.eval(func)?;
        let positional = self.eval_list(args)?;
        let keyword_nodes = self.arena().keywords(keywords);
        let mut named = Vec::with_capacity(keyword_nodes.len());
        for keyword in keyword_nodes {
            let value = self.eval(keyword.value)?;
            named.push((Rc::from(self.name(keyword.arg)), value));
        }
        let args = Args {
            positional,
            keywords: named,
        };

        let previous = self.interp.caller_scope.replace(Rc::clone(&self.scope));
        let result = self.interp.call(&callee, args);
        self.interp.caller_scope = previous;
        result
    }

    /// Evaluate parameter defaults, left to right, at definition time.
    pub(super) fn eval_params(&mut self, params: ParamRange) -> Result<Vec<ParamValue>, EvalError> {
        let params = self.arena().params(params);
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let default = match param.default.get() {
                Some(id) => Some(self.eval(id)?),
                None => None,
            };
            out.push(ParamValue {
                name: Rc::from(self.name(param.name.name)),
                default,
            });
        }
        Ok(out)
    }

    pub(super) fn make_function(
        &self,
        name: Rc<str>,
        params: Vec<ParamValue>,
        body: FunctionBody,
    ) -> Value {
        Value::Function(Rc::new(FunctionValue {
            name,
            params,
            body,
            tree: Arc::clone(self.tree),
            closure: Rc::clone(&self.scope),
        }))
    }

    /// Run the clauses of a comprehension in their own scope, collecting
    /// what `element` produces for each surviving binding.
    fn comprehension<T>(
        &mut self,
        generators: ComprehensionRange,
        mut element: impl FnMut(&mut Self) -> Result<T, EvalError>,
    ) -> Result<Vec<T>, EvalError> {
        let clauses = self.arena().comprehensions(generators);
        let mut out = Vec::new();
        self.with_child_scope(|frame| {
            frame.run_clauses(clauses, &mut |f: &mut Frame<'i, 't>| -> Result<(), EvalError> {
                out.push(element(f)?);
                Ok(())
            })
        })?;
        Ok(out)
    }

    fn run_clauses(
        &mut self,
        clauses: &[Comprehension],
        emit: &mut Emit<'_, 'i, 't>,
    ) -> Result<(), EvalError> {
        let Some((first, rest)) = clauses.split_first() else {
            return emit(self);
        };
        let iterable = self.eval(first.iter)?;
        let span = self.arena().expr(first.iter).span;
        let items = iterable.iter().map_err(|e| e.or_span(span))?;
        'items: for item in items {
            self.assign(first.target, item)?;
            for &cond in self.arena().expr_list(first.ifs) {
                if !self.eval(cond)?.is_truthy() {
                    continue 'items;
                }
            }
            self.run_clauses(rest, emit)?;
        }
        Ok(())
    }
}
