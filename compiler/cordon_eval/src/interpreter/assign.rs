//! Assignment targets.

use std::rc::Rc;

use cordon_ir::{BinaryOp, ExprId, ExprKind};

use super::Frame;
use crate::environment::root_of;
use crate::errors::{attribute_error, name_error, syntax_error, value_error, EvalError, EvalResult};
use crate::operators::{del_item, evaluate_binary, get_item, set_item};
use crate::value::Value;

impl Frame<'_, '_> {
    /// Bind `name` in the current scope, or the global scope if declared
    /// `global` here.
    pub(super) fn store(&mut self, name: &str, value: Value) {
        let global = self.scope.borrow().is_declared_global(name);
        let target = if global {
            root_of(&self.scope)
        } else {
            Rc::clone(&self.scope)
        };
        target.borrow_mut().define(Rc::from(name), value);
    }

    /// `target = value`.
    pub(super) fn assign(&mut self, target: ExprId, value: Value) -> Result<(), EvalError> {
        let node = *self.arena().expr(target);
        match node.kind {
            ExprKind::Name(name) => {
                self.store(self.name(name), value);
                Ok(())
            }
            ExprKind::Tuple(items) | ExprKind::List(items) => {
                let targets = self.arena().expr_list(items);
                let values = value.to_vec().map_err(|e| e.or_span(node.span))?;
                if values.len() > targets.len() {
                    return Err(value_error("too many values to unpack").or_span(node.span));
                }
                if values.len() < targets.len() {
                    let n = values.len();
                    let noun = if n == 1 { "value" } else { "values" };
                    return Err(
                        value_error(format!("need more than {n} {noun} to unpack"))
                            .or_span(node.span),
                    );
                }
                for (&target, value) in targets.iter().zip(values) {
                    self.assign(target, value)?;
                }
                Ok(())
            }
            ExprKind::Subscript { value: container, index } => {
                let container = self.eval(container)?;
                let index = self.eval(index)?;
                set_item(&container, &index, value).map_err(|e| e.or_span(node.span))
            }
            ExprKind::Attribute { value: object, attr } => {
                let object = self.eval(object)?;
                Err(attribute_error(object.type_name(), self.name(attr)).or_span(node.span))
            }
            other => Err(syntax_error(format!("cannot assign to {}", other.node_kind()))
                .or_span(node.span)),
        }
    }

    /// `target op= value`; the target's subexpressions are evaluated once.
    pub(super) fn aug_assign(
        &mut self,
        target: ExprId,
        op: BinaryOp,
        value: ExprId,
    ) -> Result<(), EvalError> {
        let node = *self.arena().expr(target);
        match node.kind {
            ExprKind::Name(name) => {
                let name = self.name(name);
                let current = self.lookup(name).map_err(|e| e.or_span(node.span))?;
                let rhs = self.eval(value)?;
                let result = in_place(&current, &rhs, op)?;
                self.store(name, result);
                Ok(())
            }
            ExprKind::Subscript { value: container, index } => {
                let container = self.eval(container)?;
                let index = self.eval(index)?;
                let current = get_item(&container, &index).map_err(|e| e.or_span(node.span))?;
                let rhs = self.eval(value)?;
                let result = in_place(&current, &rhs, op)?;
                set_item(&container, &index, result).map_err(|e| e.or_span(node.span))
            }
            ExprKind::Attribute { value: object, attr } => {
                let object = self.eval(object)?;
                Err(attribute_error(object.type_name(), self.name(attr)).or_span(node.span))
            }
            other => Err(syntax_error(format!(
                "illegal expression for augmented assignment: {}",
                other.node_kind()
            ))
            .or_span(node.span)),
        }
    }

    /// `del target`.
    pub(super) fn delete(&mut self, target: ExprId) -> Result<(), EvalError> {
        let node = *self.arena().expr(target);
        let result = match node.kind {
            ExprKind::Name(name) => {
                let name = self.name(name);
                let global = self.scope.borrow().is_declared_global(name);
                let scope = if global {
                    root_of(&self.scope)
                } else {
                    Rc::clone(&self.scope)
                };
                let removed = scope.borrow_mut().remove_local(name);
                removed.map(|_| ()).ok_or_else(|| name_error(name))
            }
            ExprKind::Tuple(items) | ExprKind::List(items) => {
                for &item in self.arena().expr_list(items) {
                    self.delete(item)?;
                }
                Ok(())
            }
            ExprKind::Subscript { value: container, index } => {
                let container = self.eval(container)?;
                let index = self.eval(index)?;
                del_item(&container, &index)
            }
            ExprKind::Attribute { value: object, attr } => {
                let object = self.eval(object)?;
                Err(attribute_error(object.type_name(), self.name(attr)))
            }
            other => Err(syntax_error(format!("cannot delete {}", other.node_kind()))),
        };
        result.map_err(|e| e.or_span(node.span))
    }
}

/// `+=` extends a list in place, so aliases see the change; every other
/// operator rebinds.
fn in_place(current: &Value, rhs: &Value, op: BinaryOp) -> EvalResult {
    if let (BinaryOp::Add, Value::List(items)) = (op, current) {
        let extra = rhs.to_vec()?;
        items.borrow_mut().extend(extra);
        return Ok(current.clone());
    }
    evaluate_binary(current, rhs, op)
}
