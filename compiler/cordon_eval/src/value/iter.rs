//! Iteration over values.

use std::cell::RefCell;
use std::rc::Rc;

use super::{RangeValue, Value};
use crate::errors::{type_error, EvalError};

/// An in-progress iteration.
///
/// Ranges are produced lazily so `for i in range(n)` never materialises the
/// whole sequence; other iterables are snapshotted when iteration starts.
#[derive(Clone, Debug)]
pub enum ValueIter {
    Items {
        items: Vec<Value>,
        pos: usize,
    },
    Range {
        range: RangeValue,
        pos: usize,
    },
    /// Draws from a shared iterator object.
    Shared(Rc<RefCell<ValueIter>>),
}

impl ValueIter {
    pub fn from_items(items: Vec<Value>) -> Self {
        ValueIter::Items { items, pos: 0 }
    }

    pub fn of(value: &Value) -> Result<Self, EvalError> {
        Ok(match value {
            Value::Str(s) => ValueIter::from_items(s.chars().map(|c| Value::str(c.to_string())).collect()),
            Value::List(items) => ValueIter::from_items(items.borrow().clone()),
            Value::Tuple(items) => ValueIter::from_items(items.to_vec()),
            Value::Dict(d) => ValueIter::from_items(d.borrow().keys()),
            Value::Set(s) => ValueIter::from_items(s.borrow().values()),
            Value::Range(range) => ValueIter::Range {
                range: *range,
                pos: 0,
            },
            Value::Iterator(shared) => ValueIter::Shared(Rc::clone(shared)),
            Value::File(file) => {
                let contents = file.contents.borrow();
                let lines = contents
                    .as_deref()
                    .unwrap_or("")
                    .split_inclusive('\n')
                    .map(Value::str)
                    .collect();
                ValueIter::from_items(lines)
            }
            other => {
                return Err(type_error(format!(
                    "'{}' object is not iterable",
                    other.type_name()
                )))
            }
        })
    }
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            ValueIter::Items { items, pos } => {
                let item = items.get(*pos).cloned()?;
                *pos += 1;
                Some(item)
            }
            ValueIter::Range { range, pos } => {
                let item = range.get(*pos)?;
                *pos += 1;
                Some(Value::Int(item))
            }
            ValueIter::Shared(shared) => shared.borrow_mut().next(),
        }
    }
}
