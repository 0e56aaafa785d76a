//! Indexing and slicing: `x[i]`, `x[a:b]`, and their assignment and
//! deletion forms.

use std::rc::Rc;

use crate::errors::{index_error, key_error, type_error, value_error, EvalError, EvalResult};
use crate::value::{SliceValue, Value};

/// Resolve a possibly negative index against `len`.
fn normalize(index: &Value, len: usize, what: &str) -> Result<usize, EvalError> {
    let i = index.as_int().ok_or_else(|| {
        type_error(format!(
            "{what} indices must be integers, not {}",
            index.type_name()
        ))
    })?;
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if i < 0 { i.saturating_add(len_i) } else { i };
    usize::try_from(resolved)
        .ok()
        .filter(|&r| r < len)
        .ok_or_else(|| index_error(format!("{what} index out of range")))
}

fn pick<T: Clone>(items: &[T], slice: &SliceValue) -> Result<Vec<T>, EvalError> {
    Ok(slice
        .positions(items.len())?
        .into_iter()
        .filter_map(|i| items.get(i).cloned())
        .collect())
}

/// `container[index]`.
pub fn get_item(container: &Value, index: &Value) -> EvalResult {
    match (container, index) {
        (Value::Str(s), Value::Slice(slice)) => {
            let chars: Vec<char> = s.chars().collect();
            Ok(Value::str(pick(chars.as_slice(), slice)?.into_iter().collect::<String>()))
        }
        (Value::Str(s), i) => {
            let len = s.chars().count();
            let pos = normalize(i, len, "string")?;
            Ok(s.chars().nth(pos).map_or(Value::None, |c| Value::str(c.to_string())))
        }
        (Value::List(items), Value::Slice(slice)) => Ok(Value::list(pick(items.borrow().as_slice(), slice)?)),
        (Value::List(items), i) => {
            let items = items.borrow();
            let pos = normalize(i, items.len(), "list")?;
            Ok(items[pos].clone())
        }
        (Value::Tuple(items), Value::Slice(slice)) => {
            Ok(Value::Tuple(Rc::from(pick(&items[..], slice)?)))
        }
        (Value::Tuple(items), i) => {
            let pos = normalize(i, items.len(), "tuple")?;
            Ok(items[pos].clone())
        }
        (Value::Range(range), Value::Slice(slice)) => Ok(Value::list(
            slice
                .positions(range.len())?
                .into_iter()
                .filter_map(|i| range.get(i).map(Value::Int))
                .collect(),
        )),
        (Value::Range(range), i) => {
            let pos = normalize(i, range.len(), "range object")?;
            Ok(range.get(pos).map_or(Value::None, Value::Int))
        }
        (Value::Dict(d), key) => {
            let found = d.borrow().get(key)?;
            found.ok_or_else(|| key_error(key))
        }
        (other, _) => Err(type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

/// `container[index] = value`.
pub fn set_item(container: &Value, index: &Value, value: Value) -> Result<(), EvalError> {
    match (container, index) {
        (Value::List(items), Value::Slice(slice)) => assign_slice(items, slice, &value),
        (Value::List(items), i) => {
            let mut items = items.borrow_mut();
            let pos = normalize(i, items.len(), "list assignment")?;
            items[pos] = value;
            Ok(())
        }
        (Value::Dict(d), key) => d.borrow_mut().insert(key.clone(), value),
        (other, _) => Err(type_error(format!(
            "'{}' object does not support item assignment",
            other.type_name()
        ))),
    }
}

fn assign_slice(
    items: &Rc<std::cell::RefCell<Vec<Value>>>,
    slice: &SliceValue,
    value: &Value,
) -> Result<(), EvalError> {
    // Snapshot first: `xs[:] = xs` reads the list being replaced.
    let replacement = value.to_vec()?;
    let mut items = items.borrow_mut();
    let (start, stop, step) = slice.indices(items.len())?;
    if step == 1 {
        let start = usize::try_from(start).unwrap_or(0);
        let stop = usize::try_from(stop).unwrap_or(0).max(start);
        items.splice(start..stop, replacement);
        return Ok(());
    }
    let positions = slice.positions(items.len())?;
    if positions.len() != replacement.len() {
        return Err(value_error(format!(
            "attempt to assign sequence of size {} to extended slice of size {}",
            replacement.len(),
            positions.len()
        )));
    }
    for (pos, v) in positions.into_iter().zip(replacement) {
        items[pos] = v;
    }
    Ok(())
}

/// `del container[index]`.
pub fn del_item(container: &Value, index: &Value) -> Result<(), EvalError> {
    match (container, index) {
        (Value::List(items), Value::Slice(slice)) => {
            let mut items = items.borrow_mut();
            let mut positions = slice.positions(items.len())?;
            positions.sort_unstable_by(|a, b| b.cmp(a));
            for pos in positions {
                items.remove(pos);
            }
            Ok(())
        }
        (Value::List(items), i) => {
            let mut items = items.borrow_mut();
            let pos = normalize(i, items.len(), "list assignment")?;
            items.remove(pos);
            Ok(())
        }
        (Value::Dict(d), key) => match d.borrow_mut().remove(key)? {
            Some(_) => Ok(()),
            None => Err(key_error(key)),
        },
        (other, _) => Err(type_error(format!(
            "'{}' object doesn't support item deletion",
            other.type_name()
        ))),
    }
}
