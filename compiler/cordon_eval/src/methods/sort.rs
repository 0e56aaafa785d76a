//! Stable sorting with fallible comparisons.
//!
//! Comparing two values can raise (`1 < 'a'`), and key functions are
//! script calls that can raise too. `slice::sort_by` has no way to stop
//! early, so this is a plain top-down merge sort that propagates the first
//! error.

use std::cmp::Ordering;

use crate::errors::EvalError;
use crate::interpreter::{Args, Interpreter};
use crate::value::{compare_values, Value};

/// Sort `items` by `key(item)` (or the items themselves).
///
/// Stable in both directions: with `reverse`, equal elements keep their
/// original relative order.
pub(crate) fn sort_values(
    interp: &mut Interpreter,
    items: Vec<Value>,
    key: Option<&Value>,
    reverse: bool,
) -> Result<Vec<Value>, EvalError> {
    let mut keyed = Vec::with_capacity(items.len());
    for item in items {
        let sort_key = match key {
            Some(func) => interp.call(func, Args::new(vec![item.clone()]))?,
            None => item.clone(),
        };
        keyed.push((sort_key, item));
    }
    let sorted = merge_sort(keyed, &|a: &Value, b: &Value| {
        let ordering = compare_values(a, b, "<")?;
        Ok(if reverse { ordering.reverse() } else { ordering })
    })?;
    Ok(sorted.into_iter().map(|(_, item)| item).collect())
}

type Compare<'a> = dyn Fn(&Value, &Value) -> Result<Ordering, EvalError> + 'a;

fn merge_sort(
    mut items: Vec<(Value, Value)>,
    cmp: &Compare<'_>,
) -> Result<Vec<(Value, Value)>, EvalError> {
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp)?;
    let right = merge_sort(right, cmp)?;

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(&r.0, &l.0)? == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    Ok(out)
}
