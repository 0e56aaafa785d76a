//! Methods on `list`, `tuple`, `dict` and `set`.
//!
//! Arguments are collected before the receiver is borrowed mutably, so
//! `xs.extend(xs)` and `d.update(d)` see a snapshot instead of aliasing.

use std::cell::RefCell;
use std::rc::Rc;

use super::{sort_values, wrong_receiver, MethodTable};
use crate::errors::{index_error, key_error, type_error, value_error, EvalError, EvalResult};
use crate::exceptions::ExceptionKind;
use crate::interpreter::{Args, Interpreter};
use crate::value::{values_equal, DictValue, SetValue, Value, ValueIter};

fn count_value(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn count_matches(items: &[Value], needle: &Value) -> Value {
    count_value(items.iter().filter(|item| values_equal(item, needle)).count())
}

fn position_of(items: &[Value], needle: &Value, container: &str) -> EvalResult {
    match items.iter().position(|item| values_equal(item, needle)) {
        Some(i) => Ok(count_value(i)),
        None => Err(value_error(format!(
            "{} is not in {container}",
            needle.repr()
        ))),
    }
}

// list

pub(super) const LIST_METHODS: MethodTable = &[
    ("append", list_append),
    ("count", list_count),
    ("extend", list_extend),
    ("index", list_index),
    ("insert", list_insert),
    ("pop", list_pop),
    ("remove", list_remove),
    ("reverse", list_reverse),
    ("sort", list_sort),
];

fn this_list(receiver: &Value) -> Result<&Rc<RefCell<Vec<Value>>>, EvalError> {
    match receiver {
        Value::List(items) => Ok(items),
        other => Err(wrong_receiver("list", other)),
    }
}

fn list_append(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("append", 1)?;
    this_list(receiver)?.borrow_mut().push(args[0].clone());
    Ok(Value::None)
}

fn list_extend(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("extend", 1)?;
    let items = args[0].to_vec()?;
    this_list(receiver)?.borrow_mut().extend(items);
    Ok(Value::None)
}

fn list_insert(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("insert", 2)?;
    let index = args[0].as_index("list indices")?;
    let mut items = this_list(receiver)?.borrow_mut();
    let at = super::clamp_index(index, items.len());
    items.insert(at, args[1].clone());
    Ok(Value::None)
}

fn list_pop(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("pop", 0, 1)?;
    let mut items = this_list(receiver)?.borrow_mut();
    if items.is_empty() {
        return Err(index_error("pop from empty list"));
    }
    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let index = match args.first() {
        Some(v) => v.as_index("list indices")?,
        None => -1,
    };
    let resolved = if index < 0 { index + len } else { index };
    match usize::try_from(resolved) {
        Ok(i) if i < items.len() => Ok(items.remove(i)),
        _ => Err(index_error("pop index out of range")),
    }
}

fn list_remove(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("remove", 1)?;
    let mut items = this_list(receiver)?.borrow_mut();
    match items.iter().position(|item| values_equal(item, &args[0])) {
        Some(i) => {
            items.remove(i);
            Ok(Value::None)
        }
        None => Err(value_error("list.remove(x): x not in list")),
    }
}

fn list_index(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("index", 1)?;
    position_of(&this_list(receiver)?.borrow(), &args[0], "list")
}

fn list_count(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("count", 1)?;
    Ok(count_matches(&this_list(receiver)?.borrow(), &args[0]))
}

fn list_reverse(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("reverse", 0)?;
    this_list(receiver)?.borrow_mut().reverse();
    Ok(Value::None)
}

fn list_sort(interp: &mut Interpreter, receiver: &Value, mut args: Args) -> EvalResult {
    let key = args.take_keyword("key").filter(|k| !matches!(k, Value::None));
    let reverse = args.take_keyword("reverse").is_some_and(|r| r.is_truthy());
    args.exact("sort", 0)?;
    let list = this_list(receiver)?;
    let items = list.borrow().clone();
    let sorted = sort_values(interp, items, key.as_ref(), reverse)?;
    *list.borrow_mut() = sorted;
    Ok(Value::None)
}

// tuple

pub(super) const TUPLE_METHODS: MethodTable = &[("count", tuple_count), ("index", tuple_index)];

fn this_tuple(receiver: &Value) -> Result<&[Value], EvalError> {
    match receiver {
        Value::Tuple(items) => Ok(items),
        other => Err(wrong_receiver("tuple", other)),
    }
}

fn tuple_count(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("count", 1)?;
    Ok(count_matches(this_tuple(receiver)?, &args[0]))
}

fn tuple_index(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("index", 1)?;
    position_of(this_tuple(receiver)?, &args[0], "tuple")
}

// dict

pub(super) const DICT_METHODS: MethodTable = &[
    ("clear", dict_clear),
    ("copy", dict_copy),
    ("get", dict_get),
    ("has_key", dict_has_key),
    ("items", dict_items),
    ("iteritems", dict_iteritems),
    ("iterkeys", dict_iterkeys),
    ("itervalues", dict_itervalues),
    ("keys", dict_keys),
    ("pop", dict_pop),
    ("popitem", dict_popitem),
    ("setdefault", dict_setdefault),
    ("update", dict_update),
    ("values", dict_values),
];

fn this_dict(receiver: &Value) -> Result<&Rc<RefCell<DictValue>>, EvalError> {
    match receiver {
        Value::Dict(dict) => Ok(dict),
        other => Err(wrong_receiver("dict", other)),
    }
}

fn pair((key, value): (Value, Value)) -> Value {
    Value::tuple(vec![key, value])
}

fn dict_get(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("get", 1, 2)?;
    let found = this_dict(receiver)?.borrow().get(&args[0])?;
    Ok(found.or_else(|| args.get(1).cloned()).unwrap_or(Value::None))
}

fn dict_has_key(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("has_key", 1)?;
    Ok(Value::Bool(this_dict(receiver)?.borrow().contains(&args[0])?))
}

fn dict_keys(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("keys", 0)?;
    Ok(Value::list(this_dict(receiver)?.borrow().keys()))
}

fn dict_values(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("values", 0)?;
    Ok(Value::list(this_dict(receiver)?.borrow().values()))
}

fn dict_items(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("items", 0)?;
    let items = this_dict(receiver)?.borrow().items();
    Ok(Value::list(items.into_iter().map(pair).collect()))
}

fn dict_iterkeys(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("iterkeys", 0)?;
    let keys = this_dict(receiver)?.borrow().keys();
    Ok(Value::iterator(ValueIter::from_items(keys)))
}

fn dict_itervalues(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("itervalues", 0)?;
    let values = this_dict(receiver)?.borrow().values();
    Ok(Value::iterator(ValueIter::from_items(values)))
}

fn dict_iteritems(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("iteritems", 0)?;
    let items = this_dict(receiver)?.borrow().items();
    Ok(Value::iterator(ValueIter::from_items(
        items.into_iter().map(pair).collect(),
    )))
}

fn dict_pop(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("pop", 1, 2)?;
    let removed = this_dict(receiver)?.borrow_mut().remove(&args[0])?;
    match (removed, args.get(1)) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(key_error(&args[0])),
    }
}

fn dict_popitem(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("popitem", 0)?;
    match this_dict(receiver)?.borrow_mut().pop_last() {
        Some(entry) => Ok(pair(entry)),
        None => Err(EvalError::new(
            ExceptionKind::KeyError,
            "'popitem(): dictionary is empty'",
        )),
    }
}

fn dict_setdefault(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.between("setdefault", 1, 2)?;
    let dict = this_dict(receiver)?;
    if let Some(existing) = dict.borrow().get(&args[0])? {
        return Ok(existing);
    }
    let default = args.get(1).cloned().unwrap_or(Value::None);
    dict.borrow_mut().insert(args[0].clone(), default.clone())?;
    Ok(default)
}

/// Key/value pairs from a mapping or an iterable of pairs.
pub(crate) fn mapping_pairs(source: &Value, func: &str) -> Result<Vec<(Value, Value)>, EvalError> {
    if let Value::Dict(dict) = source {
        return Ok(dict.borrow().items());
    }
    let mut pairs = Vec::new();
    for (i, item) in source.iter()?.enumerate() {
        let parts = item.to_vec().map_err(|_| {
            type_error(format!(
                "cannot convert {func} update sequence element #{i} to a sequence"
            ))
        })?;
        match <[Value; 2]>::try_from(parts) {
            Ok([key, value]) => pairs.push((key, value)),
            Err(parts) => {
                return Err(value_error(format!(
                    "{func} update sequence element #{i} has length {}; 2 is required",
                    parts.len()
                )))
            }
        }
    }
    Ok(pairs)
}

fn dict_update(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.count_between("update", 0, 1)?;
    let mut pairs = match args.get(0) {
        Some(source) => mapping_pairs(source, "dictionary")?,
        None => Vec::new(),
    };
    pairs.extend(
        args.keywords
            .into_iter()
            .map(|(name, value)| (Value::Str(name), value)),
    );
    let mut dict = this_dict(receiver)?.borrow_mut();
    for (key, value) in pairs {
        dict.insert(key, value)?;
    }
    Ok(Value::None)
}

fn dict_clear(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("clear", 0)?;
    this_dict(receiver)?.borrow_mut().clear();
    Ok(Value::None)
}

fn dict_copy(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("copy", 0)?;
    Ok(Value::dict(this_dict(receiver)?.borrow().clone()))
}

// set

pub(super) const SET_METHODS: MethodTable = &[
    ("add", set_add),
    ("clear", set_clear),
    ("copy", set_copy),
    ("difference", set_difference),
    ("discard", set_discard),
    ("intersection", set_intersection),
    ("issubset", set_issubset),
    ("issuperset", set_issuperset),
    ("pop", set_pop),
    ("remove", set_remove),
    ("symmetric_difference", set_symmetric_difference),
    ("union", set_union),
];

fn this_set(receiver: &Value) -> Result<&Rc<RefCell<SetValue>>, EvalError> {
    match receiver {
        Value::Set(set) => Ok(set),
        other => Err(wrong_receiver("set", other)),
    }
}

/// Any iterable as a set, for the set-algebra methods.
fn as_set(value: &Value) -> Result<SetValue, EvalError> {
    match value {
        Value::Set(set) => Ok(set.borrow().clone()),
        other => SetValue::from_values(other.to_vec()?),
    }
}

fn set_add(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("add", 1)?;
    this_set(receiver)?.borrow_mut().insert(args[0].clone())?;
    Ok(Value::None)
}

fn set_discard(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("discard", 1)?;
    this_set(receiver)?.borrow_mut().remove(&args[0])?;
    Ok(Value::None)
}

fn set_remove(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("remove", 1)?;
    if this_set(receiver)?.borrow_mut().remove(&args[0])? {
        Ok(Value::None)
    } else {
        Err(key_error(&args[0]))
    }
}

fn set_pop(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("pop", 0)?;
    this_set(receiver)?
        .borrow_mut()
        .pop_first()
        .ok_or_else(|| EvalError::new(ExceptionKind::KeyError, "'pop from an empty set'"))
}

fn set_clear(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("clear", 0)?;
    this_set(receiver)?.borrow_mut().clear();
    Ok(Value::None)
}

fn set_copy(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    args.exact("copy", 0)?;
    Ok(Value::set(this_set(receiver)?.borrow().clone()))
}

/// Fold every argument into the receiver with a set operation.
fn set_algebra(
    func: &str,
    receiver: &Value,
    args: &Args,
    op: fn(&SetValue, &SetValue) -> SetValue,
) -> EvalResult {
    args.no_keywords(func)?;
    let mut acc = this_set(receiver)?.borrow().clone();
    for other in &args.positional {
        acc = op(&acc, &as_set(other)?);
    }
    Ok(Value::set(acc))
}

fn set_union(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    set_algebra("union", receiver, &args, SetValue::union)
}

fn set_intersection(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    set_algebra("intersection", receiver, &args, SetValue::intersection)
}

fn set_difference(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    set_algebra("difference", receiver, &args, SetValue::difference)
}

fn set_symmetric_difference(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("symmetric_difference", 1)?;
    let this = this_set(receiver)?.borrow().clone();
    Ok(Value::set(this.symmetric_difference(&as_set(&args[0])?)))
}

fn set_issubset(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("issubset", 1)?;
    let other = as_set(&args[0])?;
    Ok(Value::Bool(this_set(receiver)?.borrow().is_subset(&other)))
}

fn set_issuperset(_: &mut Interpreter, receiver: &Value, args: Args) -> EvalResult {
    let args = args.exact("issuperset", 1)?;
    let other = as_set(&args[0])?;
    Ok(Value::Bool(other.is_subset(&this_set(receiver)?.borrow())))
}
