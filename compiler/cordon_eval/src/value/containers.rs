//! Dict and set storage.
//!
//! Both keep insertion order (`indexmap`) and store the original key value
//! next to its [`HashKey`], so `{1: 'a'}` and `{True: 'a'}` collide but
//! iteration yields the key that was inserted first.

use std::rc::Rc;

use indexmap::IndexMap;

use super::{TypeKind, Value};
use crate::errors::{type_error, EvalError};
use crate::exceptions::ExceptionKind;

/// Hashable projection of a value.
///
/// Numbers that compare equal hash equal: `1`, `1.0` and `True` share
/// `HashKey::Int(1)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashKey {
    None,
    Int(i64),
    Float(u64),
    Str(Rc<str>),
    Tuple(Rc<[HashKey]>),
    Type(TypeKind),
    ExceptionType(ExceptionKind),
    Identity(usize),
}

impl HashKey {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "integral floats inside i64 range hash as ints"
    )]
    pub fn of(value: &Value) -> Result<HashKey, EvalError> {
        Ok(match value {
            Value::None => HashKey::None,
            Value::Bool(b) => HashKey::Int(i64::from(*b)),
            Value::Int(n) => HashKey::Int(*n),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 9.0e18 {
                    HashKey::Int(*f as i64)
                } else {
                    HashKey::Float(f.to_bits())
                }
            }
            Value::Str(s) => HashKey::Str(Rc::clone(s)),
            Value::Tuple(items) => {
                let keys = items
                    .iter()
                    .map(HashKey::of)
                    .collect::<Result<Vec<_>, _>>()?;
                HashKey::Tuple(Rc::from(keys))
            }
            Value::Range(r) => HashKey::Tuple(Rc::from(vec![
                HashKey::Int(r.start),
                HashKey::Int(r.stop),
                HashKey::Int(r.step),
            ])),
            Value::Type(kind) => HashKey::Type(*kind),
            Value::ExceptionType(kind) => HashKey::ExceptionType(*kind),
            Value::List(_) | Value::Dict(_) | Value::Set(_) | Value::Slice(_) => {
                return Err(type_error(format!(
                    "unhashable type: '{}'",
                    value.type_name()
                )))
            }
            other => HashKey::Identity(other.identity().unwrap_or(0)),
        })
    }
}

/// Insertion-ordered mapping.
#[derive(Clone, Debug, Default)]
pub struct DictValue {
    entries: IndexMap<HashKey, (Value, Value)>,
}

impl DictValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Result<Option<Value>, EvalError> {
        let hash = HashKey::of(key)?;
        Ok(self.entries.get(&hash).map(|(_, v)| v.clone()))
    }

    pub fn contains(&self, key: &Value) -> Result<bool, EvalError> {
        Ok(self.entries.contains_key(&HashKey::of(key)?))
    }

    /// Insert or overwrite; an existing entry keeps its original key.
    pub fn insert(&mut self, key: Value, value: Value) -> Result<(), EvalError> {
        let hash = HashKey::of(&key)?;
        match self.entries.get_mut(&hash) {
            Some(slot) => slot.1 = value,
            None => {
                self.entries.insert(hash, (key, value));
            }
        }
        Ok(())
    }

    /// Remove preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Value) -> Result<Option<Value>, EvalError> {
        let hash = HashKey::of(key)?;
        Ok(self.entries.shift_remove(&hash).map(|(_, v)| v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.values().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.values().map(|(_, v)| v.clone()).collect()
    }

    pub fn items(&self) -> Vec<(Value, Value)> {
        self.entries.values().cloned().collect()
    }

    /// Remove and return the most recently inserted entry.
    pub fn pop_last(&mut self) -> Option<(Value, Value)> {
        self.entries.pop().map(|(_, entry)| entry)
    }
}

/// Insertion-ordered set.
#[derive(Clone, Debug, Default)]
pub struct SetValue {
    items: IndexMap<HashKey, Value>,
}

impl SetValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Result<Self, EvalError> {
        let mut set = SetValue::new();
        for value in values {
            set.insert(value)?;
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> Result<bool, EvalError> {
        Ok(self.items.contains_key(&HashKey::of(value)?))
    }

    /// Add `value`; returns whether it was new.
    pub fn insert(&mut self, value: Value) -> Result<bool, EvalError> {
        let hash = HashKey::of(&value)?;
        if self.items.contains_key(&hash) {
            return Ok(false);
        }
        self.items.insert(hash, value);
        Ok(true)
    }

    pub fn remove(&mut self, value: &Value) -> Result<bool, EvalError> {
        Ok(self.items.shift_remove(&HashKey::of(value)?).is_some())
    }

    pub fn values(&self) -> Vec<Value> {
        self.items.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Remove and return the oldest element.
    pub fn pop_first(&mut self) -> Option<Value> {
        self.items.shift_remove_index(0).map(|(_, v)| v)
    }

    pub fn is_subset(&self, other: &SetValue) -> bool {
        self.items.keys().all(|k| other.items.contains_key(k))
    }

    pub fn union(&self, other: &SetValue) -> SetValue {
        let mut items = self.items.clone();
        for (k, v) in &other.items {
            items.entry(k.clone()).or_insert_with(|| v.clone());
        }
        SetValue { items }
    }

    pub fn intersection(&self, other: &SetValue) -> SetValue {
        let items = self
            .items
            .iter()
            .filter(|(k, _)| other.items.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        SetValue { items }
    }

    pub fn difference(&self, other: &SetValue) -> SetValue {
        let items = self
            .items
            .iter()
            .filter(|(k, _)| !other.items.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        SetValue { items }
    }

    pub fn symmetric_difference(&self, other: &SetValue) -> SetValue {
        let mut out = self.difference(other);
        for (k, v) in &other.items {
            if !self.items.contains_key(k) {
                out.items.insert(k.clone(), v.clone());
            }
        }
        out
    }
}
