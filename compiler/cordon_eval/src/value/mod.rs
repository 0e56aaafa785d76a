//! Runtime values.
//!
//! Scalars are stored inline; containers are reference counted with
//! interior mutability where the language allows mutation (lists, dicts,
//! sets). Values are single-threaded: evaluation never crosses threads.

mod compare;
mod containers;
mod iter;
mod repr;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use cordon_ir::{ExprId, StmtRange, SyntaxTree};

use crate::environment::ScopeRef;
use crate::errors::{type_error, EvalError, EvalResult};
use crate::exceptions::{Exception, ExceptionKind};
use crate::interpreter::{Args, Interpreter};

pub use containers::{DictValue, HashKey, SetValue};
pub use iter::ValueIter;

/// Built-in function signature.
pub type BuiltinFn = fn(&mut Interpreter, Args) -> EvalResult;

/// Built-in method signature; the receiver is passed separately.
pub type MethodFn = fn(&mut Interpreter, &Value, Args) -> EvalResult;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    /// 64-bit signed integer; arithmetic is checked.
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Tuple(Rc<[Value]>),
    Dict(Rc<RefCell<DictValue>>),
    Set(Rc<RefCell<SetValue>>),
    Range(RangeValue),
    Slice(Rc<SliceValue>),
    /// Stateful iterator shared between aliases (`iter()`, `enumerate()`).
    Iterator(Rc<RefCell<ValueIter>>),
    Function(Rc<FunctionValue>),
    Builtin(Builtin),
    BoundMethod(Rc<BoundMethod>),
    /// A built-in type used as constructor and `isinstance` target.
    Type(TypeKind),
    ExceptionType(ExceptionKind),
    Exception(Rc<Exception>),
    File(Rc<FileValue>),
}

/// Built-in types that can be named from scripts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Dict,
    Set,
    Range,
    Slice,
}

impl TypeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Dict => "dict",
            Self::Set => "set",
            Self::Range => "range",
            Self::Slice => "slice",
        }
    }
}

/// `range(start, stop, step)`; `step` is never zero.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeValue {
    pub fn len(&self) -> usize {
        let (lo, hi, step) = if self.step > 0 {
            (self.start, self.stop, self.step)
        } else {
            (self.stop, self.start, -self.step)
        };
        if hi <= lo {
            return 0;
        }
        let span = (i128::from(hi) - i128::from(lo) - 1) / i128::from(step) + 1;
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` (already bounds-checked by the caller).
    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.len() {
            return None;
        }
        let offset = i64::try_from(index).ok()?.checked_mul(self.step)?;
        self.start.checked_add(offset)
    }

    pub fn contains(&self, value: i64) -> bool {
        let in_bounds = if self.step > 0 {
            self.start <= value && value < self.stop
        } else {
            self.stop < value && value <= self.start
        };
        in_bounds && (i128::from(value) - i128::from(self.start)) % i128::from(self.step) == 0
    }
}

/// `slice(start, stop, step)`; absent parts are `None`.
#[derive(Clone, Debug)]
pub struct SliceValue {
    pub start: Value,
    pub stop: Value,
    pub step: Value,
}

impl SliceValue {
    /// Resolve against a sequence length, Python style.
    ///
    /// Returns `(start, stop, step)` with negative indices normalised.
    pub fn indices(&self, len: usize) -> Result<(i64, i64, i64), EvalError> {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let step = match &self.step {
            Value::None => 1,
            v => v.as_index("slice indices")?,
        };
        if step == 0 {
            return Err(crate::errors::value_error("slice step cannot be zero"));
        }
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |v: &Value, default: i64| -> Result<i64, EvalError> {
            match v {
                Value::None => Ok(default),
                v => {
                    let mut i = v.as_index("slice indices")?;
                    if i < 0 {
                        i = i.saturating_add(len);
                        Ok(i.max(lower))
                    } else {
                        Ok(i.min(upper))
                    }
                }
            }
        };
        let start = clamp(&self.start, if step > 0 { lower } else { upper })?;
        let stop = clamp(&self.stop, if step > 0 { upper } else { lower })?;
        Ok((start, stop, step))
    }

    /// Positions selected by this slice in a sequence of `len` items.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>, EvalError> {
        let (start, stop, step) = self.indices(len)?;
        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            if let Ok(index) = usize::try_from(i) {
                out.push(index);
            }
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(out)
    }
}

/// Body of a user-defined function.
#[derive(Copy, Clone, Debug)]
pub enum FunctionBody {
    /// `lambda`: a single expression.
    Expr(ExprId),
    /// `def`: a statement block.
    Block(StmtRange),
}

/// A parameter with its evaluated default.
#[derive(Clone)]
pub struct ParamValue {
    pub name: Rc<str>,
    pub default: Option<Value>,
}

/// A `def` or `lambda` closure.
pub struct FunctionValue {
    pub name: Rc<str>,
    pub params: Vec<ParamValue>,
    pub body: FunctionBody,
    /// Tree the body indexes into.
    pub tree: Arc<SyntaxTree>,
    /// Scope the function was defined in.
    pub closure: ScopeRef,
}

/// A native function.
#[derive(Copy, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// A native method bound to its receiver: `"abc".upper`.
pub struct BoundMethod {
    pub receiver: Value,
    pub name: &'static str,
    pub func: MethodFn,
}

/// A read-only file opened with `open()`.
///
/// The whole file is read when opened; `contents` becomes `None` on close.
#[derive(Debug)]
pub struct FileValue {
    pub path: String,
    pub contents: RefCell<Option<String>>,
}

impl FileValue {
    pub fn new(path: impl Into<String>, contents: String) -> Self {
        FileValue {
            path: path.into(),
            contents: RefCell::new(Some(contents)),
        }
    }

    /// Full contents, or `ValueError` once closed.
    pub fn read(&self) -> Result<String, EvalError> {
        self.contents
            .borrow()
            .clone()
            .ok_or_else(|| crate::errors::value_error("I/O operation on closed file"))
    }

    pub fn close(&self) {
        self.contents.borrow_mut().take();
    }

    pub fn is_closed(&self) -> bool {
        self.contents.borrow().is_none()
    }
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Rc::from(items))
    }

    pub fn dict(dict: DictValue) -> Self {
        Value::Dict(Rc::new(RefCell::new(dict)))
    }

    pub fn set(set: SetValue) -> Self {
        Value::Set(Rc::new(RefCell::new(set)))
    }

    pub fn iterator(iter: ValueIter) -> Self {
        Value::Iterator(Rc::new(RefCell::new(iter)))
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Self {
        Value::Builtin(Builtin { name, func })
    }

    pub fn exception(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Value::Exception(Rc::new(Exception::new(kind, message)))
    }
}

// Inspection

impl Value {
    /// Script-visible type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Range(_) => "range",
            Value::Slice(_) => "slice",
            Value::Iterator(_) => "iterator",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin_function_or_method",
            Value::BoundMethod(_) => "method",
            Value::Type(_) | Value::ExceptionType(_) => "type",
            Value::Exception(e) => e.kind.name(),
            Value::File(_) => "file",
        }
    }

    /// Python truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Dict(d) => !d.borrow().is_empty(),
            Value::Set(s) => !s.borrow().is_empty(),
            Value::Range(r) => !r.is_empty(),
            _ => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_)
                | Value::Builtin(_)
                | Value::BoundMethod(_)
                | Value::Type(_)
                | Value::ExceptionType(_)
        )
    }

    /// Integer value of an int or bool.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Numeric value of an int, bool or float.
    #[allow(clippy::cast_precision_loss, reason = "int to float follows Python semantics")]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            other => other.as_int().map(|n| n as f64),
        }
    }

    /// Integer usable as an index, or a `TypeError` naming `what`.
    pub fn as_index(&self, what: &str) -> Result<i64, EvalError> {
        self.as_int().ok_or_else(|| {
            type_error(format!(
                "{what} must be integers, not {}",
                self.type_name()
            ))
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Pointer identity for reference types, `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(Rc::as_ptr(s).cast::<u8>() as usize),
            Value::List(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Tuple(rc) => Some(Rc::as_ptr(rc).cast::<u8>() as usize),
            Value::Dict(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Set(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Slice(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Iterator(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Function(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::BoundMethod(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Exception(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::File(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Builtin(b) => Some(b.func as usize),
            _ => None,
        }
    }

    /// `is` comparison.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => match (self, other) {
                (Value::None, Value::None) => true,
                (Value::Bool(a), Value::Bool(b)) => a == b,
                (Value::Int(a), Value::Int(b)) => a == b,
                (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
                (Value::Range(a), Value::Range(b)) => a == b,
                (Value::Type(a), Value::Type(b)) => a == b,
                (Value::ExceptionType(a), Value::ExceptionType(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }

    /// Whether `self` is an instance of the type or exception class `class`.
    pub fn is_instance(&self, class: &Value) -> Result<bool, EvalError> {
        match class {
            Value::Type(kind) => Ok(match (kind, self) {
                (TypeKind::Int, Value::Int(_) | Value::Bool(_)) => true,
                (kind, value) => value.type_kind() == Some(*kind),
            }),
            Value::ExceptionType(kind) => Ok(match self {
                Value::Exception(e) => e.kind.is_subclass_of(*kind),
                _ => false,
            }),
            Value::Tuple(classes) => {
                for class in classes.iter() {
                    if self.is_instance(class)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            other => Err(type_error(format!(
                "isinstance() arg 2 must be a type or tuple of types, not {}",
                other.type_name()
            ))),
        }
    }

    /// The built-in type of this value, if it has a nameable one.
    pub fn type_kind(&self) -> Option<TypeKind> {
        Some(match self {
            Value::Bool(_) => TypeKind::Bool,
            Value::Int(_) => TypeKind::Int,
            Value::Float(_) => TypeKind::Float,
            Value::Str(_) => TypeKind::Str,
            Value::List(_) => TypeKind::List,
            Value::Tuple(_) => TypeKind::Tuple,
            Value::Dict(_) => TypeKind::Dict,
            Value::Set(_) => TypeKind::Set,
            Value::Range(_) => TypeKind::Range,
            Value::Slice(_) => TypeKind::Slice,
            _ => return None,
        })
    }

    /// Key used for dict and set membership.
    pub fn hash_key(&self) -> Result<HashKey, EvalError> {
        HashKey::of(self)
    }

    /// Number of items in a sized value.
    pub fn len(&self) -> Result<usize, EvalError> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(items) => Ok(items.borrow().len()),
            Value::Tuple(items) => Ok(items.len()),
            Value::Dict(d) => Ok(d.borrow().len()),
            Value::Set(s) => Ok(s.borrow().len()),
            Value::Range(r) => Ok(r.len()),
            other => Err(type_error(format!(
                "object of type '{}' has no len()",
                other.type_name()
            ))),
        }
    }

    /// Start iterating this value.
    pub fn iter(&self) -> Result<ValueIter, EvalError> {
        ValueIter::of(self)
    }

    /// Collect every item of an iterable.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        Ok(self.iter()?.collect())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare::values_equal(self, other)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<built-in function {}>", self.name)
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<built-in method {} of {} object>",
            self.name,
            self.receiver.type_name()
        )
    }
}

pub use compare::{compare_values, values_equal};
pub(crate) use repr::format_float;
