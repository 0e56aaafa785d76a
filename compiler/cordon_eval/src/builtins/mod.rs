//! The ambient builtin namespace.
//!
//! Every name a script can use without binding it first resolves here:
//! constants, type constructors, exception classes, pure helpers (`safe`)
//! and functions that reach outside the evaluation (`capabilities`). The
//! interpreter itself never filters this namespace; vetting which names a
//! source may mention is the guard's job.
//!
//! The table is built once and shared across threads. Runtime values are
//! not `Sync`, so entries are plain descriptions that [`lookup`] turns into
//! a fresh [`Value`].

mod capabilities;
mod constructors;
mod safe;

pub(crate) use constructors::construct;

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::exceptions::ExceptionKind;
use crate::value::{Builtin, BuiltinFn, TypeKind, Value};

/// What an ambient name stands for.
#[derive(Copy, Clone)]
enum Entry {
    None,
    Bool(bool),
    Type(TypeKind),
    Exception(ExceptionKind),
    Function(BuiltinFn),
}

impl Entry {
    fn materialize(self, name: &'static str) -> Value {
        match self {
            Entry::None => Value::None,
            Entry::Bool(b) => Value::Bool(b),
            Entry::Type(kind) => Value::Type(kind),
            Entry::Exception(kind) => Value::ExceptionType(kind),
            Entry::Function(func) => Value::Builtin(Builtin { name, func }),
        }
    }
}

/// Constants and type names. Several names alias one runtime type.
const SCALARS: &[(&str, Entry)] = &[
    ("None", Entry::None),
    ("True", Entry::Bool(true)),
    ("False", Entry::Bool(false)),
    ("bool", Entry::Type(TypeKind::Bool)),
    ("int", Entry::Type(TypeKind::Int)),
    ("long", Entry::Type(TypeKind::Int)),
    ("float", Entry::Type(TypeKind::Float)),
    ("str", Entry::Type(TypeKind::Str)),
    ("basestring", Entry::Type(TypeKind::Str)),
    ("unicode", Entry::Type(TypeKind::Str)),
    ("bytes", Entry::Type(TypeKind::Str)),
    ("list", Entry::Type(TypeKind::List)),
    ("tuple", Entry::Type(TypeKind::Tuple)),
    ("dict", Entry::Type(TypeKind::Dict)),
    ("set", Entry::Type(TypeKind::Set)),
    ("frozenset", Entry::Type(TypeKind::Set)),
    ("range", Entry::Type(TypeKind::Range)),
    ("xrange", Entry::Type(TypeKind::Range)),
    ("slice", Entry::Type(TypeKind::Slice)),
];

static NAMESPACE: LazyLock<Vec<(&'static str, Entry)>> = LazyLock::new(|| {
    let mut entries: Vec<(&'static str, Entry)> = SCALARS.to_vec();
    entries.extend(
        ExceptionKind::ALL
            .iter()
            .map(|&kind| (kind.name(), Entry::Exception(kind))),
    );
    entries.extend(
        safe::FUNCTIONS
            .iter()
            .chain(capabilities::FUNCTIONS)
            .map(|&(name, func)| (name, Entry::Function(func))),
    );
    entries
});

static INDEX: LazyLock<FxHashMap<&'static str, Entry>> =
    LazyLock::new(|| NAMESPACE.iter().copied().collect());

/// Every name in the ambient namespace, in registration order.
pub fn ambient_names() -> impl Iterator<Item = &'static str> {
    NAMESPACE.iter().map(|&(name, _)| name)
}

/// Resolve an ambient name.
pub fn lookup(name: &str) -> Option<Value> {
    let (&name, &entry) = INDEX.get_key_value(name)?;
    Some(entry.materialize(name))
}

/// Whether `name` is defined by the ambient namespace.
pub fn is_ambient(name: &str) -> bool {
    INDEX.contains_key(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
