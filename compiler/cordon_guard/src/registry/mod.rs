//! Allowlist registry.
//!
//! The forbidden set is a subtraction, not a hand-written blacklist: every
//! name the ambient builtin namespace exposes, minus [`ALLOWED_NAMES`].

use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use tracing::debug;

/// Builtins a vetted source may reference: exception classes, the literal
/// names, and pure helpers with no I/O or introspection.
///
/// Entries with no ambient counterpart (`complex`, `object`, `property`) have
/// no effect on the forbidden set.
pub const ALLOWED_NAMES: &[&str] = &[
    "ArithmeticError",
    "AttributeError",
    "BaseException",
    "Exception",
    "False",
    "FloatingPointError",
    "IndexError",
    "KeyError",
    "NameError",
    "None",
    "OverflowError",
    "RuntimeError",
    "StandardError",
    "StopIteration",
    "True",
    "TypeError",
    "ValueError",
    "ZeroDivisionError",
    "abs",
    "all",
    "any",
    "apply",
    "basestring",
    "bin",
    "bool",
    "bytes",
    "callable",
    "chr",
    "cmp",
    "complex",
    "dict",
    "divmod",
    "enumerate",
    "filter",
    "float",
    "format",
    "frozenset",
    "hash",
    "hex",
    "id",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "list",
    "long",
    "map",
    "max",
    "min",
    "next",
    "object",
    "oct",
    "ord",
    "pow",
    "print",
    "property",
    "range",
    "reduce",
    "repr",
    "reversed",
    "round",
    "set",
    "slice",
    "sorted",
    "str",
    "sum",
    "tuple",
    "unichr",
    "unicode",
    "xrange",
    "zip",
];

static GLOBAL: LazyLock<NameRegistry> = LazyLock::new(|| {
    let registry = NameRegistry::from_ambient(cordon_eval::builtins::ambient_names());
    debug!(forbidden = registry.len(), "name registry built");
    registry
});

/// Set of builtin names a vetted source may not mention.
///
/// Immutable once built; share it freely across threads.
#[derive(Clone, Debug)]
pub struct NameRegistry {
    forbidden: FxHashSet<Box<str>>,
}

impl NameRegistry {
    /// The registry for the interpreter's own ambient namespace, built on
    /// first use.
    pub fn global() -> &'static NameRegistry {
        &GLOBAL
    }

    /// Forbid every name in `ambient` that is not in [`ALLOWED_NAMES`].
    ///
    /// Crate-private: the only registry a caller can reach is [`Self::global`],
    /// which is built from the namespace the interpreter resolves against.
    pub(crate) fn from_ambient<I>(ambient: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let allowed: FxHashSet<&str> = ALLOWED_NAMES.iter().copied().collect();
        let forbidden = ambient
            .into_iter()
            .filter(|name| !allowed.contains(name.as_ref()))
            .map(|name| Box::from(name.as_ref()))
            .collect();
        NameRegistry { forbidden }
    }

    #[inline]
    pub fn is_forbidden(&self, name: &str) -> bool {
        self.forbidden.contains(name)
    }

    /// Forbidden names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.forbidden.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.forbidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty()
    }
}
