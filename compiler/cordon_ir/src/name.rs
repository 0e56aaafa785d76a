//! Per-tree interned strings.
//!
//! Every identifier and string literal in a [`SyntaxTree`](crate::SyntaxTree)
//! is stored once in its `NameTable` and referenced by a 32-bit [`Name`].
//! Tables are owned by a single tree, so no locking is needed.

use rustc_hash::FxHashMap;
use std::fmt;

/// Index into a [`NameTable`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string; doubles as "absent" for optional names.
    pub const EMPTY: Name = Name(0);

    /// Get the index into the table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check whether this is the empty name.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// String storage for one syntax tree.
#[derive(Clone, Debug)]
pub struct NameTable {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Name>,
}

impl NameTable {
    /// Create a table containing only the empty string.
    pub fn new() -> Self {
        let mut lookup = FxHashMap::default();
        lookup.insert(Box::from(""), Name::EMPTY);
        NameTable {
            strings: vec![Box::from("")],
            lookup,
        }
    }

    /// Intern `text`, returning the existing name if it was seen before.
    pub fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.lookup.get(text) {
            return name;
        }
        let index = u32::try_from(self.strings.len()).unwrap_or(u32::MAX);
        let name = Name(index);
        self.strings.push(Box::from(text));
        self.lookup.insert(Box::from(text), name);
        name
    }

    /// Resolve a name back to its text.
    ///
    /// Names from another table resolve to the empty string rather than
    /// panicking.
    pub fn resolve(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| s)
    }

    /// Number of distinct strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// The table always holds the empty string.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}
