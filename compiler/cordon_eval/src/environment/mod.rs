//! Variable scopes and caller-supplied bindings.
//!
//! A [`Scope`] maps names to values and links to the scope it was created
//! in. Function calls, lambdas and comprehensions push a child scope onto
//! their closure's scope; the root of every chain is the global scope,
//! which is what an [`Environment`] hands to the interpreter.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::value::Value;

/// Shared, mutable handle to a scope.
pub type ScopeRef = Rc<RefCell<Scope>>;

/// A single scope containing variable bindings.
#[derive(Default)]
pub struct Scope {
    vars: FxHashMap<Rc<str>, Value>,
    parent: Option<ScopeRef>,
    /// Names declared `global` in this scope.
    globals: FxHashSet<Rc<str>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    pub fn new_ref(self) -> ScopeRef {
        Rc::new(RefCell::new(self))
    }

    /// Look up a name here, then in enclosing scopes.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Bind in this scope only.
    pub fn define(&mut self, name: Rc<str>, value: Value) {
        self.vars.insert(name, value);
    }

    /// Look up in this scope only.
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    /// Unbind from this scope only.
    pub fn remove_local(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn declare_global(&mut self, name: Rc<str>) {
        self.globals.insert(name);
    }

    pub fn is_declared_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn parent(&self) -> Option<ScopeRef> {
        self.parent.clone()
    }

    /// Local bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(Rc<str>, Value)> {
        let mut out: Vec<_> = self
            .vars
            .iter()
            .map(|(k, v)| (Rc::clone(k), v.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Walk to the outermost scope of a chain.
pub fn root_of(scope: &ScopeRef) -> ScopeRef {
    let mut current = Rc::clone(scope);
    loop {
        let parent = current.borrow().parent();
        match parent {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

/// Variable bindings supplied by the caller.
///
/// Cloning an `Environment` shares the same bindings. Statement sources
/// write their assignments and definitions back into it, so a host can
/// run a setup script and then evaluate expressions against the result.
#[derive(Clone, Default)]
pub struct Environment {
    scope: ScopeRef,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.scope.borrow_mut().define(Rc::from(name), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.scope.borrow().get_local(name)
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.scope.borrow_mut().remove_local(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scope.borrow().get_local(name).is_some()
    }

    /// Every binding, sorted by name.
    pub fn bindings(&self) -> Vec<(Rc<str>, Value)> {
        self.scope.borrow().bindings()
    }

    pub fn len(&self) -> usize {
        self.scope.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scope.borrow().is_empty()
    }

    /// The global scope scripts run in.
    pub(crate) fn scope(&self) -> &ScopeRef {
        &self.scope
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl<K: AsRef<str>> Extend<(K, Value)> for Environment {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name.as_ref(), value);
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<Rc<str>> = self.bindings().into_iter().map(|(k, _)| k).collect();
        f.debug_struct("Environment").field("names", &names).finish()
    }
}
