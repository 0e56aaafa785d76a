//! Call arguments.

use std::rc::Rc;

use crate::errors::{arity_error, type_error, EvalError};
use crate::value::Value;

/// Evaluated arguments of one call.
#[derive(Clone, Debug, Default)]
pub struct Args {
    pub positional: Vec<Value>,
    /// In call order; names are unique (the parser rejects repeats).
    pub keywords: Vec<(Rc<str>, Value)>,
}

impl Args {
    pub fn new(positional: Vec<Value>) -> Self {
        Args {
            positional,
            keywords: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keyword(mut self, name: &str, value: Value) -> Self {
        self.keywords.push((Rc::from(name), value));
        self
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Remove and return a keyword argument.
    pub fn take_keyword(&mut self, name: &str) -> Option<Value> {
        let index = self.keywords.iter().position(|(k, _)| &**k == name)?;
        Some(self.keywords.remove(index).1)
    }

    pub fn no_keywords(&self, func: &str) -> Result<(), EvalError> {
        match self.keywords.first() {
            None => Ok(()),
            Some((name, _)) => Err(type_error(format!(
                "{func}() got an unexpected keyword argument '{name}'"
            ))),
        }
    }

    /// Exactly `n` positional arguments and no keywords.
    pub fn exact(&self, func: &str, n: usize) -> Result<&[Value], EvalError> {
        self.no_keywords(func)?;
        if self.positional.len() != n {
            let expected = if n == 0 {
                "no".to_owned()
            } else {
                format!("exactly {n}")
            };
            return Err(arity_error(func, &expected, self.positional.len()));
        }
        Ok(&self.positional)
    }

    /// Between `min` and `max` positional arguments and no keywords.
    pub fn between(&self, func: &str, min: usize, max: usize) -> Result<&[Value], EvalError> {
        self.no_keywords(func)?;
        self.count_between(func, min, max)?;
        Ok(&self.positional)
    }

    /// Positional count check that leaves keywords to the caller.
    pub fn count_between(&self, func: &str, min: usize, max: usize) -> Result<(), EvalError> {
        let got = self.positional.len();
        if got < min {
            return Err(arity_error(func, &format!("at least {min}"), got));
        }
        if got > max {
            return Err(arity_error(func, &format!("at most {max}"), got));
        }
        Ok(())
    }
}

impl From<Vec<Value>> for Args {
    fn from(positional: Vec<Value>) -> Self {
        Args::new(positional)
    }
}
