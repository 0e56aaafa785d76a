//! Evaluation errors.
//!
//! A runtime failure is an uncaught [`Exception`] plus the span of the
//! expression or statement that raised it. Factory functions build the
//! common cases with the messages scripts see in `str(e)`.

use cordon_ir::Span;
use thiserror::Error;

use crate::exceptions::{Exception, ExceptionKind};
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// An exception that escaped evaluation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{exception}")]
pub struct EvalError {
    pub exception: Exception,
    /// `Span::DUMMY` until the interpreter attaches the raising node.
    pub span: Span,
}

impl EvalError {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        EvalError {
            exception: Exception::new(kind, message),
            span: Span::DUMMY,
        }
    }

    pub fn from_exception(exception: Exception) -> Self {
        EvalError {
            exception,
            span: Span::DUMMY,
        }
    }

    #[inline]
    pub fn kind(&self) -> ExceptionKind {
        self.exception.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.exception.message
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span == Span::DUMMY {
            self.span = span;
        }
        self
    }
}

// Factory functions

#[cold]
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::TypeError, message)
}

#[cold]
pub fn value_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::ValueError, message)
}

#[cold]
pub fn name_error(name: &str) -> EvalError {
    EvalError::new(ExceptionKind::NameError, format!("name '{name}' is not defined"))
}

#[cold]
pub fn attribute_error(type_name: &str, attr: &str) -> EvalError {
    EvalError::new(
        ExceptionKind::AttributeError,
        format!("'{type_name}' object has no attribute '{attr}'"),
    )
}

#[cold]
pub fn index_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::IndexError, message)
}

#[cold]
pub fn key_error(key: &Value) -> EvalError {
    EvalError::new(ExceptionKind::KeyError, key.repr())
}

#[cold]
pub fn zero_division(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::ZeroDivisionError, message)
}

#[cold]
pub fn overflow_error() -> EvalError {
    EvalError::new(ExceptionKind::OverflowError, "integer overflow")
}

#[cold]
pub fn recursion_error() -> EvalError {
    EvalError::new(
        ExceptionKind::RecursionError,
        "maximum recursion depth exceeded",
    )
}

#[cold]
pub fn stop_iteration() -> EvalError {
    EvalError::new(ExceptionKind::StopIteration, "")
}

#[cold]
pub fn runtime_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::RuntimeError, message)
}

#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::SyntaxError, message)
}

#[cold]
pub fn import_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ExceptionKind::ImportError, message)
}

/// Wrong number of arguments to a builtin or function.
#[cold]
pub fn arity_error(name: &str, expected: &str, got: usize) -> EvalError {
    let word = if expected == "1" || expected.ends_with(" 1") {
        "argument"
    } else {
        "arguments"
    };
    type_error(format!("{name}() takes {expected} {word} ({got} given)"))
}

/// Operand types an operator does not support.
#[cold]
pub fn unsupported_operands(op: &str, left: &Value, right: &Value) -> EvalError {
    type_error(format!(
        "unsupported operand type(s) for {op}: '{}' and '{}'",
        left.type_name(),
        right.type_name()
    ))
}
