//! Shared helpers for phase tests.

use cordonc::{compile, CompileError, CompiledExpression, Mode};
use cordon_eval::{Environment, Value};

pub const FILENAME: &str = "<test>";

/// Compile a single expression through the guard.
pub fn vet(text: &str) -> Result<CompiledExpression, CompileError> {
    compile(text, Mode::Expression, FILENAME, false)
}

/// Compile a statement sequence through the guard.
pub fn vet_statements(text: &str) -> Result<CompiledExpression, CompileError> {
    compile(text, Mode::Statements, FILENAME, false)
}

/// Compile without the guard.
pub fn trust(text: &str, mode: Mode) -> Result<CompiledExpression, CompileError> {
    compile(text, mode, FILENAME, true)
}

/// The guard's message for a rejected expression.
pub fn rejection(text: &str, mode: Mode) -> String {
    let err = compile(text, mode, FILENAME, false).unwrap_err();
    assert!(err.is_safety(), "expected a safety violation, got {err:?}");
    err.to_string()
}

pub fn env(bindings: &[(&str, Value)]) -> Environment {
    bindings.iter().cloned().collect()
}
