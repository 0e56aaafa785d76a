//! Cordonc - the vetting compiler for untrusted expressions.
//!
//! The single entry point hosts use before running text they did not write:
//!
//! ```text
//! text + mode -> parse -> guard (unless trusted) -> CompiledExpression
//! ```
//!
//! A [`CompileError`] is either a parse failure or a safety violation, never
//! a mix. The resulting [`CompiledExpression`] is evaluated later, any number
//! of times, against bindings the caller supplies.
//!
//! ```ignore
//! let compiled = cordonc::compile("x + y * 2", Mode::Expression, "<cell>", false)?;
//! let env: Environment = [("x", Value::Int(3)), ("y", Value::Int(4))].into_iter().collect();
//! assert_eq!(compiled.eval(&env)?, Value::Int(11));
//! ```

pub mod commands;
mod compiled;
mod compiler;
pub mod diagnostic;
mod error;
mod source;

pub use compiled::CompiledExpression;
pub use compiler::{compile, CompileOptions, Compiler};
pub use error::CompileError;
pub use source::{ExpressionSource, DEFAULT_FILENAME};

pub use cordon_guard::{NameRegistry, SafetyViolation};
pub use cordon_ir::Mode;
