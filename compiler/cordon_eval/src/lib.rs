//! Cordon Eval - interpreter and builtin namespace for Cordon sources.
//!
//! This crate runs parsed syntax trees. It does not decide whether a tree
//! is safe to run; that is `cordon_guard`'s job, and `cordonc` ties the two
//! together. What lives here:
//!
//! - `Value`: runtime values (numbers, strings, containers, callables)
//! - `Environment`: caller-owned bindings a run reads and writes
//! - `Interpreter`: the tree walker, with `EvalOptions` for limits and output
//! - `builtins`: the ambient namespace every source can name
//! - `prelude`: optional math bindings for hosts
//!
//! Runtime values use `Rc`, so a single evaluation stays on one thread.
//! Trees are `Arc`-shared and may be evaluated from many threads at once.

pub mod builtins;
mod environment;
pub mod errors;
mod exceptions;
pub mod format;
mod interpreter;
mod methods;
pub mod operators;
pub mod prelude;
mod print_handler;
mod value;

pub use environment::Environment;
pub use errors::{EvalError, EvalResult};
pub use exceptions::{Exception, ExceptionKind};
pub use interpreter::{Args, EvalOptions, Interpreter, DEFAULT_MAX_CALL_DEPTH};
pub use methods::{attribute_names, get_attribute};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{
    compare_values, values_equal, BoundMethod, Builtin, BuiltinFn, DictValue, FileValue,
    FunctionValue, HashKey, MethodFn, RangeValue, SetValue, SliceValue, TypeKind, Value,
    ValueIter,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
