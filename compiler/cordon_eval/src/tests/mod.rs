//! End-to-end evaluation tests: parse a source, run it, inspect the result.
//!
//! - `expression_tests`: operators, displays, comprehensions, calls
//! - `statement_tests`: control flow, functions, scoping
//! - `exception_tests`: raise, try/except/finally, uncaught errors

mod expression_tests;
mod statement_tests;

use std::sync::Arc;

use cordon_ir::Mode;

use crate::{Environment, EvalResult, Interpreter, Value};

fn eval_in(source: &str, env: &Environment) -> EvalResult {
    let tree = Arc::new(cordon_parse::parse(source, Mode::Expression).unwrap());
    Interpreter::default().run(&tree, env)
}

fn eval(source: &str) -> EvalResult {
    eval_in(source, &Environment::new())
}

/// `repr()` of an expression's value.
fn eval_repr(source: &str) -> String {
    eval(source).unwrap().repr()
}

fn exec(source: &str) -> Result<Environment, crate::EvalError> {
    let env = Environment::new();
    let tree = Arc::new(cordon_parse::parse(source, Mode::Statements).unwrap());
    Interpreter::default().run(&tree, &env)?;
    Ok(env)
}

/// Run statements and read back one binding.
fn exec_get(source: &str, name: &str) -> Value {
    let env = exec(source).unwrap();
    env.get(name).unwrap_or_else(|| panic!("{name} is not bound"))
}
