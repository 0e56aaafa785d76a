//! The `eval` command: vet a source, then run it.

use std::process::ExitCode;

use cordon_eval::{prelude::math_bindings, Environment, Value};
use cordon_ir::Mode;

use super::CommandOptions;
use crate::diagnostic::{render_compile_error, render_eval_error, ColorMode};
use crate::{CompileOptions, Compiler, ExpressionSource};

/// A `-D name=value` binding. The value is itself an expression, vetted like
/// any other untrusted text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Definition {
    pub name: String,
    pub value: String,
}

/// Parse `name=value`.
pub fn parse_definition(arg: &str) -> Result<Definition, String> {
    let Some((name, value)) = arg.split_once('=') else {
        return Err(format!("invalid definition '{arg}': expected name=value"));
    };
    let name = name.trim();
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !valid {
        return Err(format!("invalid definition '{arg}': '{name}' is not an identifier"));
    }
    Ok(Definition {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

/// Evaluate one definition in an empty environment.
fn define(compiler: &Compiler, definition: &Definition) -> Result<Value, String> {
    let source = ExpressionSource::expression(definition.value.as_str())
        .with_filename(format!("-D {}", definition.name));
    let compiled = compiler
        .compile(&source)
        .map_err(|err| render_compile_error(&err, &source, ColorMode::detect()))?;
    compiled
        .eval(&Environment::new())
        .map_err(|err| render_eval_error(&err, &source, ColorMode::detect()))
}

/// Compile and run `text`, printing an expression's value.
pub fn eval_source(
    text: &str,
    filename: &str,
    options: CommandOptions,
    definitions: &[Definition],
) -> ExitCode {
    let compile_options = CompileOptions {
        skip_security_check: options.trusted,
        ..CompileOptions::default()
    };
    let compiler = Compiler::new(compile_options);

    let env: Environment = math_bindings().into_iter().collect();
    for definition in definitions {
        match define(&compiler, definition) {
            Ok(value) => env.set(&definition.name, value),
            Err(report) => {
                eprint!("{report}");
                return ExitCode::FAILURE;
            }
        }
    }

    let source = ExpressionSource::new(text, options.mode).with_filename(filename);
    let compiled = match compiler.compile(&source) {
        Ok(compiled) => compiled,
        Err(err) => {
            eprint!("{}", render_compile_error(&err, &source, ColorMode::detect()));
            return ExitCode::FAILURE;
        }
    };
    match compiled.eval(&env) {
        Ok(value) => {
            if options.mode == Mode::Expression {
                println!("{}", value.repr());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render_eval_error(&err, &source, ColorMode::detect()));
            ExitCode::FAILURE
        }
    }
}
