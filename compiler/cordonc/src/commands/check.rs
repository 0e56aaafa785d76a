//! The `check` command: vet a source without running it.

use std::process::ExitCode;

use super::CommandOptions;
use crate::diagnostic::{render_compile_error, ColorMode};
use crate::{CompileOptions, Compiler, ExpressionSource};

/// Compile `text` and report the verdict. Exit code 1 on any rejection.
pub fn check_source(text: &str, filename: &str, options: CommandOptions) -> ExitCode {
    let source = ExpressionSource::new(text, options.mode).with_filename(filename);
    let compile_options = CompileOptions {
        skip_security_check: options.trusted,
        ..CompileOptions::default()
    };
    match Compiler::new(compile_options).compile(&source) {
        Ok(compiled) => {
            let verdict = if compiled.is_vetted() { "safe" } else { "parsed (unchecked)" };
            println!("OK: {filename} ({} mode, {verdict})", options.mode);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render_compile_error(&err, &source, ColorMode::detect()));
            ExitCode::FAILURE
        }
    }
}
