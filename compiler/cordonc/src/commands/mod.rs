//! CLI commands.
//!
//! Each command prints its own output and diagnostics and returns the
//! process exit code; `main` only parses arguments.

mod check;
mod eval;
mod names;

pub use check::check_source;
pub use eval::{eval_source, parse_definition, Definition};
pub use names::list_names;

use std::io::Read;

use cordon_ir::Mode;

/// Flags shared by `check` and `eval`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CommandOptions {
    pub mode: Mode,
    /// Skip the guard (`--trusted`).
    pub trusted: bool,
}

/// Read a file, or stdin for `-`.
pub fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("error reading stdin: {e}"))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| format!("error reading '{path}': {e}"))
}

/// Name shown in diagnostics for an input path.
pub fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}
