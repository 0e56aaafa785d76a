//! Evaluation modes.

use std::fmt;

/// How a source text is parsed and what evaluating it produces.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// A single expression; evaluating it yields its value.
    #[default]
    Expression,
    /// A sequence of statements; evaluating it yields `None` and leaves its
    /// bindings in the caller's environment.
    Statements,
}

impl Mode {
    /// Short name used by the CLI and in log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Expression => "eval",
            Mode::Statements => "exec",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
