//! Parse, vet, and package a source.

use std::sync::Arc;

use cordon_guard::{Guard, NameRegistry};
use cordon_ir::Mode;
use tracing::debug;

use crate::compiled::CompiledExpression;
use crate::error::CompileError;
use crate::source::{ExpressionSource, DEFAULT_FILENAME};

/// How [`Compiler::compile_str`] treats text it is handed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompileOptions {
    pub mode: Mode,
    /// Display name used in parse errors.
    pub filename: String,
    /// Skip the guard. Only for text the host itself wrote; parse errors are
    /// still reported.
    pub skip_security_check: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            mode: Mode::Expression,
            filename: DEFAULT_FILENAME.to_owned(),
            skip_security_check: false,
        }
    }
}

impl CompileOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Trust the source and skip the guard.
    #[must_use]
    pub fn trusted(mut self) -> Self {
        self.skip_security_check = true;
        self
    }
}

/// Compiles sources against the process-wide name registry.
///
/// Holds no per-source state; reuse one compiler for any number of sources.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile `text` with the mode and filename from the options.
    pub fn compile_str(&self, text: &str) -> Result<CompiledExpression, CompileError> {
        let source = ExpressionSource::new(text, self.options.mode)
            .with_filename(self.options.filename.as_str());
        self.compile(&source)
    }

    /// Compile `source` under its own mode and filename. The options only
    /// decide whether the guard runs.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            filename = source.filename(),
            mode = %source.mode(),
            trusted = self.options.skip_security_check,
        )
    )]
    pub fn compile(&self, source: &ExpressionSource) -> Result<CompiledExpression, CompileError> {
        let tree = cordon_parse::parse(source.text(), source.mode()).map_err(|err| {
            debug!(error = %err, "parse failed");
            CompileError::parse(err, source.text(), source.filename())
        })?;

        if self.options.skip_security_check {
            debug!("guard skipped");
        } else {
            Guard::new(NameRegistry::global()).check(&tree)?;
        }

        Ok(CompiledExpression::new(
            source.clone(),
            Arc::new(tree),
            !self.options.skip_security_check,
        ))
    }
}

/// Compile `text` in one call.
///
/// `filename` only appears in parse errors. With `skip_security_check` the
/// guard is bypassed; use it only for text the host wrote itself.
pub fn compile(
    text: &str,
    mode: Mode,
    filename: &str,
    skip_security_check: bool,
) -> Result<CompiledExpression, CompileError> {
    let options = CompileOptions {
        mode,
        filename: filename.to_owned(),
        skip_security_check,
    };
    Compiler::new(options).compile_str(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use cordon_eval::builtins::ambient_names;
    use cordon_guard::ALLOWED_NAMES;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_builders() {
        let options = CompileOptions::default()
            .with_mode(Mode::Statements)
            .with_filename("doc.vsz")
            .trusted();
        assert_eq!(options.mode, Mode::Statements);
        assert_eq!(options.filename, "doc.vsz");
        assert!(options.skip_security_check);
        assert!(!CompileOptions::default().skip_security_check);
    }

    #[test]
    fn source_mode_wins_over_options_mode() {
        let compiler = Compiler::new(CompileOptions::default());
        let source = ExpressionSource::statements("x = 1\n");
        let compiled = compiler.compile(&source).unwrap();
        assert_eq!(compiled.mode(), Mode::Statements);
    }

    #[test]
    fn every_ambient_name_off_the_allowlist_is_rejected() {
        let allowed: Vec<&str> = ALLOWED_NAMES.to_vec();
        let compiler = Compiler::default();
        let mut checked = std::collections::BTreeSet::new();
        for name in ambient_names().filter(|name| !allowed.contains(name)) {
            for text in [name.to_owned(), format!("{name}(1)"), format!("[{name}]")] {
                let err = compiler.compile_str(&text).unwrap_err();
                assert!(err.is_safety(), "{text} was not rejected by the guard");
            }
            checked.insert(name);
        }
        assert_eq!(checked.len(), NameRegistry::global().len());
    }

    #[test]
    fn escape_hatches_never_compile_vetted() {
        for text in ["eval('1+1')", "open('/etc/passwd')", "__import__('os')", "globals()"] {
            assert!(compile(text, Mode::Expression, "t", false).unwrap_err().is_safety());
        }
    }
}
