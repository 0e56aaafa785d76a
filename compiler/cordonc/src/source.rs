//! Expression sources.

use std::sync::Arc;

use cordon_ir::Mode;

/// Filename used when the caller does not name the source.
pub const DEFAULT_FILENAME: &str = "<string>";

/// Text to compile, the mode to parse it under, and a display name for
/// diagnostics. Immutable once built; clones share the text.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExpressionSource {
    text: Arc<str>,
    mode: Mode,
    filename: Arc<str>,
}

impl ExpressionSource {
    pub fn new(text: impl Into<Arc<str>>, mode: Mode) -> Self {
        ExpressionSource {
            text: text.into(),
            mode,
            filename: Arc::from(DEFAULT_FILENAME),
        }
    }

    /// Single-expression source.
    pub fn expression(text: impl Into<Arc<str>>) -> Self {
        Self::new(text, Mode::Expression)
    }

    /// Statement-sequence source.
    pub fn statements(text: impl Into<Arc<str>>) -> Self {
        Self::new(text, Mode::Statements)
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<Arc<str>>) -> Self {
        self.filename = filename.into();
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
