//! Compile errors.

use cordon_guard::SafetyViolation;
use cordon_ir::{LineCol, Span};
use cordon_parse::ParseError;
use thiserror::Error;

/// Why a source was not compiled.
///
/// The two variants never overlap: a source that does not parse is never
/// guarded, and a guard rejection always comes from a well-formed tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CompileError {
    /// The text is not valid under the requested mode.
    #[error("Unable to parse file: {filename}:{location}: {message}")]
    Parse {
        filename: String,
        location: LineCol,
        message: String,
        span: Span,
    },

    /// The text parsed but uses a construct the guard refuses.
    #[error(transparent)]
    Safety(#[from] SafetyViolation),
}

impl CompileError {
    pub(crate) fn parse(err: ParseError, text: &str, filename: &str) -> Self {
        CompileError::Parse {
            filename: filename.to_owned(),
            location: err.span.line_col(text),
            message: err.message,
            span: err.span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            CompileError::Parse { span, .. } => *span,
            CompileError::Safety(violation) => violation.span(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, CompileError::Parse { .. })
    }

    pub fn is_safety(&self) -> bool {
        matches!(self, CompileError::Safety(_))
    }

    /// The guard's verdict, if this is a safety rejection.
    pub fn violation(&self) -> Option<&SafetyViolation> {
        match self {
            CompileError::Safety(violation) => Some(violation),
            CompileError::Parse { .. } => None,
        }
    }
}
