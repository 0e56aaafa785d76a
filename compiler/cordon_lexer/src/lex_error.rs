//! Lexer errors.

use cordon_ir::Span;
use thiserror::Error;

/// A lexer error: what went wrong and where.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("invalid escape sequence {0:?}")]
    InvalidEscape(String),

    #[error("integer literal too large")]
    IntOverflow,

    #[error("invalid float literal")]
    FloatParseError,

    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
}
