//! Parse errors.

use cordon_ir::Span;
use cordon_lexer::{LexError, TokenKind};
use thiserror::Error;

/// A syntax error: the parser's message and where it stopped.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// "expected X, found Y".
    #[cold]
    pub(crate) fn expected(what: &str, found: TokenKind, span: Span) -> Self {
        ParseError::new(format!("expected {what}, found {found}"), span)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}
