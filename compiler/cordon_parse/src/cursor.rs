//! Token cursor for navigating the token stream.

use cordon_ir::Span;
use cordon_lexer::{Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a [`TokenList`].
///
/// The last token is always `Eof`, and the cursor never moves past it.
pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Token {
        self.peek_at(0)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens.tokens[prev].span,
            None => Span::DUMMY,
        }
    }

    /// Token `n` positions ahead, clamped to `Eof`.
    pub(crate) fn peek_at(&self, n: usize) -> Token {
        let tokens = &self.tokens.tokens;
        let index = (self.pos + n).min(tokens.len().saturating_sub(1));
        tokens
            .get(index)
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY))
    }

    #[inline]
    pub(crate) fn peek_next_kind(&self) -> TokenKind {
        self.peek_at(1).kind
    }

    /// Check the current token's kind, ignoring literal payloads.
    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                kind.describe(),
                self.current_kind(),
                self.current_span(),
            ))
        }
    }

    /// Source text of a token (identifier spelling).
    pub(crate) fn text(&self, token: Token) -> &'a str {
        self.source.get(token.span.range()).unwrap_or("")
    }

    /// Unescaped contents of a string literal.
    pub(crate) fn string(&self, index: u32) -> &'a str {
        self.tokens.string(index)
    }

    /// Build an error at the current token.
    #[cold]
    pub(crate) fn error_here(&self, what: &str) -> ParseError {
        ParseError::expected(what, self.current_kind(), self.current_span())
    }
}
