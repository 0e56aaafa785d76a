//! Recursive descent parser for Cordon source.
//!
//! Produces a flat [`SyntaxTree`] for either evaluation mode. Parsing stops
//! at the first syntax error; there is no recovery, since a source that
//! does not parse is never executed.

mod cursor;
mod error;
mod grammar;

use cordon_ir::{Expr, ExprArena, ExprId, ExprKind, Mode, Name, Span, Stmt, StmtId, SyntaxTree};
use cordon_lexer::{Token, TokenKind, TokenList};
use tracing::trace;

use cursor::Cursor;

pub use error::ParseError;

/// Parse `source` under `mode`.
pub fn parse(source: &str, mode: Mode) -> Result<SyntaxTree, ParseError> {
    let tokens = cordon_lexer::lex(source)?;
    let parser = Parser::new(&tokens, source);
    let tree = match mode {
        Mode::Expression => parser.parse_expression_source()?,
        Mode::Statements => parser.parse_statements_source()?,
    };
    trace!(
        %mode,
        exprs = tree.arena().expr_count(),
        stmts = tree.arena().stmt_count(),
        "parsed"
    );
    Ok(tree)
}

/// Parser state: the token cursor plus the arena being filled.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
            arena: ExprArena::new(),
        }
    }

    // Cursor delegation

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.cursor.expect(kind)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }

    // Arena helpers

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.arena.alloc_stmt(stmt)
    }

    /// Consume an identifier and intern its spelling.
    fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        let token = self.expect(TokenKind::Ident)?;
        let name = self.arena.intern(self.cursor.text(token));
        Ok((name, token.span))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
