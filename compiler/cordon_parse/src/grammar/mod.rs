//! Grammar productions.
//!
//! - `expr`: conditional, lambda, boolean, comparison and arithmetic levels
//! - `operators`: token to operator mapping
//! - `primary`: atoms, displays, comprehensions and trailers
//! - `stmt`: simple and compound statements, blocks

mod expr;
mod operators;
mod primary;
mod stmt;

use cordon_ir::{Root, SyntaxTree};
use cordon_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// A single expression, optionally surrounded by blank lines.
    pub(crate) fn parse_expression_source(mut self) -> Result<SyntaxTree, ParseError> {
        self.skip_layout();
        let expr = self.parse_testlist()?;
        self.skip_layout();
        if !self.cursor.is_at_end() {
            return Err(self.cursor.error_here("end of input"));
        }
        Ok(SyntaxTree::new(self.arena, Root::Expression(expr)))
    }

    /// A sequence of statements at indentation level zero.
    pub(crate) fn parse_statements_source(mut self) -> Result<SyntaxTree, ParseError> {
        let mut stmts = Vec::new();
        while self.eat(TokenKind::Newline) {}
        while !self.cursor.is_at_end() {
            if self.check(TokenKind::Indent) {
                return Err(ParseError::new("unexpected indent", self.current_span()));
            }
            self.parse_statement(&mut stmts)?;
        }
        let body = self.arena.alloc_stmt_list(stmts);
        Ok(SyntaxTree::new(self.arena, Root::Statements(body)))
    }

    fn skip_layout(&mut self) {
        while matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
        ) {
            self.advance();
        }
    }
}
