//! Indentation layout.
//!
//! Turns physical line structure into `Newline`, `Indent` and `Dedent`
//! tokens. Blank and comment-only lines produce nothing; newlines inside
//! brackets are dropped. At end of input the current logical line is closed
//! and every open block is dedented before `Eof`.

use cordon_ir::Span;

use crate::lex_error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind};

const TAB_STOP: u32 = 8;

/// Layout state threaded through the raw token stream.
pub(crate) struct Layout<'src> {
    source: &'src str,
    indents: Vec<u32>,
    depth: u32,
    at_line_start: bool,
    out: Vec<Token>,
}

impl<'src> Layout<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Layout {
            source,
            indents: vec![0],
            depth: 0,
            at_line_start: true,
            out: Vec::new(),
        }
    }

    /// A physical line break.
    pub(crate) fn newline(&mut self, span: Span) {
        if self.depth > 0 || self.at_line_start {
            return;
        }
        self.out.push(Token::new(TokenKind::Newline, span));
        self.at_line_start = true;
    }

    /// Any non-newline token.
    pub(crate) fn token(&mut self, token: Token) -> Result<(), LexError> {
        if self.at_line_start {
            self.at_line_start = false;
            self.indent_to(token.span.start)?;
        }
        match token.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
        self.out.push(token);
        Ok(())
    }

    /// Close the stream.
    pub(crate) fn finish(mut self) -> Vec<Token> {
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        let eof = Span::point(end);
        if !self.at_line_start && self.depth == 0 {
            self.out.push(Token::new(TokenKind::Newline, eof));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.out.push(Token::new(TokenKind::Dedent, eof));
        }
        self.out.push(Token::new(TokenKind::Eof, eof));
        self.out
    }

    fn indent_to(&mut self, offset: u32) -> Result<(), LexError> {
        let column = self.column_of(offset);
        let current = self.indents.last().copied().unwrap_or(0);
        let here = Span::point(offset);

        if column > current {
            self.indents.push(column);
            self.out.push(Token::new(TokenKind::Indent, here));
            return Ok(());
        }

        while column < self.indents.last().copied().unwrap_or(0) {
            self.indents.pop();
            self.out.push(Token::new(TokenKind::Dedent, here));
        }
        if column != self.indents.last().copied().unwrap_or(0) {
            return Err(LexError::new(LexErrorKind::InconsistentDedent, here));
        }
        Ok(())
    }

    /// Indentation width of the line containing `offset`.
    fn column_of(&self, offset: u32) -> u32 {
        let before = &self.source[..offset as usize];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let mut column = 0;
        for c in before[line_start..].chars() {
            match c {
                '\t' => column = (column / TAB_STOP + 1) * TAB_STOP,
                '\x0C' => column = 0,
                _ => column += 1,
            }
        }
        column
    }
}
