//! Atoms, displays, comprehensions and trailers.

use cordon_ir::{
    Comprehension, ComprehensionRange, ExprId, ExprKind, ExprRange, Keyword, KeywordRange, Span,
};
use cordon_lexer::TokenKind;

use crate::{ParseError, Parser};

/// Which bracketed display a comprehension belongs to.
#[derive(Copy, Clone)]
enum CompKind {
    List,
    Set,
    Generator,
}

impl Parser<'_> {
    /// Atom followed by any number of calls, subscripts and attribute
    /// accesses.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let mut expr = self.parse_atom()?;
        loop {
            match self.current_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let (args, keywords) = self.parse_call_args()?;
                    self.expect(TokenKind::RParen)?;
                    expr = self.alloc(
                        ExprKind::Call {
                            func: expr,
                            args,
                            keywords,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_subscript()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = self.alloc(
                        ExprKind::Subscript { value: expr, index },
                        self.span_from(start),
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let (attr, _) = self.expect_ident()?;
                    expr = self.alloc(
                        ExprKind::Attribute { value: expr, attr },
                        self.span_from(start),
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_atom(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        match token.kind {
            TokenKind::Ident => {
                let (name, span) = self.expect_ident()?;
                Ok(self.alloc(ExprKind::Name(name), span))
            }
            TokenKind::Int(value) => {
                self.advance();
                Ok(self.alloc(ExprKind::Int(value), token.span))
            }
            TokenKind::Float(bits) => {
                self.advance();
                Ok(self.alloc(ExprKind::Float(bits), token.span))
            }
            TokenKind::Str(_) => self.parse_strings(),
            TokenKind::LParen => self.parse_paren(),
            TokenKind::LBracket => self.parse_list_display(),
            TokenKind::LBrace => self.parse_brace_display(),
            _ => Err(self.cursor.error_here("expression")),
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let mut text = String::new();
        while let TokenKind::Str(index) = self.current_kind() {
            text.push_str(self.cursor.string(index));
            self.advance();
        }
        let name = self.arena.intern(&text);
        Ok(self.alloc(ExprKind::Str(name), self.span_from(start)))
    }

    /// `()`, `(expr)`, `(a, b)` or `(x for ...)`.
    fn parse_paren(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LParen)?.span;
        if self.eat(TokenKind::RParen) {
            return Ok(self.alloc(ExprKind::Tuple(ExprRange::EMPTY), self.span_from(start)));
        }
        let first = self.parse_test()?;
        if self.check(TokenKind::For) {
            let generators = self.parse_comprehension_clauses()?;
            self.expect(TokenKind::RParen)?;
            return Ok(self.alloc_comp(CompKind::Generator, first, generators, start));
        }
        if self.eat(TokenKind::RParen) {
            return Ok(first);
        }
        let items = self.parse_rest_of_sequence(first, TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;
        Ok(self.alloc(ExprKind::Tuple(items), self.span_from(start)))
    }

    /// `[a, b]` or `[x for ...]`.
    fn parse_list_display(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LBracket)?.span;
        if self.eat(TokenKind::RBracket) {
            return Ok(self.alloc(ExprKind::List(ExprRange::EMPTY), self.span_from(start)));
        }
        let first = self.parse_test()?;
        if self.check(TokenKind::For) {
            let generators = self.parse_comprehension_clauses()?;
            self.expect(TokenKind::RBracket)?;
            return Ok(self.alloc_comp(CompKind::List, first, generators, start));
        }
        let items = if self.check(TokenKind::RBracket) {
            self.arena.alloc_expr_list([first])
        } else {
            self.parse_rest_of_sequence(first, TokenKind::RBracket)?
        };
        self.expect(TokenKind::RBracket)?;
        Ok(self.alloc(ExprKind::List(items), self.span_from(start)))
    }

    /// `{}`, `{k: v, ...}`, `{k: v for ...}`, `{a, b}` or `{x for ...}`.
    fn parse_brace_display(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::LBrace)?.span;
        if self.eat(TokenKind::RBrace) {
            return Ok(self.alloc(
                ExprKind::Dict {
                    keys: ExprRange::EMPTY,
                    values: ExprRange::EMPTY,
                },
                self.span_from(start),
            ));
        }

        let first = self.parse_test()?;

        if !self.eat(TokenKind::Colon) {
            if self.check(TokenKind::For) {
                let generators = self.parse_comprehension_clauses()?;
                self.expect(TokenKind::RBrace)?;
                return Ok(self.alloc_comp(CompKind::Set, first, generators, start));
            }
            let items = if self.check(TokenKind::RBrace) {
                self.arena.alloc_expr_list([first])
            } else {
                self.parse_rest_of_sequence(first, TokenKind::RBrace)?
            };
            self.expect(TokenKind::RBrace)?;
            return Ok(self.alloc(ExprKind::Set(items), self.span_from(start)));
        }

        let first_value = self.parse_test()?;
        if self.check(TokenKind::For) {
            let generators = self.parse_comprehension_clauses()?;
            self.expect(TokenKind::RBrace)?;
            return Ok(self.alloc(
                ExprKind::DictComp {
                    key: first,
                    value: first_value,
                    generators,
                },
                self.span_from(start),
            ));
        }

        let mut keys = vec![first];
        let mut values = vec![first_value];
        while self.eat(TokenKind::Comma) {
            if self.check(TokenKind::RBrace) {
                break;
            }
            keys.push(self.parse_test()?);
            self.expect(TokenKind::Colon)?;
            values.push(self.parse_test()?);
        }
        self.expect(TokenKind::RBrace)?;
        let keys = self.arena.alloc_expr_list(keys);
        let values = self.arena.alloc_expr_list(values);
        Ok(self.alloc(ExprKind::Dict { keys, values }, self.span_from(start)))
    }

    /// Remaining `, item` entries of a display whose first item is parsed.
    fn parse_rest_of_sequence(
        &mut self,
        first: ExprId,
        close: TokenKind,
    ) -> Result<ExprRange, ParseError> {
        let mut items = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.check(close) {
                break;
            }
            items.push(self.parse_test()?);
        }
        if !self.check(close) {
            return Err(self.cursor.error_here(&format!("',' or {}", close.describe())));
        }
        Ok(self.arena.alloc_expr_list(items))
    }

    /// `for target in iter [if cond]*` clauses, one or more.
    fn parse_comprehension_clauses(&mut self) -> Result<ComprehensionRange, ParseError> {
        let mut clauses = Vec::new();
        while self.eat(TokenKind::For) {
            let target = self.parse_target_list()?;
            self.expect(TokenKind::In)?;
            let iter = self.parse_or_test()?;
            let mut ifs = Vec::new();
            while self.eat(TokenKind::If) {
                ifs.push(self.parse_or_test()?);
            }
            let ifs = self.arena.alloc_expr_list(ifs);
            clauses.push(Comprehension { target, iter, ifs });
        }
        Ok(self.arena.alloc_comprehensions(clauses))
    }

    fn alloc_comp(
        &mut self,
        kind: CompKind,
        elt: ExprId,
        generators: ComprehensionRange,
        start: Span,
    ) -> ExprId {
        let kind = match kind {
            CompKind::List => ExprKind::ListComp { elt, generators },
            CompKind::Set => ExprKind::SetComp { elt, generators },
            CompKind::Generator => ExprKind::Generator { elt, generators },
        };
        self.alloc(kind, self.span_from(start))
    }

    /// Call arguments: positional, then `name=value` keywords. A sole
    /// argument may be a bare generator expression.
    fn parse_call_args(&mut self) -> Result<(ExprRange, KeywordRange), ParseError> {
        let mut args = Vec::new();
        let mut keywords: Vec<Keyword> = Vec::new();

        while !self.check(TokenKind::RParen) {
            let start = self.current_span();
            if self.check(TokenKind::Ident) && self.cursor.peek_next_kind() == TokenKind::Eq {
                let (arg, _) = self.expect_ident()?;
                self.advance();
                let value = self.parse_test()?;
                if keywords.iter().any(|k| k.arg == arg) {
                    return Err(ParseError::new("keyword argument repeated", start));
                }
                keywords.push(Keyword {
                    arg,
                    value,
                    span: self.span_from(start),
                });
            } else {
                if !keywords.is_empty() {
                    return Err(ParseError::new(
                        "positional argument follows keyword argument",
                        start,
                    ));
                }
                let value = self.parse_test()?;
                if self.check(TokenKind::For) {
                    let generators = self.parse_comprehension_clauses()?;
                    let generator = self.alloc_comp(CompKind::Generator, value, generators, start);
                    args.push(generator);
                    if !self.check(TokenKind::RParen) || args.len() > 1 {
                        return Err(ParseError::new(
                            "generator expression must be parenthesized",
                            self.span_from(start),
                        ));
                    }
                    break;
                }
                args.push(value);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let args = self.arena.alloc_expr_list(args);
        let keywords = self.arena.alloc_keywords(keywords);
        Ok((args, keywords))
    }

    /// Subscript contents: an index, a tuple of indices, or a slice.
    fn parse_subscript(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let lower = if self.check(TokenKind::Colon) {
            ExprId::INVALID
        } else {
            let index = self.parse_testlist()?;
            if !self.check(TokenKind::Colon) {
                return Ok(index);
            }
            index
        };

        self.expect(TokenKind::Colon)?;
        let upper = self.parse_optional_slice_part()?;
        let step = if self.eat(TokenKind::Colon) {
            self.parse_optional_slice_part()?
        } else {
            ExprId::INVALID
        };
        Ok(self.alloc(
            ExprKind::Slice { lower, upper, step },
            self.span_from(start),
        ))
    }

    fn parse_optional_slice_part(&mut self) -> Result<ExprId, ParseError> {
        if matches!(self.current_kind(), TokenKind::Colon | TokenKind::RBracket) {
            Ok(ExprId::INVALID)
        } else {
            self.parse_test()
        }
    }
}
