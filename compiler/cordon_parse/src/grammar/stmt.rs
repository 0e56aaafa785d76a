//! Statements and blocks.

use cordon_ir::{
    ensure_sufficient_stack, ExceptHandler, ExprId, ExprKind, Ident, ImportAlias, Name, Span,
    Stmt, StmtId, StmtKind, StmtRange,
};
use cordon_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// One statement line (or compound statement), appended to `out`.
    pub(crate) fn parse_statement(&mut self, out: &mut Vec<StmtId>) -> Result<(), ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner(out))
    }

    fn parse_statement_inner(&mut self, out: &mut Vec<StmtId>) -> Result<(), ParseError> {
        let compound = match self.current_kind() {
            TokenKind::If => Some(self.parse_if()?),
            TokenKind::While => Some(self.parse_while()?),
            TokenKind::For => Some(self.parse_for()?),
            TokenKind::Try => Some(self.parse_try()?),
            TokenKind::Def => Some(self.parse_def()?),
            _ => None,
        };
        match compound {
            Some(stmt) => out.push(stmt),
            None => self.parse_simple_line(out)?,
        }
        Ok(())
    }

    /// `small (";" small)* [";"] NEWLINE`
    fn parse_simple_line(&mut self, out: &mut Vec<StmtId>) -> Result<(), ParseError> {
        out.push(self.parse_small_statement()?);
        while self.eat(TokenKind::Semicolon) {
            if matches!(self.current_kind(), TokenKind::Newline | TokenKind::Eof) {
                break;
            }
            out.push(self.parse_small_statement()?);
        }
        if !self.eat(TokenKind::Newline) && !self.cursor.is_at_end() {
            return Err(self.cursor.error_here("newline"));
        }
        Ok(())
    }

    /// An indented block, or a simple statement line after the colon.
    fn parse_suite(&mut self) -> Result<StmtRange, ParseError> {
        self.expect(TokenKind::Colon)?;
        let mut body = Vec::new();
        if self.eat(TokenKind::Newline) {
            if !self.eat(TokenKind::Indent) {
                return Err(ParseError::new(
                    "expected an indented block",
                    self.current_span(),
                ));
            }
            while !self.eat(TokenKind::Dedent) {
                if self.cursor.is_at_end() {
                    return Err(self.cursor.error_here("dedent"));
                }
                if self.check(TokenKind::Indent) {
                    return Err(ParseError::new("unexpected indent", self.current_span()));
                }
                self.parse_statement(&mut body)?;
            }
        } else {
            self.parse_simple_line(&mut body)?;
        }
        Ok(self.arena.alloc_stmt_list(body))
    }

    fn parse_small_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Pass => {
                self.advance();
                StmtKind::Pass
            }
            TokenKind::Break => {
                self.advance();
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.starts_expression() {
                    self.parse_testlist()?
                } else {
                    ExprId::INVALID
                };
                StmtKind::Return(value)
            }
            TokenKind::Raise => {
                self.advance();
                let exc = if self.starts_expression() {
                    self.parse_test()?
                } else {
                    ExprId::INVALID
                };
                StmtKind::Raise(exc)
            }
            TokenKind::Del => {
                self.advance();
                let mut targets = vec![self.parse_bitor()?];
                while self.eat(TokenKind::Comma) {
                    if !self.starts_expression() {
                        break;
                    }
                    targets.push(self.parse_bitor()?);
                }
                for &target in &targets {
                    self.check_target(target, "delete")?;
                }
                StmtKind::Delete(self.arena.alloc_expr_list(targets))
            }
            TokenKind::Assert => {
                self.advance();
                let test = self.parse_test()?;
                let msg = if self.eat(TokenKind::Comma) {
                    self.parse_test()?
                } else {
                    ExprId::INVALID
                };
                StmtKind::Assert { test, msg }
            }
            TokenKind::Global => {
                self.advance();
                let mut names = Vec::new();
                loop {
                    let (name, span) = self.expect_ident()?;
                    names.push(Ident { name, span });
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                StmtKind::Global(self.arena.alloc_idents(names))
            }
            TokenKind::Exec => {
                self.advance();
                let body = self.parse_bitor()?;
                let (globals, locals) = if self.eat(TokenKind::In) {
                    let globals = self.parse_test()?;
                    let locals = if self.eat(TokenKind::Comma) {
                        self.parse_test()?
                    } else {
                        ExprId::INVALID
                    };
                    (globals, locals)
                } else {
                    (ExprId::INVALID, ExprId::INVALID)
                };
                StmtKind::Exec {
                    body,
                    globals,
                    locals,
                }
            }
            TokenKind::Import => {
                self.advance();
                let mut aliases = Vec::new();
                loop {
                    aliases.push(self.parse_import_alias(true)?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                StmtKind::Import(self.arena.alloc_aliases(aliases))
            }
            TokenKind::From => self.parse_import_from()?,
            _ => self.parse_expression_statement()?,
        };
        Ok(self.alloc_stmt(Stmt::new(kind, self.span_from(start))))
    }

    fn parse_expression_statement(&mut self) -> Result<StmtKind, ParseError> {
        let first = self.parse_testlist()?;

        if let Some(op) = self.match_augassign_op() {
            let target_span = self.arena.expr(first).span;
            if !matches!(
                self.arena.expr(first).kind,
                ExprKind::Name(_) | ExprKind::Attribute { .. } | ExprKind::Subscript { .. }
            ) {
                return Err(ParseError::new(
                    "illegal expression for augmented assignment",
                    target_span,
                ));
            }
            self.advance();
            let value = self.parse_testlist()?;
            return Ok(StmtKind::AugAssign {
                target: first,
                op,
                value,
            });
        }

        if !self.check(TokenKind::Eq) {
            return Ok(StmtKind::Expr(first));
        }

        let mut targets = vec![first];
        let mut value = first;
        while self.eat(TokenKind::Eq) {
            value = self.parse_testlist()?;
            if self.check(TokenKind::Eq) {
                targets.push(value);
            }
        }
        for &target in &targets {
            self.check_target(target, "assign to")?;
        }
        let targets = self.arena.alloc_expr_list(targets);
        Ok(StmtKind::Assign { targets, value })
    }

    /// Reject expressions that cannot be bound or deleted.
    fn check_target(&self, target: ExprId, verb: &str) -> Result<(), ParseError> {
        let expr = self.arena.expr(target);
        match expr.kind {
            ExprKind::Name(_) | ExprKind::Attribute { .. } | ExprKind::Subscript { .. } => Ok(()),
            ExprKind::Tuple(items) | ExprKind::List(items) => {
                for &item in self.arena.expr_list(items) {
                    self.check_target(item, verb)?;
                }
                Ok(())
            }
            other => Err(ParseError::new(
                format!("cannot {verb} {}", other.node_kind()),
                expr.span,
            )),
        }
    }

    /// `dotted.name [as alias]`; `dotted` allows a dotted path.
    fn parse_import_alias(&mut self, dotted: bool) -> Result<ImportAlias, ParseError> {
        let start = self.current_span();
        let path = if dotted {
            self.parse_dotted_name()?
        } else {
            self.expect_ident()?.0
        };
        let asname = if self.eat(TokenKind::As) {
            self.expect_ident()?.0
        } else {
            Name::EMPTY
        };
        Ok(ImportAlias {
            path,
            asname,
            span: self.span_from(start),
        })
    }

    fn parse_dotted_name(&mut self) -> Result<Name, ParseError> {
        let first = self.expect(TokenKind::Ident)?;
        let mut path = self.cursor.text(first).to_owned();
        while self.eat(TokenKind::Dot) {
            let part = self.expect(TokenKind::Ident)?;
            path.push('.');
            path.push_str(self.cursor.text(part));
        }
        Ok(self.arena.intern(&path))
    }

    /// `from [.]* module import (* | names | "(" names ")")`
    fn parse_import_from(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(TokenKind::From)?;
        let mut level = 0u32;
        while self.eat(TokenKind::Dot) {
            level += 1;
        }
        let module = if level > 0 && self.check(TokenKind::Import) {
            Name::EMPTY
        } else {
            self.parse_dotted_name()?
        };
        self.expect(TokenKind::Import)?;

        if self.check(TokenKind::Star) {
            let span = self.advance().span;
            let star = self.arena.intern("*");
            let names = self.arena.alloc_aliases([ImportAlias {
                path: star,
                asname: Name::EMPTY,
                span,
            }]);
            return Ok(StmtKind::ImportFrom {
                module,
                names,
                level,
            });
        }

        let parenthesized = self.eat(TokenKind::LParen);
        let mut aliases = Vec::new();
        loop {
            aliases.push(self.parse_import_alias(false)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
            if parenthesized && self.check(TokenKind::RParen) {
                break;
            }
        }
        if parenthesized {
            self.expect(TokenKind::RParen)?;
        }
        Ok(StmtKind::ImportFrom {
            module,
            names: self.arena.alloc_aliases(aliases),
            level,
        })
    }

    // Compound statements

    fn parse_if(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let test = self.parse_test()?;
        let body = self.parse_suite()?;
        let orelse = match self.current_kind() {
            TokenKind::Elif => {
                let nested = self.parse_if()?;
                self.arena.alloc_stmt_list([nested])
            }
            TokenKind::Else => {
                self.advance();
                self.parse_suite()?
            }
            _ => StmtRange::EMPTY,
        };
        Ok(self.finish_compound(StmtKind::If { test, body, orelse }, start))
    }

    fn parse_while(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let test = self.parse_test()?;
        let body = self.parse_suite()?;
        Ok(self.finish_compound(StmtKind::While { test, body }, start))
    }

    fn parse_for(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let target = self.parse_target_list()?;
        self.check_target(target, "assign to")?;
        self.expect(TokenKind::In)?;
        let iter = self.parse_testlist()?;
        let body = self.parse_suite()?;
        Ok(self.finish_compound(StmtKind::For { target, iter, body }, start))
    }

    fn parse_def(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let (name, name_span) = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_suite()?;
        Ok(self.finish_compound(
            StmtKind::FunctionDef {
                name: Ident {
                    name,
                    span: name_span,
                },
                params,
                body,
            },
            start,
        ))
    }

    fn parse_try(&mut self) -> Result<StmtId, ParseError> {
        let start = self.advance().span;
        let body = self.parse_suite()?;

        let mut handlers = Vec::new();
        while self.check(TokenKind::Except) {
            let handler_start = self.advance().span;
            if let Some(previous) = handlers.last().map(|h: &ExceptHandler| h.ty) {
                if !previous.is_valid() {
                    return Err(ParseError::new(
                        "default 'except:' must be last",
                        handler_start,
                    ));
                }
            }
            let (ty, name) = if self.check(TokenKind::Colon) {
                (ExprId::INVALID, Ident::EMPTY)
            } else {
                let ty = self.parse_test()?;
                let name = if self.eat(TokenKind::As) {
                    let (name, span) = self.expect_ident()?;
                    Ident { name, span }
                } else {
                    Ident::EMPTY
                };
                (ty, name)
            };
            let handler_body = self.parse_suite()?;
            handlers.push(ExceptHandler {
                ty,
                name,
                body: handler_body,
                span: self.span_from(handler_start),
            });
        }

        let has_finally = self.eat(TokenKind::Finally);
        if handlers.is_empty() && !has_finally {
            return Err(self.cursor.error_here("'except' or 'finally'"));
        }
        let finalbody = if has_finally {
            self.parse_suite()?
        } else {
            StmtRange::EMPTY
        };

        let handlers = self.arena.alloc_handlers(handlers);
        Ok(self.finish_compound(
            StmtKind::Try {
                body,
                handlers,
                finalbody,
            },
            start,
        ))
    }

    fn finish_compound(&mut self, kind: StmtKind, start: Span) -> StmtId {
        let span = self.span_from(start);
        self.alloc_stmt(Stmt::new(kind, span))
    }
}
