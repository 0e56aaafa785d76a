//! Expression levels, lowest precedence first.
//!
//! ```text
//! testlist   = test ("," test)* [","]
//! test       = lambda | or_test ["if" or_test "else" test]
//! or_test    = and_test ("or" and_test)*
//! and_test   = not_test ("and" not_test)*
//! not_test   = "not" not_test | comparison
//! comparison = bitor (comp_op bitor)*
//! bitor      = bitxor ("|" bitxor)*
//! bitxor     = bitand ("^" bitand)*
//! bitand     = shift ("&" shift)*
//! shift      = arith (("<<" | ">>") arith)*
//! arith      = term (("+" | "-") term)*
//! term       = factor (("*" | "/" | "//" | "%") factor)*
//! factor     = ("+" | "-" | "~") factor | power
//! power      = postfix ["**" factor]
//! ```

use cordon_ir::{
    ensure_sufficient_stack, BinaryOp, BoolOp, ExprId, ExprKind, Ident, Param, ParamRange,
    UnaryOp,
};
use cordon_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `test ("," test)*`, producing a tuple when a comma is present.
    pub(crate) fn parse_testlist(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let first = self.parse_test()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Comma) {
            if !self.starts_expression() {
                break;
            }
            items.push(self.parse_test()?);
        }
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::Tuple(range), self.span_from(start)))
    }

    /// Comma-separated assignment targets: `bitor ("," bitor)*`.
    pub(crate) fn parse_target_list(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let first = self.parse_bitor()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Comma) {
            if !self.starts_expression() {
                break;
            }
            items.push(self.parse_bitor()?);
        }
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::Tuple(range), self.span_from(start)))
    }

    /// Whether the current token can begin an expression.
    pub(crate) fn starts_expression(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Ident
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Tilde
                | TokenKind::Not
                | TokenKind::Lambda
        )
    }

    /// Full expression including conditionals and lambdas.
    pub(crate) fn parse_test(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_test_inner())
    }

    fn parse_test_inner(&mut self) -> Result<ExprId, ParseError> {
        if self.check(TokenKind::Lambda) {
            return self.parse_lambda();
        }
        let start = self.current_span();
        let body = self.parse_or_test()?;
        if !self.eat(TokenKind::If) {
            return Ok(body);
        }
        let test = self.parse_or_test()?;
        self.expect(TokenKind::Else)?;
        let orelse = self.parse_test()?;
        Ok(self.alloc(
            ExprKind::IfExp { test, body, orelse },
            self.span_from(start),
        ))
    }

    fn parse_lambda(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::Lambda)?.span;
        let params = self.parse_params(TokenKind::Colon)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_test()?;
        Ok(self.alloc(ExprKind::Lambda { params, body }, self.span_from(start)))
    }

    /// Parameter list up to (not including) `close`.
    pub(crate) fn parse_params(&mut self, close: TokenKind) -> Result<ParamRange, ParseError> {
        let mut params = Vec::new();
        let mut seen_default = false;
        while !self.check(close) {
            let (name, span) = self.expect_ident()?;
            let default = if self.eat(TokenKind::Eq) {
                seen_default = true;
                self.parse_test()?
            } else if seen_default {
                return Err(ParseError::new(
                    "non-default argument follows default argument",
                    span,
                ));
            } else {
                ExprId::INVALID
            };
            if params.iter().any(|p: &Param| p.name.name == name) {
                return Err(ParseError::new(
                    "duplicate argument in function definition",
                    span,
                ));
            }
            params.push(Param {
                name: Ident { name, span },
                default,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(self.arena.alloc_params(params))
    }

    /// Condition without a trailing conditional expression.
    pub(crate) fn parse_or_test(&mut self) -> Result<ExprId, ParseError> {
        self.parse_bool_chain(TokenKind::Or, BoolOp::Or, Self::parse_and_test)
    }

    fn parse_and_test(&mut self) -> Result<ExprId, ParseError> {
        self.parse_bool_chain(TokenKind::And, BoolOp::And, Self::parse_not_test)
    }

    fn parse_bool_chain(
        &mut self,
        token: TokenKind,
        op: BoolOp,
        operand: fn(&mut Self) -> Result<ExprId, ParseError>,
    ) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let first = operand(self)?;
        if !self.check(token) {
            return Ok(first);
        }
        let mut values = vec![first];
        while self.eat(token) {
            values.push(operand(self)?);
        }
        let values = self.arena.alloc_expr_list(values);
        Ok(self.alloc(ExprKind::BoolOp { op, values }, self.span_from(start)))
    }

    fn parse_not_test(&mut self) -> Result<ExprId, ParseError> {
        if !self.check(TokenKind::Not) {
            return self.parse_comparison();
        }
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_not_test())?;
        Ok(self.alloc(
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            },
            self.span_from(start),
        ))
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let left = self.parse_bitor()?;
        let mut ops = Vec::new();
        let mut comparators = Vec::new();
        while let Some(op) = self.eat_comparison_op() {
            ops.push(op);
            comparators.push(self.parse_bitor()?);
        }
        if ops.is_empty() {
            return Ok(left);
        }
        let ops = self.arena.alloc_cmp_ops(ops);
        let comparators = self.arena.alloc_expr_list(comparators);
        Ok(self.alloc(
            ExprKind::Compare {
                left,
                ops,
                comparators,
            },
            self.span_from(start),
        ))
    }

    /// Bitwise-or level; also the level of assignment and loop targets.
    pub(crate) fn parse_bitor(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(
            |p| (p.check(TokenKind::Pipe)).then_some(BinaryOp::BitOr),
            Self::parse_bitxor,
        )
    }

    fn parse_bitxor(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(
            |p| (p.check(TokenKind::Caret)).then_some(BinaryOp::BitXor),
            Self::parse_bitand,
        )
    }

    fn parse_bitand(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(
            |p| (p.check(TokenKind::Amp)).then_some(BinaryOp::BitAnd),
            Self::parse_shift,
        )
    }

    fn parse_shift(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::match_shift_op, Self::parse_arith)
    }

    fn parse_arith(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::match_additive_op, Self::parse_term)
    }

    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::match_multiplicative_op, Self::parse_factor)
    }

    /// One left-associative binary precedence level.
    fn parse_binary_level(
        &mut self,
        match_op: fn(&Self) -> Option<BinaryOp>,
        operand: fn(&mut Self) -> Result<ExprId, ParseError>,
    ) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let mut left = operand(self)?;
        while let Some(op) = match_op(self) {
            self.advance();
            let right = operand(self)?;
            left = self.alloc(ExprKind::Binary { op, left, right }, self.span_from(start));
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<ExprId, ParseError> {
        let Some(op) = self.match_unary_op() else {
            return self.parse_power();
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.parse_factor())?;
        Ok(self.alloc(ExprKind::Unary { op, operand }, self.span_from(start)))
    }

    fn parse_power(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let left = self.parse_postfix()?;
        if !self.eat(TokenKind::DoubleStar) {
            return Ok(left);
        }
        let right = ensure_sufficient_stack(|| self.parse_factor())?;
        Ok(self.alloc(
            ExprKind::Binary {
                op: BinaryOp::Pow,
                left,
                right,
            },
            self.span_from(start),
        ))
    }
}
