//! Syntax tree guard.
//!
//! A depth-first, pre-order walk. Each node is checked before its children,
//! in this order:
//!
//! 1. node kind in [`FORBIDDEN_NODE_KINDS`]
//! 2. bare names: dunder-prefixed or forbidden builtin
//! 3. calls: the target must be a bare name, which is then checked like (2)
//! 4. attributes: member must not start with a [reserved prefix]
//! 5. anything else: recurse into children in field order
//!
//! Field order is mostly source order. The exceptions: a conditional visits
//! its test before either branch, a dict visits every key before any value,
//! and a parameter list visits every name before any default.
//!
//! The walk returns the first violation and visits nothing after it.
//! Identifiers in binding position (function and parameter names, `except
//! ... as` names) are checked like bare names.
//!
//! The `match`es below are exhaustive on purpose: a node kind added to the
//! tree does not compile until the guard decides what to do with it.
//!
//! [reserved prefix]: RESERVED_ATTRIBUTE_PREFIXES

use cordon_ir::{
    ensure_sufficient_stack, Comprehension, ComprehensionRange, ExprArena, ExprId, ExprKind,
    ExprRange, Ident, Name, NodeKind, ParamRange, Root, Span, StmtId, StmtKind, StmtRange,
    SyntaxTree,
};
use tracing::debug;

use crate::registry::NameRegistry;
use crate::violation::SafetyViolation;

/// Statement kinds rejected wherever they appear.
pub const FORBIDDEN_NODE_KINDS: [NodeKind; 4] = [
    NodeKind::Import,
    NodeKind::ImportFrom,
    NodeKind::Global,
    NodeKind::Exec,
];

/// Member-name prefixes that reach interpreter internals: dunders, function,
/// method and traceback attributes.
pub const RESERVED_ATTRIBUTE_PREFIXES: [&str; 4] = ["__", "func_", "im_", "tb_"];

type Outcome = Result<(), SafetyViolation>;

/// Vets syntax trees against a [`NameRegistry`].
///
/// Stateless beyond the registry reference; one guard can check any number
/// of trees, from any number of threads.
#[derive(Copy, Clone, Debug)]
pub struct Guard<'r> {
    registry: &'r NameRegistry,
}

impl<'r> Guard<'r> {
    pub fn new(registry: &'r NameRegistry) -> Self {
        Guard { registry }
    }

    /// Accept `tree`, or return the first violation in pre-order.
    #[tracing::instrument(level = "debug", skip_all, fields(mode = %tree.mode()))]
    pub fn check(&self, tree: &SyntaxTree) -> Outcome {
        let walker = Walker {
            arena: tree.arena(),
            registry: self.registry,
        };
        let result = match tree.root() {
            Root::Expression(id) => walker.expr(id),
            Root::Statements(body) => walker.block(body),
        };
        if let Err(violation) = &result {
            debug!(
                category = violation.category(),
                start = violation.span().start,
                "rejected: {violation}"
            );
        }
        result
    }
}

fn is_dunder(name: &str) -> bool {
    name.starts_with("__")
}

fn has_reserved_prefix(attr: &str) -> bool {
    RESERVED_ATTRIBUTE_PREFIXES
        .iter()
        .any(|prefix| attr.starts_with(prefix))
}

/// One walk over one tree.
struct Walker<'a> {
    arena: &'a ExprArena,
    registry: &'a NameRegistry,
}

impl Walker<'_> {
    fn name(&self, name: Name) -> &str {
        self.arena.name(name)
    }

    fn is_special(&self, name: &str) -> bool {
        is_dunder(name) || self.registry.is_forbidden(name)
    }

    /// Rule 1, shared by statements and expressions.
    fn check_kind(kind: NodeKind, span: Span) -> Outcome {
        if FORBIDDEN_NODE_KINDS.contains(&kind) {
            return Err(SafetyViolation::ForbiddenNode { kind, span });
        }
        Ok(())
    }

    /// Rule 2.
    fn check_name(&self, name: Name, span: Span) -> Outcome {
        let text = self.name(name);
        if self.is_special(text) {
            return Err(SafetyViolation::SpecialName {
                name: text.to_owned(),
                span,
            });
        }
        Ok(())
    }

    fn check_ident(&self, ident: Ident) -> Outcome {
        if ident.is_empty() {
            return Ok(());
        }
        self.check_name(ident.name, ident.span)
    }

    // Statements

    fn block(&self, body: StmtRange) -> Outcome {
        for &id in self.arena.stmt_list(body) {
            self.stmt(id)?;
        }
        Ok(())
    }

    fn stmt(&self, id: StmtId) -> Outcome {
        ensure_sufficient_stack(|| {
            let stmt = *self.arena.stmt(id);
            Self::check_kind(stmt.kind.node_kind(), stmt.span)?;
            self.stmt_children(stmt.kind, stmt.span)
        })
    }

    fn stmt_children(&self, kind: StmtKind, span: Span) -> Outcome {
        match kind {
            StmtKind::Expr(value) => self.expr(value),
            StmtKind::Assign { targets, value } => {
                self.exprs(targets)?;
                self.expr(value)
            }
            StmtKind::AugAssign { target, value, .. } => {
                self.expr(target)?;
                self.expr(value)
            }
            StmtKind::Pass | StmtKind::Break | StmtKind::Continue => Ok(()),
            StmtKind::If { test, body, orelse } => {
                self.expr(test)?;
                self.block(body)?;
                self.block(orelse)
            }
            StmtKind::While { test, body } => {
                self.expr(test)?;
                self.block(body)
            }
            StmtKind::For { target, iter, body } => {
                self.expr(target)?;
                self.expr(iter)?;
                self.block(body)
            }
            StmtKind::FunctionDef { name, params, body } => {
                self.check_ident(name)?;
                self.params(params)?;
                self.block(body)
            }
            StmtKind::Return(value) | StmtKind::Raise(value) => self.optional(value),
            StmtKind::Delete(targets) => self.exprs(targets),
            StmtKind::Assert { test, msg } => {
                self.expr(test)?;
                self.optional(msg)
            }
            StmtKind::Try {
                body,
                handlers,
                finalbody,
            } => {
                self.block(body)?;
                for handler in self.arena.handlers(handlers) {
                    self.optional(handler.ty)?;
                    self.check_ident(handler.name)?;
                    self.block(handler.body)?;
                }
                self.block(finalbody)
            }
            // Already refused by `check_kind`; kept closed so that dropping a
            // kind from the forbidden list cannot silently admit it.
            StmtKind::Import(_)
            | StmtKind::ImportFrom { .. }
            | StmtKind::Global(_)
            | StmtKind::Exec { .. } => Err(SafetyViolation::ForbiddenNode {
                kind: kind.node_kind(),
                span,
            }),
        }
    }

    // Expressions

    fn exprs(&self, range: ExprRange) -> Outcome {
        for &id in self.arena.expr_list(range) {
            self.expr(id)?;
        }
        Ok(())
    }

    fn optional(&self, id: ExprId) -> Outcome {
        match id.get() {
            Some(id) => self.expr(id),
            None => Ok(()),
        }
    }

    fn expr(&self, id: ExprId) -> Outcome {
        ensure_sufficient_stack(|| {
            let expr = *self.arena.expr(id);
            Self::check_kind(expr.kind.node_kind(), expr.span)?;
            self.expr_children(expr.kind, expr.span)
        })
    }

    fn expr_children(&self, kind: ExprKind, span: Span) -> Outcome {
        match kind {
            ExprKind::Name(name) => self.check_name(name, span),
            ExprKind::Call {
                func,
                args,
                keywords,
            } => {
                self.check_call_target(func, span)?;
                self.expr(func)?;
                self.exprs(args)?;
                for keyword in self.arena.keywords(keywords) {
                    self.expr(keyword.value)?;
                }
                Ok(())
            }
            ExprKind::Attribute { value, attr } => {
                if attr.is_empty() {
                    return Err(SafetyViolation::AttributeWithoutIdentifier { span });
                }
                let member = self.name(attr);
                if has_reserved_prefix(member) {
                    return Err(SafetyViolation::SpecialAttribute {
                        name: member.to_owned(),
                        span,
                    });
                }
                self.expr(value)
            }
            ExprKind::Int(_) | ExprKind::Float(_) | ExprKind::Str(_) => Ok(()),
            ExprKind::Subscript { value, index } => {
                self.expr(value)?;
                self.expr(index)
            }
            ExprKind::Slice { lower, upper, step } => {
                self.optional(lower)?;
                self.optional(upper)?;
                self.optional(step)
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.expr(left)?;
                self.expr(right)
            }
            ExprKind::BoolOp { values, .. } => self.exprs(values),
            ExprKind::Compare {
                left, comparators, ..
            } => {
                self.expr(left)?;
                self.exprs(comparators)
            }
            ExprKind::IfExp { test, body, orelse } => {
                self.expr(test)?;
                self.expr(body)?;
                self.expr(orelse)
            }
            ExprKind::Lambda { params, body } => {
                self.params(params)?;
                self.expr(body)
            }
            ExprKind::List(items) | ExprKind::Tuple(items) | ExprKind::Set(items) => {
                self.exprs(items)
            }
            ExprKind::Dict { keys, values } => {
                self.exprs(keys)?;
                self.exprs(values)
            }
            ExprKind::ListComp { elt, generators }
            | ExprKind::SetComp { elt, generators }
            | ExprKind::Generator { elt, generators } => {
                self.expr(elt)?;
                self.comprehensions(generators)
            }
            ExprKind::DictComp {
                key,
                value,
                generators,
            } => {
                self.expr(key)?;
                self.expr(value)?;
                self.comprehensions(generators)
            }
        }
    }

    /// Rule 3: only a bare, non-special name may be called.
    fn check_call_target(&self, func: ExprId, span: Span) -> Outcome {
        let ExprKind::Name(name) = self.arena.expr(func).kind else {
            return Err(SafetyViolation::CallWithoutIdentifier { span });
        };
        let text = self.name(name);
        if self.is_special(text) {
            return Err(SafetyViolation::SpecialFunction {
                name: text.to_owned(),
                span,
            });
        }
        Ok(())
    }

    fn params(&self, params: ParamRange) -> Outcome {
        let params = self.arena.params(params);
        for param in params {
            self.check_ident(param.name)?;
        }
        for param in params {
            self.optional(param.default)?;
        }
        Ok(())
    }

    fn comprehensions(&self, range: ComprehensionRange) -> Outcome {
        for &Comprehension { target, iter, ifs } in self.arena.comprehensions(range) {
            self.expr(target)?;
            self.expr(iter)?;
            self.exprs(ifs)?;
        }
        Ok(())
    }
}
