//! Statement nodes.

use std::fmt;

use super::expr::Ident;
use super::ids::ExprId;
use super::operators::BinaryOp;
use super::ranges::{AliasRange, ExprRange, HandlerRange, IdentRange, ParamRange, StmtRange};
use crate::{Name, Span};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression evaluated for its effect.
    Expr(ExprId),

    /// `a = b = value`; targets are names, tuples/lists, subscripts or
    /// attributes.
    Assign { targets: ExprRange, value: ExprId },

    /// `target op= value`
    AugAssign {
        target: ExprId,
        op: BinaryOp,
        value: ExprId,
    },

    Pass,
    Break,
    Continue,

    /// `if`/`elif`/`else`; an `elif` is a nested `If` in `orelse`.
    If {
        test: ExprId,
        body: StmtRange,
        orelse: StmtRange,
    },

    While { test: ExprId, body: StmtRange },

    For {
        target: ExprId,
        iter: ExprId,
        body: StmtRange,
    },

    /// `def name(params): body`
    FunctionDef {
        name: Ident,
        params: ParamRange,
        body: StmtRange,
    },

    /// `return [value]`; `ExprId::INVALID` = bare return.
    Return(ExprId),

    /// `del a, b[0]`
    Delete(ExprRange),

    /// `assert test[, msg]`
    Assert { test: ExprId, msg: ExprId },

    /// `raise [exc]`
    Raise(ExprId),

    /// `try: body except...: ... finally: ...`
    Try {
        body: StmtRange,
        handlers: HandlerRange,
        finalbody: StmtRange,
    },

    /// `import a.b [as c], d`
    Import(AliasRange),

    /// `from [.]module import x [as y], ...` or `import *`
    ImportFrom {
        module: Name,
        names: AliasRange,
        level: u32,
    },

    /// `global a, b`
    Global(IdentRange),

    /// `exec body [in globals[, locals]]`
    Exec {
        body: ExprId,
        globals: ExprId,
        locals: ExprId,
    },
}

/// `except [type [as name]]: body`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExceptHandler {
    /// `ExprId::INVALID` = bare `except:`.
    pub ty: ExprId,
    /// `name.name == Name::EMPTY` = no `as` clause.
    pub name: Ident,
    pub body: StmtRange,
    pub span: Span,
}

/// `dotted.path [as alias]` in an import.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportAlias {
    pub path: Name,
    /// `Name::EMPTY` = no alias.
    pub asname: Name,
    pub span: Span,
}
