//! Expression nodes.
//!
//! All children are indices into the owning [`ExprArena`](crate::ExprArena).
//! Optional children use `ExprId::INVALID`; optional names use
//! `Name::EMPTY`.

use std::fmt;

use super::ids::ExprId;
use super::operators::{BinaryOp, BoolOp, UnaryOp};
use super::ranges::{CmpOpRange, ComprehensionRange, ExprRange, KeywordRange, ParamRange};
use crate::{Name, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`, `0xff`
    Int(i64),

    /// Float literal, stored as bits: `1.5`, `2e-3`
    Float(u64),

    /// String literal (adjacent literals already concatenated)
    Str(Name),

    /// Bare identifier reference: `x`, `True`, `len`
    Name(Name),

    /// Member access: `value.attr`
    Attribute { value: ExprId, attr: Name },

    /// Subscript: `value[index]`; `index` may be a `Slice`
    Subscript { value: ExprId, index: ExprId },

    /// Slice inside a subscript: `lower:upper:step`, each part optional
    Slice {
        lower: ExprId,
        upper: ExprId,
        step: ExprId,
    },

    /// Call: `func(args..., name=value...)`
    Call {
        func: ExprId,
        args: ExprRange,
        keywords: KeywordRange,
    },

    /// Prefix operator: `-x`, `not x`
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operator: `a + b`
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Short-circuit chain: `a and b and c`
    BoolOp { op: BoolOp, values: ExprRange },

    /// Comparison chain: `a < b <= c`
    Compare {
        left: ExprId,
        ops: CmpOpRange,
        comparators: ExprRange,
    },

    /// Conditional: `body if test else orelse`
    IfExp {
        test: ExprId,
        body: ExprId,
        orelse: ExprId,
    },

    /// `lambda params: body`
    Lambda { params: ParamRange, body: ExprId },

    /// `[a, b]`
    List(ExprRange),

    /// `(a, b)` or bare `a, b`
    Tuple(ExprRange),

    /// `{a, b}`
    Set(ExprRange),

    /// `{k: v}`; `keys` and `values` have equal length
    Dict { keys: ExprRange, values: ExprRange },

    /// `[elt for ...]`
    ListComp {
        elt: ExprId,
        generators: ComprehensionRange,
    },

    /// `{elt for ...}`
    SetComp {
        elt: ExprId,
        generators: ComprehensionRange,
    },

    /// `{key: value for ...}`
    DictComp {
        key: ExprId,
        value: ExprId,
        generators: ComprehensionRange,
    },

    /// `(elt for ...)`
    Generator {
        elt: ExprId,
        generators: ComprehensionRange,
    },
}

/// Keyword argument in a call: `name=value`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Keyword {
    pub arg: Name,
    pub value: ExprId,
    pub span: Span,
}

/// An identifier in binding position (function name, parameter, `as` name).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
}

impl Ident {
    /// Absent identifier (e.g. a bare `except:` clause).
    pub const EMPTY: Ident = Ident {
        name: Name::EMPTY,
        span: Span::DUMMY,
    };

    pub fn is_empty(self) -> bool {
        self.name.is_empty()
    }
}

/// Parameter of a `def` or `lambda`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Ident,
    /// `ExprId::INVALID` = no default.
    pub default: ExprId,
}

/// One `for target in iter if cond...` clause of a comprehension.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comprehension {
    pub target: ExprId,
    pub iter: ExprId,
    pub ifs: ExprRange,
}
