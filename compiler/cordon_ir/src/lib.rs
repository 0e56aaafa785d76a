//! Cordon IR - syntax tree types shared by the parser, the guard and the
//! interpreter.
//!
//! This crate contains:
//! - Spans and line/column lookup for diagnostics
//! - The evaluation [`Mode`] a source is parsed under
//! - The arena-allocated syntax tree ([`SyntaxTree`], [`ExprArena`])
//! - [`NodeKind`] labels used when reporting rejected constructs
//!
//! # Design
//!
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId`/`StmtId`
//!   indices into the arena, lists are ranges into side tables.
//! - **Intern per tree**: identifiers and string literals are stored once in
//!   the tree's [`NameTable`] and referenced by [`Name`].
//! - A finished [`SyntaxTree`] is immutable and `Send + Sync`, so a compiled
//!   expression can be shared across threads and evaluated repeatedly.

mod arena;
pub mod ast;
mod mode;
mod name;
mod span;
mod stack;
mod tree;

pub use arena::ExprArena;
pub use ast::{
    AliasRange, BinaryOp, BoolOp, CmpOp, CmpOpRange, Comprehension, ComprehensionRange,
    ExceptHandler, Expr, ExprId, ExprKind, ExprRange, HandlerRange, Ident, IdentRange,
    ImportAlias, Keyword, KeywordRange, NodeKind, Param, ParamRange, Stmt, StmtId, StmtKind,
    StmtRange, UnaryOp,
};
pub use mode::Mode;
pub use name::{Name, NameTable};
pub use span::{LineCol, Span};
pub use stack::ensure_sufficient_stack;
pub use tree::{Root, SyntaxTree};
