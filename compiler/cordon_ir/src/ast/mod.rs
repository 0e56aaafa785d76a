//! Syntax tree node types.
//!
//! The tree mirrors the host language grammar: statements and expressions
//! are closed enums so consumers (the guard above all) match exhaustively and
//! a new node kind cannot slip past them unhandled.

mod expr;
mod ids;
mod node_kind;
mod operators;
mod ranges;
mod stmt;

pub use expr::{Comprehension, Expr, ExprKind, Ident, Keyword, Param};
pub use ids::{ExprId, StmtId};
pub use node_kind::NodeKind;
pub use operators::{BinaryOp, BoolOp, CmpOp, UnaryOp};
pub use ranges::{
    AliasRange, CmpOpRange, ComprehensionRange, ExprRange, HandlerRange, IdentRange,
    KeywordRange, ParamRange, StmtRange,
};
pub use stmt::{ExceptHandler, ImportAlias, Stmt, StmtKind};
