//! Descriptive node-kind labels.
//!
//! Diagnostics name the category of a rejected construct rather than its
//! full contents; `NodeKind` is that category, independent of child data.

use std::fmt;

use super::expr::ExprKind;
use super::stmt::StmtKind;

/// Category of a syntax tree node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeKind {
    // Statements
    ExprStmt,
    Assign,
    AugAssign,
    Pass,
    Break,
    Continue,
    If,
    While,
    For,
    FunctionDef,
    Return,
    Delete,
    Assert,
    Raise,
    Try,
    Import,
    ImportFrom,
    Global,
    Exec,

    // Expressions
    Int,
    Float,
    Str,
    Name,
    Attribute,
    Subscript,
    Slice,
    Call,
    UnaryOp,
    BinOp,
    BoolOp,
    Compare,
    IfExp,
    Lambda,
    List,
    Tuple,
    Set,
    Dict,
    ListComp,
    SetComp,
    DictComp,
    Generator,
}

impl NodeKind {
    /// Label used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExprStmt => "Expr",
            Self::Assign => "Assign",
            Self::AugAssign => "AugAssign",
            Self::Pass => "Pass",
            Self::Break => "Break",
            Self::Continue => "Continue",
            Self::If => "If",
            Self::While => "While",
            Self::For => "For",
            Self::FunctionDef => "FunctionDef",
            Self::Return => "Return",
            Self::Delete => "Delete",
            Self::Assert => "Assert",
            Self::Raise => "Raise",
            Self::Try => "Try",
            Self::Import => "Import",
            Self::ImportFrom => "ImportFrom",
            Self::Global => "Global",
            Self::Exec => "Exec",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Str => "Str",
            Self::Name => "Name",
            Self::Attribute => "Attribute",
            Self::Subscript => "Subscript",
            Self::Slice => "Slice",
            Self::Call => "Call",
            Self::UnaryOp => "UnaryOp",
            Self::BinOp => "BinOp",
            Self::BoolOp => "BoolOp",
            Self::Compare => "Compare",
            Self::IfExp => "IfExp",
            Self::Lambda => "Lambda",
            Self::List => "List",
            Self::Tuple => "Tuple",
            Self::Set => "Set",
            Self::Dict => "Dict",
            Self::ListComp => "ListComp",
            Self::SetComp => "SetComp",
            Self::DictComp => "DictComp",
            Self::Generator => "GeneratorExp",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExprKind {
    pub const fn node_kind(&self) -> NodeKind {
        match self {
            Self::Int(_) => NodeKind::Int,
            Self::Float(_) => NodeKind::Float,
            Self::Str(_) => NodeKind::Str,
            Self::Name(_) => NodeKind::Name,
            Self::Attribute { .. } => NodeKind::Attribute,
            Self::Subscript { .. } => NodeKind::Subscript,
            Self::Slice { .. } => NodeKind::Slice,
            Self::Call { .. } => NodeKind::Call,
            Self::Unary { .. } => NodeKind::UnaryOp,
            Self::Binary { .. } => NodeKind::BinOp,
            Self::BoolOp { .. } => NodeKind::BoolOp,
            Self::Compare { .. } => NodeKind::Compare,
            Self::IfExp { .. } => NodeKind::IfExp,
            Self::Lambda { .. } => NodeKind::Lambda,
            Self::List(_) => NodeKind::List,
            Self::Tuple(_) => NodeKind::Tuple,
            Self::Set(_) => NodeKind::Set,
            Self::Dict { .. } => NodeKind::Dict,
            Self::ListComp { .. } => NodeKind::ListComp,
            Self::SetComp { .. } => NodeKind::SetComp,
            Self::DictComp { .. } => NodeKind::DictComp,
            Self::Generator { .. } => NodeKind::Generator,
        }
    }
}

impl StmtKind {
    pub const fn node_kind(&self) -> NodeKind {
        match self {
            Self::Expr(_) => NodeKind::ExprStmt,
            Self::Assign { .. } => NodeKind::Assign,
            Self::AugAssign { .. } => NodeKind::AugAssign,
            Self::Pass => NodeKind::Pass,
            Self::Break => NodeKind::Break,
            Self::Continue => NodeKind::Continue,
            Self::If { .. } => NodeKind::If,
            Self::While { .. } => NodeKind::While,
            Self::For { .. } => NodeKind::For,
            Self::FunctionDef { .. } => NodeKind::FunctionDef,
            Self::Return(_) => NodeKind::Return,
            Self::Delete(_) => NodeKind::Delete,
            Self::Assert { .. } => NodeKind::Assert,
            Self::Raise(_) => NodeKind::Raise,
            Self::Try { .. } => NodeKind::Try,
            Self::Import(_) => NodeKind::Import,
            Self::ImportFrom { .. } => NodeKind::ImportFrom,
            Self::Global(_) => NodeKind::Global,
            Self::Exec { .. } => NodeKind::Exec,
        }
    }
}
