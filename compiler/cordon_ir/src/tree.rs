//! Parsed syntax tree.

use crate::{ExprArena, ExprId, Mode, StmtRange};

/// Entry point of a tree, matching the mode it was parsed under.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Root {
    /// Single-expression source.
    Expression(ExprId),
    /// Statement-sequence source.
    Statements(StmtRange),
}

/// A complete parsed source: its arena plus the root node.
///
/// Immutable after construction.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    arena: ExprArena,
    root: Root,
}

impl SyntaxTree {
    pub fn new(arena: ExprArena, root: Root) -> Self {
        SyntaxTree { arena, root }
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> Root {
        self.root
    }

    /// The mode this tree was parsed under.
    pub fn mode(&self) -> Mode {
        match self.root {
            Root::Expression(_) => Mode::Expression,
            Root::Statements(_) => Mode::Statements,
        }
    }
}
