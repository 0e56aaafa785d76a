//! Expression arena.
//!
//! Owns every node of one syntax tree plus the side tables that list-valued
//! children point into. Nodes are only ever appended; once the parser hands
//! the arena to a [`SyntaxTree`](crate::SyntaxTree) it is read-only.

use crate::ast::{
    AliasRange, CmpOp, CmpOpRange, Comprehension, ComprehensionRange, ExceptHandler, Expr,
    ExprId, ExprRange, HandlerRange, Ident, IdentRange, ImportAlias, Keyword, KeywordRange,
    Param, ParamRange, Stmt, StmtId, StmtRange,
};
use crate::{Name, NameTable};

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

macro_rules! side_table {
    ($alloc:ident, $get:ident, $field:ident, $item:ty, $range:ident) => {
        /// Append a list to the side table and return its range.
        pub fn $alloc(&mut self, items: impl IntoIterator<Item = $item>) -> $range {
            let start = to_u32(self.$field.len());
            self.$field.extend(items);
            let len = to_u32(self.$field.len()) - start;
            $range::new(start, len)
        }

        /// Slice of a previously allocated list.
        #[inline]
        pub fn $get(&self, range: $range) -> &[$item] {
            &self.$field[range.as_range()]
        }
    };
}

/// Arena holding all nodes of one tree.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    params: Vec<Param>,
    keywords: Vec<Keyword>,
    cmp_ops: Vec<CmpOp>,
    comprehensions: Vec<Comprehension>,
    handlers: Vec<ExceptHandler>,
    aliases: Vec<ImportAlias>,
    idents: Vec<Ident>,
    names: NameTable,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression node.
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Allocate a statement node.
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len()));
        self.stmts.push(stmt);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics on `ExprId::INVALID` or an id from another arena.
    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get a statement by id.
    ///
    /// # Panics
    /// Panics on `StmtId::INVALID` or an id from another arena.
    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Number of expression nodes.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of statement nodes.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    side_table!(alloc_expr_list, expr_list, expr_lists, ExprId, ExprRange);
    side_table!(alloc_stmt_list, stmt_list, stmt_lists, StmtId, StmtRange);
    side_table!(alloc_params, params, params, Param, ParamRange);
    side_table!(alloc_keywords, keywords, keywords, Keyword, KeywordRange);
    side_table!(alloc_cmp_ops, cmp_ops, cmp_ops, CmpOp, CmpOpRange);
    side_table!(
        alloc_comprehensions,
        comprehensions,
        comprehensions,
        Comprehension,
        ComprehensionRange
    );
    side_table!(alloc_handlers, handlers, handlers, ExceptHandler, HandlerRange);
    side_table!(alloc_aliases, aliases, aliases, ImportAlias, AliasRange);
    side_table!(alloc_idents, idents, idents, Ident, IdentRange);

    /// Intern an identifier or string literal.
    pub fn intern(&mut self, text: &str) -> Name {
        self.names.intern(text)
    }

    /// Resolve an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &str {
        self.names.resolve(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
