//! Parser tests.
//!
//! - `expr`: expression precedence, displays, comprehensions, trailers
//! - `stmt`: statement forms and blocks
//! - `errors`: rejected sources and their messages
//! - `properties`: proptest checks that parsing never panics

mod expr;

use cordon_ir::{ExprArena, ExprId, ExprKind, Mode, Root, StmtId, StmtKind, SyntaxTree};

use crate::parse;

fn parse_expr(source: &str) -> SyntaxTree {
    parse(source, Mode::Expression).unwrap()
}

fn parse_stmts(source: &str) -> SyntaxTree {
    parse(source, Mode::Statements).unwrap()
}

/// Render an expression source as an s-expression.
fn sexpr(source: &str) -> String {
    let tree = parse_expr(source);
    let Root::Expression(root) = tree.root() else {
        panic!("expected expression root");
    };
    render_expr(tree.arena(), root)
}

/// Render a statement source, one statement per line.
fn render_stmts(source: &str) -> String {
    let tree = parse_stmts(source);
    let Root::Statements(body) = tree.root() else {
        panic!("expected statement root");
    };
    let arena = tree.arena();
    arena
        .stmt_list(body)
        .iter()
        .map(|&s| render_stmt(arena, s))
        .collect::<Vec<_>>()
        .join("\n")
}

fn list(arena: &ExprArena, ids: &[ExprId]) -> String {
    ids.iter()
        .map(|&id| render_expr(arena, id))
        .collect::<Vec<_>>()
        .join(" ")
}

fn opt(arena: &ExprArena, id: ExprId) -> String {
    id.get().map_or_else(|| "_".to_owned(), |id| render_expr(arena, id))
}

fn render_expr(arena: &ExprArena, id: ExprId) -> String {
    match arena.expr(id).kind {
        ExprKind::Int(v) => v.to_string(),
        ExprKind::Float(bits) => format!("{:?}", f64::from_bits(bits)),
        ExprKind::Str(name) => format!("{:?}", arena.name(name)),
        ExprKind::Name(name) => arena.name(name).to_owned(),
        ExprKind::Attribute { value, attr } => {
            format!("(. {} {})", render_expr(arena, value), arena.name(attr))
        }
        ExprKind::Subscript { value, index } => format!(
            "([] {} {})",
            render_expr(arena, value),
            render_expr(arena, index)
        ),
        ExprKind::Slice { lower, upper, step } => format!(
            "(: {} {} {})",
            opt(arena, lower),
            opt(arena, upper),
            opt(arena, step)
        ),
        ExprKind::Call {
            func,
            args,
            keywords,
        } => {
            let mut parts = vec![render_expr(arena, func)];
            parts.extend(arena.expr_list(args).iter().map(|&a| render_expr(arena, a)));
            parts.extend(arena.keywords(keywords).iter().map(|k| {
                format!("{}={}", arena.name(k.arg), render_expr(arena, k.value))
            }));
            format!("(call {})", parts.join(" "))
        }
        ExprKind::Unary { op, operand } => {
            format!("({} {})", op.as_symbol(), render_expr(arena, operand))
        }
        ExprKind::Binary { op, left, right } => format!(
            "({} {} {})",
            op.as_symbol(),
            render_expr(arena, left),
            render_expr(arena, right)
        ),
        ExprKind::BoolOp { op, values } => {
            let op = match op {
                cordon_ir::BoolOp::And => "and",
                cordon_ir::BoolOp::Or => "or",
            };
            format!("({op} {})", list(arena, arena.expr_list(values)))
        }
        ExprKind::Compare {
            left,
            ops,
            comparators,
        } => {
            let mut parts = vec![render_expr(arena, left)];
            for (op, &c) in arena.cmp_ops(ops).iter().zip(arena.expr_list(comparators)) {
                parts.push(op.as_symbol().to_owned());
                parts.push(render_expr(arena, c));
            }
            format!("(cmp {})", parts.join(" "))
        }
        ExprKind::IfExp { test, body, orelse } => format!(
            "(if {} {} {})",
            render_expr(arena, test),
            render_expr(arena, body),
            render_expr(arena, orelse)
        ),
        ExprKind::Lambda { params, body } => {
            let params: Vec<String> = arena
                .params(params)
                .iter()
                .map(|p| match p.default.get() {
                    Some(d) => format!("{}={}", arena.name(p.name.name), render_expr(arena, d)),
                    None => arena.name(p.name.name).to_owned(),
                })
                .collect();
            format!("(lambda [{}] {})", params.join(" "), render_expr(arena, body))
        }
        ExprKind::List(items) => format!("[{}]", list(arena, arena.expr_list(items))),
        ExprKind::Tuple(items) => format!("(tuple {})", list(arena, arena.expr_list(items))),
        ExprKind::Set(items) => format!("{{{}}}", list(arena, arena.expr_list(items))),
        ExprKind::Dict { keys, values } => {
            let pairs: Vec<String> = arena
                .expr_list(keys)
                .iter()
                .zip(arena.expr_list(values))
                .map(|(&k, &v)| format!("{}:{}", render_expr(arena, k), render_expr(arena, v)))
                .collect();
            format!("{{{}}}", pairs.join(" "))
        }
        ExprKind::ListComp { elt, generators } => {
            format!("(listcomp {}{})", render_expr(arena, elt), gens(arena, generators))
        }
        ExprKind::SetComp { elt, generators } => {
            format!("(setcomp {}{})", render_expr(arena, elt), gens(arena, generators))
        }
        ExprKind::Generator { elt, generators } => {
            format!("(genexp {}{})", render_expr(arena, elt), gens(arena, generators))
        }
        ExprKind::DictComp {
            key,
            value,
            generators,
        } => format!(
            "(dictcomp {}:{}{})",
            render_expr(arena, key),
            render_expr(arena, value),
            gens(arena, generators)
        ),
    }
}

fn gens(arena: &ExprArena, range: cordon_ir::ComprehensionRange) -> String {
    arena
        .comprehensions(range)
        .iter()
        .map(|c| {
            let mut out = format!(
                " for {} in {}",
                render_expr(arena, c.target),
                render_expr(arena, c.iter)
            );
            for &cond in arena.expr_list(c.ifs) {
                out.push_str(&format!(" if {}", render_expr(arena, cond)));
            }
            out
        })
        .collect()
}

fn block(arena: &ExprArena, range: cordon_ir::StmtRange) -> String {
    let inner: Vec<String> = arena
        .stmt_list(range)
        .iter()
        .map(|&s| render_stmt(arena, s))
        .collect();
    format!("{{{}}}", inner.join("; "))
}

fn render_stmt(arena: &ExprArena, id: StmtId) -> String {
    match arena.stmt(id).kind {
        StmtKind::Expr(e) => render_expr(arena, e),
        StmtKind::Assign { targets, value } => format!(
            "(= {} {})",
            list(arena, arena.expr_list(targets)),
            render_expr(arena, value)
        ),
        StmtKind::AugAssign { target, op, value } => format!(
            "({}= {} {})",
            op.as_symbol(),
            render_expr(arena, target),
            render_expr(arena, value)
        ),
        StmtKind::Pass => "pass".to_owned(),
        StmtKind::Break => "break".to_owned(),
        StmtKind::Continue => "continue".to_owned(),
        StmtKind::If { test, body, orelse } => format!(
            "(if {} {} {})",
            render_expr(arena, test),
            block(arena, body),
            block(arena, orelse)
        ),
        StmtKind::While { test, body } => {
            format!("(while {} {})", render_expr(arena, test), block(arena, body))
        }
        StmtKind::For { target, iter, body } => format!(
            "(for {} {} {})",
            render_expr(arena, target),
            render_expr(arena, iter),
            block(arena, body)
        ),
        StmtKind::FunctionDef { name, params, body } => {
            let params: Vec<&str> = arena
                .params(params)
                .iter()
                .map(|p| arena.name(p.name.name))
                .collect();
            format!(
                "(def {} [{}] {})",
                arena.name(name.name),
                params.join(" "),
                block(arena, body)
            )
        }
        StmtKind::Return(value) => format!("(return {})", opt(arena, value)),
        StmtKind::Delete(targets) => format!("(del {})", list(arena, arena.expr_list(targets))),
        StmtKind::Assert { test, msg } => {
            format!("(assert {} {})", render_expr(arena, test), opt(arena, msg))
        }
        StmtKind::Raise(exc) => format!("(raise {})", opt(arena, exc)),
        StmtKind::Try {
            body,
            handlers,
            finalbody,
        } => {
            let handlers: Vec<String> = arena
                .handlers(handlers)
                .iter()
                .map(|h| {
                    format!(
                        "(except {} {} {})",
                        opt(arena, h.ty),
                        if h.name.is_empty() { "_" } else { arena.name(h.name.name) },
                        block(arena, h.body)
                    )
                })
                .collect();
            format!(
                "(try {} {} {})",
                block(arena, body),
                handlers.join(" "),
                block(arena, finalbody)
            )
        }
        StmtKind::Import(aliases) => {
            let parts: Vec<String> = arena.aliases(aliases).iter().map(|a| alias(arena, a)).collect();
            format!("(import {})", parts.join(" "))
        }
        StmtKind::ImportFrom {
            module,
            names,
            level,
        } => {
            let parts: Vec<String> = arena.aliases(names).iter().map(|a| alias(arena, a)).collect();
            format!(
                "(from {}{} {})",
                ".".repeat(level as usize),
                arena.name(module),
                parts.join(" ")
            )
        }
        StmtKind::Global(names) => {
            let names: Vec<&str> = arena.idents(names).iter().map(|i| arena.name(i.name)).collect();
            format!("(global {})", names.join(" "))
        }
        StmtKind::Exec {
            body,
            globals,
            locals,
        } => format!(
            "(exec {} {} {})",
            render_expr(arena, body),
            opt(arena, globals),
            opt(arena, locals)
        ),
    }
}

fn alias(arena: &ExprArena, alias: &cordon_ir::ImportAlias) -> String {
    if alias.asname.is_empty() {
        arena.name(alias.path).to_owned()
    } else {
        format!("{}>{}", arena.name(alias.path), arena.name(alias.asname))
    }
}
