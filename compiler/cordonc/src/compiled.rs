//! Compiled, executable sources.

use std::sync::Arc;

use cordon_eval::{Environment, EvalResult, Interpreter};
use cordon_ir::{Mode, SyntaxTree};

use crate::source::ExpressionSource;

/// A parsed (and, unless compiled as trusted, vetted) source.
///
/// Holds no bindings. Run it as often as needed, each time against a
/// caller-supplied [`Environment`]. `Send + Sync`, so one compiled
/// expression can serve many threads; each run still happens on one.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    source: ExpressionSource,
    tree: Arc<SyntaxTree>,
    vetted: bool,
}

impl CompiledExpression {
    pub(crate) fn new(source: ExpressionSource, tree: Arc<SyntaxTree>, vetted: bool) -> Self {
        CompiledExpression {
            source,
            tree,
            vetted,
        }
    }

    pub fn source(&self) -> &ExpressionSource {
        &self.source
    }

    pub fn mode(&self) -> Mode {
        self.source.mode()
    }

    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    /// Whether the guard approved this source (false on the trusted path).
    pub fn is_vetted(&self) -> bool {
        self.vetted
    }

    /// Run with a default interpreter.
    ///
    /// An expression yields its value; statements yield `None` and leave
    /// their bindings in `env`.
    pub fn eval(&self, env: &Environment) -> EvalResult {
        self.eval_with(&mut Interpreter::default(), env)
    }

    /// Run on a caller-configured interpreter (print handler, depth limit).
    pub fn eval_with(&self, interp: &mut Interpreter, env: &Environment) -> EvalResult {
        interp.run(&self.tree, env)
    }
}
