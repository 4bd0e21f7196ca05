//! Partial evaluation: replace every maximal closed sub-tree with a literal.
//!
//! Runs in two passes over one tree. The [`Nominator`] walks bottom-up and
//! records the collapse points; the [`SubtreeRewriter`] walks top-down,
//! evaluates each collapse point and rebuilds only the spine above it.
//! Object construction with member bindings is never folded, so a query
//! provider still sees the projection shape it has to translate.

mod nominate;
mod predicate;
mod rewrite;

pub use nominate::*;
pub use predicate::*;
pub use rewrite::*;

use crate::utils::OptimizePass;
use qx_core::ast::{BExpr, Expr};
use qx_core::error::Result;
use tracing::debug_span;

/// Fold closed sub-trees using [`is_locally_evaluable`].
pub fn partial_evaluate(root: &BExpr) -> Result<BExpr> {
    PartialEvaluator::default().evaluate(root)
}

/// Fold closed sub-trees using a caller-supplied predicate.
pub fn partial_evaluate_with(root: &BExpr, predicate: impl Fn(&Expr) -> bool) -> Result<BExpr> {
    PartialEvaluator::default().evaluate_with(root, predicate)
}

#[derive(Debug, Clone, Default)]
pub struct PartialEvaluator {
    pub options: PartialEvalOptions,
}

impl PartialEvaluator {
    pub fn new(options: PartialEvalOptions) -> Self {
        Self { options }
    }

    pub fn evaluate(&self, root: &BExpr) -> Result<BExpr> {
        self.evaluate_with(root, |expr| self.options.is_locally_evaluable(expr))
    }

    pub fn evaluate_with(&self, root: &BExpr, predicate: impl Fn(&Expr) -> bool) -> Result<BExpr> {
        let span = debug_span!("partial_evaluate", root = %root.id);
        let _enter = span.enter();

        let candidates = Nominator::new(&predicate, self.options.max_depth).nominate(root)?;
        qx_core::debug!("nominated {} collapse point(s)", candidates.len());
        if candidates.is_empty() {
            return Ok(root.clone());
        }
        SubtreeRewriter::new(&candidates, self.options.max_depth).rewrite(root)
    }
}

/// [`PartialEvaluator`] as a step of a pass pipeline.
#[derive(Debug, Clone, Default)]
pub struct PartialEvalPass {
    evaluator: PartialEvaluator,
}

impl PartialEvalPass {
    pub fn new(options: PartialEvalOptions) -> Self {
        Self {
            evaluator: PartialEvaluator::new(options),
        }
    }
}

impl OptimizePass for PartialEvalPass {
    fn name(&self) -> &str {
        "partial_eval"
    }

    fn optimize_expr(&self, expr: BExpr) -> Result<BExpr> {
        self.evaluator.evaluate(&expr)
    }
}
