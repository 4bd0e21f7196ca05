// OptimizePass trait - interface for tree-to-tree passes

use qx_core::ast::BExpr;
use qx_core::error::Result;

pub trait OptimizePass {
    fn name(&self) -> &str;

    /// Rewrite `expr`. Returning the input `Arc` means nothing changed.
    fn optimize_expr(&self, expr: BExpr) -> Result<BExpr> {
        Ok(expr)
    }
}

pub struct NoopPass;

impl OptimizePass for NoopPass {
    fn name(&self) -> &str {
        "noop"
    }
}

/// Run `passes` in order, feeding each one the previous result.
pub fn run_passes(passes: &[&dyn OptimizePass], expr: BExpr) -> Result<BExpr> {
    passes.iter().try_fold(expr, |expr, pass| {
        qx_core::trace!("running pass {}", pass.name());
        pass.optimize_expr(expr)
    })
}
