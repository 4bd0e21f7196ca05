use qx_core::ast::{Expr, ExprKind};
use qx_core::config::max_expr_depth;
use qx_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default evaluability predicate: everything except parameter references
/// and deferred query sources.
pub fn is_locally_evaluable(expr: &Expr) -> bool {
    !matches!(expr.kind, ExprKind::Parameter(_)) && !expr.ty.is_queryable()
}

/// Tuning knobs for [`PartialEvaluator`](super::PartialEvaluator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialEvalOptions {
    /// Fold calls of builtin functions
    pub fold_method_calls: bool,
    /// Fold member reads, e.g. captured closure fields
    pub fold_member_access: bool,
    /// Fold `new T(..)` without member bindings
    pub fold_constructors: bool,
    pub max_depth: usize,
}

impl Default for PartialEvalOptions {
    fn default() -> Self {
        Self {
            fold_method_calls: true,
            fold_member_access: true,
            fold_constructors: true,
            max_depth: max_expr_depth(),
        }
    }
}

impl PartialEvalOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        if options.max_depth == 0 {
            return Err(Error::Config("max_depth must be greater than 0".to_string()));
        }
        Ok(options)
    }

    /// The default predicate narrowed by the `fold_*` switches.
    pub fn is_locally_evaluable(&self, expr: &Expr) -> bool {
        if !is_locally_evaluable(expr) {
            return false;
        }
        match &expr.kind {
            ExprKind::MethodCall(_) => self.fold_method_calls,
            ExprKind::Member(_) => self.fold_member_access,
            ExprKind::New(_) => self.fold_constructors,
            _ => true,
        }
    }
}
