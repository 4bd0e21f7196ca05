use crate::passes::partial_evaluate;
use qx_core::ast::{BExpr, Expr};
use qx_core::error::Result;

/// Canonical text of a tree; node identity plays no part. Parameter types
/// only show up in lambda headers, so key whole lambdas.
pub fn cache_key(expr: &Expr) -> String {
    expr.to_string()
}

/// Fold closed sub-trees first, so trees that differ only in how a captured
/// value was obtained share one key.
pub fn partial_cache_key(root: &BExpr) -> Result<String> {
    let folded = partial_evaluate(root)?;
    Ok(cache_key(&folded))
}
