use qx_core::ast::*;
use qx_optimize::collect_parameters;
use std::sync::Arc;

pub fn assert_constant(expr: &Expr, expected: Value) {
    match expr.as_constant() {
        Some(value) => assert_eq!(value, &expected, "in {expr}"),
        None => panic!("expected a constant, found {expr}"),
    }
}

/// The rewritten tree references exactly the same parameter nodes.
pub fn assert_parameters_preserved(before: &BExpr, after: &BExpr) {
    let before = collect_parameters(before);
    let after = collect_parameters(after);
    assert_eq!(before.len(), after.len(), "parameter count changed");
    for (old, new) in before.iter().zip(&after) {
        assert!(Arc::ptr_eq(old, new), "parameter {old} was replaced by {new}");
    }
}
