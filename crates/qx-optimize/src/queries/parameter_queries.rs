use qx_core::ast::{BExpr, Expr, ExprKind};

/// Every parameter node of `expr` in pre-order, including the declarations
/// of lambdas.
pub fn collect_parameters(expr: &BExpr) -> Vec<BExpr> {
    let mut params = Vec::new();
    collect_into(expr, &mut params);
    params
}

fn collect_into(expr: &BExpr, params: &mut Vec<BExpr>) {
    if let ExprKind::Parameter(_) = expr.kind {
        params.push(expr.clone());
    }
    for child in expr.children() {
        collect_into(child, params);
    }
}

/// Whether the whole tree is closed under `predicate`, i.e. partial
/// evaluation would turn it into a single literal.
pub fn is_closed(expr: &Expr, predicate: &dyn Fn(&Expr) -> bool) -> bool {
    if let ExprKind::MemberInit(_) = expr.kind {
        return false;
    }
    expr.children()
        .into_iter()
        .all(|child| is_closed(child, predicate))
        && predicate(expr)
}
