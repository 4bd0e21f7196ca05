use super::CandidateSet;
use crate::error::check_depth;
use crate::orchestrators::Interpreter;
use itertools::Itertools;
use qx_core::ast::*;
use qx_core::error::Result;
use std::sync::Arc;

/// Top-down pass that replaces every nominated sub-tree by its value.
pub struct SubtreeRewriter<'a> {
    candidates: &'a CandidateSet,
    interpreter: Interpreter,
    max_depth: usize,
}

impl<'a> SubtreeRewriter<'a> {
    pub fn new(candidates: &'a CandidateSet, max_depth: usize) -> Self {
        Self {
            candidates,
            interpreter: Interpreter::new(max_depth),
            max_depth,
        }
    }

    pub fn rewrite(&self, expr: &BExpr) -> Result<BExpr> {
        self.rewrite_expr(expr, 0)
    }

    fn rewrite_expr(&self, expr: &BExpr, depth: usize) -> Result<BExpr> {
        check_depth(depth, self.max_depth)?;
        if self.candidates.contains(expr) {
            return self.collapse(expr);
        }
        // one small frame per kind keeps deep spines within the thread stack
        let kind = match &expr.kind {
            ExprKind::Parameter(_) | ExprKind::Constant(_) | ExprKind::MemberInit(_) => None,
            ExprKind::Member(member) => self.rewrite_member(member, depth)?,
            ExprKind::MethodCall(call) => self.rewrite_call(call, depth)?,
            ExprKind::Binary(binary) => self.rewrite_binary(binary, depth)?,
            ExprKind::Unary(unary) => self.rewrite_unary(unary, depth)?,
            ExprKind::Conditional(cond) => self.rewrite_conditional(cond, depth)?,
            ExprKind::New(new) => self
                .rewrite_all(&new.args, depth)?
                .map(|args| ExprKind::from(ExprNew { args })),
            ExprKind::Lambda(lambda) => self.rewrite_lambda(lambda, depth)?,
        };
        Ok(match kind {
            Some(kind) => Arc::new(expr.with_kind(kind)),
            None => expr.clone(),
        })
    }

    #[inline(never)]
    fn rewrite_member(&self, member: &ExprMember, depth: usize) -> Result<Option<ExprKind>> {
        Ok(self.rewrite_child(&member.object, depth)?.map(|object| {
            ExprKind::from(ExprMember {
                object,
                member: member.member.clone(),
            })
        }))
    }

    #[inline(never)]
    fn rewrite_call(&self, call: &ExprMethodCall, depth: usize) -> Result<Option<ExprKind>> {
        let receiver = match &call.receiver {
            Some(receiver) => Some(self.rewrite_expr(receiver, depth + 1)?),
            None => None,
        };
        let args = self.rewrite_all(&call.args, depth)?;
        let receiver_changed = match (&receiver, &call.receiver) {
            (Some(new), Some(old)) => !Arc::ptr_eq(new, old),
            _ => false,
        };
        if !receiver_changed && args.is_none() {
            return Ok(None);
        }
        Ok(Some(ExprKind::from(ExprMethodCall {
            receiver,
            method: call.method.clone(),
            args: args.unwrap_or_else(|| call.args.clone()),
        })))
    }

    #[inline(never)]
    fn rewrite_binary(&self, binary: &ExprBinary, depth: usize) -> Result<Option<ExprKind>> {
        let lhs = self.rewrite_expr(&binary.lhs, depth + 1)?;
        let rhs = self.rewrite_expr(&binary.rhs, depth + 1)?;
        let changed = !Arc::ptr_eq(&lhs, &binary.lhs) || !Arc::ptr_eq(&rhs, &binary.rhs);
        Ok(changed.then(|| {
            ExprKind::from(ExprBinary {
                op: binary.op,
                lhs,
                rhs,
            })
        }))
    }

    #[inline(never)]
    fn rewrite_unary(&self, unary: &ExprUnary, depth: usize) -> Result<Option<ExprKind>> {
        Ok(self.rewrite_child(&unary.operand, depth)?.map(|operand| {
            ExprKind::from(ExprUnary {
                op: unary.op,
                operand,
            })
        }))
    }

    #[inline(never)]
    fn rewrite_conditional(
        &self,
        node: &ExprConditional,
        depth: usize,
    ) -> Result<Option<ExprKind>> {
        let cond = self.rewrite_expr(&node.cond, depth + 1)?;
        let then = self.rewrite_expr(&node.then, depth + 1)?;
        let elze = self.rewrite_expr(&node.elze, depth + 1)?;
        let unchanged = Arc::ptr_eq(&cond, &node.cond)
            && Arc::ptr_eq(&then, &node.then)
            && Arc::ptr_eq(&elze, &node.elze);
        Ok((!unchanged).then(|| ExprKind::from(ExprConditional { cond, then, elze })))
    }

    #[inline(never)]
    fn rewrite_lambda(&self, lambda: &ExprLambda, depth: usize) -> Result<Option<ExprKind>> {
        Ok(self.rewrite_child(&lambda.body, depth)?.map(|body| {
            ExprKind::from(ExprLambda {
                params: lambda.params.clone(),
                body,
            })
        }))
    }

    /// `Some` only when the child was replaced.
    fn rewrite_child(&self, child: &BExpr, depth: usize) -> Result<Option<BExpr>> {
        let new = self.rewrite_expr(child, depth + 1)?;
        Ok((!Arc::ptr_eq(&new, child)).then_some(new))
    }

    /// `Some` only when at least one element was replaced.
    fn rewrite_all(&self, exprs: &[BExpr], depth: usize) -> Result<Option<Vec<BExpr>>> {
        let rewritten: Vec<BExpr> = exprs
            .iter()
            .map(|expr| self.rewrite_expr(expr, depth + 1))
            .try_collect()?;
        let changed = exprs
            .iter()
            .zip(&rewritten)
            .any(|(old, new)| !Arc::ptr_eq(old, new));
        Ok(changed.then_some(rewritten))
    }

    fn collapse(&self, expr: &BExpr) -> Result<BExpr> {
        if let ExprKind::Constant(_) = expr.kind {
            return Ok(expr.clone());
        }
        let value = self.interpreter.evaluate_closed(expr)?;
        Ok(Expr::constant(value, expr.ty.clone()))
    }
}
