//! Direct interpreter for closed expression trees.
//!
//! Supported subset: parameter reads, literals, member reads on object
//! values, calls of pure builtin functions, arithmetic/comparison/logical
//! operators, conversions, conditionals, object construction and lambdas.
//! There are no statements, loops or assignments.

mod expressions;
mod invoke;

use crate::error::{builtin_failure, check_depth, type_mismatch};
use qx_core::ast::*;
use qx_core::config::max_expr_depth;
use qx_core::error::{EvaluationFault, Result};
use qx_core::id::Ident;
use qx_core::ops::{BinOpKind, UnOpKind};

/// Lexical bindings visible while evaluating a lambda body.
#[derive(Debug, Default)]
pub struct Env<'a> {
    parent: Option<&'a Env<'a>>,
    bindings: Vec<ValueField>,
}

impl<'a> Env<'a> {
    pub fn new(bindings: Vec<ValueField>) -> Self {
        Self {
            parent: None,
            bindings,
        }
    }

    pub fn child(&'a self, bindings: Vec<ValueField>) -> Env<'a> {
        Env {
            parent: Some(self),
            bindings,
        }
    }

    pub fn lookup(&self, name: &Ident) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find(|field| &field.name == name)
            .map(|field| &field.value)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }

    /// All visible bindings, inner scopes shadowing outer ones.
    pub fn flatten(&self) -> Vec<ValueField> {
        let mut visible = self
            .parent
            .map(|parent| parent.flatten())
            .unwrap_or_default();
        for field in &self.bindings {
            visible.retain(|existing| existing.name != field.name);
            visible.push(field.clone());
        }
        visible
    }
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    max_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(max_expr_depth())
    }
}

impl Interpreter {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Evaluate a tree with no bound parameters.
    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        self.interpret_expr(expr, &Env::default(), 0)
    }

    /// Wrap `expr` in a parameterless lambda and invoke it.
    pub fn evaluate_closed(&self, expr: &BExpr) -> Result<Value> {
        let thunk = ValueClosure {
            lambda: ExprLambda::thunk(expr.clone()),
            captured: Vec::new(),
        };
        self.invoke(&thunk, Vec::new())
    }

    /// Call a closure value with positional arguments.
    pub fn invoke(&self, closure: &ValueClosure, args: Vec<Value>) -> Result<Value> {
        let names: Vec<&Ident> = closure.lambda.param_names().collect();
        crate::fault_ensure!(
            names.len() == args.len(),
            EvaluationFault::Arity {
                expected: names.len(),
                found: args.len(),
            }
        );
        let captured = Env::new(closure.captured.clone());
        let bindings = names
            .into_iter()
            .zip(args)
            .map(|(name, value)| ValueField::new(name.clone(), value))
            .collect();
        let env = captured.child(bindings);
        self.interpret_expr(&closure.lambda.body, &env, 0)
    }

    /// Evaluate a lambda node to a closure and call it.
    pub fn invoke_lambda(&self, lambda: &Expr, args: Vec<Value>) -> Result<Value> {
        match self.evaluate(lambda)? {
            Value::Closure(closure) => self.invoke(&closure, args),
            other => Err(type_mismatch("call", other.kind_name())),
        }
    }

    pub fn interpret_expr(&self, expr: &Expr, env: &Env, depth: usize) -> Result<Value> {
        check_depth(depth, self.max_depth)?;
        match &expr.kind {
            ExprKind::Parameter(param) => env.lookup(&param.name).cloned().ok_or_else(|| {
                EvaluationFault::UnboundParameter {
                    name: param.name.clone(),
                }
                .into()
            }),
            ExprKind::Constant(constant) => Ok(constant.value.clone()),
            ExprKind::Member(member) => {
                let object = self.interpret_expr(&member.object, env, depth + 1)?;
                self.interpret_member(object, &member.member)
            }
            ExprKind::MethodCall(call) => self.interpret_call(&expr.ty, call, env, depth),
            ExprKind::Binary(binary) => self.interpret_binary(&expr.ty, binary, env, depth),
            ExprKind::Unary(unary) => self.interpret_unary(&expr.ty, unary, env, depth),
            ExprKind::Conditional(cond) => self.interpret_conditional(cond, env, depth),
            ExprKind::New(new) => self.interpret_new(&expr.ty, new, env, depth),
            ExprKind::MemberInit(init) => self.interpret_member_init(init, env, depth),
            ExprKind::Lambda(lambda) => Ok(Value::Closure(ValueClosure {
                lambda: lambda.clone(),
                captured: env.flatten(),
            })),
        }
    }
}

/// Range-check an integer result against the width of `ty`.
fn fit_integer(op: &str, ty: &Ty, value: Option<i64>) -> Result<Value> {
    let (lo, hi) = ty.integer_bounds().unwrap_or((i64::MIN, i64::MAX));
    match value {
        Some(v) if (lo..=hi).contains(&v) => Ok(Value::int(v)),
        _ => Err(EvaluationFault::Overflow {
            op: op.to_string(),
            ty: ty.clone(),
        }
        .into()),
    }
}
