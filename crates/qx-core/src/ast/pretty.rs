//! Canonical text form of expression trees.
//!
//! The rendering is deterministic and never depends on node identity.
//! Integer literal nodes carry their width (`6i32`), but integers nested in
//! struct or list constants do not, and parameter types are only written in
//! lambda headers. Render whole lambdas when the text is used as a cache
//! key, so every parameter appears with its declared type.

use crate::ast::{Expr, ExprKind, ExprLambda, Value};
use crate::ops::UnOpKind;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Parameter(param) => write!(f, "{}", param.name),
            ExprKind::Constant(constant) => match &constant.value {
                Value::Int(i) => write!(f, "{}{}", i.value, self.ty),
                other => write!(f, "{}", other),
            },
            ExprKind::Member(member) => write!(f, "{}.{}", member.object, member.member),
            ExprKind::MethodCall(call) => {
                if let Some(receiver) = &call.receiver {
                    write!(f, "{}.", receiver)?;
                }
                write!(f, "{}({})", call.method.name, call.args.iter().join(", "))
            }
            ExprKind::Binary(binary) => {
                write!(f, "({} {} {})", binary.lhs, binary.op, binary.rhs)
            }
            ExprKind::Unary(unary) => match unary.op {
                UnOpKind::Convert => write!(f, "({} as {})", unary.operand, self.ty),
                op => write!(f, "{}{}", op, unary.operand),
            },
            ExprKind::Conditional(cond) => {
                write!(f, "({} ? {} : {})", cond.cond, cond.then, cond.elze)
            }
            ExprKind::New(new) => write!(f, "new {}({})", self.ty, new.args.iter().join(", ")),
            ExprKind::MemberInit(init) => {
                let bindings = init
                    .bindings
                    .iter()
                    .map(|binding| format!("{} = {}", binding.member, binding.value))
                    .join(", ");
                write!(f, "{} {{ {} }}", init.new, bindings)
            }
            ExprKind::Lambda(lambda) => write!(f, "{}", lambda),
        }
    }
}

impl Display for ExprLambda {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(|param| format!("{}: {}", param, param.ty))
            .join(", ");
        write!(f, "|{}| {}", params, self.body)
    }
}
