use crate::ast::{Ty, Value};
use crate::id::{ExprId, Ident};
use crate::ops::{BinOpKind, BuiltinFn, UnOpKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod value;

pub use value::*;

/// Children are shared: an unchanged sub-tree is reused, never copied.
pub type BExpr = Arc<Expr>;

common_enum! {
    /// Expr is a typed node of a query predicate or projection tree
    pub enum ExprKind {
        Parameter(ExprParameter),
        Constant(ExprConstant),
        Member(ExprMember),
        MethodCall(ExprMethodCall),
        Binary(ExprBinary),
        Unary(ExprUnary),
        Conditional(ExprConditional),
        New(ExprNew),
        MemberInit(ExprMemberInit),
        Lambda(ExprLambda),
    }
}

impl ExprKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Parameter(_) => "Parameter",
            ExprKind::Constant(_) => "Constant",
            ExprKind::Member(_) => "Member",
            ExprKind::MethodCall(_) => "MethodCall",
            ExprKind::Binary(_) => "Binary",
            ExprKind::Unary(_) => "Unary",
            ExprKind::Conditional(_) => "Conditional",
            ExprKind::New(_) => "New",
            ExprKind::MemberInit(_) => "MemberInit",
            ExprKind::Lambda(_) => "Lambda",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    #[serde(skip, default = "ExprId::fresh")]
    pub id: ExprId,
    pub ty: Ty,
    #[serde(flatten)]
    pub kind: ExprKind,
}

// Identity is not compared: two trees are equal when they have the
// same shape, types and values.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.kind == other.kind
    }
}

impl Expr {
    pub fn new(ty: Ty, kind: impl Into<ExprKind>) -> Self {
        Self {
            id: ExprId::fresh(),
            ty,
            kind: kind.into(),
        }
    }

    /// A new node of the same static type with a different payload.
    pub fn with_kind(&self, kind: impl Into<ExprKind>) -> Self {
        Self::new(self.ty.clone(), kind)
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Constant(constant) => Some(&constant.value),
            _ => None,
        }
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<&BExpr> {
        match &self.kind {
            ExprKind::Parameter(_) | ExprKind::Constant(_) => Vec::new(),
            ExprKind::Member(member) => vec![&member.object],
            ExprKind::MethodCall(call) => call.operands().collect(),
            ExprKind::Binary(binary) => vec![&binary.lhs, &binary.rhs],
            ExprKind::Unary(unary) => vec![&unary.operand],
            ExprKind::Conditional(cond) => vec![&cond.cond, &cond.then, &cond.elze],
            ExprKind::New(new) => new.args.iter().collect(),
            ExprKind::MemberInit(init) => std::iter::once(&init.new)
                .chain(init.bindings.iter().map(|binding| &binding.value))
                .collect(),
            ExprKind::Lambda(lambda) => lambda
                .params
                .iter()
                .chain(std::iter::once(&lambda.body))
                .collect(),
        }
    }

    pub fn parameter(name: impl Into<Ident>, ty: Ty) -> BExpr {
        Arc::new(Self::new(ty, ExprParameter { name: name.into() }))
    }

    pub fn constant(value: Value, ty: Ty) -> BExpr {
        Arc::new(Self::new(ty, ExprConstant { value }))
    }
    pub fn i32(v: i32) -> BExpr {
        Self::constant(Value::int(v as i64), Ty::i32())
    }
    pub fn i64(v: i64) -> BExpr {
        Self::constant(Value::int(v), Ty::i64())
    }
    pub fn f64(v: f64) -> BExpr {
        Self::constant(Value::decimal(v), Ty::f64())
    }
    pub fn bool(v: bool) -> BExpr {
        Self::constant(Value::bool(v), Ty::bool())
    }
    pub fn string(v: impl Into<String>) -> BExpr {
        Self::constant(Value::string(v), Ty::string())
    }
    pub fn null(ty: Ty) -> BExpr {
        Self::constant(Value::null(), ty)
    }

    pub fn member(object: BExpr, member: impl Into<Ident>, ty: Ty) -> BExpr {
        Arc::new(Self::new(
            ty,
            ExprMember {
                object,
                member: member.into(),
            },
        ))
    }

    /// Static call: `method(args..)`
    pub fn call(method: BuiltinFn, args: Vec<BExpr>, ty: Ty) -> BExpr {
        Arc::new(Self::new(
            ty,
            ExprMethodCall {
                receiver: None,
                method,
                args,
            },
        ))
    }

    /// Instance call: `receiver.method(args..)`
    pub fn method(receiver: BExpr, method: BuiltinFn, args: Vec<BExpr>, ty: Ty) -> BExpr {
        Arc::new(Self::new(
            ty,
            ExprMethodCall {
                receiver: Some(receiver),
                method,
                args,
            },
        ))
    }

    /// Comparisons and logical operators type as `bool`, everything else as
    /// the left operand.
    pub fn binary(op: BinOpKind, lhs: BExpr, rhs: BExpr) -> BExpr {
        let ty = if op.is_predicate() {
            Ty::bool()
        } else {
            lhs.ty.clone()
        };
        Arc::new(Self::new(ty, ExprBinary { op, lhs, rhs }))
    }

    pub fn unary(op: UnOpKind, operand: BExpr) -> BExpr {
        let ty = operand.ty.clone();
        Arc::new(Self::new(ty, ExprUnary { op, operand }))
    }

    pub fn convert(operand: BExpr, ty: Ty) -> BExpr {
        Arc::new(Self::new(
            ty,
            ExprUnary {
                op: UnOpKind::Convert,
                operand,
            },
        ))
    }

    pub fn conditional(cond: BExpr, then: BExpr, elze: BExpr) -> BExpr {
        let ty = then.ty.clone();
        Arc::new(Self::new(ty, ExprConditional { cond, then, elze }))
    }

    pub fn new_object(ty: Ty, args: Vec<BExpr>) -> BExpr {
        Arc::new(Self::new(ty, ExprNew { args }))
    }

    pub fn member_init(new: BExpr, bindings: Vec<(&str, BExpr)>) -> BExpr {
        let ty = new.ty.clone();
        let bindings = bindings
            .into_iter()
            .map(|(member, value)| MemberBinding {
                member: Ident::new(member),
                value,
            })
            .collect();
        Arc::new(Self::new(ty, ExprMemberInit { new, bindings }))
    }

    pub fn lambda(params: Vec<BExpr>, body: BExpr) -> BExpr {
        let ty = Ty::function(
            params.iter().map(|param| param.ty.clone()).collect(),
            body.ty.clone(),
        );
        Arc::new(Self::new(ty, ExprLambda { params, body }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::builtin_len;
    use pretty_assertions::assert_eq;

    #[test]
    fn comparison_types_as_bool_and_arithmetic_as_lhs() {
        let x = Expr::parameter("x", Ty::i64());
        let sum = Expr::binary(BinOpKind::Add, x.clone(), Expr::i64(1));
        let cmp = Expr::binary(BinOpKind::Gt, sum.clone(), Expr::i64(2));
        assert_eq!(sum.ty, Ty::i64());
        assert_eq!(cmp.ty, Ty::bool());
    }

    #[test]
    fn equality_ignores_identity() {
        let a = Expr::i32(6);
        let b = Expr::i32(6);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
        assert_ne!(Expr::i32(6), Expr::i64(6));
    }

    #[test]
    fn children_follow_evaluation_order() {
        let s = Expr::parameter("s", Ty::string());
        let arg = Expr::string("x");
        let call = Expr::method(s.clone(), builtin_len(), vec![arg.clone()], Ty::i32());
        let children = call.children();
        assert_eq!(children.len(), 2);
        assert!(Arc::ptr_eq(children[0], &s));
        assert!(Arc::ptr_eq(children[1], &arg));
    }

    #[test]
    fn lambda_type_is_derived_from_params_and_body() {
        let x = Expr::parameter("x", Ty::i32());
        let body = Expr::binary(BinOpKind::Gt, x.clone(), Expr::i32(1));
        let lambda = Expr::lambda(vec![x], body);
        assert_eq!(lambda.ty, Ty::function(vec![Ty::i32()], Ty::bool()));
    }

    #[test]
    fn deserialized_nodes_get_fresh_ids() -> crate::Result<()> {
        let original = Expr::binary(BinOpKind::Mul, Expr::i32(2), Expr::i32(3));
        let json = serde_json::to_string(&original)?;
        assert!(!json.contains("\"id\""), "{json}");
        let back: Expr = serde_json::from_str(&json)?;
        assert_eq!(&back, original.as_ref());
        assert_ne!(back.id, original.id);
        Ok(())
    }
}
