use crate::ast::{BExpr, Value};
use crate::id::Ident;
use crate::ops::{BinOpKind, BuiltinFn, UnOpKind};

common_struct! {
    /// An open variable bound by an enclosing lambda
    pub struct ExprParameter {
        pub name: Ident,
    }
}

common_struct! {
    pub struct ExprConstant {
        pub value: Value,
    }
}

common_struct! {
    /// `object.member`; captured variables are member reads on a closure object
    pub struct ExprMember {
        pub object: BExpr,
        pub member: Ident,
    }
}

common_struct! {
    /// Call of a pure function. An instance call passes the receiver first.
    pub struct ExprMethodCall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub receiver: Option<BExpr>,
        pub method: BuiltinFn,
        pub args: Vec<BExpr>,
    }
}

impl ExprMethodCall {
    pub fn operands(&self) -> impl Iterator<Item = &BExpr> {
        self.receiver.iter().chain(self.args.iter())
    }
}

common_struct! {
    pub struct ExprBinary {
        pub op: BinOpKind,
        pub lhs: BExpr,
        pub rhs: BExpr,
    }
}

common_struct! {
    pub struct ExprUnary {
        pub op: UnOpKind,
        pub operand: BExpr,
    }
}

common_struct! {
    pub struct ExprConditional {
        pub cond: BExpr,
        pub then: BExpr,
        pub elze: BExpr,
    }
}

common_struct! {
    /// Constructor call; arguments fill the leading fields of the struct type
    pub struct ExprNew {
        pub args: Vec<BExpr>,
    }
}

common_struct! {
    pub struct MemberBinding {
        pub member: Ident,
        pub value: BExpr,
    }
}

common_struct! {
    /// Object construction followed by member assignments: `new Dto { X = .. }`
    pub struct ExprMemberInit {
        pub new: BExpr,
        pub bindings: Vec<MemberBinding>,
    }
}

common_struct! {
    pub struct ExprLambda {
        /// Parameter nodes bound by this lambda
        pub params: Vec<BExpr>,
        pub body: BExpr,
    }
}

impl ExprLambda {
    /// Parameterless lambda around `body`.
    pub fn thunk(body: BExpr) -> Self {
        Self {
            params: Vec::new(),
            body,
        }
    }

    pub fn param_names(&self) -> impl Iterator<Item = &Ident> {
        self.params.iter().filter_map(|param| match &param.kind {
            crate::ast::ExprKind::Parameter(p) => Some(&p.name),
            _ => None,
        })
    }
}
