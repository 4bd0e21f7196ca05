use qx_core::ast::*;
use qx_core::ops::BuiltinFn;

pub fn person_ty() -> Ty {
    Ty::structure("Person", vec![("Name", Ty::string()), ("Age", Ty::i32())])
}

pub fn person(name: &str, age: i64) -> Value {
    Value::structure(
        "Person",
        vec![("Name", Value::string(name)), ("Age", Value::int(age))],
    )
}

/// The compiler-generated object holding captured locals.
pub fn closure_object(fields: Vec<(&str, Value, Ty)>) -> BExpr {
    let ty = Ty::structure(
        "Closure",
        fields.iter().map(|(name, _, ty)| (*name, ty.clone())).collect(),
    );
    let value = Value::structure(
        "Closure",
        fields.into_iter().map(|(name, value, _)| (name, value)).collect(),
    );
    Expr::constant(value, ty)
}

/// `closure.<name>` for an i32 local captured by a lambda.
pub fn captured_i32(name: &str, value: i32) -> BExpr {
    let closure = closure_object(vec![(name, Value::int(value as i64), Ty::i32())]);
    Expr::member(closure, name, Ty::i32())
}

pub fn people() -> BExpr {
    Expr::constant(
        Value::queryable("people", person_ty()),
        Ty::queryable(person_ty()),
    )
}

/// Query operator; only a query provider knows how to run it.
pub fn where_fn() -> BuiltinFn {
    BuiltinFn::unbound("where")
}

/// Client-side helper: doubles its argument.
pub fn compute_fn() -> BuiltinFn {
    BuiltinFn::new("compute", |args| match args {
        [Value::Int(i)] => Ok(Value::int(i.value * 2)),
        _ => qx_core::bail!("compute expects one int, got {:?}", args),
    })
}

/// `source.where(p => p.Age > min)`
pub fn adults_query(min: BExpr) -> BExpr {
    let p = Expr::parameter("p", person_ty());
    let age = Expr::member(p.clone(), "Age", Ty::i32());
    let body = Expr::binary(qx_core::ops::BinOpKind::Gt, age, min);
    let predicate = Expr::lambda(vec![p], body);
    Expr::method(
        people(),
        where_fn(),
        vec![predicate],
        Ty::queryable(person_ty()),
    )
}
