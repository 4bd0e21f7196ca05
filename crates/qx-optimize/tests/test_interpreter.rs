use pretty_assertions::assert_eq;
use qx_core::ast::*;
use qx_core::error::{EvaluationFault, Result};
use qx_core::ops::{builtin_abs, builtin_len, builtin_to_upper, BinOpKind, UnOpKind};
use qx_optimize::Interpreter;

mod support;

use support::fixtures::*;

fn eval(expr: &Expr) -> Result<Value> {
    Interpreter::default().evaluate(expr)
}

fn fault_of(expr: &Expr) -> EvaluationFault {
    match eval(expr) {
        Ok(value) => panic!("expected a fault, got {value}"),
        Err(err) => err.as_fault().cloned().unwrap_or_else(|| panic!("not a fault: {err}")),
    }
}

#[test]
fn integer_arithmetic_is_checked_against_the_static_width() -> Result<()> {
    let max = Expr::i32(i32::MAX);
    let overflow = Expr::binary(BinOpKind::Add, max, Expr::i32(1));
    assert_eq!(
        fault_of(&overflow),
        EvaluationFault::Overflow {
            op: "+".to_string(),
            ty: Ty::i32(),
        }
    );

    let wide = Expr::binary(BinOpKind::Add, Expr::i64(i32::MAX as i64), Expr::i64(1));
    assert_eq!(eval(&wide)?, Value::int(2147483648));

    let rem = Expr::binary(BinOpKind::Mod, Expr::i32(7), Expr::i32(0));
    assert_eq!(fault_of(&rem), EvaluationFault::DivideByZero);

    let neg = Expr::unary(UnOpKind::Neg, Expr::i32(i32::MIN));
    assert!(matches!(fault_of(&neg), EvaluationFault::Overflow { .. }));
    Ok(())
}

#[test]
fn builtin_results_are_checked_against_the_call_type() -> Result<()> {
    let abs = |arg: BExpr, ty: Ty| Expr::call(builtin_abs(), vec![arg], ty);
    assert_eq!(
        fault_of(&abs(Expr::i32(i32::MIN), Ty::i32())),
        EvaluationFault::Overflow {
            op: "abs".to_string(),
            ty: Ty::i32(),
        }
    );
    assert_eq!(eval(&abs(Expr::i32(-7), Ty::i32()))?, Value::int(7));
    assert_eq!(
        eval(&abs(Expr::i64(i32::MIN as i64), Ty::i64()))?,
        Value::int(2147483648)
    );
    Ok(())
}

#[test]
fn conversions_follow_the_target_type() -> Result<()> {
    assert_eq!(eval(&Expr::convert(Expr::i32(300), Ty::i64()))?, Value::int(300));
    assert_eq!(eval(&Expr::convert(Expr::f64(3.9), Ty::i32()))?, Value::int(3));
    assert_eq!(eval(&Expr::convert(Expr::f64(-3.9), Ty::i32()))?, Value::int(-3));
    assert_eq!(eval(&Expr::convert(Expr::i32(2), Ty::f64()))?, Value::decimal(2.0));
    assert_eq!(
        eval(&Expr::convert(Expr::null(Ty::string()), Ty::string()))?,
        Value::null()
    );

    let narrowing = Expr::convert(Expr::i64(1 << 40), Ty::i32());
    assert_eq!(
        fault_of(&narrowing),
        EvaluationFault::Overflow {
            op: "as".to_string(),
            ty: Ty::i32(),
        }
    );

    let nonsense = Expr::convert(Expr::string("12"), Ty::i32());
    assert_eq!(
        fault_of(&nonsense),
        EvaluationFault::InvalidConversion {
            from: "string".to_string(),
            to: Ty::i32(),
        }
    );
    Ok(())
}

#[test]
fn logical_operators_short_circuit() -> Result<()> {
    let boom = Expr::binary(
        BinOpKind::Eq,
        Expr::binary(BinOpKind::Div, Expr::i32(1), Expr::i32(0)),
        Expr::i32(1),
    );
    let and = Expr::binary(BinOpKind::And, Expr::bool(false), boom.clone());
    assert_eq!(eval(&and)?, Value::bool(false));
    let or = Expr::binary(BinOpKind::Or, Expr::bool(true), boom.clone());
    assert_eq!(eval(&or)?, Value::bool(true));

    let cond = Expr::conditional(Expr::bool(true), Expr::i32(1), boom);
    assert_eq!(eval(&cond)?, Value::int(1));
    Ok(())
}

#[test]
fn strings_concatenate_and_coalesce() -> Result<()> {
    let missing = Expr::null(Ty::string());
    let concat = Expr::binary(BinOpKind::Add, Expr::string("id-"), missing.clone());
    assert_eq!(eval(&concat)?, Value::string("id-"));

    let fallback = Expr::binary(BinOpKind::Coalesce, missing, Expr::string("none"));
    assert_eq!(eval(&fallback)?, Value::string("none"));

    let ordered = Expr::binary(BinOpKind::Lt, Expr::string("abc"), Expr::string("abd"));
    assert_eq!(eval(&ordered)?, Value::bool(true));
    Ok(())
}

#[test]
fn nan_is_unordered_and_unequal() -> Result<()> {
    let nan = Expr::f64(f64::NAN);
    for op in [BinOpKind::Lt, BinOpKind::Ge, BinOpKind::Eq] {
        let cmp = Expr::binary(op, nan.clone(), nan.clone());
        assert_eq!(eval(&cmp)?, Value::bool(false), "{op}");
    }
    let ne = Expr::binary(BinOpKind::Ne, nan.clone(), nan);
    assert_eq!(eval(&ne)?, Value::bool(true));
    Ok(())
}

#[test]
fn objects_are_constructed_and_read() -> Result<()> {
    let new = Expr::new_object(person_ty(), vec![Expr::string("Ada")]);
    assert_eq!(eval(&new)?, person("Ada", 0));

    let init = Expr::member_init(
        new,
        vec![("Age", Expr::binary(BinOpKind::Add, Expr::i32(30), Expr::i32(6)))],
    );
    assert_eq!(eval(&init)?, person("Ada", 36));

    let age = Expr::member(init, "Age", Ty::i32());
    assert_eq!(eval(&age)?, Value::int(36));

    let bogus = Expr::member(Expr::new_object(person_ty(), vec![]), "Height", Ty::i32());
    assert!(matches!(
        fault_of(&bogus),
        EvaluationFault::MissingMember { ty, .. } if ty == "Person"
    ));
    Ok(())
}

#[test]
fn builtin_calls_pass_the_receiver_first() -> Result<()> {
    let upper = Expr::method(Expr::string("ab"), builtin_to_upper(), vec![], Ty::string());
    assert_eq!(eval(&upper)?, Value::string("AB"));

    let null_receiver = Expr::method(Expr::null(Ty::string()), builtin_len(), vec![], Ty::i32());
    assert!(matches!(
        fault_of(&null_receiver),
        EvaluationFault::NullReference { member } if member.as_str() == "len"
    ));

    let bad = Expr::call(builtin_len(), vec![Expr::i32(5)], Ty::i32());
    assert!(matches!(
        fault_of(&bad),
        EvaluationFault::Function { name, .. } if name == "len"
    ));

    let custom = Expr::call(compute_fn(), vec![Expr::i32(21)], Ty::i32());
    assert_eq!(eval(&custom)?, Value::int(42));
    Ok(())
}

#[test]
fn lambdas_capture_their_environment() -> Result<()> {
    let x = Expr::parameter("x", Ty::i32());
    let y = Expr::parameter("y", Ty::i32());
    let inner = Expr::lambda(
        vec![y.clone()],
        Expr::binary(BinOpKind::Add, x.clone(), y),
    );
    let outer = Expr::lambda(vec![x], inner);

    let interpreter = Interpreter::default();
    let Value::Closure(add_one) = interpreter.invoke_lambda(&outer, vec![Value::int(1)])? else {
        panic!("expected a closure");
    };
    assert_eq!(add_one.captured, vec![ValueField::new("x", Value::int(1))]);
    assert_eq!(interpreter.invoke(&add_one, vec![Value::int(2)])?, Value::int(3));

    let err = interpreter.invoke(&add_one, vec![]).unwrap_err();
    assert_eq!(
        err.as_fault(),
        Some(&EvaluationFault::Arity {
            expected: 1,
            found: 0,
        })
    );
    Ok(())
}

#[test]
fn free_parameters_cannot_be_evaluated() {
    let x = Expr::parameter("x", Ty::i32());
    let err = Interpreter::default().evaluate_closed(&x).unwrap_err();
    assert!(matches!(
        err.as_fault(),
        Some(EvaluationFault::UnboundParameter { name }) if name.as_str() == "x"
    ));
}
