use pretty_assertions::{assert_eq, assert_ne};
use qx_core::ast::*;
use qx_core::error::Result;
use qx_core::ops::BinOpKind;
use qx_optimize::{cache_key, partial_cache_key, partial_evaluate};

mod support;

use support::fixtures::*;

#[test]
fn equal_captured_values_share_a_key() -> Result<()> {
    // two closure objects, built independently
    let first = adults_query(captured_i32("min", 18));
    let second = adults_query(captured_i32("min", 18));
    assert_eq!(partial_cache_key(&first)?, partial_cache_key(&second)?);
    Ok(())
}

#[test]
fn different_captured_values_get_different_keys() -> Result<()> {
    let adults = adults_query(captured_i32("min", 18));
    let seniors = adults_query(captured_i32("min", 65));
    assert_ne!(partial_cache_key(&adults)?, partial_cache_key(&seniors)?);
    Ok(())
}

#[test]
fn captured_value_and_literal_fold_to_the_same_key() -> Result<()> {
    let captured = adults_query(captured_i32("min", 18));
    let literal = adults_query(Expr::i32(18));
    assert_ne!(cache_key(&captured), cache_key(&literal));
    assert_eq!(partial_cache_key(&captured)?, partial_cache_key(&literal)?);
    Ok(())
}

#[test]
fn literal_width_is_part_of_the_key() {
    let x32 = Expr::binary(BinOpKind::Eq, Expr::parameter("x", Ty::i32()), Expr::i32(6));
    let x64 = Expr::binary(BinOpKind::Eq, Expr::parameter("x", Ty::i64()), Expr::i64(6));
    assert_eq!(cache_key(&x32), "(x == 6i32)");
    assert_eq!(cache_key(&x64), "(x == 6i64)");
}

#[test]
fn keys_survive_a_serde_round_trip() -> Result<()> {
    let folded = partial_evaluate(&adults_query(captured_i32("min", 21)))?;
    let json = serde_json::to_string(&folded)?;
    let back: Expr = serde_json::from_str(&json)?;
    assert_eq!(cache_key(&back), cache_key(&folded));
    Ok(())
}
