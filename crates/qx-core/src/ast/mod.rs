//! AST are trees, so shared `Arc` children are fine: nodes are never mutated

mod expr;
mod pretty;
mod value;

pub use expr::*;
pub use value::*;
