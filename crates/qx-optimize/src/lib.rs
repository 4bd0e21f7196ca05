// qx-optimize: partial evaluation of query expression trees
//
// Architecture:
// - orchestrators: the interpreter used to evaluate closed sub-trees
// - passes: the partial evaluator (nominate, then rewrite) as an OptimizePass
// - queries: stateless operations over a tree (cache keys, parameters)
// - utils: the pass trait shared by everything above

pub mod error;
pub mod orchestrators;
pub mod passes;
pub mod queries;
pub mod utils;

// Re-export key types for convenience
pub use orchestrators::*;
pub use passes::*;
pub use queries::*;
pub use utils::*;
