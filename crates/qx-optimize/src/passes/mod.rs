// Passes - focused tree rewrites that implement OptimizePass

pub mod partial_eval;

pub use partial_eval::*;
