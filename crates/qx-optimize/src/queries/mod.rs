// Queries - stateless operations for extracting information from a tree

pub mod cache_key;
pub mod parameter_queries;

pub use cache_key::*;
pub use parameter_queries::*;
