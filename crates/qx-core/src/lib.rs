#[macro_use]
pub mod macros;

pub mod ast;
pub mod config;
pub mod error;
pub mod id;
pub mod ops;

// Re-export commonly used items for convenience
pub use eyre;
pub use tracing;

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
