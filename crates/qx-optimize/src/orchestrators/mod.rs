// Orchestrators - components that evaluate trees rather than rewrite them

pub mod interpretation;

pub use interpretation::*;
