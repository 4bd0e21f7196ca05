// Utils - shared utilities and helper components

pub mod optimize_pass;

pub use optimize_pass::*;
