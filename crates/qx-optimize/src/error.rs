use qx_core::error::{Error, EvaluationFault};
use qx_core::id::Ident;

/// Normalise the error of a builtin call: faults pass through untouched,
/// anything else is reported as a failure of that function.
pub fn builtin_failure(name: &Ident, err: Error) -> Error {
    match err {
        Error::Evaluation(fault) => Error::Evaluation(fault),
        other => EvaluationFault::Function {
            name: name.to_string(),
            message: other.to_string(),
        }
        .into(),
    }
}

/// Create a type-mismatch fault for an operator applied to the given operands
pub fn type_mismatch(op: impl Into<String>, found: impl Into<String>) -> Error {
    EvaluationFault::TypeMismatch {
        op: op.into(),
        found: found.into(),
    }
    .into()
}

/// Fail once a walk goes deeper than `limit`
pub fn check_depth(depth: usize, limit: usize) -> Result<(), Error> {
    if depth > limit {
        return Err(Error::DepthLimitExceeded { limit });
    }
    Ok(())
}

/// Macro to ensure a condition is true, or return an evaluation fault
#[macro_export]
macro_rules! fault_ensure {
    ($cond:expr, $fault:expr) => {
        if !($cond) {
            return Err(qx_core::error::Error::Evaluation($fault));
        }
    };
}
