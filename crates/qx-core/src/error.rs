use crate::ast::Ty;
use crate::id::Ident;
use miette::Diagnostic;
use std::result;
use thiserror::Error;

/// Runtime failure while evaluating a closed sub-tree.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum EvaluationFault {
    #[error("attempted to divide by zero")]
    #[diagnostic(code(qx::eval::divide_by_zero))]
    DivideByZero,
    #[error("arithmetic overflow in `{op}` for type {ty}")]
    #[diagnostic(code(qx::eval::overflow))]
    Overflow { op: String, ty: Ty },
    #[error("null reference while accessing `{member}`")]
    #[diagnostic(code(qx::eval::null_reference))]
    NullReference { member: Ident },
    #[error("parameter `{name}` is not bound")]
    #[diagnostic(
        code(qx::eval::unbound_parameter),
        help("the evaluability predicate accepted an expression that is not closed")
    )]
    UnboundParameter { name: Ident },
    #[error("`{ty}` has no member `{member}`")]
    #[diagnostic(code(qx::eval::missing_member))]
    MissingMember { ty: String, member: Ident },
    #[error("operator `{op}` cannot be applied to {found}")]
    #[diagnostic(code(qx::eval::type_mismatch))]
    TypeMismatch { op: String, found: String },
    #[error("cannot convert {from} to {to}")]
    #[diagnostic(code(qx::eval::invalid_conversion))]
    InvalidConversion { from: String, to: Ty },
    #[error("expected {expected} arguments, got {found}")]
    #[diagnostic(code(qx::eval::arity))]
    Arity { expected: usize, found: usize },
    #[error("function `{name}` failed: {message}")]
    #[diagnostic(code(qx::eval::function))]
    Function { name: String, message: String },
}

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Evaluation fault: {0}")]
    #[diagnostic(transparent)]
    Evaluation(#[from] EvaluationFault),
    #[error("Expression tree deeper than the configured limit of {limit}")]
    #[diagnostic(
        code(qx::depth_limit),
        help("raise QX_MAX_EXPR_DEPTH or PartialEvalOptions::max_depth")
    )]
    DepthLimitExceeded { limit: usize },
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(qx::config))]
    Config(String),
    #[error("Generic error: {0}")]
    Generic(eyre::Report),
}

impl Error {
    pub fn as_fault(&self) -> Option<&EvaluationFault> {
        match self {
            Error::Evaluation(fault) => Some(fault),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
