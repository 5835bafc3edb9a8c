//! Errors raised while building or invoking deferred expressions.

use std::fmt;

/// Error returned by dispatch, binding and evaluation.
///
/// Protection helpers never produce one: they degrade to no-ops on values
/// that cannot be protected.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No operation is registered under `name`, or the receiver cannot
    /// reinterpret the name.
    UnknownOperation {
        name: String,
        receiver: &'static str,
    },
    /// `name` does not map to an argument slot, or was looked up with
    /// explicit arguments.
    InvalidPlaceholder { name: String, arguments: usize },
    /// An eager operation received operands it cannot handle.
    InvalidOperand { operation: String, detail: String },
    /// `else_` / `elsif_` was used on a lambda that is not a conditional.
    NotConditional,
    /// Configuration text could not be parsed.
    Config(String),
}

impl Error {
    pub(crate) fn operand(operation: &str, detail: impl Into<String>) -> Self {
        Error::InvalidOperand {
            operation: operation.to_owned(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownOperation { name, receiver } => {
                write!(f, "unknown operation `{name}` for {receiver}")
            }
            Error::InvalidPlaceholder { name, arguments } if *arguments > 0 => {
                write!(f, "placeholder `{name}` does not take arguments (got {arguments})")
            }
            Error::InvalidPlaceholder { name, .. } => {
                write!(f, "`{name}` is not an argument placeholder")
            }
            Error::InvalidOperand { operation, detail } => {
                write!(f, "invalid operand for `{operation}`: {detail}")
            }
            Error::NotConditional => write!(f, "lambda is not a conditional"),
            Error::Config(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = std::result::Result<T, E>;
