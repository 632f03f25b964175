use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use a name that is neither bound nor a constant.
    #[error("Unknown variable '{name}' at position {position}.")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// Called a function that is not in the function table.
    #[error("Unknown function '{name}' at position {position}.")]
    UnknownFunction {
        /// The name of the function.
        name:     String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// A function was called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s) but got {found} at position {position}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of parameters the function takes.
        expected: usize,
        /// The number of arguments that were supplied.
        found:    usize,
        /// The source column where the error occurred.
        position: usize,
    },
    /// Division or remainder with a zero divisor.
    #[error("Division by zero at position {position}.")]
    DivisionByZero {
        /// The source column where the error occurred.
        position: usize,
    },
    /// The bounds of a `sum` or `product` are out of order.
    #[error("{details} at position {position}.")]
    InvalidLoopBounds {
        /// Details describing why the bounds are invalid.
        details:  String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// An argument lies outside the domain of a function or operator.
    #[error("Invalid argument for '{name}' at position {position}: {details}.")]
    InvalidArgument {
        /// The function or operator that rejected the argument.
        name:     String,
        /// Details about the rejected value.
        details:  String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// A floating-point function produced NaN or an infinity.
    #[error("'{name}' produced a non-finite result at position {position}.")]
    NonFiniteResult {
        /// The function or operator that produced the result.
        name:     String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// A result would be too large to compute.
    #[error("Result of '{operation}' is too large at position {position}.")]
    Overflow {
        /// The operation that overflowed.
        operation: String,
        /// The source column where the error occurred.
        position:  usize,
    },
}

impl RuntimeError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. } | Self::UnknownFunction { .. } => {
                ErrorKind::UnknownIdentifier
            },
            Self::ArgumentCountMismatch { .. } => ErrorKind::Arity,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::InvalidLoopBounds { .. }
            | Self::InvalidArgument { .. }
            | Self::NonFiniteResult { .. } => ErrorKind::Domain,
            Self::Overflow { .. } => ErrorKind::Overflow,
        }
    }

    /// The 1-based character column the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnknownVariable { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::ArgumentCountMismatch { position, .. }
            | Self::DivisionByZero { position }
            | Self::InvalidLoopBounds { position, .. }
            | Self::InvalidArgument { position, .. }
            | Self::NonFiniteResult { position, .. }
            | Self::Overflow { position, .. } => *position,
        }
    }
}
