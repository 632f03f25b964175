use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of an
/// expression: unrecognized characters, out-of-range literals, unexpected tokens, missing operands or
/// parentheses, and input left over after a complete expression.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression, such as unknown identifiers, wrong argument counts, division by
/// zero, invalid aggregate bounds, or results that are too large to compute.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while turning an expression into a result.
///
/// This wraps the two phase-specific error enums so library callers can use a
/// single `Result` type. The message is forwarded unchanged from the inner
/// error.
#[derive(Debug, Error)]
pub enum CalcError {
    /// The expression could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The expression was well-formed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Coarse classification of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An unrecognized character or an out-of-range number literal.
    Lex,
    /// A grammar violation.
    Parse,
    /// A function was called with the wrong number of arguments.
    Arity,
    /// An unbound variable or an unknown function name.
    UnknownIdentifier,
    /// Division or remainder by zero.
    DivisionByZero,
    /// An argument or result outside the domain of an operation.
    Domain,
    /// A result too large to compute.
    Overflow,
}

impl CalcError {
    /// Returns the kind of failure this error represents.
    ///
    /// # Example
    /// ```
    /// use calkit::{error::ErrorKind, evaluate};
    ///
    /// assert_eq!(evaluate("1/0").unwrap_err().kind(), ErrorKind::DivisionByZero);
    /// assert_eq!(evaluate("(1+2").unwrap_err().kind(), ErrorKind::Parse);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(ParseError::InvalidCharacter { .. } | ParseError::NumberOutOfRange { .. }) => {
                ErrorKind::Lex
            },
            Self::Parse(_) => ErrorKind::Parse,
            Self::Runtime(e) => e.kind(),
        }
    }

    /// The 1-based character column the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Parse(e) => e.position(),
            Self::Runtime(e) => e.position(),
        }
    }
}
