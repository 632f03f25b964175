use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Every variant carries the 1-based character column of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that does not start any token.
    #[error("Unrecognized character '{character}' at position {position}.")]
    InvalidCharacter {
        /// The character that could not be tokenized.
        character: char,
        /// The source column where the error occurred.
        position:  usize,
    },
    /// A number literal whose exponent puts it outside the representable
    /// range.
    #[error("Number literal '{literal}' is out of range at position {position}.")]
    NumberOutOfRange {
        /// The literal as written.
        literal:  String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// Found a token other than the one the grammar requires here.
    #[error("Expected {expected} at position {position}, found {found}.")]
    UnexpectedToken {
        /// A description of what the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// An operand was expected but an operator or the end of input was found.
    #[error("Expected an operand at position {position}, found {found}.")]
    ExpectedOperand {
        /// The token encountered.
        found:    String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Expected ')' at position {position}, found {found}.")]
    ExpectedClosingParen {
        /// The token encountered.
        found:    String,
        /// The source column where the error occurred.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Unexpected trailing input {token} at position {position}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// The source column where the error occurred.
        position: usize,
    },
}

impl ParseError {
    /// The 1-based character column the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::NumberOutOfRange { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::ExpectedOperand { position, .. }
            | Self::ExpectedClosingParen { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. } => *position,
        }
    }
}
