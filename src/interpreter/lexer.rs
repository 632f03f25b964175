use std::fmt;

use bigdecimal::BigDecimal;
use logos::Logos;
use num_bigint::BigInt;
use tracing::trace;

use crate::{error::ParseError, interpreter::value::core::MathContext};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the calculator language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `12`, `3.14`, `.5`, `1.`, `2.5E-4`, or
    /// the radix integers `0x1F`, `0o17` and `0b101`. Decimal literals keep
    /// their written scale, so `1.00` has two fraction digits.
    #[regex(r"[0-9]+", parse_decimal)]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_decimal)]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_radix(lex, 16))]
    #[regex(r"0[oO][0-7]+", |lex| parse_radix(lex, 8))]
    #[regex(r"0[bB][01]+", |lex| parse_radix(lex, 2))]
    Number(BigDecimal),
    /// Identifier tokens; variable, constant or function names such as `x`,
    /// `sqrt` or `π`. The summation and product signs are identifiers too.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice().to_string())]
    #[token("∑", |lex| lex.slice().to_string())]
    #[token("∏", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// End of input. Never produced by the tokenizer itself; [`Lexer`]
    /// reports it once the source is exhausted.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Number(value) => return write!(f, "number {value}"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::End => return write!(f, "end of input"),
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::StarStar => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Tilde => "~",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Bang => "!",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Comma => ",",
        };
        write!(f, "'{symbol}'")
    }
}

/// Why a piece of input could not be turned into a token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexicalError {
    /// The input does not start any token.
    #[default]
    UnrecognizedCharacter,
    /// A decimal literal whose scale does not fit a 32-bit integer.
    NumberOutOfRange,
}

/// Additional information carried by the lexer during tokenization.
///
/// Holds the working precision used to round radix literals.
#[derive(Default)]
pub struct LexerExtras {
    /// Precision applied to integers decoded from hex, octal or binary.
    pub math: MathContext,
}

/// Parses a decimal literal from the current token slice.
///
/// The value keeps exactly the digits that were written: the scale is the
/// number of fraction digits minus the exponent.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Errors
/// [`LexicalError::NumberOutOfRange`] if the resulting scale falls outside the
/// `i32` range.
fn parse_decimal(lex: &logos::Lexer<Token>) -> Result<BigDecimal, LexicalError> {
    let slice = lex.slice();
    let (mantissa, exponent) = match slice.find(['e', 'E']) {
        Some(index) => (&slice[..index], &slice[index + 1..]),
        None => (slice, "0"),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let scale = exponent.parse::<i64>()
                        .ok()
                        .zip(i64::try_from(fraction.len()).ok())
                        .and_then(|(exponent, fraction)| fraction.checked_sub(exponent))
                        .filter(|scale| i32::try_from(*scale).is_ok())
                        .ok_or(LexicalError::NumberOutOfRange)?;
    let unscaled = format!("{integer}{fraction}").parse::<BigInt>()
                                                 .map_err(|_| LexicalError::UnrecognizedCharacter)?;
    Ok(BigDecimal::new(unscaled, scale))
}

/// Parses a prefixed integer literal in the given radix.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
/// - `radix`: The base of the digits following the two-character prefix.
///
/// # Returns
/// - `Some(BigDecimal)`: The integer rounded to the lexer's working precision.
/// - `None`: If the digits are not valid in `radix`.
fn parse_radix(lex: &logos::Lexer<Token>, radix: u32) -> Option<BigDecimal> {
    let digits = lex.slice().get(2..)?;
    let value = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(lex.extras.math.from_bigint(value))
}

/// A pull-based token stream with a single token of lookahead.
///
/// The lexer always holds a current token. [`Lexer::advance`] replaces it with
/// the next token from the source, and [`Token::End`] is reported, repeatedly,
/// once the input is exhausted.
///
/// # Example
/// ```
/// use calkit::interpreter::{lexer::{Lexer, Token}, value::core::MathContext};
///
/// let mut lexer = Lexer::new("1 + x", MathContext::default()).unwrap();
/// assert!(matches!(lexer.current(), Token::Number(_)));
/// lexer.advance().unwrap();
/// assert_eq!(lexer.current(), &Token::Plus);
/// assert_eq!(lexer.position(), 3);
/// ```
pub struct Lexer<'source> {
    inner:    logos::Lexer<'source, Token>,
    current:  Token,
    position: usize,
}

impl<'source> Lexer<'source> {
    /// Creates a lexer over `source` and reads the first token.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidCharacter`] if the first token is not
    /// recognized.
    pub fn new(source: &'source str, math: MathContext) -> Result<Self, ParseError> {
        let inner = Token::lexer_with_extras(source, LexerExtras { math });
        let mut lexer = Self { inner,
                               current: Token::End,
                               position: 1 };
        lexer.advance()?;
        Ok(lexer)
    }

    /// Consumes the current token and reads the next one.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidCharacter`] naming the first character of
    /// input that does not start any token, or
    /// [`ParseError::NumberOutOfRange`] for a literal whose exponent is too
    /// large.
    pub fn advance(&mut self) -> Result<(), ParseError> {
        match self.inner.next() {
            Some(Ok(token)) => {
                self.position = self.column(self.inner.span().start);
                self.current = token;
            },
            Some(Err(LexicalError::UnrecognizedCharacter)) => {
                let position = self.column(self.inner.span().start);
                let character = self.inner.slice().chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::InvalidCharacter { character, position });
            },
            Some(Err(LexicalError::NumberOutOfRange)) => {
                let position = self.column(self.inner.span().start);
                return Err(ParseError::NumberOutOfRange { literal: self.inner.slice().to_string(),
                                                          position });
            },
            None => {
                self.position = self.column(self.inner.source().len());
                self.current = Token::End;
            },
        }
        trace!(token = ?self.current, position = self.position, "advanced lexer");
        Ok(())
    }

    /// The token most recently read.
    #[must_use]
    pub const fn current(&self) -> &Token {
        &self.current
    }

    /// The 1-based character column where the current token starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    fn column(&self, byte_offset: usize) -> usize {
        self.inner.source()[..byte_offset].chars().count() + 1
    }
}
