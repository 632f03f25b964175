use tracing::debug;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token},
        parser::binary::parse_bitwise_or,
        value::core::MathContext,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, bitwise OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := bitwise_or`
///
/// # Parameters
/// - `lexer`: Lexer positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_bitwise_or(lexer)
}

/// Parses `source` as a single expression that must span the whole input.
///
/// Radix literals are rounded to the precision of `math` while lexing.
///
/// # Errors
/// Returns a `ParseError` for unrecognized characters, grammar violations, or
/// tokens remaining after a complete expression.
///
/// # Example
/// ```
/// use calkit::interpreter::{parser::core::parse_source, value::core::MathContext};
///
/// let expr = parse_source("1 + 2 * 3", MathContext::default()).unwrap();
/// assert_eq!(expr.to_string(), "((1) + (((2) * (3))))");
///
/// assert!(parse_source("1 2", MathContext::default()).is_err());
/// ```
pub fn parse_source(source: &str, math: MathContext) -> ParseResult<Expr> {
    let mut lexer = Lexer::new(source, math)?;
    let expr = parse_expression(&mut lexer)?;
    if lexer.current() != &Token::End {
        return Err(ParseError::UnexpectedTrailingTokens { token:    lexer.current().to_string(),
                                                          position: lexer.position(), });
    }
    debug!(%expr, "parsed expression");
    Ok(expr)
}
