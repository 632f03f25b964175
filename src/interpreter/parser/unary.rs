use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token},
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation, desugared to `0 - x`)
/// - `~`  (bitwise complement)
///
/// Unary operators are right-associative and may repeat, so `--1` is `1` and
/// `~~3` is `3`. If no prefix operator is present, the function delegates to
/// [`parse_power`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "~") unary
///            | power
/// ```
/// # Parameters
/// - `lexer`: Lexer positioned at the start of the operand.
///
/// # Returns
/// The parsed expression.
pub(crate) fn parse_unary(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    let position = lexer.position();
    match lexer.current() {
        Token::Minus => {
            lexer.advance()?;
            let expr = parse_unary(lexer)?;
            Ok(Expr::BinaryOp { left: Box::new(Expr::Literal { value: BigDecimal::zero(),
                                                               position }),
                                op: BinaryOperator::Sub,
                                right: Box::new(expr),
                                position })
        },
        Token::Tilde => {
            lexer.advance()?;
            let expr = parse_unary(lexer)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::BitNot,
                               expr: Box::new(expr),
                               position })
        },
        _ => parse_power(lexer),
    }
}

/// Parses a primary expression followed by any number of postfix `!`.
///
/// Each `!` wraps the expression so far in a factorial node, so `3!!` is
/// `(3!)!`.
///
/// Grammar:
/// ```text
///     postfix := primary "!"*
/// ```
pub(crate) fn parse_postfix(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    let mut node = parse_primary(lexer)?;
    while lexer.current() == &Token::Bang {
        let position = lexer.position();
        lexer.advance()?;
        node = Expr::UnaryOp { op: UnaryOperator::Factorial,
                               expr: Box::new(node),
                               position };
    }
    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - numeric literals
/// - identifiers
/// - function calls
/// - parenthesized expressions
///
/// Grammar:
/// ```text
///     primary := number
///              | identifier
///              | identifier "(" arguments ")"
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `lexer`: Lexer positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    let position = lexer.position();
    match lexer.current().clone() {
        Token::Number(value) => {
            lexer.advance()?;
            Ok(Expr::Literal { value, position })
        },
        Token::Identifier(name) => {
            lexer.advance()?;
            parse_identifier_or_function(lexer, name, position)
        },
        Token::LParen => parse_grouping(lexer),
        found => Err(ParseError::ExpectedOperand { found: found.to_string(),
                                                   position }),
    }
}

/// Parses the remainder of an identifier: a call if `(` follows, otherwise a
/// plain variable reference.
///
/// # Parameters
/// - `lexer`: Lexer positioned just after the identifier.
/// - `name`: The identifier that was consumed.
/// - `position`: Column of the identifier.
fn parse_identifier_or_function(lexer: &mut Lexer<'_>,
                                name: String,
                                position: usize)
                                -> ParseResult<Expr> {
    if lexer.current() != &Token::LParen {
        return Ok(Expr::Identifier { name, position });
    }
    lexer.advance()?;
    let arguments = parse_comma_separated(lexer, parse_expression, &Token::RParen)?;
    Ok(Expr::FunctionCall { name,
                            arguments,
                            position })
}

/// Parses a parenthesized expression `( expr )`.
fn parse_grouping(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    expect(lexer, &Token::LParen)?;
    let expr = parse_expression(lexer)?;
    if lexer.current() != &Token::RParen {
        return Err(ParseError::ExpectedClosingParen { found:    lexer.current().to_string(),
                                                      position: lexer.position(), });
    }
    lexer.advance()?;
    Ok(expr)
}
