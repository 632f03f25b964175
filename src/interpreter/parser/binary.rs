use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Lexer, Token},
        parser::{
            core::ParseResult,
            unary::{parse_postfix, parse_unary},
        },
    },
};

/// Parses bitwise OR expressions, the lowest precedence level.
///
/// The rule is: `bitwise_or := bitwise_xor ("|" bitwise_xor)*`
pub fn parse_bitwise_or(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_bitwise_xor, |op| matches!(op, BinaryOperator::BitOr))
}

/// Parses bitwise XOR expressions.
///
/// The rule is: `bitwise_xor := bitwise_and ("^" bitwise_and)*`
pub fn parse_bitwise_xor(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_bitwise_and, |op| matches!(op, BinaryOperator::BitXor))
}

/// Parses bitwise AND expressions.
///
/// The rule is: `bitwise_and := relational ("&" relational)*`
pub fn parse_bitwise_and(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_relational, |op| matches!(op, BinaryOperator::BitAnd))
}

/// Parses relational and equality operators.
///
/// All six comparisons share one level and chain from left to right, so
/// `1 < 2 == 0` compares the result of `1 < 2` with `0`.
///
/// The rule is: `relational := shift (("<" | "<=" | ">" | ">=" | "==" | "!=")
/// shift)*`
pub fn parse_relational(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_shift, is_relational_op)
}

/// Parses shift expressions.
///
/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_additive, |op| {
        matches!(op, BinaryOperator::Shl | BinaryOperator::Shr)
    })
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    parse_left_associative(lexer, parse_unary, |op| {
        matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`. The base is a postfix expression, so a leading minus
/// applies to the whole power (`-10**2` is `-(10**2)`), while the exponent may
/// carry its own sign (`2**-1`).
///
/// The rule is: `power := postfix ("**" unary)?`
///
/// # Parameters
/// - `lexer`: Lexer positioned at the base.
///
/// # Returns
/// An exponentiation expression tree, or the base alone.
pub fn parse_power(lexer: &mut Lexer<'_>) -> ParseResult<Expr> {
    let base = parse_postfix(lexer)?;
    if lexer.current() != &Token::StarStar {
        return Ok(base);
    }
    let position = lexer.position();
    lexer.advance()?;
    let exponent = parse_unary(lexer)?;
    Ok(Expr::BinaryOp { left: Box::new(base),
                        op: BinaryOperator::Pow,
                        right: Box::new(exponent),
                        position })
}

/// Parses one left-associative precedence level.
///
/// Operands are parsed with `next`; the loop continues while the current token
/// maps to an operator accepted by `accepts`.
///
/// # Parameters
/// - `lexer`: Lexer positioned at the first operand.
/// - `next`: Parser for the next-higher precedence level.
/// - `accepts`: Selects the operators belonging to this level.
///
/// # Returns
/// A left-leaning `Expr::BinaryOp` tree, or the single operand.
fn parse_left_associative(lexer: &mut Lexer<'_>,
                          next: fn(&mut Lexer<'_>) -> ParseResult<Expr>,
                          accepts: impl Fn(BinaryOperator) -> bool)
                          -> ParseResult<Expr> {
    let mut left = next(lexer)?;
    while let Some(op) = token_to_binary_operator(lexer.current())
          && accepts(op)
    {
        let position = lexer.position();
        lexer.advance()?;
        let right = next(lexer)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position };
    }
    Ok(left)
}

/// Maps a token to its binary operator, if it is one.
///
/// # Example
/// ```
/// use calkit::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::ShiftLeft), Some(BinaryOperator::Shl));
/// assert_eq!(token_to_binary_operator(&Token::Tilde), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::StarStar => Some(BinaryOperator::Pow),
        Token::ShiftLeft => Some(BinaryOperator::Shl),
        Token::ShiftRight => Some(BinaryOperator::Shr),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}

/// Whether `op` is one of the six comparison operators.
#[must_use]
pub const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Less
             | BinaryOperator::LessEqual
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Equal
             | BinaryOperator::NotEqual)
}
