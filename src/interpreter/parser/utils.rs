use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Lexer, Token},
        parser::core::ParseResult,
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// The opening token must already have been consumed. An immediately
/// encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `lexer`: Lexer positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - a token other than `,` or `closing` follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    lexer: &mut Lexer<'_>,
    parse_item: impl Fn(&mut Lexer<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if lexer.current() == closing {
        lexer.advance()?;
        return Ok(items);
    }
    loop {
        items.push(parse_item(lexer)?);
        if lexer.current() == &Token::Comma {
            lexer.advance()?;
            continue;
        }
        if lexer.current() == closing {
            lexer.advance()?;
            break;
        }
        return Err(ParseError::UnexpectedToken { expected: format!("',' or {closing}"),
                                                 found:    lexer.current().to_string(),
                                                 position: lexer.position(), });
    }
    Ok(items)
}

/// Consumes the current token if it equals `expected`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` naming both tokens otherwise.
pub(in crate::interpreter::parser) fn expect(lexer: &mut Lexer<'_>,
                                             expected: &Token)
                                             -> ParseResult<()> {
    if lexer.current() != expected {
        return Err(ParseError::UnexpectedToken { expected: expected.to_string(),
                                                 found:    lexer.current().to_string(),
                                                 position: lexer.position(), });
    }
    lexer.advance()
}
