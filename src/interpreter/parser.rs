/// Parser entry points.
///
/// Defines the `ParseResult` alias, parses a complete expression from a source
/// string, and rejects any input left over after the expression.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from bitwise or down to
/// exponentiation. Every level except `**` is left-associative.
pub mod binary;

/// Unary, postfix and primary parsing.
///
/// Handles prefix `-` and `~`, postfix `!`, parenthesized groups, numbers,
/// identifiers and function calls.
pub mod unary;

/// Shared parsing helpers.
///
/// Token expectations and comma-separated argument lists.
pub mod utils;
