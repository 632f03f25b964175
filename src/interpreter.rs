/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, applies operators with decimal semantics,
/// calls built-in functions, and manages the loop variable used by
/// aggregates. It is the core execution engine of the calculator.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Resolves variables, constants and functions.
/// - Reports runtime errors such as division by zero or wrong arity.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// The lexer reads the raw expression and produces tokens one at a time:
/// numbers, identifiers, operators and punctuation. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source columns.
/// - Decodes decimal, hexadecimal, octal and binary literals.
/// - Reports unrecognized characters.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per precedence level.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Validates grammar, reporting errors with the offending column.
/// - Desugars unary minus into subtraction from zero.
pub mod parser;
/// The value module defines decimal arithmetic and rendering.
///
/// Results are `BigDecimal`s. This module supplies the working-precision
/// context that rounds inexact operations and the text form results are
/// printed in.
pub mod value;
