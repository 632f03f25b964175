//! # calkit
//!
//! calkit is an arbitrary-precision decimal expression calculator written in
//! Rust. It parses and evaluates expressions with arithmetic, comparison,
//! shift, bitwise and power operators, a table of built-in functions, and
//! the `sum`/`product` aggregates over a loop variable.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use bigdecimal::BigDecimal;
use tracing::debug;

use crate::{
    ast::Expr,
    error::CalcError,
    interpreter::{
        evaluator::core::Context,
        parser::core::parse_source,
        value::{core::MathContext, display::format_decimal},
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// the syntactic structure of an expression as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines the five expression node kinds.
/// - Attaches source columns to AST nodes for error reporting.
/// - Renders trees in a fully parenthesized form for inspection.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing, or
/// evaluating an expression, together with the `CalcError` wrapper and its
/// coarse `ErrorKind` classification.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source columns and detailed messages for context.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the process of evaluating an expression.
///
/// This module ties together lexing, parsing, evaluation and the decimal value
/// layer.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and decimal
///   arithmetic.
/// - Provides entry points for parsing and evaluating expressions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Numeric conversion helpers.
///
/// Conversions between `BigDecimal`, `BigInt` and `f64` that are used by the
/// lexer, the decimal arithmetic and the evaluator.
pub mod util;

/// Evaluates an expression at the default precision of 20 digits.
///
/// This is a shorthand for `Calculator::new(source).evaluate()`.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use calkit::evaluate;
///
/// assert_eq!(evaluate("1+2*3").unwrap(), "7");
/// assert_eq!(evaluate("2**3**4").unwrap(), "2417851639229258349412352");
/// assert_eq!(evaluate("1<2").unwrap(), "0");
///
/// // 'x' is not defined.
/// assert!(evaluate("x + 1").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<String, CalcError> {
    Calculator::new(source).evaluate()
}

/// An expression together with the precision it is evaluated at.
///
/// Every evaluation starts from a fresh environment, so a `Calculator` can be
/// evaluated repeatedly with the same result (except for `random`).
///
/// # Example
/// ```
/// use std::num::NonZeroU32;
///
/// use calkit::{Calculator, interpreter::value::core::MathContext};
///
/// let math = MathContext::new(NonZeroU32::new(5).unwrap());
/// let calculator = Calculator::with_context("1/3", math);
/// assert_eq!(calculator.evaluate().unwrap(), "0.33333");
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    expression: String,
    math:       MathContext,
}

impl Calculator {
    /// Creates a calculator using the default 20-digit precision.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self::with_context(expression, MathContext::default())
    }

    /// Creates a calculator using the given precision.
    #[must_use]
    pub fn with_context(expression: impl Into<String>, math: MathContext) -> Self {
        Self { expression: expression.into(),
               math }
    }

    /// Parses the expression without evaluating it.
    pub fn parse(&self) -> Result<Expr, CalcError> {
        Ok(parse_source(&self.expression, self.math)?)
    }

    /// Evaluates the expression and returns the result as a decimal.
    pub fn evaluate_decimal(&self) -> Result<BigDecimal, CalcError> {
        let expr = self.parse()?;
        let value = Context::new(self.math).eval(&expr)?;
        Ok(value)
    }

    /// Evaluates the expression and renders the result.
    ///
    /// Results use plain notation unless the exponent is large or the value is
    /// very small, e.g. `1E+3` or `1E-7`.
    pub fn evaluate(&self) -> Result<String, CalcError> {
        let result = format_decimal(&self.evaluate_decimal()?);
        debug!(expression = %self.expression, %result, "evaluated");
        Ok(result)
    }
}
