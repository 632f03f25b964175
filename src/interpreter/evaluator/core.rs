use bigdecimal::BigDecimal;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{evaluator::environment::Environment, value::core::MathContext},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the state of one evaluation: the working precision used
/// by every inexact operation, and the variable environment written by
/// aggregate functions such as `sum`.
///
/// ## Usage
///
/// A `Context` is created per evaluation. All evaluation methods (like
/// `eval()` and the operator helpers) read the precision and resolve variables
/// through it.
#[derive(Debug, Default)]
pub struct Context {
    /// Precision and rounding for inexact operations.
    pub math:        MathContext,
    /// Variables bound during evaluation.
    pub environment: Environment,
}

impl Context {
    /// Creates a new evaluation context with an empty environment.
    #[must_use]
    pub fn new(math: MathContext) -> Self {
        Self { math,
               environment: Environment::default() }
    }

    /// Evaluates an expression and returns the resulting decimal.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// identifiers, unary and binary operations, and function calls.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed value, or the first error encountered.
    ///
    /// # Example
    /// ```
    /// use calkit::interpreter::{
    ///     evaluator::core::Context, parser::core::parse_source, value::core::MathContext,
    /// };
    ///
    /// let math = MathContext::default();
    /// let expr = parse_source("sum(1, 4, i) * 2", math).unwrap();
    ///
    /// let value = Context::new(math).eval(&expr).unwrap();
    /// assert_eq!(value, bigdecimal::BigDecimal::from(20));
    /// ```
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<BigDecimal> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.clone()),
            Expr::Identifier { name, position } => self.eval_identifier(name, *position),
            Expr::UnaryOp { op, expr, position } => self.eval_unary_op(*op, expr, *position),
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => self.eval_binary_op(left, *op, right, *position),
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                self.eval_function_call(name, arguments, *position)
            },
        }
    }
}
