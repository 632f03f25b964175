use bigdecimal::BigDecimal;
use num_traits::{One, Zero};
use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::arithmetic_error,
        },
        value::{
            core::{ArithmeticError, MathContext},
            display::format_decimal,
        },
    },
};

/// Folds one body value into the running result of an aggregate.
type Combine = fn(&BigDecimal, &BigDecimal) -> Result<BigDecimal, ArithmeticError>;

/// The variable bound by `sum` and `product` on each iteration.
pub const LOOP_VARIABLE: &str = "i";

/// `sum(lo, hi, body)`: adds `body` for `i = lo, lo + 1, ...` while `i <= hi`.
///
/// # Example
/// ```
/// use calkit::evaluate;
///
/// assert_eq!(evaluate("sum(0, 10, i**2)").unwrap(), "385");
/// assert_eq!(evaluate("sum(0, 10.2, i)").unwrap(), "55");
/// ```
pub fn sum(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    context.eval_series("sum", args, position, BigDecimal::zero(), MathContext::add)
}

/// `product(lo, hi, body)`: multiplies `body` for `i = lo, lo + 1, ...` while
/// `i <= hi`.
pub fn product(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    context.eval_series("product", args, position, BigDecimal::one(), |l, r| {
               Ok(MathContext::multiply(l, r))
           })
}

impl Context {
    /// Evaluates an aggregate over the loop variable.
    ///
    /// Both bounds are evaluated once, before the loop variable is touched.
    /// The previous binding of [`LOOP_VARIABLE`] is restored afterwards, or the
    /// variable is removed if it was unbound, whether the body succeeded or
    /// failed. Aggregates therefore nest: an inner `sum` sees its own `i` and
    /// leaves the outer one intact.
    ///
    /// # Parameters
    /// - `name`: The builtin being evaluated, for error reporting.
    /// - `args`: `[lo, hi, body]`.
    /// - `position`: Source column of the call.
    /// - `identity`: Result for an aggregate with no iterations.
    /// - `combine`: Folds one body value into the running result.
    ///
    /// # Errors
    /// `InvalidLoopBounds` if `lo > hi`; `Overflow` if the loop variable or the
    /// running result cannot be aligned; otherwise any error from the bounds or
    /// the body.
    fn eval_series(&mut self,
                   name: &str,
                   args: &[Expr],
                   position: usize,
                   identity: BigDecimal,
                   combine: Combine)
                   -> EvalResult<BigDecimal> {
        let lo = self.eval(&args[0])?;
        let hi = self.eval(&args[1])?;
        if lo > hi {
            return Err(RuntimeError::InvalidLoopBounds {
                details: format!("minimum ({}) greater than maximum ({})",
                                 format_decimal(&lo),
                                 format_decimal(&hi)),
                position,
            });
        }

        let previous = self.environment.get(LOOP_VARIABLE).cloned();
        let result = self.accumulate(&lo, &hi, &args[2], identity, combine)
                         .map_err(|e| e.into_runtime(name, position));
        self.environment.restore(LOOP_VARIABLE, previous);
        result
    }

    fn accumulate(&mut self,
                  lo: &BigDecimal,
                  hi: &BigDecimal,
                  body: &Expr,
                  identity: BigDecimal,
                  combine: Combine)
                  -> Result<BigDecimal, StepError> {
        let step = BigDecimal::one();
        let mut result = identity;
        let mut i = lo.clone();
        while i <= *hi {
            self.environment.set(LOOP_VARIABLE, i.clone());
            let value = self.eval(body)?;
            trace!(i = %format_decimal(&i), value = %format_decimal(&value), "aggregate step");
            result = combine(&result, &value)?;
            i = MathContext::add(&i, &step)?;
        }
        Ok(result)
    }
}

/// A failure inside the aggregate loop, before it is attributed to the call.
enum StepError {
    Body(RuntimeError),
    Arithmetic(ArithmeticError),
}

impl StepError {
    fn into_runtime(self, name: &str, position: usize) -> RuntimeError {
        match self {
            Self::Body(e) => e,
            Self::Arithmetic(e) => arithmetic_error(e, name, position),
        }
    }
}

impl From<RuntimeError> for StepError {
    fn from(e: RuntimeError) -> Self {
        Self::Body(e)
    }
}

impl From<ArithmeticError> for StepError {
    fn from(e: ArithmeticError) -> Self {
        Self::Arithmetic(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parser::core::parse_source;

    fn run(context: &mut Context, source: &str) -> EvalResult<String> {
        let expr = parse_source(source, context.math).unwrap();
        context.eval(&expr).map(|value| format_decimal(&value))
    }

    #[test]
    fn sums_and_products() {
        let mut context = Context::default();
        assert_eq!(run(&mut context, "sum(1, 3, i)").unwrap(), "6");
        assert_eq!(run(&mut context, "product(1, 10, i)").unwrap(), "3628800");
        assert_eq!(run(&mut context, "sum(2, 2, i*10)").unwrap(), "20");
        assert_eq!(run(&mut context, "sum(0.5, 2, i)").unwrap(), "2.0");
    }

    #[test]
    fn previous_binding_is_restored() {
        let mut context = Context::default();
        context.environment.set(LOOP_VARIABLE, BigDecimal::from(42));
        assert_eq!(run(&mut context, "sum(1, 3, i)").unwrap(), "6");
        assert_eq!(context.environment.get(LOOP_VARIABLE), Some(&BigDecimal::from(42)));
    }

    #[test]
    fn unbound_variable_is_removed() {
        let mut context = Context::default();
        assert_eq!(run(&mut context, "product(1, 4, i)").unwrap(), "24");
        assert_eq!(context.environment.get(LOOP_VARIABLE), None);
    }

    #[test]
    fn binding_is_restored_after_errors() {
        let mut context = Context::default();
        context.environment.set(LOOP_VARIABLE, BigDecimal::from(7));
        assert!(matches!(run(&mut context, "sum(1, 3, 1/(i-2))"),
                         Err(RuntimeError::DivisionByZero { .. })));
        assert_eq!(context.environment.get(LOOP_VARIABLE), Some(&BigDecimal::from(7)));
    }

    #[test]
    fn nested_aggregates() {
        let mut context = Context::default();
        assert_eq!(run(&mut context, "sum(1, 3, sum(1, i, 1))").unwrap(), "6");
    }

    #[test]
    fn misaligned_terms_overflow() {
        let mut context = Context::default();
        assert_eq!(run(&mut context, "sum(1e-1000000000, 1, 0)"),
                   Err(RuntimeError::Overflow { operation: "sum".into(), position: 1 }));
        assert_eq!(context.environment.get(LOOP_VARIABLE), None);
    }

    #[test]
    fn bounds_must_be_ordered() {
        let mut context = Context::default();
        let err = run(&mut context, "sum(3, 1, i)").unwrap_err();
        assert_eq!(err.to_string(), "minimum (3) greater than maximum (1) at position 1.");
    }
}
