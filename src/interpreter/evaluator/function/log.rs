use bigdecimal::BigDecimal;

use crate::{
    ast::Expr,
    interpreter::evaluator::core::{Context, EvalResult},
};

/// Computes the logarithm of a value with respect to a given base.
///
/// Accepts exactly two arguments, `base` first:
/// `log(base, n) = ln(n) / ln(base)`.
///
/// Both are converted to `f64`. Bases of `1` and non-positive inputs produce a
/// non-finite quotient and are reported as `NonFiniteResult`.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calkit::{
///     ast::Expr,
///     interpreter::evaluator::{core::Context, function::log::log},
/// };
///
/// let mut context = Context::default();
/// let args = [Expr::Literal { value:    BigDecimal::from(2),
///                             position: 5, },
///             Expr::Literal { value:    BigDecimal::from(1024),
///                             position: 7, }];
///
/// assert_eq!(log(&mut context, &args, 1).unwrap(), BigDecimal::from(10));
/// ```
pub fn log(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let base = context.eval_f64(&args[0])?;
    let value = context.eval_f64(&args[1])?;
    context.bridge_f64("log", value.ln() / base.ln(), position)
}

/// Natural logarithm, exposed as `logE`.
pub fn ln(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x = context.eval_f64(&args[0])?;
    context.bridge_f64("logE", x.ln(), position)
}

/// Base-2 logarithm.
pub fn log2(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x = context.eval_f64(&args[0])?;
    context.bridge_f64("log2", x.log2(), position)
}

/// Base-10 logarithm.
pub fn log10(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x = context.eval_f64(&args[0])?;
    context.bridge_f64("log10", x.log10(), position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn literal(value: i64) -> Expr {
        Expr::Literal { value:    BigDecimal::from(value),
                        position: 1, }
    }

    #[test]
    fn fixed_bases() {
        let mut context = Context::default();
        assert_eq!(log2(&mut context, &[literal(8)], 1).unwrap(), BigDecimal::from(3));
        assert_eq!(log10(&mut context, &[literal(1000)], 1).unwrap(), BigDecimal::from(3));
        assert_eq!(ln(&mut context, &[literal(1)], 1).unwrap(), BigDecimal::from(0));
    }

    #[test]
    fn degenerate_inputs() {
        let mut context = Context::default();
        assert!(matches!(log(&mut context, &[literal(1), literal(5)], 1),
                         Err(RuntimeError::NonFiniteResult { .. })));
        assert!(matches!(ln(&mut context, &[literal(0)], 1),
                         Err(RuntimeError::NonFiniteResult { .. })));
    }
}
