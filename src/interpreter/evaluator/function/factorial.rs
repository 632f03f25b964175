use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::display::format_decimal,
    },
    util::num::{split_product, to_bigint_exact},
};

/// Largest argument accepted by the factorial.
pub const MAX_FACTORIAL: u32 = 5_000;

/// The `factorial(n)` builtin.
pub fn factorial(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let value = context.eval(&args[0])?;
    context.factorial(&value, position)
}

impl Context {
    /// Computes `value!` exactly and rounds it to working precision.
    ///
    /// # Errors
    /// - `InvalidArgument` if `value` is negative or has a fractional part.
    /// - `Overflow` if `value` exceeds [`MAX_FACTORIAL`].
    pub(crate) fn factorial(&self, value: &BigDecimal, position: usize) -> EvalResult<BigDecimal> {
        if value.is_integer() && *value > BigDecimal::from(MAX_FACTORIAL) {
            return Err(RuntimeError::Overflow { operation: "factorial".into(),
                                                position });
        }
        let n = to_bigint_exact(value).filter(|n| !n.is_negative())
                                      .ok_or_else(|| RuntimeError::InvalidArgument {
                                          name: "factorial".into(),
                                          details: format!("expected a non-negative integer, found {}",
                                                           format_decimal(value)),
                                          position,
                                      })?;
        if n <= BigInt::one() {
            return Ok(BigDecimal::one());
        }
        Ok(self.math.from_bigint(split_product(&n, &BigInt::one())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(text: &str) -> EvalResult<String> {
        Context::default().factorial(&text.parse().unwrap(), 1)
                          .map(|value| format_decimal(&value))
    }

    #[test]
    fn small_values_are_exact() {
        assert_eq!(fact("0").unwrap(), "1");
        assert_eq!(fact("1").unwrap(), "1");
        assert_eq!(fact("5").unwrap(), "120");
        assert_eq!(fact("5.00").unwrap(), "120");
        assert_eq!(fact("20").unwrap(), "2432902008176640000");
    }

    #[test]
    fn large_values_are_rounded() {
        assert_eq!(fact("25").unwrap(), "1.5511210043330985984E+25");
    }

    #[test]
    fn domain() {
        assert!(matches!(fact("-1"), Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(fact("0.5"), Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(fact("5001"), Err(RuntimeError::Overflow { .. })));
        assert!(matches!(fact("1e2000000"), Err(RuntimeError::Overflow { .. })));
    }
}
