use bigdecimal::BigDecimal;

use crate::{
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{arithmetic_error, integral_i64},
        },
        value::core::MAX_EXACT_EXPONENT,
    },
    util::num::decimal_to_f64,
};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// An integral exponent within `±999 999 999` is applied exactly:
    /// non-negative powers keep every digit and negative powers take the
    /// reciprocal at working precision. Any other exponent goes through
    /// `f64::powf` and the result is brought back at working precision.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    /// - `position`: Source column for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<BigDecimal>` containing the result of `base ** exponent`.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero base with a negative integral exponent.
    /// - `Overflow` when the exact result would be unreasonably large.
    /// - `NonFiniteResult` when the floating-point path yields NaN or infinity.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calkit::interpreter::evaluator::core::Context;
    ///
    /// let context = Context::default();
    /// let result = context.eval_pow(&BigDecimal::from(2), &BigDecimal::from(10), 1).unwrap();
    /// assert_eq!(result, BigDecimal::from(1024));
    /// ```
    pub fn eval_pow(&self,
                    base: &BigDecimal,
                    exponent: &BigDecimal,
                    position: usize)
                    -> EvalResult<BigDecimal> {
        if let Some(n) = integral_i64(exponent)
           && n.unsigned_abs() <= MAX_EXACT_EXPONENT.unsigned_abs()
        {
            return self.math
                       .pow(base, n)
                       .map_err(|e| arithmetic_error(e, "**", position));
        }
        let value = decimal_to_f64(base).powf(decimal_to_f64(exponent));
        self.bridge_f64("**", value, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, interpreter::value::display::format_decimal};

    fn pow(base: &str, exponent: &str) -> EvalResult<String> {
        Context::default().eval_pow(&base.parse().unwrap(), &exponent.parse().unwrap(), 1)
                          .map(|value| format_decimal(&value))
    }

    #[test]
    fn integral_exponents_are_exact() {
        assert_eq!(pow("2", "81").unwrap(), "2417851639229258349412352");
        assert_eq!(pow("-10", "2").unwrap(), "100");
        assert_eq!(pow("0.5", "2.0").unwrap(), "0.25");
        assert_eq!(pow("2", "-2").unwrap(), "0.25");
    }

    #[test]
    fn fractional_exponents_use_floats() {
        assert_eq!(pow("4", "0.5").unwrap(), "2");
        assert_eq!(pow("2", "0.5").unwrap(), "1.4142135623730951455");
    }

    #[test]
    fn failures() {
        assert_eq!(pow("0", "-1"), Err(RuntimeError::DivisionByZero { position: 1 }));
        assert!(matches!(pow("10", "100000"), Err(RuntimeError::Overflow { .. })));
        assert!(matches!(pow("-8", "0.5"), Err(RuntimeError::NonFiniteResult { .. })));
    }

    #[test]
    fn large_negative_exponents_have_small_results() {
        assert_eq!(pow("10", "-10001").unwrap(), "1E-10001");
        assert!(pow("2", "-20000").unwrap().ends_with("E-6021"));
        assert_eq!(pow("0.5", "-1").unwrap(), "2");
    }
}
