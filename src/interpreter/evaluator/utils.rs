use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use tracing::warn;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::lookup_function,
        },
        value::core::ArithmeticError,
    },
    util::num::{decimal_to_f64, to_bigint_exact},
};

/// Names of the built-in constants and the `f64` values they are taken from.
pub const CONSTANTS: &[(&str, f64)] = &[("e", std::f64::consts::E),
                                        ("pi", std::f64::consts::PI),
                                        ("π", std::f64::consts::PI)];

impl Context {
    /// Resolves an identifier.
    ///
    /// Variables bound in the environment take precedence over the built-in
    /// constants, so a loop variable named `e` shadows Euler's number while it
    /// is bound.
    ///
    /// # Parameters
    /// - `name`: The identifier to resolve.
    /// - `position`: Source column for error reporting.
    ///
    /// # Returns
    /// The bound or constant value.
    ///
    /// # Errors
    /// `UnknownVariable` if the name is neither bound nor a constant. This
    /// includes function names used without an argument list.
    pub(crate) fn eval_identifier(&self, name: &str, position: usize) -> EvalResult<BigDecimal> {
        if let Some(value) = self.environment.get(name) {
            return Ok(value.clone());
        }
        if let Some(value) = self.constant(name) {
            return Ok(value);
        }
        if lookup_function(name).is_some() {
            warn!(name, "function name used without an argument list");
        }
        Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                            position })
    }

    /// Returns the built-in constant called `name` at working precision.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<BigDecimal> {
        let (_, value) = CONSTANTS.iter().find(|(constant, _)| *constant == name)?;
        self.math.from_f64(*value)
    }

    /// Evaluates a subexpression and converts the result to the nearest `f64`.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The evaluated value as a float. Values beyond the `f64` range become
    /// infinite.
    pub(crate) fn eval_f64(&mut self, expr: &Expr) -> EvalResult<f64> {
        Ok(decimal_to_f64(&self.eval(expr)?))
    }

    /// Brings the result of a floating-point computation back into the decimal
    /// domain at working precision.
    ///
    /// # Parameters
    /// - `name`: The function or operator that produced `value`.
    /// - `value`: The float result.
    /// - `position`: Source column for error reporting.
    ///
    /// # Errors
    /// `NonFiniteResult` if `value` is NaN or infinite.
    pub(crate) fn bridge_f64(&self,
                             name: &str,
                             value: f64,
                             position: usize)
                             -> EvalResult<BigDecimal> {
        self.math.from_f64(value).ok_or_else(|| {
                                     warn!(name, value, position, "non-finite float result");
                                     RuntimeError::NonFiniteResult { name: name.to_string(),
                                                                     position }
                                 })
    }
}

/// Converts a failed exact operation into the runtime error reported for
/// `operation`.
pub(crate) fn arithmetic_error(error: ArithmeticError,
                               operation: &str,
                               position: usize)
                               -> RuntimeError {
    match error {
        ArithmeticError::DivisionByZero => RuntimeError::DivisionByZero { position },
        ArithmeticError::TooLarge => RuntimeError::Overflow { operation: operation.to_string(),
                                                              position },
    }
}

/// Requires that `value` is an integer and returns it as `i64`.
///
/// Returns `None` for fractional values and integers outside the `i64` range.
#[must_use]
pub fn integral_i64(value: &BigDecimal) -> Option<i64> {
    to_bigint_exact(value)?.to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::display::format_decimal;

    #[test]
    fn constants_are_rounded_floats() {
        let context = Context::default();
        assert_eq!(format_decimal(&context.constant("pi").unwrap()), "3.1415926535897931160");
        assert_eq!(context.constant("π"), context.constant("pi"));
        assert_eq!(format_decimal(&context.constant("e").unwrap()), "2.7182818284590450908");
        assert!(context.constant("tau").is_none());
    }

    #[test]
    fn environment_shadows_constants() {
        let mut context = Context::default();
        context.environment.set("e", BigDecimal::from(7));
        assert_eq!(context.eval_identifier("e", 1).unwrap(), BigDecimal::from(7));
    }

    #[test]
    fn unknown_identifiers() {
        let context = Context::default();
        assert!(matches!(context.eval_identifier("x", 4),
                         Err(RuntimeError::UnknownVariable { position: 4, .. })));
        assert!(matches!(context.eval_identifier("sqrt", 1),
                         Err(RuntimeError::UnknownVariable { .. })));
    }

    #[test]
    fn non_finite_results_are_rejected() {
        let context = Context::default();
        assert!(matches!(context.bridge_f64("sqrt", f64::NAN, 1),
                         Err(RuntimeError::NonFiniteResult { .. })));
        assert_eq!(context.bridge_f64("sqrt", 9.0, 1).unwrap(), BigDecimal::from(9));
    }

    #[test]
    fn integral_conversion() {
        assert_eq!(integral_i64(&BigDecimal::from(3)), Some(3));
        assert_eq!(integral_i64(&"2.50".parse().unwrap()), None);
    }
}
