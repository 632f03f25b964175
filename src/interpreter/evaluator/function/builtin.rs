use bigdecimal::BigDecimal;
use rand::Rng;

use crate::{
    ast::Expr,
    interpreter::evaluator::core::{Context, EvalResult},
};

/// Defines a one-argument builtin computed in `f64`.
///
/// The generated function evaluates its argument, converts it to the nearest
/// `f64`, applies the float method, and converts the result back at working
/// precision. NaN and infinite results produce a `NonFiniteResult` error.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calkit::{
///     ast::Expr,
///     interpreter::evaluator::{core::Context, function::builtin::sqrt},
/// };
///
/// let mut context = Context::default();
/// let argument = Expr::Literal { value:    BigDecimal::from(81),
///                                position: 6, };
///
/// assert_eq!(sqrt(&mut context, &[argument], 1).unwrap(), BigDecimal::from(9));
/// ```
macro_rules! float_builtin {
    ($fname:ident, $real_fn:ident) => {
        pub fn $fname(context: &mut Context,
                      args: &[Expr],
                      position: usize)
                      -> EvalResult<BigDecimal> {
            let x = context.eval_f64(&args[0])?;
            context.bridge_f64(stringify!($fname), x.$real_fn(), position)
        }
    };
}

float_builtin!(acos, acos);
float_builtin!(asin, asin);
float_builtin!(atan, atan);
float_builtin!(cbrt, cbrt);
float_builtin!(cos, cos);
float_builtin!(cosh, cosh);
float_builtin!(exp, exp);
float_builtin!(sin, sin);
float_builtin!(sinh, sinh);
float_builtin!(sqrt, sqrt);
float_builtin!(tan, tan);
float_builtin!(tanh, tanh);
float_builtin!(ceiling, ceil);
float_builtin!(floor, floor);

/// Absolute value, computed exactly.
pub fn abs(context: &mut Context, args: &[Expr], _position: usize) -> EvalResult<BigDecimal> {
    Ok(context.eval(&args[0])?.abs())
}

/// Rounds to the nearest integer, with ties going toward positive infinity
/// (`round(-2.5)` is `-2`).
pub fn round(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x = context.eval_f64(&args[0])?;
    // `x + 0.5` itself rounds for the largest double below one half.
    let floor = x.floor();
    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };
    context.bridge_f64("round", rounded, position)
}

/// `atan2(y, x)`: the angle of the point `(x, y)` in radians.
pub fn atan2(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let y = context.eval_f64(&args[0])?;
    let x = context.eval_f64(&args[1])?;
    context.bridge_f64("atan2", y.atan2(x), position)
}

/// `hypot(x, y)`: `sqrt(x² + y²)` without intermediate overflow.
pub fn hypot(context: &mut Context, args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x = context.eval_f64(&args[0])?;
    let y = context.eval_f64(&args[1])?;
    context.bridge_f64("hypot", x.hypot(y), position)
}

/// A uniformly distributed value in `[0, 1)`.
pub fn random(context: &mut Context, _args: &[Expr], position: usize) -> EvalResult<BigDecimal> {
    let x: f64 = rand::thread_rng().r#gen();
    context.bridge_f64("random", x, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, interpreter::value::display::format_decimal};

    fn literal(text: &str) -> Expr {
        Expr::Literal { value:    text.parse().unwrap(),
                        position: 1, }
    }

    fn call(func: fn(&mut Context, &[Expr], usize) -> EvalResult<BigDecimal>,
            args: &[&str])
            -> EvalResult<String> {
        let args: Vec<Expr> = args.iter().map(|a| literal(a)).collect();
        func(&mut Context::default(), &args, 1).map(|value| format_decimal(&value))
    }

    #[test]
    fn exact_absolute_value() {
        assert_eq!(call(abs, &["-2.50"]).unwrap(), "2.50");
        assert_eq!(call(abs, &["3"]).unwrap(), "3");
    }

    #[test]
    fn float_functions() {
        assert_eq!(call(sqrt, &["81"]).unwrap(), "9");
        assert_eq!(call(hypot, &["3", "4"]).unwrap(), "5");
        assert_eq!(call(cos, &["0"]).unwrap(), "1");
        assert_eq!(call(cbrt, &["27"]).unwrap(), "3");
        assert_eq!(call(atan2, &["0", "1"]).unwrap(), "0");
    }

    #[test]
    fn rounding_functions() {
        assert_eq!(call(floor, &["-1.5"]).unwrap(), "-2");
        assert_eq!(call(ceiling, &["1.2"]).unwrap(), "2");
        assert_eq!(call(round, &["2.5"]).unwrap(), "3");
        assert_eq!(call(round, &["-2.5"]).unwrap(), "-2");
        assert_eq!(call(round, &["0.49999999999999994"]).unwrap(), "0");
        assert_eq!(call(round, &["-0.5"]).unwrap(), "0");
        assert_eq!(call(round, &["4503599627370497"]).unwrap(), "4503599627370497");
    }

    #[test]
    fn non_finite_results() {
        assert!(matches!(call(sqrt, &["-1"]), Err(RuntimeError::NonFiniteResult { .. })));
        assert!(matches!(call(exp, &["1000"]), Err(RuntimeError::NonFiniteResult { .. })));
    }

    #[test]
    fn random_is_in_unit_interval() {
        for _ in 0..100 {
            let value = random(&mut Context::default(), &[], 1).unwrap();
            assert!(value >= BigDecimal::from(0) && value < BigDecimal::from(1));
        }
    }
}
