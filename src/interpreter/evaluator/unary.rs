use bigdecimal::BigDecimal;

use crate::{
    ast::{Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
    util::num::truncate_to_bigint,
};

impl Context {
    /// Evaluates the operand of a unary operation and applies the operator.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                position: usize)
                                -> EvalResult<BigDecimal> {
        let value = self.eval(expr)?;
        self.eval_unary(op, &value, position)
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `BitNot`: bitwise complement of the truncated integer, `~x == -x - 1`.
    /// - `Factorial`: exact factorial of a non-negative integer, rounded to
    ///   working precision.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Source column for error reporting.
    ///
    /// # Returns
    /// The computed value wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calkit::{ast::UnaryOperator, interpreter::evaluator::core::Context};
    ///
    /// let context = Context::default();
    ///
    /// let v = context.eval_unary(UnaryOperator::BitNot, &BigDecimal::from(3), 1).unwrap();
    /// assert_eq!(v, BigDecimal::from(-4));
    ///
    /// let v = context.eval_unary(UnaryOperator::Factorial, &BigDecimal::from(4), 1).unwrap();
    /// assert_eq!(v, BigDecimal::from(24));
    /// ```
    pub fn eval_unary(&self,
                      op: UnaryOperator,
                      value: &BigDecimal,
                      position: usize)
                      -> EvalResult<BigDecimal> {
        match op {
            UnaryOperator::BitNot => {
                let overflow = || RuntimeError::Overflow { operation: op.to_string(), position };
                let integer = truncate_to_bigint(value).ok_or_else(overflow)?;
                Ok(self.math.from_bigint(!integer))
            }
            UnaryOperator::Factorial => self.factorial(value, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_truncates_first() {
        let context = Context::default();
        let value: BigDecimal = "-4.7".parse().unwrap();
        assert_eq!(context.eval_unary(UnaryOperator::BitNot, &value, 1).unwrap(),
                   BigDecimal::from(3));
        assert_eq!(context.eval_unary(UnaryOperator::BitNot, &BigDecimal::from(0), 1).unwrap(),
                   BigDecimal::from(-1));
    }

    #[test]
    fn complement_of_oversized_operand_overflows() {
        let context = Context::default();
        let value: BigDecimal = "1e2000000".parse().unwrap();
        assert_eq!(context.eval_unary(UnaryOperator::BitNot, &value, 2),
                   Err(RuntimeError::Overflow { operation: "~".into(), position: 2 }));
    }

    #[test]
    fn factorial_rejects_fractions() {
        let context = Context::default();
        let value: BigDecimal = "2.5".parse().unwrap();
        assert!(matches!(context.eval_unary(UnaryOperator::Factorial, &value, 3),
                         Err(RuntimeError::InvalidArgument { position: 3, .. })));
    }
}
