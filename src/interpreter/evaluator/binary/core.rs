use bigdecimal::BigDecimal;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::arithmetic_error,
        },
        value::core::MathContext,
    },
};

impl Context {
    /// Evaluates both operands of a binary operation, left first, and applies
    /// the operator.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `position`: Source column of the operator.
    pub(crate) fn eval_binary_op(&mut self,
                                 left: &Expr,
                                 op: BinaryOperator,
                                 right: &Expr,
                                 position: usize)
                                 -> EvalResult<BigDecimal> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        self.eval_binary(op, &left, &right, position)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Addition, subtraction and multiplication are exact. Division rounds to
    /// the working precision. Remainder truncates. Relational operators use
    /// `eval_comparison`; shifts and bitwise operators use `eval_bitwise`;
    /// power calls `eval_pow`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source column for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<BigDecimal>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use bigdecimal::BigDecimal;
    /// use calkit::{ast::BinaryOperator, interpreter::evaluator::core::Context};
    ///
    /// let context = Context::default();
    /// let left = BigDecimal::from(3);
    /// let right = BigDecimal::from(4);
    ///
    /// let result = context.eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), BigDecimal::from(7));
    /// ```
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &BigDecimal,
                       right: &BigDecimal,
                       position: usize)
                       -> EvalResult<BigDecimal> {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
            Mul, NotEqual, Pow, Shl, Shr, Sub,
        };

        let failed = |e| arithmetic_error(e, &op.to_string(), position);
        match op {
            Add => MathContext::add(left, right).map_err(failed),
            Sub => MathContext::subtract(left, right).map_err(failed),
            Mul => Ok(MathContext::multiply(left, right)),
            Div => self.math
                       .divide(left, right)
                       .ok_or(RuntimeError::DivisionByZero { position }),
            Mod => MathContext::remainder(left, right).map_err(failed),
            Pow => self.eval_pow(left, right, position),
            Shl | Shr | BitAnd | BitOr | BitXor => self.eval_bitwise(op, left, right, position),
            Less | LessEqual | Greater | GreaterEqual | Equal | NotEqual => {
                Ok(Self::eval_comparison(op, left, right))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::interpreter::value::display::format_decimal;

    fn apply(op: BinaryOperator, left: &str, right: &str) -> EvalResult<String> {
        let context = Context::default();
        let left = left.parse().unwrap();
        let right = right.parse().unwrap();
        context.eval_binary(op, &left, &right, 1)
               .map(|value| format_decimal(&value))
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(apply(BinaryOperator::Sub, "10000", "0.001").unwrap(), "9999.999");
        assert_eq!(apply(BinaryOperator::Mul, "-3", "-4").unwrap(), "12");
        assert_eq!(apply(BinaryOperator::Add, "1.00", "2").unwrap(), "3.00");
    }

    #[test]
    fn division_and_remainder() {
        assert_eq!(apply(BinaryOperator::Div, "1", "3").unwrap(), "0.33333333333333333333");
        assert_eq!(apply(BinaryOperator::Div, "1", "2").unwrap(), "0.5");
        assert_eq!(apply(BinaryOperator::Mod, "5", "4").unwrap(), "1");
        assert_eq!(apply(BinaryOperator::Mod, "-7", "2").unwrap(), "-1");
    }

    #[test]
    fn zero_divisors() {
        assert_eq!(apply(BinaryOperator::Div, "1", "0"),
                   Err(RuntimeError::DivisionByZero { position: 1 }));
        assert_eq!(apply(BinaryOperator::Mod, "1", "0"),
                   Err(RuntimeError::DivisionByZero { position: 1 }));
    }

    #[test]
    fn comparing_distant_magnitudes_is_fast() {
        let started = Instant::now();
        assert_eq!(apply(BinaryOperator::Less, "1e1000000000", "1").unwrap(), "1");
        assert_eq!(apply(BinaryOperator::Greater, "1e1000000000", "1").unwrap(), "0");
        assert_eq!(apply(BinaryOperator::Add, "1e1000000000", "1"),
                   Err(RuntimeError::Overflow { operation: "+".into(),
                                                position:  1, }));
        assert!(started.elapsed().as_secs() < 5);
    }
}
