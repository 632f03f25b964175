use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_traits::{One, Zero};

use crate::{ast::BinaryOperator, interpreter::evaluator::core::Context};

impl Context {
    /// Evaluates a comparison of the form `Decimal <Operator> Decimal`.
    ///
    /// Values are compared numerically, so `1.0 == 1` holds. The result uses
    /// the calculator's inverted encoding: a true comparison yields `0` and a
    /// false one yields `1`.
    ///
    /// # Parameters
    /// - `op`: One of `Less`, `LessEqual`, `Greater`, `GreaterEqual`, `Equal`,
    ///   `NotEqual`.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// `0` if the comparison holds, `1` otherwise.
    #[must_use]
    pub(crate) fn eval_comparison(op: BinaryOperator,
                                  left: &BigDecimal,
                                  right: &BigDecimal)
                                  -> BigDecimal {
        let ordering = left.cmp(right);
        let holds = match op {
            BinaryOperator::Less => ordering == Ordering::Less,
            BinaryOperator::LessEqual => ordering != Ordering::Greater,
            BinaryOperator::Greater => ordering == Ordering::Greater,
            BinaryOperator::GreaterEqual => ordering != Ordering::Less,
            BinaryOperator::Equal => ordering == Ordering::Equal,
            BinaryOperator::NotEqual => ordering != Ordering::Equal,
            _ => unreachable!("eval_comparison called with {op}"),
        };
        if holds { BigDecimal::zero() } else { BigDecimal::one() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(op: BinaryOperator, left: i32, right: i32) -> BigDecimal {
        Context::eval_comparison(op, &BigDecimal::from(left), &BigDecimal::from(right))
    }

    #[test]
    fn true_is_zero_and_false_is_one() {
        assert_eq!(compare(BinaryOperator::Less, 1, 2), BigDecimal::zero());
        assert_eq!(compare(BinaryOperator::Less, 2, 2), BigDecimal::one());
        assert_eq!(compare(BinaryOperator::Less, 2, 1), BigDecimal::one());
        assert_eq!(compare(BinaryOperator::LessEqual, 2, 2), BigDecimal::zero());
        assert_eq!(compare(BinaryOperator::Greater, 3, 2), BigDecimal::zero());
        assert_eq!(compare(BinaryOperator::GreaterEqual, 1, 2), BigDecimal::one());
        assert_eq!(compare(BinaryOperator::NotEqual, 1, 2), BigDecimal::zero());
    }

    #[test]
    fn equality_ignores_scale() {
        let one = BigDecimal::from(1);
        let one_point_zero: BigDecimal = "1.0".parse().unwrap();
        assert_eq!(Context::eval_comparison(BinaryOperator::Equal, &one, &one_point_zero),
                   BigDecimal::zero());
    }

    #[test]
    fn distant_magnitudes_compare_without_rescaling() {
        let huge: BigDecimal = "1e1000000000".parse().unwrap();
        let tiny: BigDecimal = "1e-1000000000".parse().unwrap();
        let one = BigDecimal::from(1);
        assert_eq!(Context::eval_comparison(BinaryOperator::Less, &huge, &one), BigDecimal::one());
        assert_eq!(Context::eval_comparison(BinaryOperator::Less, &tiny, &one), BigDecimal::zero());
        assert_eq!(Context::eval_comparison(BinaryOperator::Equal, &huge, &tiny),
                   BigDecimal::one());
    }

    #[test]
    #[should_panic(expected = "eval_comparison called with +")]
    fn rejects_non_relational_operators() {
        let one = BigDecimal::from(1);
        let _ = Context::eval_comparison(BinaryOperator::Add, &one, &one);
    }
}
