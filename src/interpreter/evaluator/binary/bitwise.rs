use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
    util::num::truncate_to_bigint,
};

/// Largest distance a value may be widened by, in bits.
pub const MAX_SHIFT: u64 = 65_536;

impl Context {
    /// Evaluates a shift or bitwise operation.
    ///
    /// Both operands are truncated toward zero first. `&`, `|` and `^` follow
    /// two's-complement semantics on integers of unbounded width. A negative
    /// shift count shifts the other way, and right shifts round toward
    /// negative infinity. The integer result is converted back at working
    /// precision.
    ///
    /// # Errors
    /// `Overflow` if an operand has too many integer digits, or if a shift
    /// would widen a non-zero value by more than [`MAX_SHIFT`] bits.
    pub(crate) fn eval_bitwise(&self,
                               op: BinaryOperator,
                               left: &BigDecimal,
                               right: &BigDecimal,
                               position: usize)
                               -> EvalResult<BigDecimal> {
        let overflow = || RuntimeError::Overflow { operation: op.to_string(), position };
        let l = truncate_to_bigint(left).ok_or_else(overflow)?;
        let r = truncate_to_bigint(right).ok_or_else(overflow)?;
        let result = match op {
            BinaryOperator::BitAnd => l & r,
            BinaryOperator::BitOr => l | r,
            BinaryOperator::BitXor => l ^ r,
            BinaryOperator::Shl => shift(l, &r, true).ok_or_else(overflow)?,
            BinaryOperator::Shr => shift(l, &r, false).ok_or_else(overflow)?,
            _ => unreachable!("eval_bitwise called with {op}"),
        };
        Ok(self.math.from_bigint(result))
    }
}

/// Shifts `value` by `count` bits, to the left when `left` is set.
///
/// Narrowing shifts never fail: once every bit is shifted out the result
/// settles at `0` or `-1`. Returns `None` only when a non-zero value would
/// grow by more than [`MAX_SHIFT`] bits.
fn shift(value: BigInt, count: &BigInt, left: bool) -> Option<BigInt> {
    // A negative count reverses the direction.
    let grows = left != count.is_negative();
    let distance = count.magnitude();
    if !grows {
        if *distance >= BigUint::from(value.bits()) {
            return Some(if value.is_negative() { BigInt::from(-1) } else { BigInt::zero() });
        }
        return distance.to_usize().map(|d| value >> d);
    }
    if value.is_zero() {
        return Some(value);
    }
    if *distance > BigUint::from(MAX_SHIFT) {
        return None;
    }
    distance.to_usize().map(|d| value << d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOperator, left: &str, right: &str) -> EvalResult<BigDecimal> {
        Context::default().eval_bitwise(op,
                                        &left.parse().unwrap(),
                                        &right.parse().unwrap(),
                                        1)
    }

    fn int(value: i64) -> BigDecimal {
        BigDecimal::from(value)
    }

    #[test]
    fn shifts() {
        assert_eq!(apply(BinaryOperator::Shl, "1", "4").unwrap(), int(16));
        assert_eq!(apply(BinaryOperator::Shr, "96", "3").unwrap(), int(12));
        assert_eq!(apply(BinaryOperator::Shl, "16", "-2").unwrap(), int(4));
        assert_eq!(apply(BinaryOperator::Shr, "1", "-3").unwrap(), int(8));
        assert_eq!(apply(BinaryOperator::Shr, "-5", "1").unwrap(), int(-3));
    }

    #[test]
    fn operands_are_truncated() {
        assert_eq!(apply(BinaryOperator::Shl, "1.9", "2.7").unwrap(), int(4));
        assert_eq!(apply(BinaryOperator::BitAnd, "7.9", "3").unwrap(), int(3));
    }

    #[test]
    fn twos_complement_logic() {
        assert_eq!(apply(BinaryOperator::BitXor, "5", "3").unwrap(), int(6));
        assert_eq!(apply(BinaryOperator::BitOr, "4", "1").unwrap(), int(5));
        assert_eq!(apply(BinaryOperator::BitAnd, "-1", "255").unwrap(), int(255));
        assert_eq!(apply(BinaryOperator::BitOr, "-8", "3").unwrap(), int(-5));
    }

    #[test]
    fn huge_left_shifts_overflow() {
        assert_eq!(apply(BinaryOperator::Shl, "1", "100000"),
                   Err(RuntimeError::Overflow { operation: "<<".into(), position: 1 }));
        assert_eq!(apply(BinaryOperator::Shr, "1", "-1e30"),
                   Err(RuntimeError::Overflow { operation: ">>".into(), position: 1 }));
    }

    #[test]
    fn narrowing_shifts_settle_at_zero_or_minus_one() {
        assert_eq!(apply(BinaryOperator::Shr, "1", "100000").unwrap(), int(0));
        assert_eq!(apply(BinaryOperator::Shr, "-1", "100000").unwrap(), int(-1));
        assert_eq!(apply(BinaryOperator::Shl, "1", "-100000").unwrap(), int(0));
        assert_eq!(apply(BinaryOperator::Shl, "-7", "-100000").unwrap(), int(-1));
        assert_eq!(apply(BinaryOperator::Shr, "12345", "1e30").unwrap(), int(0));
        assert_eq!(apply(BinaryOperator::Shr, "-12345", "1e30").unwrap(), int(-1));
    }

    #[test]
    fn zero_shifts_any_distance() {
        assert_eq!(apply(BinaryOperator::Shl, "0", "1e30").unwrap(), int(0));
        assert_eq!(apply(BinaryOperator::Shr, "0", "-1e30").unwrap(), int(0));
    }

    #[test]
    fn operands_with_too_many_digits_overflow() {
        assert_eq!(apply(BinaryOperator::BitAnd, "1e2000000", "1"),
                   Err(RuntimeError::Overflow { operation: "&".into(), position: 1 }));
    }

    #[test]
    fn wide_results_are_rounded() {
        let value = apply(BinaryOperator::Shl, "1", "100").unwrap();
        assert_eq!(value.as_bigint_and_exponent().0.to_string().len(), 20);
    }
}
