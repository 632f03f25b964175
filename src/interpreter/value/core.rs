use std::num::{NonZeroU32, NonZeroU64};

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::util::num::{MAX_INTEGER_DIGITS, digit_count, f64_to_decimal_exact, pow10};

/// Number of significant digits kept by non-exact operations.
pub const DEFAULT_PRECISION: u32 = 20;

/// Largest magnitude of an integer exponent handled exactly by
/// [`MathContext::pow`]; larger exponents go through `f64`.
pub const MAX_EXACT_EXPONENT: i64 = 999_999_999;

/// Upper bound on the number of digits an exact power may produce.
pub const MAX_RESULT_DIGITS: u64 = 10_000;

/// Working precision for decimal arithmetic.
///
/// A `MathContext` decides how many significant digits survive each operation
/// that cannot be computed exactly. Rounding is always half-up: ties round
/// away from zero. Addition, subtraction and multiplication are exact and
/// ignore the precision; division, conversions from `f64` and conversions
/// from big integers round to it.
///
/// # Example
/// ```
/// use bigdecimal::BigDecimal;
/// use calkit::interpreter::value::{core::MathContext, display::format_decimal};
///
/// let mc = MathContext::default();
/// let third = mc.divide(&BigDecimal::from(1), &BigDecimal::from(3)).unwrap();
/// assert_eq!(format_decimal(&third), "0.33333333333333333333");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: NonZeroU32,
}

impl Default for MathContext {
    fn default() -> Self {
        Self { precision: NonZeroU32::MIN.saturating_add(DEFAULT_PRECISION - 1) }
    }
}

impl MathContext {
    /// Creates a context keeping `precision` significant digits.
    #[must_use]
    pub const fn new(precision: NonZeroU32) -> Self {
        Self { precision }
    }

    /// The number of significant digits this context keeps.
    #[must_use]
    pub const fn precision(self) -> u32 {
        self.precision.get()
    }

    /// Rounds `value` to the working precision, half-up.
    ///
    /// Values that already fit are returned unchanged, including their scale,
    /// so `1.00` stays `1.00`.
    #[must_use]
    pub fn round(self, value: &BigDecimal) -> BigDecimal {
        let precision = NonZeroU64::from(self.precision);
        if value.digits() <= precision.get() {
            return value.clone();
        }
        let rounded = value.with_precision_round(precision, RoundingMode::HalfUp);
        // 9.99 -> 10.0 carries into an extra digit, which is always a zero.
        if rounded.digits() > precision.get() {
            rounded.with_precision_round(precision, RoundingMode::HalfUp)
        } else {
            rounded
        }
    }

    /// Converts an exact integer into a decimal at working precision.
    #[must_use]
    pub fn from_bigint(self, value: BigInt) -> BigDecimal {
        self.round(&BigDecimal::from(value))
    }

    /// Converts an `f64` into a decimal at working precision.
    ///
    /// The float's exact binary value is expanded first and then rounded, so
    /// `0.1` becomes `0.10000000000000000555`. Returns `None` for NaN and
    /// infinities.
    #[must_use]
    pub fn from_f64(self, value: f64) -> Option<BigDecimal> {
        f64_to_decimal_exact(value).map(|exact| self.round(&exact))
    }

    /// Exact sum; the scale is the larger of the operand scales.
    ///
    /// Fails with [`ArithmeticError::TooLarge`] when lining the operands up
    /// on a common scale would take more than [`MAX_INTEGER_DIGITS`] digits,
    /// as in `1e1000000000 + 1`.
    pub fn add(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let (l, r, scale) = align(left, right)?;
        Ok(BigDecimal::new(l + r, scale))
    }

    /// Exact difference; the scale is the larger of the operand scales.
    pub fn subtract(left: &BigDecimal, right: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let (l, r, scale) = align(left, right)?;
        Ok(BigDecimal::new(l - r, scale))
    }

    /// Exact product; the scale is the sum of the operand scales.
    ///
    /// Unlike `BigDecimal`'s `*`, a factor of one does not normalize the
    /// result, so `1 * 10` stays `10` rather than `1E+1`.
    #[must_use]
    pub fn multiply(left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
        let (l, ls) = left.as_bigint_and_exponent();
        let (r, rs) = right.as_bigint_and_exponent();
        BigDecimal::new(l * r, ls + rs)
    }

    /// Divides `dividend` by `divisor`, rounding to the working precision.
    ///
    /// When the quotient is exact it is given the scale
    /// `scale(dividend) - scale(divisor)` whenever that does not lose digits,
    /// so `10/2` is `5` and `1/2` is `0.5`. Returns `None` when the divisor is
    /// zero.
    #[must_use]
    pub fn divide(self, dividend: &BigDecimal, divisor: &BigDecimal) -> Option<BigDecimal> {
        if divisor.is_zero() {
            return None;
        }
        let (a, a_scale) = dividend.as_bigint_and_exponent();
        let (b, b_scale) = divisor.as_bigint_and_exponent();
        let preferred_scale = a_scale - b_scale;
        if a.is_zero() {
            return Some(BigDecimal::new(BigInt::zero(), preferred_scale));
        }

        // Widen the dividend until the integer quotient carries at least two
        // digits more than the precision.
        let precision = i64::from(self.precision());
        let a_digits = i64::try_from(digit_count(&a)).ok()?;
        let b_digits = i64::try_from(digit_count(&b)).ok()?;
        let widen = (precision + b_digits - a_digits + 2).max(0);
        let (quotient, remainder) = (a * pow10(widen.unsigned_abs())).div_rem(&b);

        let quotient = BigDecimal::new(quotient, preferred_scale + widen);
        let rounded = self.round(&quotient);
        if remainder.is_zero() && rounded == quotient {
            return Some(strip_trailing_zeros(rounded, preferred_scale));
        }
        Some(rounded)
    }

    /// Remainder of truncating division; the sign follows the dividend.
    ///
    /// # Errors
    /// - `DivisionByZero` when the divisor is zero.
    /// - `TooLarge` when the operands cannot be lined up on a common scale
    ///   within [`MAX_INTEGER_DIGITS`] digits.
    pub fn remainder(dividend: &BigDecimal,
                     divisor: &BigDecimal)
                     -> Result<BigDecimal, ArithmeticError> {
        if divisor.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let scale = check_alignment(dividend, divisor)?;
        if dividend.is_zero() {
            return Ok(BigDecimal::new(BigInt::zero(), scale));
        }
        Ok(dividend % divisor)
    }

    /// Raises `base` to an integer power.
    ///
    /// Non-negative exponents are computed exactly. Negative exponents take
    /// the reciprocal of a power computed at slightly more than the working
    /// precision, so `2 ** -20000` is as cheap as `2 ** -2`.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero base with a negative exponent.
    /// - `TooLarge` when the exponent exceeds [`MAX_EXACT_EXPONENT`] or an
    ///   exact result would have more than [`MAX_RESULT_DIGITS`] digits.
    pub fn pow(self, base: &BigDecimal, exponent: i64) -> Result<BigDecimal, ArithmeticError> {
        let magnitude = exponent.unsigned_abs();
        if magnitude > MAX_EXACT_EXPONENT.unsigned_abs() {
            return Err(ArithmeticError::TooLarge);
        }
        if exponent < 0 {
            return self.reciprocal_power(base, magnitude);
        }
        let (unscaled, scale) = base.as_bigint_and_exponent();

        let base_digits = digit_count(&unscaled);
        if !unscaled.abs().is_one() && !unscaled.is_zero()
           && base_digits.saturating_mul(magnitude) > MAX_RESULT_DIGITS
        {
            return Err(ArithmeticError::TooLarge);
        }

        let too_large = |_| ArithmeticError::TooLarge;
        let power_scale = scale.checked_mul(i64::try_from(magnitude).map_err(too_large)?)
                               .ok_or(ArithmeticError::TooLarge)?;
        let times = usize::try_from(magnitude).map_err(too_large)?;
        Ok(BigDecimal::new(num_traits::pow(unscaled, times), power_scale))
    }

    /// Computes `1 / base^magnitude` by repeated squaring.
    ///
    /// Intermediate powers keep the working precision plus one guard digit
    /// per decimal digit of `magnitude`, plus one.
    fn reciprocal_power(self,
                        base: &BigDecimal,
                        magnitude: u64)
                        -> Result<BigDecimal, ArithmeticError> {
        if base.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let guard_digits = magnitude.checked_ilog10().unwrap_or(0) + 2;
        let working = Self::new(self.precision.saturating_add(guard_digits));

        let mut power = BigDecimal::one();
        let mut square = working.round(base);
        let mut remaining = magnitude;
        while remaining > 0 {
            if remaining & 1 == 1 {
                power = working.round(&Self::multiply(&power, &square));
            }
            remaining >>= 1;
            if remaining > 0 {
                square = working.round(&Self::multiply(&square, &square));
            }
        }
        self.divide(&BigDecimal::one(), &power)
            .ok_or(ArithmeticError::DivisionByZero)
    }
}

/// Failure modes of the exact operations on [`MathContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// A zero divisor, or a zero base raised to a negative power.
    DivisionByZero,
    /// An operand or the exact result exceeds the supported size.
    TooLarge,
}

/// Number of digits `value` takes once rescaled to `scale`. Zero takes none.
fn widened_digits(value: &BigDecimal, scale: i64) -> u64 {
    let (unscaled, own_scale) = value.as_bigint_and_exponent();
    if unscaled.is_zero() {
        return 0;
    }
    digit_count(&unscaled).saturating_add(scale.abs_diff(own_scale))
}

fn check_alignment(left: &BigDecimal, right: &BigDecimal) -> Result<i64, ArithmeticError> {
    let scale = left.fractional_digit_count().max(right.fractional_digit_count());
    if widened_digits(left, scale).max(widened_digits(right, scale)) > MAX_INTEGER_DIGITS {
        return Err(ArithmeticError::TooLarge);
    }
    Ok(scale)
}

/// Rescales two decimals to their common (larger) scale.
fn align(left: &BigDecimal, right: &BigDecimal) -> Result<(BigInt, BigInt, i64), ArithmeticError> {
    let scale = check_alignment(left, right)?;
    let (l, ls) = left.as_bigint_and_exponent();
    let (r, rs) = right.as_bigint_and_exponent();
    let widen = |unscaled: BigInt, own: i64| {
        if unscaled.is_zero() {
            unscaled
        } else {
            unscaled * pow10((scale - own).unsigned_abs())
        }
    };
    Ok((widen(l, ls), widen(r, rs), scale))
}

/// Drops trailing zeros from an exact quotient until its scale reaches
/// `preferred_scale`.
fn strip_trailing_zeros(value: BigDecimal, preferred_scale: i64) -> BigDecimal {
    let (mut unscaled, mut scale) = value.into_bigint_and_exponent();
    while scale > preferred_scale && !unscaled.is_zero() && (&unscaled % 10u8).is_zero() {
        unscaled /= 10u8;
        scale -= 1;
    }
    BigDecimal::new(unscaled, scale)
}

#[cfg(test)]
mod tests {
    use std::{str::FromStr, time::Instant};

    use super::*;
    use crate::interpreter::value::display::format_decimal;

    fn dec(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    fn render(value: &BigDecimal) -> String {
        format_decimal(value)
    }

    #[test]
    fn rounding_is_half_up() {
        let mc = MathContext::new(NonZeroU32::new(3).unwrap());
        assert_eq!(render(&mc.round(&dec("1.235"))), "1.24");
        assert_eq!(render(&mc.round(&dec("1.234"))), "1.23");
        assert_eq!(render(&mc.round(&dec("-1.235"))), "-1.24");
        assert_eq!(render(&mc.round(&dec("9.999"))), "10.0");
        assert_eq!(render(&mc.round(&dec("1.00"))), "1.00");
        assert_eq!(render(&mc.from_bigint(BigInt::from(123_456))), "1.23E+5");
    }

    #[test]
    fn exact_operations_keep_scale() {
        assert_eq!(render(&MathContext::add(&dec("10000"), &dec("0.001")).unwrap()), "10000.001");
        assert_eq!(render(&MathContext::subtract(&dec("0.001"), &dec("10000")).unwrap()),
                   "-9999.999");
        assert_eq!(render(&MathContext::subtract(&dec("5"), &dec("0.00")).unwrap()), "5.00");
        assert_eq!(render(&MathContext::multiply(&dec("1.5"), &dec("-2"))), "-3.0");
        assert_eq!(render(&MathContext::multiply(&dec("1"), &dec("10"))), "10");
    }

    #[test]
    fn misaligned_operands_are_rejected_quickly() {
        let started = Instant::now();
        assert_eq!(MathContext::add(&dec("1e1000000000"), &dec("1")),
                   Err(ArithmeticError::TooLarge));
        assert_eq!(MathContext::remainder(&dec("1e1000000000"), &dec("3")),
                   Err(ArithmeticError::TooLarge));
        assert_eq!(render(&MathContext::add(&dec("0e1000000000"), &dec("1")).unwrap()), "1");
        assert_eq!(render(&MathContext::remainder(&dec("0e1000000000"), &dec("3")).unwrap()),
                   "0");
        assert!(started.elapsed().as_secs() < 5);
    }

    #[test]
    fn division_prefers_the_natural_scale() {
        let mc = MathContext::default();
        assert_eq!(render(&mc.divide(&dec("1"), &dec("2")).unwrap()), "0.5");
        assert_eq!(render(&mc.divide(&dec("10"), &dec("2")).unwrap()), "5");
        assert_eq!(render(&mc.divide(&dec("10"), &dec("4")).unwrap()), "2.5");
        assert_eq!(render(&mc.divide(&dec("1.00"), &dec("2")).unwrap()), "0.50");
        assert_eq!(render(&mc.divide(&dec("2"), &dec("3")).unwrap()), "0.66666666666666666667");
        assert_eq!(render(&mc.divide(&dec("-2"), &dec("3")).unwrap()), "-0.66666666666666666667");
        assert!(mc.divide(&dec("1"), &dec("0")).is_none());
        assert!(mc.divide(&dec("1"), &dec("0.000")).is_none());
    }

    #[test]
    fn remainder_follows_dividend_sign() {
        assert_eq!(render(&MathContext::remainder(&dec("5"), &dec("4")).unwrap()), "1");
        assert_eq!(render(&MathContext::remainder(&dec("-5"), &dec("4")).unwrap()), "-1");
        assert_eq!(render(&MathContext::remainder(&dec("5.5"), &dec("2")).unwrap()), "1.5");
        assert_eq!(MathContext::remainder(&dec("5"), &dec("0")),
                   Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn integer_powers() {
        let mc = MathContext::default();
        assert_eq!(render(&mc.pow(&dec("2"), 81).unwrap()), "2417851639229258349412352");
        assert_eq!(render(&mc.pow(&dec("1.5"), 2).unwrap()), "2.25");
        assert_eq!(render(&mc.pow(&dec("7"), 0).unwrap()), "1");
        assert_eq!(render(&mc.pow(&dec("10"), -2).unwrap()), "0.01");
        assert_eq!(render(&mc.pow(&dec("0.5"), -3).unwrap()), "8");
        assert_eq!(mc.pow(&dec("0"), -1), Err(ArithmeticError::DivisionByZero));
        assert_eq!(mc.pow(&dec("10"), 1_000_000), Err(ArithmeticError::TooLarge));
        assert_eq!(render(&mc.pow(&dec("1"), 1_000_000).unwrap()), "1");
    }

    #[test]
    fn negative_powers_of_any_size() {
        let mc = MathContext::default();
        assert_eq!(render(&mc.pow(&dec("10"), -10_001).unwrap()), "1E-10001");
        let tiny = render(&mc.pow(&dec("2"), -20_000).unwrap());
        assert!(tiny.starts_with("2.512388057698744585"), "{tiny}");
        assert!(tiny.ends_with("E-6021"), "{tiny}");
    }

    #[test]
    fn float_conversion_rounds_the_exact_expansion() {
        let mc = MathContext::default();
        assert_eq!(render(&mc.from_f64(2.0).unwrap()), "2");
        assert_eq!(render(&mc.from_f64(0.1).unwrap()), "0.10000000000000000555");
        assert!(mc.from_f64(f64::INFINITY).is_none());
    }
}
