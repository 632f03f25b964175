use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

/// Largest number of digits an integer may take when a decimal is widened to
/// it, either by truncation or by lining two decimals up on a common scale.
pub const MAX_INTEGER_DIGITS: u64 = 1_000_000;

/// Returns `10^exponent` as a big integer.
///
/// ## Example
/// ```
/// use calkit::util::num::pow10;
///
/// assert_eq!(pow10(3).to_string(), "1000");
/// ```
#[must_use]
pub fn pow10(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u8), usize::try_from(exponent).unwrap_or(usize::MAX))
}

/// Counts the decimal digits in the magnitude of `value`.
///
/// Zero is considered to have a single digit.
///
/// ## Example
/// ```
/// use calkit::util::num::digit_count;
/// use num_bigint::BigInt;
///
/// assert_eq!(digit_count(&BigInt::from(-12345)), 5);
/// assert_eq!(digit_count(&BigInt::from(0)), 1);
/// ```
#[must_use]
pub fn digit_count(value: &BigInt) -> u64 {
    if value.is_zero() {
        return 1;
    }
    // bits * log10(2) gives a lower bound that is off by at most one.
    let bits = value.bits();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let estimate = ((bits - 1) as f64 * std::f64::consts::LOG10_2).floor() as u64 + 1;
    if value.magnitude() >= pow10(estimate).magnitude() {
        estimate + 1
    } else {
        estimate
    }
}

/// Multiplies `unscaled` by `10^shift`, unless the product would have more
/// than [`MAX_INTEGER_DIGITS`] digits.
fn widen(unscaled: BigInt, shift: u64) -> Option<BigInt> {
    if unscaled.is_zero() {
        return Some(unscaled);
    }
    if digit_count(&unscaled).saturating_add(shift) > MAX_INTEGER_DIGITS {
        return None;
    }
    Some(unscaled * pow10(shift))
}

/// Truncates a decimal toward zero and returns its integer part.
///
/// This mirrors the implicit conversion applied before every bitwise or shift
/// operation: `7.9` becomes `7`, `-7.9` becomes `-7`. Returns `None` if the
/// integer would have more than [`MAX_INTEGER_DIGITS`] digits.
#[must_use]
pub fn truncate_to_bigint(value: &BigDecimal) -> Option<BigInt> {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    if scale <= 0 {
        widen(unscaled, scale.unsigned_abs())
    } else {
        // `BigInt` division truncates toward zero.
        Some(unscaled / pow10(scale.unsigned_abs()))
    }
}

/// Returns the integer value of `value` if it has no fractional part.
///
/// Trailing fractional zeros are allowed, so `5.00` converts to `5`. Integers
/// with more than [`MAX_INTEGER_DIGITS`] digits are not converted.
#[must_use]
pub fn to_bigint_exact(value: &BigDecimal) -> Option<BigInt> {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    if scale <= 0 {
        return widen(unscaled, scale.unsigned_abs());
    }
    let (quotient, remainder) = unscaled.div_rem(&pow10(scale.unsigned_abs()));
    remainder.is_zero().then_some(quotient)
}

/// Converts a decimal to the nearest `f64`.
///
/// The conversion goes through Rust's float parser, which rounds correctly.
/// Values beyond the `f64` range become infinite.
#[must_use]
pub fn decimal_to_f64(value: &BigDecimal) -> f64 {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    format!("{unscaled}e{}", -scale).parse().unwrap_or(f64::NAN)
}

/// Converts a finite `f64` into its exact decimal expansion.
///
/// Every finite binary float has a terminating decimal expansion; this
/// returns it without any rounding. Returns `None` for NaN and infinities.
///
/// ## Example
/// ```
/// use calkit::util::num::f64_to_decimal_exact;
///
/// assert_eq!(f64_to_decimal_exact(0.5).unwrap().to_string(), "0.5");
/// assert!(f64_to_decimal_exact(f64::NAN).is_none());
/// ```
#[must_use]
pub fn f64_to_decimal_exact(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let exponent_bits = i64::try_from((bits >> 52) & 0x7ff).ok()?;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mut mantissa, mut exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent_bits - 1075)
    };
    if mantissa == 0 {
        return Some(BigDecimal::zero());
    }
    while mantissa & 1 == 0 && exponent < 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    let magnitude = BigInt::from(mantissa);
    let signed = if negative { -magnitude } else { magnitude };
    let decimal = if exponent >= 0 {
        BigDecimal::new(signed << exponent.unsigned_abs(), 0)
    } else {
        // m * 2^-k == m * 5^k / 10^k
        let k = exponent.unsigned_abs();
        let fives = num_traits::pow(BigInt::from(5u8), usize::try_from(k).ok()?);
        BigDecimal::new(signed * fives, i64::try_from(k).ok()?)
    };
    Some(decimal)
}

/// Computes `n * (n - m) * (n - 2m) * ...` by recursive halving, which keeps
/// the operands of each multiplication roughly the same size.
///
/// `split_product(n, 1)` is `n!` for `n >= 1`.
#[must_use]
pub fn split_product(n: &BigInt, m: &BigInt) -> BigInt {
    if n <= m {
        return n.clone();
    }
    let doubled = m * 2;
    split_product(n, &doubled) * split_product(&(n - m), &doubled)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_traits::One;

    use super::*;

    #[test]
    fn digit_count_matches_string_length() {
        for text in ["1", "9", "10", "99", "100", "999999999999999999999", "1000000000000000000000"] {
            let value = BigInt::from_str(text).unwrap();
            assert_eq!(digit_count(&value), text.len() as u64, "{text}");
        }
    }

    #[test]
    fn truncation_goes_toward_zero() {
        let positive = BigDecimal::from_str("7.9").unwrap();
        let negative = BigDecimal::from_str("-7.9").unwrap();
        assert_eq!(truncate_to_bigint(&positive), Some(BigInt::from(7)));
        assert_eq!(truncate_to_bigint(&negative), Some(BigInt::from(-7)));
        assert_eq!(truncate_to_bigint(&BigDecimal::from_str("1E+3").unwrap()),
                   Some(BigInt::from(1000)));
        assert_eq!(truncate_to_bigint(&BigDecimal::from_str("1E+2000000").unwrap()), None);
        assert_eq!(truncate_to_bigint(&BigDecimal::from_str("0E+2000000").unwrap()),
                   Some(BigInt::zero()));
    }

    #[test]
    fn exact_integer_conversion_rejects_fractions() {
        assert_eq!(to_bigint_exact(&BigDecimal::from_str("2.00").unwrap()), Some(BigInt::from(2)));
        assert_eq!(to_bigint_exact(&BigDecimal::from_str("0.5").unwrap()), None);
        assert_eq!(to_bigint_exact(&BigDecimal::from_str("1E+2").unwrap()),
                   Some(BigInt::from(100)));
    }

    #[test]
    fn float_expansion_is_exact() {
        let tenth = f64_to_decimal_exact(0.1).unwrap();
        let (unscaled, scale) = tenth.as_bigint_and_exponent();
        assert_eq!(scale, 55);
        assert!(unscaled.to_string().starts_with("1000000000000000055511151231257827"));
        assert_eq!(f64_to_decimal_exact(2.0).unwrap(), BigDecimal::from(2));
        assert_eq!(f64_to_decimal_exact(-1024.0).unwrap(), BigDecimal::from(-1024));
        assert_eq!(f64_to_decimal_exact(-0.0).unwrap(), BigDecimal::zero());
    }

    #[test]
    fn float_conversion_round_trips() {
        let value = BigDecimal::from_str("3.1415926535897931160").unwrap();
        assert_eq!(decimal_to_f64(&value), std::f64::consts::PI);
        assert_eq!(decimal_to_f64(&BigDecimal::from_str("-2.5E+3").unwrap()), -2500.0);
    }

    #[test]
    fn factorial_product() {
        let five = split_product(&BigInt::from(5), &BigInt::one());
        assert_eq!(five, BigInt::from(120));
        let twenty = split_product(&BigInt::from(20), &BigInt::one());
        assert_eq!(twenty.to_string(), "2432902008176640000");
    }
}
