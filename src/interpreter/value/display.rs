use bigdecimal::BigDecimal;
use num_traits::Signed;

/// Renders a decimal in its canonical text form.
///
/// Integers with scale zero print as plain digits. Values with a positive
/// scale print in plain notation as long as their adjusted exponent is at
/// least `-6`. Everything else uses scientific notation with an explicit
/// exponent sign, e.g. `1E+3` or `1.5E-7`.
///
/// # Parameters
/// - `value`: The decimal to render.
///
/// # Returns
/// The rendered text, prefixed with `-` for negative values.
///
/// # Example
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use calkit::interpreter::value::display::format_decimal;
///
/// assert_eq!(format_decimal(&BigDecimal::from_str("0.50").unwrap()), "0.50");
/// assert_eq!(format_decimal(&BigDecimal::new(1.into(), -3)), "1E+3");
/// assert_eq!(format_decimal(&BigDecimal::new(1.into(), 7)), "1E-7");
/// ```
#[must_use]
pub fn format_decimal(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.as_bigint_and_exponent();
    let coefficient = unscaled.abs().to_string();
    let sign = if unscaled.is_negative() { "-" } else { "" };

    if scale == 0 {
        return format!("{sign}{coefficient}");
    }

    let digits = i64::try_from(coefficient.len()).unwrap_or(i64::MAX);
    let adjusted = digits - 1 - scale;

    if scale > 0 && adjusted >= -6 {
        return format!("{sign}{}", plain(&coefficient, scale, digits));
    }

    let (head, tail) = coefficient.split_at(1);
    let mantissa = if tail.is_empty() { head.to_owned() } else { format!("{head}.{tail}") };
    let exponent_sign = if adjusted >= 0 { "+" } else { "" };
    format!("{sign}{mantissa}E{exponent_sign}{adjusted}")
}

/// Places the decimal point `scale` digits from the right, padding with
/// leading zeros when the coefficient is shorter than the scale.
fn plain(coefficient: &str, scale: i64, digits: i64) -> String {
    if digits > scale {
        let split = usize::try_from(digits - scale).unwrap_or(0);
        let (integer, fraction) = coefficient.split_at(split);
        format!("{integer}.{fraction}")
    } else {
        let zeros = usize::try_from(scale - digits).unwrap_or(0);
        format!("0.{}{coefficient}", "0".repeat(zeros))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigInt;

    use super::*;

    fn render(unscaled: i64, scale: i64) -> String {
        format_decimal(&BigDecimal::new(BigInt::from(unscaled), scale))
    }

    #[test]
    fn plain_notation() {
        assert_eq!(render(42, 0), "42");
        assert_eq!(render(-42, 0), "-42");
        assert_eq!(render(0, 0), "0");
        assert_eq!(render(125, 2), "1.25");
        assert_eq!(render(5, 1), "0.5");
        assert_eq!(render(-5, 3), "-0.005");
        assert_eq!(render(1, 6), "0.000001");
        assert_eq!(render(0, 2), "0.00");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(render(1, 7), "1E-7");
        assert_eq!(render(15, 8), "1.5E-7");
        assert_eq!(render(1, -3), "1E+3");
        assert_eq!(render(-25, -1), "-2.5E+2");
        assert_eq!(render(0, -2), "0E+2");
    }

    #[test]
    fn parsed_literals_keep_their_form() {
        let value = BigDecimal::from_str("10000.001").unwrap();
        assert_eq!(format_decimal(&value), "10000.001");
        let value = BigDecimal::from_str("1.0").unwrap();
        assert_eq!(format_decimal(&value), "1.0");
    }
}
