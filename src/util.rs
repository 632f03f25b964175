/// Numeric conversion helpers.
///
/// This module bridges the three number representations the calculator moves
/// between: `BigDecimal` values, the exact `BigInt` integers used by bitwise
/// and factorial operations, and the `f64` values fed to transcendental
/// functions. Conversions that can lose information return `Option` so callers
/// decide how to report the failure.
pub mod num;
