/// Decimal arithmetic at a fixed working precision.
///
/// Defines `MathContext`, which owns the precision and the rounding rules for
/// every operation on `BigDecimal` values. Exact operations are left
/// unrounded; division and conversions from binary floating point round
/// half-up to the context's precision.
pub mod core;
/// Canonical text rendering of decimal results.
///
/// Chooses between plain and scientific notation from the value's scale and
/// magnitude, so `1E+3`, `0.00001` and `1E-7` print the way they were
/// computed.
pub mod display;
