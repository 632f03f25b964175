/// Dispatch for binary operators and the exact arithmetic operators.
pub mod core;
/// Relational operators with their inverted `0`/`1` encoding.
pub mod comparison;
/// Shifts and two's-complement bitwise operators on truncated integers.
pub mod bitwise;
/// Exponentiation, exact for integral exponents and via `f64` otherwise.
pub mod power;
