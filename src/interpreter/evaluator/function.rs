/// Function lookup and dispatch.
///
/// Declares the static table of built-in functions, their aliases and fixed
/// arities, and evaluates function-call nodes against it.
pub mod core;
/// Floating-point built-in functions.
///
/// Trigonometric, hyperbolic, rounding and exponential functions computed in
/// `f64` and brought back at working precision, plus the exact `abs` and the
/// `random` source.
pub mod builtin;
/// Logarithm function implementations.
///
/// Supports the natural, base-2, base-10 and arbitrary-base logarithms.
pub mod log;
/// The `sum` and `product` aggregates.
///
/// Both bind the loop variable `i` over an integer-stepped range and combine
/// the body's values exactly.
pub mod series;
/// The exact factorial, shared by `factorial(n)` and the postfix `!`.
pub mod factorial;
