/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: exact
/// arithmetic, division and remainder, comparisons, shifts, bitwise
/// operations and exponentiation.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements bitwise complement and factorial.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine and the runtime context that carries
/// the working precision and the variable environment.
pub mod core;

/// Variable bindings.
///
/// A flat name-to-decimal map scoped to one evaluation. Aggregate functions
/// bind their loop variable here and restore the previous binding afterwards.
pub mod environment;

/// Utility functions for evaluation.
///
/// Identifier resolution, built-in constants and the bridge between decimals
/// and `f64` used by the transcendental functions.
pub mod utils;

/// Function evaluation.
///
/// The static table of built-in functions, arity checking and the function
/// implementations themselves.
pub mod function;
