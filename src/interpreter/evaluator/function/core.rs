use bigdecimal::BigDecimal;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Context, EvalResult},
        function::{builtin, factorial, log, series},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context, its argument expressions
/// unevaluated, and the source column of the call. Numeric functions evaluate
/// their arguments themselves; aggregates bind the loop variable first.
pub type BuiltinFn = fn(&mut Context, &[Expr], usize) -> EvalResult<BigDecimal>;

/// A named, fixed-arity built-in function.
#[derive(Debug)]
pub struct FunctionDefinition {
    /// The name the function is called by.
    pub name:  &'static str,
    /// The exact number of arguments the function takes.
    pub arity: usize,
    /// The implementation.
    pub func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the number of arguments,
/// - a function pointer implementing the builtin.
///
/// Aliases are separate entries sharing an implementation.
///
/// The macro produces `FUNCTION_TABLE`, the static table searched by
/// [`lookup_function`].
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static FUNCTION_TABLE: &[FunctionDefinition] = &[
            $(
                FunctionDefinition { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "abs"       => { arity: 1, func: builtin::abs },
    "acos"      => { arity: 1, func: builtin::acos },
    "asin"      => { arity: 1, func: builtin::asin },
    "atan"      => { arity: 1, func: builtin::atan },
    "atan2"     => { arity: 2, func: builtin::atan2 },
    "cbrt"      => { arity: 1, func: builtin::cbrt },
    "ceiling"   => { arity: 1, func: builtin::ceiling },
    "ceil"      => { arity: 1, func: builtin::ceiling },
    "cos"       => { arity: 1, func: builtin::cos },
    "cosh"      => { arity: 1, func: builtin::cosh },
    "exp"       => { arity: 1, func: builtin::exp },
    "factorial" => { arity: 1, func: factorial::factorial },
    "floor"     => { arity: 1, func: builtin::floor },
    "hypot"     => { arity: 2, func: builtin::hypot },
    "log"       => { arity: 2, func: log::log },
    "log2"      => { arity: 1, func: log::log2 },
    "logE"      => { arity: 1, func: log::ln },
    "log10"     => { arity: 1, func: log::log10 },
    "product"   => { arity: 3, func: series::product },
    "Π"         => { arity: 3, func: series::product },
    "∏"         => { arity: 3, func: series::product },
    "random"    => { arity: 0, func: builtin::random },
    "rand"      => { arity: 0, func: builtin::random },
    "round"     => { arity: 1, func: builtin::round },
    "sin"       => { arity: 1, func: builtin::sin },
    "sinh"      => { arity: 1, func: builtin::sinh },
    "sqrt"      => { arity: 1, func: builtin::sqrt },
    "sum"       => { arity: 3, func: series::sum },
    "Σ"         => { arity: 3, func: series::sum },
    "∑"         => { arity: 3, func: series::sum },
    "tan"       => { arity: 1, func: builtin::tan },
    "tanh"      => { arity: 1, func: builtin::tanh },
}

/// Finds the built-in function called `name`.
///
/// Names are matched exactly and case-sensitively.
///
/// # Example
/// ```
/// use calkit::interpreter::evaluator::function::core::lookup_function;
///
/// assert_eq!(lookup_function("atan2").unwrap().arity, 2);
/// assert_eq!(lookup_function("∑").unwrap().arity, 3);
/// assert!(lookup_function("Sqrt").is_none());
/// ```
#[must_use]
pub fn lookup_function(name: &str) -> Option<&'static FunctionDefinition> {
    FUNCTION_TABLE.iter().find(|f| f.name == name)
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The name is looked up in the builtin table; the number of arguments
    /// must match the function's arity exactly. Arguments are handed over
    /// unevaluated.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Argument expressions.
    /// - `position`: Source column for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup or arity fails.
    pub(crate) fn eval_function_call(&mut self,
                                     name: &str,
                                     arguments: &[Expr],
                                     position: usize)
                                     -> EvalResult<BigDecimal> {
        let function = lookup_function(name).ok_or_else(|| RuntimeError::UnknownFunction {
                                                 name: name.to_string(),
                                                 position,
                                             })?;
        if arguments.len() != function.arity {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: function.arity,
                                                             found: arguments.len(),
                                                             position });
        }
        (function.func)(self, arguments, position)
    }
}
