use std::fmt;

use bigdecimal::BigDecimal;

use crate::interpreter::value::display::format_decimal;

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` is the closed set of constructs the calculator understands: decimal
/// literals, identifiers, unary and binary operations, and function calls.
/// Every node owns its children and records the 1-based character column of
/// the token it was built from, which is used for error reporting.
///
/// Negation has no node of its own: `-x` is parsed as `0 - x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A decimal literal, stored exactly as written.
    Literal {
        /// The constant value.
        value:    BigDecimal,
        /// Column in the source text.
        position: usize,
    },
    /// Reference to a variable or constant by name.
    Identifier {
        /// Name of the variable.
        name:     String,
        /// Column in the source text.
        position: usize,
    },
    /// A unary operation (bitwise complement or factorial).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Column in the source text.
        position: usize,
    },
    /// A binary operation (addition, comparison, shift, etc.).
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Column in the source text.
        position: usize,
    },
    /// Function call expression (e.g. `sin(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, unevaluated.
        arguments: Vec<Self>,
        /// Column in the source text.
        position:  usize,
    },
}

impl Expr {
    /// Gets the source column from `self`.
    /// ## Example
    /// ```
    /// use calkit::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }
}

/// Renders the tree fully parenthesized, e.g. `((1) + (2))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{}", format_decimal(value)),
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, expr, .. } => write!(f, "(unary {op} ({expr}))"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "(({left}) {op} ({right}))"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, shifts and bitwise
/// operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Left shift (`<<`)
    Shl,
    /// Right shift (`>>`)
    Shr,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Represents a unary operator.
///
/// Negation is not listed here; it is expressed as subtraction from zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Bitwise complement (e.g. `~x`).
    BitNot,
    /// Factorial (e.g. `x!`).
    Factorial,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod,
            Mul, NotEqual, Pow, Shl, Shr, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            Shl => "<<",
            Shr => ">>",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BitNot => write!(f, "~"),
            Self::Factorial => write!(f, "!"),
        }
    }
}
