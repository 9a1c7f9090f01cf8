use std::fmt::{self, Display, Formatter};

use crate::data_type::DataType;

/// Binding strength of operators. A higher variant binds tighter, e.g.,
/// `^` binds tighter than `*`, which binds tighter than `+`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum Prec {
    None,
    Term,
    Factor,
    Pow,
    Unary,
    Primary,
}

impl Prec {
    /// The next tighter level. Parsing the right-hand side of a binary operator at this
    /// level makes operators of equal priority group to the left.
    pub fn next(self) -> Prec {
        match self {
            Prec::None => Prec::Term,
            Prec::Term => Prec::Factor,
            Prec::Factor => Prec::Pow,
            Prec::Pow => Prec::Unary,
            Prec::Unary | Prec::Primary => Prec::Primary,
        }
    }
}

/// Binary operators of the expression language.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Representation of the operator in the string to be parsed.
    pub fn repr(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    pub fn prec(&self) -> Prec {
        match self {
            BinaryOp::Add | BinaryOp::Sub => Prec::Term,
            BinaryOp::Mul | BinaryOp::Div => Prec::Factor,
            BinaryOp::Pow => Prec::Pow,
        }
    }

    /// Applies the operator with IEEE-754 semantics, i.e., division by zero yields an
    /// infinity or NaN and a negative base with a non-integer exponent yields NaN.
    pub fn apply<T: DataType>(&self, a: T, b: T) -> T {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Pow => a.powf(b),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Unary operators, i.e., negation and the named functions.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Sin,
    Cos,
    Tan,
}

impl UnaryOp {
    pub fn repr(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
        }
    }

    /// Looks up a named function. Negation has no name and is never returned.
    pub fn from_name(name: &str) -> Option<UnaryOp> {
        match name {
            "sin" => Some(UnaryOp::Sin),
            "cos" => Some(UnaryOp::Cos),
            "tan" => Some(UnaryOp::Tan),
            _ => None,
        }
    }

    /// Trigonometric functions expect radians.
    pub fn apply<T: DataType>(&self, a: T) -> T {
        match self {
            UnaryOp::Neg => -a,
            UnaryOp::Sin => a.sin(),
            UnaryOp::Cos => a.cos(),
            UnaryOp::Tan => a.tan(),
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}
