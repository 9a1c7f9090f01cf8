use std::fmt::{self, Display, Formatter};

use crate::data_type::DataType;
use crate::operators::{BinaryOp, UnaryOp};

/// Node of an expression tree. Children are owned exclusively by their parent and the
/// tree is never mutated after the parser returned it.
#[derive(Clone, PartialEq, Debug)]
pub enum Node<T> {
    Num(T),
    /// The free variable `x`.
    Var,
    Binary {
        op: BinaryOp,
        lhs: Box<Node<T>>,
        rhs: Box<Node<T>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node<T>>,
    },
    /// Placeholder for a part of the input that could not be parsed. Evaluates to NaN.
    Invalid,
}

impl<T: DataType> Node<T> {
    pub fn binary(op: BinaryOp, lhs: Node<T>, rhs: Node<T>) -> Self {
        Node::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Node<T>) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Evaluates the tree recursively for the given value of `x`. Arithmetic follows
    /// IEEE-754, hence division by zero is no error. An [`Invalid`](Node::Invalid)
    /// node anywhere in the tree turns the result into NaN.
    pub fn eval(&self, x: T) -> T {
        match self {
            Node::Num(n) => *n,
            Node::Var => x,
            Node::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Node::Unary { op, operand } => op.apply(operand.eval(x)),
            Node::Invalid => T::nan(),
        }
    }

    /// `false` if the tree contains an [`Invalid`](Node::Invalid) node.
    pub fn is_valid(&self) -> bool {
        match self {
            Node::Num(_) | Node::Var => true,
            Node::Binary { lhs, rhs, .. } => lhs.is_valid() && rhs.is_valid(),
            Node::Unary { operand, .. } => operand.is_valid(),
            Node::Invalid => false,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Num(_) | Node::Var | Node::Invalid => 1,
            Node::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
            Node::Unary { operand, .. } => 1 + operand.depth(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Num(_) | Node::Var | Node::Invalid => 1,
            Node::Binary { lhs, rhs, .. } => 1 + lhs.n_nodes() + rhs.n_nodes(),
            Node::Unary { operand, .. } => 1 + operand.n_nodes(),
        }
    }
}

/// Fully parenthesized representation that makes grouping explicit, e.g.,
/// `2+3*x` is displayed as `(2+(3*x))`.
impl<T: DataType> Display for Node<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Node::Num(n) => write!(f, "{}", n),
            Node::Var => write!(f, "x"),
            Node::Binary { op, lhs, rhs } => write!(f, "({}{}{})", lhs, op, rhs),
            Node::Unary {
                op: UnaryOp::Neg,
                operand,
            } => write!(f, "(-{})", operand),
            Node::Unary { op, operand } => write!(f, "{}({})", op, operand),
            Node::Invalid => write!(f, "<invalid>"),
        }
    }
}
