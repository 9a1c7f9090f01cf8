use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data_type::DataType;
use crate::parse::parse_node;
use crate::{format_exerr, Diagnostics, ExError, ExResult};

mod node;
#[cfg(feature = "serde")]
mod serde;

pub use node::Node;

/// The result of parsing a string, i.e., the root of an expression tree together with
/// the text it has been parsed from. An expression can be evaluated as often as needed
/// with different values of `x`. Evaluation does not change the expression.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use plotex::prelude::*;
///
/// let (expr, diagnostics) = Expr::<f64>::parse("sin(x)*2 + 1");
/// assert!(diagnostics.is_empty());
/// assert!((expr.eval(0.5) - (0.5f64.sin() * 2.0 + 1.0)).abs() < 1e-12);
///
/// // parsing never fails, broken parts evaluate to NaN
/// let (expr, diagnostics) = Expr::<f64>::parse("2@3");
/// assert_eq!(diagnostics.len(), 2);
/// assert!(expr.eval(0.0).is_nan());
/// assert!(expr.try_eval(0.0).is_err());
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Expr<T: DataType = f64> {
    text: String,
    root: Node<T>,
}

impl<T: DataType> Expr<T> {
    /// Parses `text`. This never fails, see [`parse_node`](crate::parse::parse_node).
    pub fn parse(text: &str) -> (Self, Diagnostics) {
        let (root, diagnostics) = parse_node(text);
        (
            Expr {
                text: text.to_string(),
                root,
            },
            diagnostics,
        )
    }

    /// Parses `text` and returns the first reported problem as error, if any.
    pub fn parse_strict(text: &str) -> ExResult<Self> {
        let (expr, diagnostics) = Self::parse(text);
        diagnostics.into_result(expr)
    }

    /// Wraps an already built tree. `text` is what [`Expr::unparse`] returns.
    pub fn from_node(text: &str, root: Node<T>) -> Self {
        Expr {
            text: text.to_string(),
            root,
        }
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub fn into_root(self) -> Node<T> {
        self.root
    }

    /// Evaluates the expression for the given value of `x`. Invalid parts of the tree
    /// yield NaN.
    pub fn eval(&self, x: T) -> T {
        self.root.eval(x)
    }

    /// Evaluates the expression for the given value of `x`.
    ///
    /// # Errors
    ///
    /// An error of kind [`Eval`](crate::ExErrorKind::Eval) is returned if the tree
    /// contains invalid parts or the result is NaN. Infinite results are fine.
    pub fn try_eval(&self, x: T) -> ExResult<T> {
        if !self.root.is_valid() {
            return Err(format_exerr!(Eval, "invalid expression '{}'", self.text));
        }
        let y = self.root.eval(x);
        if y.is_nan() {
            Err(format_exerr!(Eval, "'{}' is not a number for x={}", self.text, x))
        } else {
            Ok(y)
        }
    }

    /// The text the expression has been parsed from.
    pub fn unparse(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }
}

impl<T: DataType> FromStr for Expr<T> {
    type Err = ExError;
    fn from_str(text: &str) -> ExResult<Self> {
        Self::parse_strict(text)
    }
}

impl<T: DataType> Display for Expr<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
