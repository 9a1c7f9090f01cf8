#![doc(html_root_url = "https://docs.rs/plotex/0.1.0")]
//! Plotex parses expressions in one variable `x` and evaluates them for as many values
//! of `x` as a plot needs. An expression consists of numbers, the variable `x`, the
//! binary operators `+`, `-`, `*`, `/`, `^`, unary `-`, parentheses, and the functions
//! `sin`, `cos`, and `tan`.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use plotex::prelude::*;
//! let (expr, diagnostics) = plotex::parse("2*sin(x)^2 - 1/x");
//! assert!(diagnostics.is_empty());
//! let x = 1.5f64;
//! assert!((expr.eval(x) - (2.0 * x.sin().powf(2.0) - 1.0 / x)).abs() < 1e-12);
//! #
//! #     Ok(())
//! # }
//! ```
//! Parsing never fails. Problems are collected in [`Diagnostics`](Diagnostics) and the
//! broken parts of the expression evaluate to NaN.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use plotex::{prelude::*, ExErrorKind};
//! let (expr, diagnostics) = plotex::parse("(2+3");
//! assert!(diagnostics.has(ExErrorKind::Syntax));
//! assert_eq!(expr.eval(0.0), 5.0);
//! let (expr, diagnostics) = plotex::parse("sinus(x)");
//! assert!(diagnostics.has(ExErrorKind::Syntax));
//! assert!(expr.eval(0.0).is_nan());
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! ## Priorities and associativity
//!
//! From loosest to tightest binding we have `+` and `-`, then `*` and `/`, then `^`, and
//! finally unary `-`. All binary operators are left-associative. Hence, `2^3^2` is `64`
//! and `-x^2` is `(-x)^2`.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! assert_eq!(plotex::eval_str("2^3^2", 0.0)?, 64.0);
//! assert_eq!(plotex::eval_str("-x^2", 3.0)?, 9.0);
//! assert_eq!(plotex::eval_str("0-x^2", 3.0)?, -9.0);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! ## Plotting
//!
//! Use [`sample`](sample::sample) to evaluate an expression along the x-axis. A single
//! NaN fails the whole sample.
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use plotex::prelude::*;
//! let viewport = Viewport::default();
//! let expr = Expr::<f64>::parse_strict("cos(x)")?;
//! let pixels = sample(&expr, &viewport.sample_config())?
//!     .into_iter()
//!     .map(|p| viewport.to_screen(p))
//!     .collect::<Vec<_>>();
//! // the first sample lies on the left border
//! assert!(pixels[0].0.abs() < 1e-9);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! ## Serialization
//!
//! With the feature `serde`, expressions are serialized as their text, and diagnostics
//! and configurations derive `Serialize` and `Deserialize`.

mod data_type;
mod definitions;
mod expression;
mod operators;
pub mod parse;
pub mod parser;
mod result;
pub mod sample;
mod util;

pub use {
    data_type::DataType,
    expression::{Expr, Node},
    operators::{BinaryOp, Prec, UnaryOp},
    result::{Diagnostics, ExError, ExErrorKind, ExResult},
};

/// Exports the most commonly used types and functions.
pub mod prelude {
    pub use super::{
        sample::{sample, SampleConfig, Viewport},
        Diagnostics, Expr, ExResult,
    };
}

/// Parses a string into an expression over `f64`, see [`Expr::parse`](Expr::parse).
pub fn parse(text: &str) -> (Expr<f64>, Diagnostics) {
    Expr::parse(text)
}

/// Parses a string strictly and evaluates it at `x`.
///
/// # Errors
///
/// The first lex or syntax error, or an evaluation error if the result is NaN.
pub fn eval_str(text: &str, x: f64) -> ExResult<f64> {
    Expr::<f64>::parse_strict(text)?.try_eval(x)
}
