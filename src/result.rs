use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definitions::N_DIAGNOSTICS_ON_STACK;

/// The stage in which something went wrong.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExErrorKind {
    /// A character that does not start any token.
    Lex,
    /// Unexpected token, missing parenthesis, unknown identifier, or trailing input.
    Syntax,
    /// An invalid tree has been evaluated or the evaluation yielded NaN.
    Eval,
}

impl Display for ExErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExErrorKind::Lex => write!(f, "lex error"),
            ExErrorKind::Syntax => write!(f, "syntax error"),
            ExErrorKind::Eval => write!(f, "evaluation error"),
        }
    }
}

/// This will be thrown at you if something within Plotex went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExError {
    pub kind: ExErrorKind,
    /// Byte offset into the parsed text, if the error can be located.
    pub pos: Option<usize>,
    pub msg: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            pos: None,
            msg: msg.to_string(),
        }
    }
    pub fn at(mut self, pos: usize) -> ExError {
        self.pos = Some(pos);
        self
    }
}

impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} at {}: {}", self.kind, pos, self.msg),
            None => write!(f, "{}: {}", self.kind, self.msg),
        }
    }
}
impl Error for ExError {}

/// Plotex' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given kind with a fixed message, e.g.,
/// `exerr!(Syntax, "expected closing parenthesis")`.
#[macro_export]
macro_rules! exerr {
    ($kind:ident, $msg:expr) => {
        $crate::ExError::new($crate::ExErrorKind::$kind, $msg)
    };
}

/// Creates an [`ExError`](ExError) of the given kind from a format string, e.g.,
/// `format_exerr!(Lex, "invalid character '{}'", c)`.
#[macro_export]
macro_rules! format_exerr {
    ($kind:ident, $s:literal, $( $exps:expr ),*) => {
        $crate::ExError::new($crate::ExErrorKind::$kind, format!($s, $($exps),*).as_str())
    };
}

/// Collects the problems found while lexing and parsing. Neither lexer nor parser
/// abort on errors. They record them here and carry on with a placeholder.
///
/// Each report is forwarded to the [`log`](https://docs.rs/log) facade on level `warn`.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    records: SmallVec<[ExError; N_DIAGNOSTICS_ON_STACK]>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, err: ExError) {
        log::warn!("{}", err);
        self.records.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExError> {
        self.records.iter()
    }

    /// Whether at least one record is of the given kind.
    pub fn has(&self, kind: ExErrorKind) -> bool {
        self.records.iter().any(|e| e.kind == kind)
    }

    pub fn first(&self) -> Option<&ExError> {
        self.records.first()
    }

    /// Returns `value` if nothing has been reported and the first record otherwise.
    pub fn into_result<U>(self, value: U) -> ExResult<U> {
        match self.records.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a ExError;
    type IntoIter = std::slice::Iter<'a, ExError>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, err) in self.records.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = exerr!(Syntax, "expected closing parenthesis").at(4);
        assert_eq!(
            format!("{}", err),
            "syntax error at 4: expected closing parenthesis"
        );
        let err = format_exerr!(Eval, "{} is not a number", "0/0");
        assert_eq!(format!("{}", err), "evaluation error: 0/0 is not a number");
    }

    #[test]
    fn test_diagnostics() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.clone().into_result(3), Ok(3));
        diagnostics.report(exerr!(Lex, "invalid character '@'").at(1));
        diagnostics.report(exerr!(Syntax, "unexpected token '@'").at(1));
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has(ExErrorKind::Lex));
        assert!(!diagnostics.has(ExErrorKind::Eval));
        assert_eq!(
            format!("{}", diagnostics),
            "lex error at 1: invalid character '@'\nsyntax error at 1: unexpected token '@'"
        );
        let err = diagnostics.into_result(()).unwrap_err();
        assert_eq!(err.kind, ExErrorKind::Lex);
    }
}
