use std::marker::PhantomData;

use crate::data_type::DataType;
use crate::definitions::MAX_NESTING_DEPTH;
use crate::expression::Node;
use crate::operators::{Prec, UnaryOp};
use crate::parser::{self, Token, TokenKind, TokenVec};
use crate::{exerr, format_exerr, Diagnostics, ExError};

/// A parsed node together with the depth of the tree below it.
type Parsed<T> = (Node<T>, usize);

/// Precedence-climbing recursive-descent parser over the tokens of one input text.
/// Problems are reported to the diagnostics and replaced by [`Node::Invalid`], the
/// parser itself never fails.
struct Parser<'a, 'd, T> {
    tokens: TokenVec<'a>,
    cursor: usize,
    end_pos: usize,
    /// Current recursion depth of `parse_expression`.
    depth: usize,
    too_deep_reported: bool,
    diagnostics: &'d mut Diagnostics,
    dummy: PhantomData<T>,
}

impl<'a, 'd, T: DataType> Parser<'a, 'd, T> {
    fn new(text: &'a str, diagnostics: &'d mut Diagnostics) -> Self {
        let tokens = parser::tokenize(text, diagnostics);
        Parser {
            tokens,
            cursor: 0,
            end_pos: text.len(),
            depth: 0,
            too_deep_reported: false,
            diagnostics,
            dummy: PhantomData,
        }
    }

    /// The current token. Behind the last token this is an end token.
    fn token(&self) -> Token<'a> {
        self.tokens
            .get(self.cursor)
            .copied()
            .unwrap_or_else(|| Token::end(self.end_pos))
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn report(&mut self, err: ExError) {
        let pos = self.token().pos;
        self.diagnostics.report(err.at(pos));
    }

    fn report_unexpected(&mut self, expected: &str) {
        let token = self.token();
        let err = match token.kind {
            TokenKind::End => format_exerr!(Syntax, "expected {}, found end of input", expected),
            _ => format_exerr!(Syntax, "expected {}, found '{}'", expected, token.text),
        };
        self.report(err);
    }

    /// Replaces a subtree that would exceed [`MAX_NESTING_DEPTH`]. Reported only once
    /// per input.
    fn too_deep(&mut self) -> Parsed<T> {
        if !self.too_deep_reported {
            self.too_deep_reported = true;
            self.report(exerr!(Syntax, "expression is nested too deeply"));
        }
        (Node::Invalid, 1)
    }

    /// Consumes the current token if it is of the given kind. Otherwise the
    /// problem is reported and nothing is consumed.
    fn consume(&mut self, kind: TokenKind, expected: &str) -> bool {
        if self.token().kind == kind {
            self.advance();
            true
        } else {
            self.report_unexpected(expected);
            false
        }
    }

    fn parse_number(&mut self, text: &str) -> Node<T> {
        match text.parse::<T>() {
            Ok(n) => Node::Num(n),
            Err(_) => {
                self.report(format_exerr!(Syntax, "cannot parse number '{}'", text));
                Node::Invalid
            }
        }
    }

    fn make_unary(&mut self, op: UnaryOp, (operand, depth): Parsed<T>) -> Parsed<T> {
        if depth >= MAX_NESTING_DEPTH {
            self.too_deep()
        } else {
            (Node::unary(op, operand), depth + 1)
        }
    }

    fn parse_primary(&mut self) -> Parsed<T> {
        let token = self.token();
        match token.kind {
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_expression(Prec::Unary);
                self.make_unary(UnaryOp::Neg, operand)
            }
            TokenKind::Number => {
                self.advance();
                (self.parse_number(token.text), 1)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression(Prec::Term);
                self.consume(TokenKind::RParen, "closing parenthesis");
                inner
            }
            TokenKind::Identifier if token.text == "x" => {
                self.advance();
                (Node::Var, 1)
            }
            TokenKind::Identifier => match UnaryOp::from_name(token.text) {
                Some(op) => {
                    self.advance();
                    self.consume(TokenKind::LParen, "opening parenthesis");
                    let argument = self.parse_expression(Prec::Term);
                    self.consume(TokenKind::RParen, "closing parenthesis");
                    self.make_unary(op, argument)
                }
                None => {
                    self.report(format_exerr!(Syntax, "unknown identifier '{}'", token.text));
                    self.advance();
                    (Node::Invalid, 1)
                }
            },
            TokenKind::End => {
                self.report(exerr!(Syntax, "unexpected end of input"));
                (Node::Invalid, 1)
            }
            _ => {
                self.report(format_exerr!(Syntax, "unexpected token '{}'", token.text));
                self.advance();
                (Node::Invalid, 1)
            }
        }
    }

    /// Parses a left-hand side and then folds in binary operators that bind at least
    /// as tight as `min_prec`. Right-hand sides are parsed one level tighter, which
    /// makes all binary operators including `^` left-associative.
    ///
    /// Both the recursion and the depth of the resulting tree are bounded by
    /// [`MAX_NESTING_DEPTH`]. A left spine like `x+x+...+x` deepens the tree without
    /// recursing, so each fold is checked as well.
    fn parse_expression(&mut self, min_prec: Prec) -> Parsed<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.too_deep();
        }
        self.depth += 1;
        let (mut lhs, mut lhs_depth) = self.parse_primary();
        while let Some(op) = self.token().kind.binary_op() {
            if op.prec() < min_prec {
                break;
            }
            self.advance();
            let (rhs, rhs_depth) = self.parse_expression(op.prec().next());
            let depth = 1 + lhs_depth.max(rhs_depth);
            if depth > MAX_NESTING_DEPTH {
                (lhs, lhs_depth) = self.too_deep();
            } else {
                lhs = Node::binary(op, lhs, rhs);
                lhs_depth = depth;
            }
        }
        self.depth -= 1;
        (lhs, lhs_depth)
    }

    fn parse(mut self) -> Node<T> {
        let (root, _) = self.parse_expression(Prec::Term);
        let token = self.token();
        if token.kind != TokenKind::End {
            self.report(format_exerr!(Syntax, "unexpected trailing input '{}'", token.text));
            return Node::Invalid;
        }
        root
    }
}

/// Parses `text` into an expression tree. The returned tree is always usable. Problems
/// are recorded in the returned diagnostics and the affected parts of the tree are
/// replaced by [`Node::Invalid`], so that evaluating them yields NaN.
///
/// Operators from loosest to tightest binding are `+ -`, `* /`, `^`, and unary `-`.
/// All binary operators group to the left, e.g., `2^3^2` is `(2^3)^2`. Unary minus
/// binds tighter than `^`, e.g., `-x^2` is `(-x)^2`.
///
/// Trees deeper than 256 levels are not built. This affects, e.g., more than 255
/// nested parentheses, more than 255 unary minuses in a row, or a chain of more than
/// 256 operations like `x+x+...+x`. Such input is reported as syntax error
/// `expression is nested too deeply` and the excess part is replaced by
/// [`Node::Invalid`]. The limit keeps evaluation, display, and drop of the tree from
/// overflowing the stack.
///
/// ```rust
/// use plotex::parse::parse_node;
/// let (root, diagnostics) = parse_node::<f64>("2+3*4");
/// assert!(diagnostics.is_empty());
/// assert_eq!(root.eval(0.0), 14.0);
/// ```
pub fn parse_node<T: DataType>(text: &str) -> (Node<T>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let root = Parser::new(text, &mut diagnostics).parse();
    if diagnostics.is_empty() {
        log::debug!("parsed '{}' into {}", text, root);
    }
    (root, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::assert_float_eq_f64;
    use crate::ExErrorKind;

    fn tree(text: &str) -> String {
        let (root, diagnostics) = parse_node::<f64>(text);
        assert!(diagnostics.is_empty(), "{}", diagnostics);
        format!("{}", root)
    }

    #[test]
    fn test_grouping() {
        assert_eq!(tree("2+3*4"), "(2+(3*4))");
        assert_eq!(tree("1-2-3"), "((1-2)-3)");
        assert_eq!(tree("8/4/2"), "((8/4)/2)");
        assert_eq!(tree("2^3^2"), "((2^3)^2)");
        assert_eq!(tree("2*x^3+1"), "((2*(x^3))+1)");
        assert_eq!(tree("(1+2)*3"), "((1+2)*3)");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(tree("--x"), "(-(-x))");
        assert_eq!(tree("-x^2"), "((-x)^2)");
        assert_eq!(tree("2^-x"), "(2^(-x))");
        assert_eq!(tree("3*-x"), "(3*(-x))");
        assert_eq!(tree("1--2"), "(1-(-2))");
        assert_eq!(tree("-(x+1)"), "(-(x+1))");
    }

    #[test]
    fn test_functions() {
        assert_eq!(tree("sin(x)"), "sin(x)");
        assert_eq!(tree("cos(2*x)+tan(x)"), "(cos((2*x))+tan(x))");
        assert_eq!(tree("-sin(-x)"), "(-sin((-x)))");
    }

    #[test]
    fn test_recovery() {
        let (root, diagnostics) = parse_node::<f64>("(2+3");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.has(ExErrorKind::Syntax));
        assert_eq!(diagnostics.first().and_then(|e| e.pos), Some(4));
        assert_float_eq_f64(root.eval(0.0), 5.0);

        // a missing parenthesis after a function name is reported but tolerated
        let (root, diagnostics) = parse_node::<f64>("sin x");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(format!("{}", root), "sin(x)");

        let (root, diagnostics) = parse_node::<f64>("y+1");
        assert!(diagnostics.first().unwrap().msg.contains("unknown identifier 'y'"));
        assert!(root.eval(1.0).is_nan());

        let (root, diagnostics) = parse_node::<f64>("2+");
        assert!(diagnostics.first().unwrap().msg.contains("end of input"));
        assert_eq!(format!("{}", root), "(2+<invalid>)");
    }

    #[test]
    fn test_invalid() {
        let (root, diagnostics) = parse_node::<f64>(".5");
        assert!(diagnostics.has(ExErrorKind::Lex));
        assert!(diagnostics.has(ExErrorKind::Syntax));
        assert!(root.eval(0.0).is_nan());

        let (root, diagnostics) = parse_node::<f64>("2@3");
        assert!(diagnostics.has(ExErrorKind::Lex));
        assert!(root.eval(0.0).is_nan());

        let (root, diagnostics) = parse_node::<f64>("2 3");
        assert!(diagnostics.first().unwrap().msg.contains("trailing input '3'"));
        assert_eq!(root, Node::Invalid);

        let (root, diagnostics) = parse_node::<f64>("");
        assert_eq!(diagnostics.len(), 1);
        assert!(!root.is_valid());

        let (root, _) = parse_node::<f64>(")");
        assert!(root.eval(0.0).is_nan());
    }

    #[test]
    fn test_deep_nesting() {
        let text = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
        let (root, diagnostics) = parse_node::<f64>(&text);
        assert!(diagnostics
            .iter()
            .any(|e| e.msg.contains("nested too deeply")));
        assert!(root.eval(1.0).is_nan());

        let text = format!("{}x", "-".repeat(100));
        let (root, diagnostics) = parse_node::<f64>(&text);
        assert!(diagnostics.is_empty());
        assert_float_eq_f64(root.eval(2.0), 2.0);

        let text = format!("{}x", "-".repeat(300));
        let (root, diagnostics) = parse_node::<f64>(&text);
        assert_eq!(diagnostics.len(), 1);
        assert!(root.depth() <= MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_long_chain() {
        let text = format!("x{}", "+x".repeat(50000));
        let (root, diagnostics) = parse_node::<f64>(&text);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.has(ExErrorKind::Syntax));
        assert!(diagnostics
            .iter()
            .any(|e| e.msg.contains("nested too deeply")));
        assert!(root.depth() <= MAX_NESTING_DEPTH);
        assert!(root.eval(1.0).is_nan());
        let shown = format!("{}", root);
        assert!(shown.contains("<invalid>"));

        let text = format!("x{}", "+x".repeat(200));
        let (root, diagnostics) = parse_node::<f64>(&text);
        assert!(diagnostics.is_empty());
        assert_eq!(root.depth(), 201);
        assert_float_eq_f64(root.eval(1.0), 201.0);

        let text = format!("x{}", "*x-1".repeat(1000));
        let (root, _) = parse_node::<f64>(&text);
        assert!(root.depth() <= MAX_NESTING_DEPTH);
    }
}
