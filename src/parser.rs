use lazy_static::lazy_static;
use regex::Regex;
use smallvec::SmallVec;

use crate::definitions::N_TOKENS_ON_STACK;
use crate::operators::BinaryOp;
use crate::{format_exerr, Diagnostics};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Number,
    Identifier,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    /// Never stored, handed out for queries behind the last token.
    End,
    /// A character that does not start any token.
    Error,
}

impl TokenKind {
    /// The binary operator this token stands for, if any. Whether `-` is meant as
    /// negation is decided by the parser.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Caret => Some(BinaryOp::Pow),
            _ => None,
        }
    }
}

/// A lexical unit together with the slice of source text it has been lexed from.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub pos: usize,
}

impl<'a> Token<'a> {
    pub fn end(pos: usize) -> Token<'a> {
        Token {
            kind: TokenKind::End,
            text: "",
            pos,
        }
    }
}

pub type TokenVec<'a> = SmallVec<[Token<'a>; N_TOKENS_ON_STACK]>;

/// Returns the number literal at the beginning of `text`. A number starts with a
/// digit and has at most one dot, i.e., neither `.5` nor `-5` nor `1e3` are literals.
pub fn is_numeric_text(text: &str) -> Option<&str> {
    lazy_static! {
        static ref RE_NUMBER: Regex = Regex::new(r"^[0-9]+(\.[0-9]*)?").unwrap();
    }
    RE_NUMBER.find(text).map(|m| m.as_str())
}

/// Returns the identifier at the beginning of `text`. Identifiers consist of ASCII
/// letters only.
pub fn is_name_text(text: &str) -> Option<&str> {
    lazy_static! {
        static ref RE_NAME: Regex = Regex::new(r"^[a-zA-Z]+").unwrap();
    }
    RE_NAME.find(text).map(|m| m.as_str())
}

fn single_char_kind(c: char) -> Option<TokenKind> {
    match c {
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '^' => Some(TokenKind::Caret),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    }
}

/// Splits `text` into tokens in one pass from left to right. Whitespace between tokens
/// is skipped. Characters that do not start a token become [`TokenKind::Error`] tokens
/// and are reported to `diagnostics`, lexing continues behind them.
///
/// # Arguments
///
/// * `text` - text to be tokenized
/// * `diagnostics` - receives a lex error for each invalid character
///
pub fn tokenize<'a>(text: &'a str, diagnostics: &mut Diagnostics) -> TokenVec<'a> {
    let mut res = TokenVec::new();
    let mut cur_offset = 0usize;
    while let Some(c) = text[cur_offset..].chars().next() {
        if c.is_whitespace() {
            cur_offset += c.len_utf8();
            continue;
        }
        let text_rest = &text[cur_offset..];
        let (kind, token_text) = if let Some(kind) = single_char_kind(c) {
            (kind, &text_rest[..1])
        } else if let Some(num_str) = is_numeric_text(text_rest) {
            (TokenKind::Number, num_str)
        } else if let Some(name_str) = is_name_text(text_rest) {
            (TokenKind::Identifier, name_str)
        } else {
            diagnostics.report(format_exerr!(Lex, "invalid character '{}'", c).at(cur_offset));
            (TokenKind::Error, &text_rest[..c.len_utf8()])
        };
        res.push(Token {
            kind,
            text: token_text,
            pos: cur_offset,
        });
        cur_offset += token_text.len();
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExErrorKind;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let mut diagnostics = Diagnostics::new();
        tokenize(text, &mut diagnostics)
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_is_numeric() {
        assert_eq!(is_numeric_text("5/6"), Some("5"));
        assert_eq!(is_numeric_text("12.5+x"), Some("12.5"));
        assert_eq!(is_numeric_text("4."), Some("4."));
        assert_eq!(is_numeric_text("1.2.3"), Some("1.2"));
        assert!(is_numeric_text(".4").is_none());
        assert!(is_numeric_text("-4").is_none());
        assert_eq!(is_numeric_text("1e3"), Some("1"));
    }

    #[test]
    fn test_is_name() {
        assert_eq!(is_name_text("sin(x)"), Some("sin"));
        assert_eq!(is_name_text("xy2"), Some("xy"));
        assert!(is_name_text("2x").is_none());
    }

    #[test]
    fn test_tokenize() {
        use TokenKind::*;
        assert_eq!(
            kinds(" sin( x )^2 -3.25*x/ 7 + cos(x)"),
            vec![
                Identifier, LParen, Identifier, RParen, Caret, Number, Minus, Number, Star,
                Identifier, Slash, Number, Plus, Identifier, LParen, Identifier, RParen
            ]
        );
        assert!(kinds("").is_empty());
        assert!(kinds(" \t\n").is_empty());
    }

    #[test]
    fn test_token_text_and_pos() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("12.5 * abc", &mut diagnostics);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].text, tokens[0].pos), ("12.5", 0));
        assert_eq!((tokens[1].text, tokens[1].pos), ("*", 5));
        assert_eq!((tokens[2].text, tokens[2].pos), ("abc", 7));
    }

    #[test]
    fn test_invalid_chars() {
        let mut diagnostics = Diagnostics::new();
        let tokens = tokenize("2@3 ä .5", &mut diagnostics);
        let texts = tokens.iter().map(|t| t.text).collect::<Vec<_>>();
        assert_eq!(texts, vec!["2", "@", "3", "ä", ".", "5"]);
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[3].kind, TokenKind::Error);
        assert_eq!(tokens[4].kind, TokenKind::Error);
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.iter().all(|e| e.kind == ExErrorKind::Lex));
        assert_eq!(diagnostics.first().and_then(|e| e.pos), Some(1));
    }
}
