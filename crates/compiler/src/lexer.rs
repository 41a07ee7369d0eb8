//! The scanner splits an expression into tokens on demand.
//!
//! Which kinds of token may appear next depends on where the parser is in the
//! grammar, so every request carries the set of acceptable kinds. At the
//! current position the kinds are tried in the order of [`PRIORITY`] and the
//! first acceptable kind that matches wins. Whitespace is always tried and
//! always skipped.

use std::fmt;

use codemap::Span;

use crate::error::{ErrorKind, SassResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum TokenKind {
    Colon,
    Whitespace,
    Comma,
    /// `(` or `[`
    LParen,
    /// `)` or `]`
    RParen,
    End,
    Mul,
    Div,
    Add,
    /// Binary minus: `-` followed by whitespace
    Sub,
    /// Unary minus: `-` not followed by a letter or underscore
    Sign,
    And,
    Or,
    Not,
    Ne,
    Inv,
    Eq,
    Le,
    Ge,
    Lt,
    Gt,
    SqString,
    DqString,
    /// Alphabetic unit or `%` directly after the previous token
    Units,
    Number,
    Color,
    Variable,
    /// An identifier immediately followed by `(`
    FunctionName,
    Identifier,
}

const PRIORITY: [TokenKind; 29] = [
    TokenKind::Colon,
    TokenKind::Whitespace,
    TokenKind::Comma,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::End,
    TokenKind::Mul,
    TokenKind::Div,
    TokenKind::Add,
    TokenKind::Sub,
    TokenKind::Sign,
    TokenKind::And,
    TokenKind::Or,
    TokenKind::Not,
    TokenKind::Ne,
    TokenKind::Inv,
    TokenKind::Eq,
    TokenKind::Le,
    TokenKind::Ge,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::SqString,
    TokenKind::DqString,
    TokenKind::Units,
    TokenKind::Number,
    TokenKind::Color,
    TokenKind::Variable,
    TokenKind::FunctionName,
    TokenKind::Identifier,
];

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Colon => "\":\"",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comma => "\",\"",
            TokenKind::LParen => "\"(\"",
            TokenKind::RParen => "\")\"",
            TokenKind::End => "end of expression",
            TokenKind::Mul => "\"*\"",
            TokenKind::Div => "\"/\"",
            TokenKind::Add => "\"+\"",
            TokenKind::Sub | TokenKind::Sign => "\"-\"",
            TokenKind::And => "\"and\"",
            TokenKind::Or => "\"or\"",
            TokenKind::Not => "\"not\"",
            TokenKind::Ne => "\"!=\"",
            TokenKind::Inv => "\"!\"",
            TokenKind::Eq => "\"==\"",
            TokenKind::Le => "\"<=\"",
            TokenKind::Ge => "\">=\"",
            TokenKind::Lt => "\"<\"",
            TokenKind::Gt => "\">\"",
            TokenKind::SqString | TokenKind::DqString => "string",
            TokenKind::Units => "unit",
            TokenKind::Number => "number",
            TokenKind::Color => "color",
            TokenKind::Variable => "variable",
            TokenKind::FunctionName => "function name",
            TokenKind::Identifier => "identifier",
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pos: usize,
    len: usize,
}

impl Token {
    fn end(self) -> usize {
        self.pos + self.len
    }
}

fn is_word_byte(b: u8) -> bool {
    b == b'-' || b == b'_' || b.is_ascii_alphanumeric()
}

fn is_ident_start(b: u8) -> bool {
    b == b'-' || b == b'_' || b.is_ascii_alphabetic()
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\t' | b'\n')
}

#[derive(Debug, Clone)]
pub(crate) struct Lexer<'a> {
    input: &'a str,
    entire_span: Span,
    tokens: Vec<Token>,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    /// `entire_span` must cover exactly `input`
    pub fn new(input: &'a str, entire_span: Span) -> Self {
        Lexer {
            input,
            entire_span,
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    pub fn text(&self, tok: Token) -> &'a str {
        &self.input[tok.pos..tok.end()]
    }

    pub fn span(&self, tok: Token) -> Span {
        self.entire_span.subspan(tok.pos as u64, tok.end() as u64)
    }

    /// The span of the input from the start of `start` to the end of `end`
    pub fn span_between(&self, start: Token, end: Token) -> Span {
        self.entire_span
            .subspan(start.pos as u64, end.end().max(start.pos) as u64)
    }

    /// Whether the token at `idx` directly follows the previous token
    pub fn is_adjacent(&self, idx: usize) -> bool {
        match (idx.checked_sub(1), self.tokens.get(idx)) {
            (Some(prev), Some(tok)) => self.tokens[prev].end() == tok.pos,
            _ => false,
        }
    }

    /// The token at `idx`, scanning it if it hasn't been scanned yet
    ///
    /// Tokens already scanned are returned as they are, whatever `allowed`
    /// says. Only the next unscanned token may be requested.
    pub fn token(&mut self, idx: usize, allowed: &[TokenKind]) -> SassResult<Token> {
        if let Some(tok) = self.tokens.get(idx) {
            return Ok(*tok);
        }

        debug_assert_eq!(idx, self.tokens.len());

        let tok = self.scan(allowed)?;
        self.tokens.push(tok);
        Ok(tok)
    }

    /// Forget every token from `idx` onward
    pub fn rewind(&mut self, idx: usize) {
        self.tokens.truncate(idx);
        self.cursor = self.tokens.last().map_or(0, |tok| tok.end());
    }

    fn scan(&mut self, allowed: &[TokenKind]) -> SassResult<Token> {
        loop {
            let matched = PRIORITY
                .iter()
                .copied()
                .filter(|kind| *kind == TokenKind::Whitespace || allowed.contains(kind))
                .find_map(|kind| self.match_kind(kind, self.cursor).map(|len| (kind, len)));

            match matched {
                Some((TokenKind::Whitespace, len)) => self.cursor += len,
                Some((kind, len)) => {
                    let tok = Token {
                        kind,
                        pos: self.cursor,
                        len,
                    };
                    self.cursor += len;
                    return Ok(tok);
                }
                None => return Err(self.no_match()),
            }
        }
    }

    fn no_match(&self) -> Box<crate::error::SassError> {
        let span = match self.input[self.cursor..].chars().next() {
            Some(c) => self
                .entire_span
                .subspan(self.cursor as u64, (self.cursor + c.len_utf8()) as u64),
            None => self
                .entire_span
                .subspan(self.cursor as u64, self.cursor as u64),
        };

        let message = match self.input[self.cursor..].chars().next() {
            Some(c) => format!("Unexpected \"{}\".", c),
            None => "Unexpected end of expression.".to_owned(),
        };

        (ErrorKind::Lex, message, span).into()
    }

    /// Length of the token of `kind` starting at `pos`, if one does
    fn match_kind(&self, kind: TokenKind, pos: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let rest = &bytes[pos..];
        let at = |i: usize| rest.get(i).copied();

        let len = match kind {
            TokenKind::Colon => (at(0)? == b':').then_some(1)?,
            TokenKind::Whitespace => match rest.iter().take_while(|b| is_space(**b)).count() {
                0 => return None,
                n => n,
            },
            TokenKind::Comma => (at(0)? == b',').then_some(1)?,
            TokenKind::LParen => matches!(at(0)?, b'(' | b'[').then_some(1)?,
            TokenKind::RParen => matches!(at(0)?, b')' | b']').then_some(1)?,
            TokenKind::End => rest.is_empty().then_some(0)?,
            TokenKind::Mul => (at(0)? == b'*').then_some(1)?,
            TokenKind::Div => (at(0)? == b'/').then_some(1)?,
            TokenKind::Add => (at(0)? == b'+').then_some(1)?,
            TokenKind::Sub => {
                (at(0)? == b'-' && at(1).map_or(false, |b| b.is_ascii_whitespace())).then_some(2)?
            }
            TokenKind::Sign => (at(0)? == b'-'
                && !at(1).map_or(false, |b| b.is_ascii_alphabetic() || b == b'_'))
            .then_some(1)?,
            TokenKind::And => self.match_keyword(pos, "and")?,
            TokenKind::Or => self.match_keyword(pos, "or")?,
            TokenKind::Not => self.match_keyword(pos, "not")?,
            TokenKind::Ne => rest.starts_with(b"!=").then_some(2)?,
            TokenKind::Inv => (at(0)? == b'!').then_some(1)?,
            TokenKind::Eq => rest.starts_with(b"==").then_some(2)?,
            TokenKind::Le => rest.starts_with(b"<=").then_some(2)?,
            TokenKind::Ge => rest.starts_with(b">=").then_some(2)?,
            TokenKind::Lt => (at(0)? == b'<').then_some(1)?,
            TokenKind::Gt => (at(0)? == b'>').then_some(1)?,
            TokenKind::SqString => Self::match_quoted(rest, b'\'')?,
            TokenKind::DqString => Self::match_quoted(rest, b'"')?,
            TokenKind::Units => {
                if pos > 0 && bytes[pos - 1].is_ascii_whitespace() {
                    return None;
                }

                let len = if at(0)? == b'%' {
                    1
                } else {
                    rest.iter().take_while(|b| b.is_ascii_alphabetic()).count()
                };

                if len == 0 || at(len).map_or(false, is_word_byte) {
                    return None;
                }

                len
            }
            TokenKind::Number => {
                let digits = |from: usize| rest[from..].iter().take_while(|b| b.is_ascii_digit()).count();
                let int = digits(0);

                if int > 0 {
                    if at(int) == Some(b'.') {
                        int + 1 + digits(int + 1)
                    } else {
                        int
                    }
                } else if at(0)? == b'.' {
                    match digits(1) {
                        0 => return None,
                        frac => frac + 1,
                    }
                } else {
                    return None;
                }
            }
            TokenKind::Color => {
                if at(0)? != b'#' {
                    return None;
                }

                match rest[1..].iter().take_while(|b| b.is_ascii_hexdigit()).count() {
                    n @ (3 | 6) => n + 1,
                    _ => return None,
                }
            }
            TokenKind::Variable => {
                if at(0)? != b'$' {
                    return None;
                }

                match rest[1..].iter().take_while(|b| is_word_byte(**b)).count() {
                    0 => return None,
                    n => n + 1,
                }
            }
            TokenKind::FunctionName => {
                let len = Self::match_identifier(rest)?;
                (at(len) == Some(b'(')).then_some(len)?
            }
            TokenKind::Identifier => Self::match_identifier(rest)?,
        };

        Some(len)
    }

    /// A keyword not embedded in a longer word
    fn match_keyword(&self, pos: usize, keyword: &str) -> Option<usize> {
        let bytes = self.input.as_bytes();

        if !bytes[pos..].starts_with(keyword.as_bytes()) {
            return None;
        }

        let before = pos.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(pos + keyword.len()).copied();

        if before.map_or(false, is_word_byte) || after.map_or(false, is_word_byte) {
            return None;
        }

        Some(keyword.len())
    }

    fn match_quoted(rest: &[u8], quote: u8) -> Option<usize> {
        if rest.first() != Some(&quote) {
            return None;
        }

        let close = rest[1..].iter().position(|b| *b == quote)?;
        Some(close + 2)
    }

    fn match_identifier(rest: &[u8]) -> Option<usize> {
        if !is_ident_start(*rest.first()?) {
            return None;
        }

        Some(1 + rest[1..].iter().take_while(|b| is_word_byte(**b)).count())
    }
}

#[cfg(test)]
mod test {
    use codemap::CodeMap;

    use super::{Lexer, TokenKind, PRIORITY};
    use crate::error::SassResult;

    /// Scan the whole input, accepting units only right after a number
    fn kinds(input: &str) -> SassResult<Vec<TokenKind>> {
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), input.to_owned());
        let mut lexer = Lexer::new(input, file.span);
        let mut kinds = Vec::new();

        let without_units: Vec<TokenKind> = PRIORITY
            .iter()
            .copied()
            .filter(|kind| *kind != TokenKind::Units)
            .collect();

        for idx in 0.. {
            let allowed = if kinds.last() == Some(&TokenKind::Number) {
                &PRIORITY[..]
            } else {
                &without_units[..]
            };
            let tok = lexer.token(idx, allowed)?;
            kinds.push(tok.kind);
            if tok.kind == TokenKind::End {
                break;
            }
        }

        Ok(kinds)
    }

    #[test]
    fn binary_minus_needs_whitespace() {
        use TokenKind::*;
        assert_eq!(kinds("1 - 2").unwrap(), vec![Number, Sub, Number, End]);
        assert_eq!(kinds("1 -2").unwrap(), vec![Number, Sign, Number, End]);
        assert_eq!(kinds("-moz").unwrap(), vec![Identifier, End]);
    }

    #[test]
    fn units_must_touch_the_number() {
        use TokenKind::*;
        assert_eq!(kinds("12px").unwrap(), vec![Number, Units, End]);
        assert_eq!(kinds("50%").unwrap(), vec![Number, Units, End]);
        assert_eq!(kinds("12 px").unwrap(), vec![Number, Identifier, End]);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        use TokenKind::*;
        assert_eq!(kinds("a and b").unwrap(), vec![Identifier, And, Identifier, End]);
        assert_eq!(kinds("android").unwrap(), vec![Identifier, End]);
        assert_eq!(kinds("not-this").unwrap(), vec![Identifier, End]);
    }

    #[test]
    fn colors_are_three_or_six_digits() {
        use TokenKind::*;
        assert_eq!(kinds("#abc").unwrap(), vec![Color, End]);
        assert_eq!(kinds("#aabbcc").unwrap(), vec![Color, End]);
        assert!(kinds("#abcd").is_err());
    }

    #[test]
    fn function_names_need_a_paren() {
        use TokenKind::*;
        assert_eq!(
            kinds("rgb(1)").unwrap(),
            vec![FunctionName, LParen, Number, RParen, End]
        );
        assert_eq!(kinds("rgb (1)").unwrap(), vec![Identifier, LParen, Number, RParen, End]);
    }

    #[test]
    fn rewinding_rescans_with_new_restrictions() {
        let input = "$a: 1";
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), input.to_owned());
        let mut lexer = Lexer::new(input, file.span);

        assert_eq!(
            lexer.token(0, &[TokenKind::Variable]).unwrap().kind,
            TokenKind::Variable
        );
        assert_eq!(
            lexer.token(1, &[TokenKind::Colon]).unwrap().kind,
            TokenKind::Colon
        );
        lexer.rewind(0);
        let tok = lexer.token(0, &[TokenKind::Variable]).unwrap();
        assert_eq!(lexer.text(tok), "$a");
    }

    #[test]
    fn nothing_acceptable_is_a_lex_error() {
        let input = "@";
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), input.to_owned());
        let mut lexer = Lexer::new(input, file.span);
        let err = lexer.token(0, &PRIORITY).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Lex);
    }
}
