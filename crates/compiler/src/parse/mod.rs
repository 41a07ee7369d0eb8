//! Recursive descent over the scanner, one method per grammar rule
//!
//! ```text
//! goal       = expr_lst END
//! expr_lst   = expr_slst ("," expr_slst)*
//! expr_slst  = expr expr*
//! expr       = and_test ("or" and_test)*
//! and_test   = not_test ("and" not_test)*
//! not_test   = "not" not_test | comparison
//! comparison = a_expr (("<" | ">" | "<=" | ">=" | "==" | "!=") a_expr)*
//! a_expr     = m_expr (("+" | "-") m_expr)*
//! m_expr     = u_expr (("*" | "/") u_expr)*
//! u_expr     = "-" u_expr | "+" u_expr | atom
//! atom       = "(" expr_lst ")" | IDENT | FUNCTION "(" argspec? ")"
//!            | NUMBER UNITS? | STRING | COLOR | VARIABLE
//! argspec    = argspec_item ("," argspec_item)*
//! argspec_item = (VARIABLE ":")? expr_slst
//! ```
//!
//! Each rule peeks with the set of token kinds that may legally appear at
//! that point, which is how the scanner tells e.g. a unit from an identifier.

use std::sync::Arc;

use codemap::{Span, Spanned};

use crate::{
    ast::{ArgumentInvocation, AstExpr, BinaryOpExpr, CallArg, FunctionCallExpr},
    color::Color,
    common::{BinaryOp, Identifier, ListSeparator, QuoteKind, UnaryOp},
    error::{ErrorKind, SassResult},
    lexer::{Lexer, Token, TokenKind as T},
    unit::Unit,
    value::{SassNumber, Value},
};

const EXPR_RSTS: &[T] = &[
    T::LParen, T::End, T::Color, T::DqString, T::RParen, T::Variable, T::Add, T::Number,
    T::Comma, T::FunctionName, T::SqString, T::Not, T::Identifier, T::Sign, T::Or,
];
const AND_TEST_RSTS: &[T] = &[
    T::And, T::LParen, T::End, T::Color, T::DqString, T::Sign, T::Variable, T::Add,
    T::Number, T::Comma, T::FunctionName, T::SqString, T::Not, T::Identifier, T::RParen,
    T::Or,
];
const NOT_TEST_RSTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Sign, T::Variable, T::Add, T::Number,
    T::FunctionName, T::SqString, T::Not, T::Identifier,
];
const COMPARISON_RSTS: &[T] = &[
    T::LParen, T::DqString, T::RParen, T::Le, T::Color, T::Ne, T::Lt, T::Number, T::Comma,
    T::Gt, T::End, T::Sign, T::Add, T::FunctionName, T::SqString, T::Variable, T::Eq,
    T::Identifier, T::And, T::Ge, T::Not, T::Or,
];
const A_EXPR_RSTS: &[T] = &[
    T::LParen, T::Sub, T::DqString, T::RParen, T::Le, T::Color, T::Ne, T::Lt, T::Number,
    T::Comma, T::Gt, T::End, T::Sign, T::Ge, T::FunctionName, T::SqString, T::Variable,
    T::Eq, T::Identifier, T::And, T::Add, T::Not, T::Or,
];
const M_EXPR_RSTS: &[T] = &[
    T::LParen, T::Sub, T::DqString, T::RParen, T::Mul, T::Div, T::Le, T::Color, T::Ne,
    T::Lt, T::Number, T::Comma, T::Gt, T::End, T::Sign, T::Ge, T::FunctionName,
    T::SqString, T::Variable, T::Eq, T::Identifier, T::And, T::Add, T::Not, T::Or,
];
const U_EXPR_RSTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Sign, T::Add, T::Number, T::FunctionName,
    T::SqString, T::Variable, T::Identifier,
];
const ATOM_STARTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Number, T::FunctionName, T::SqString, T::Variable,
    T::Identifier,
];
const ATOM_RSTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Sign, T::Not, T::Add, T::Number, T::FunctionName,
    T::SqString, T::Variable, T::RParen, T::Identifier,
];
/// What may follow a number: its units or anything that may follow an operand
const AFTER_NUMBER_RSTS: &[T] = &[
    T::LParen, T::Sub, T::DqString, T::RParen, T::Variable, T::Mul, T::Div, T::Le,
    T::Color, T::Ne, T::Lt, T::Number, T::Comma, T::Gt, T::End, T::Sign, T::Ge,
    T::FunctionName, T::SqString, T::Units, T::Eq, T::Identifier, T::And, T::Add, T::Not,
    T::Or,
];
const ARGSPEC_RSTS: &[T] = &[T::Comma, T::RParen];
const ARGSPEC_ITEM_RSTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Sign, T::Not, T::Add, T::Number, T::FunctionName,
    T::SqString, T::Variable, T::Identifier,
];
const AFTER_ARG_VARIABLE_RSTS: &[T] = &[
    T::LParen, T::Color, T::DqString, T::Sign, T::Variable, T::Add, T::Number, T::Colon,
    T::SqString, T::Not, T::Identifier, T::FunctionName,
];
const EXPR_LST_RSTS: &[T] = &[T::End, T::Comma, T::RParen];
const EXPR_SLST_RSTS: &[T] = &[
    T::LParen, T::End, T::Color, T::DqString, T::RParen, T::Variable, T::Add, T::Number,
    T::Comma, T::FunctionName, T::SqString, T::Not, T::Sign, T::Identifier,
];

/// Parse a complete expression. `span` must cover exactly `input`.
pub(crate) fn parse_expression(input: &str, span: Span) -> SassResult<AstExpr> {
    ExpressionParser::new(input, span).goal()
}

/// Resolve a bare identifier to the keyword it names, or an unquoted string
pub(crate) fn parse_bareword(word: &str) -> Value {
    if let Some(color) = Color::from_name(word) {
        return Value::Color(Arc::new(color));
    }

    match word {
        "null" | "undefined" => Value::Null,
        "true" => Value::True,
        "false" => Value::False,
        _ => Value::String(word.to_owned(), QuoteKind::None),
    }
}

pub(crate) struct ExpressionParser<'a> {
    lexer: Lexer<'a>,
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(input: &'a str, span: Span) -> Self {
        Self {
            lexer: Lexer::new(input, span),
            pos: 0,
        }
    }

    /// The kind of the next token, if one of `allowed` can be scanned
    fn peek(&mut self, allowed: &[T]) -> Option<T> {
        self.lexer.token(self.pos, allowed).ok().map(|tok| tok.kind)
    }

    fn scan(&mut self, kind: T) -> SassResult<Token> {
        let tok = self.lexer.token(self.pos, &[kind])?;

        if tok.kind != kind {
            return Err((
                ErrorKind::Syntax,
                format!("Expected {}.", kind),
                self.lexer.span(tok),
            )
                .into());
        }

        self.pos += 1;
        Ok(tok)
    }

    fn rewind(&mut self) {
        self.pos = self.pos.saturating_sub(1);
        self.lexer.rewind(self.pos);
    }

    pub fn goal(&mut self) -> SassResult<AstExpr> {
        let expr = self.expr_lst()?;
        self.scan(T::End)?;
        Ok(expr)
    }

    fn expr_lst(&mut self) -> SassResult<AstExpr> {
        let mut elems = vec![self.expr_slst()?];

        while self.peek(EXPR_LST_RSTS) == Some(T::Comma) {
            self.scan(T::Comma)?;
            elems.push(self.expr_slst()?);
        }

        Ok(AstExpr::list_or_single(elems, ListSeparator::Comma))
    }

    fn expr_slst(&mut self) -> SassResult<AstExpr> {
        let mut elems = vec![self.expr()?];

        while !matches!(
            self.peek(EXPR_SLST_RSTS),
            Some(T::End | T::Comma | T::RParen)
        ) {
            elems.push(self.expr()?);
        }

        Ok(AstExpr::list_or_single(elems, ListSeparator::Space))
    }

    fn expr(&mut self) -> SassResult<AstExpr> {
        let mut operands = vec![self.and_test()?];

        while self.peek(EXPR_RSTS) == Some(T::Or) {
            self.scan(T::Or)?;
            operands.push(self.and_test()?);
        }

        Ok(Self::logical(operands, AstExpr::Any))
    }

    fn and_test(&mut self) -> SassResult<AstExpr> {
        let mut operands = vec![self.not_test()?];

        while self.peek(AND_TEST_RSTS) == Some(T::And) {
            self.scan(T::And)?;
            operands.push(self.not_test()?);
        }

        Ok(Self::logical(operands, AstExpr::All))
    }

    fn logical(mut operands: Vec<AstExpr>, build: fn(Vec<AstExpr>, Span) -> AstExpr) -> AstExpr {
        if operands.len() == 1 {
            return operands.remove(0);
        }

        let span = operands[0].span().merge(operands[operands.len() - 1].span());
        build(operands, span)
    }

    fn not_test(&mut self) -> SassResult<AstExpr> {
        if self.peek(NOT_TEST_RSTS) != Some(T::Not) {
            return self.comparison();
        }

        let not = self.scan(T::Not)?;
        let operand = self.not_test()?;
        let span = self.lexer.span(not).merge(operand.span());

        Ok(AstExpr::Not(Arc::new(operand), span))
    }

    fn binary(lhs: AstExpr, op: BinaryOp, rhs: AstExpr) -> AstExpr {
        let span = lhs.span().merge(rhs.span());
        AstExpr::BinaryOp(Arc::new(BinaryOpExpr { lhs, op, rhs, span }))
    }

    fn comparison(&mut self) -> SassResult<AstExpr> {
        let mut expr = self.a_expr()?;

        loop {
            let op = match self.peek(COMPARISON_RSTS) {
                Some(T::Lt) => BinaryOp::LessThan,
                Some(T::Gt) => BinaryOp::GreaterThan,
                Some(T::Le) => BinaryOp::LessThanEqual,
                Some(T::Ge) => BinaryOp::GreaterThanEqual,
                Some(T::Eq) => BinaryOp::Equal,
                Some(T::Ne) => BinaryOp::NotEqual,
                _ => return Ok(expr),
            };

            self.pos += 1;
            let rhs = self.a_expr()?;
            expr = Self::binary(expr, op, rhs);
        }
    }

    fn a_expr(&mut self) -> SassResult<AstExpr> {
        let mut expr = self.m_expr()?;

        loop {
            let op = match self.peek(A_EXPR_RSTS) {
                Some(T::Add) => BinaryOp::Plus,
                Some(T::Sub) => BinaryOp::Minus,
                // `1-2`: a minus sign touching its left operand subtracts
                Some(T::Sign) if self.lexer.is_adjacent(self.pos) => BinaryOp::Minus,
                _ => return Ok(expr),
            };

            self.pos += 1;
            let rhs = self.m_expr()?;
            expr = Self::binary(expr, op, rhs);
        }
    }

    fn m_expr(&mut self) -> SassResult<AstExpr> {
        let mut expr = self.u_expr()?;

        loop {
            let op = match self.peek(M_EXPR_RSTS) {
                Some(T::Mul) => BinaryOp::Mul,
                Some(T::Div) => BinaryOp::Div,
                _ => return Ok(expr),
            };

            self.pos += 1;
            let rhs = self.u_expr()?;
            expr = Self::binary(expr, op, rhs);
        }
    }

    fn u_expr(&mut self) -> SassResult<AstExpr> {
        let (op, tok) = match self.peek(U_EXPR_RSTS) {
            Some(T::Sign) => (UnaryOp::Neg, self.scan(T::Sign)?),
            Some(T::Add) => (UnaryOp::Plus, self.scan(T::Add)?),
            _ => return self.atom(),
        };

        let operand = self.u_expr()?;
        let span = self.lexer.span(tok).merge(operand.span());

        Ok(AstExpr::UnaryOp(op, Arc::new(operand), span))
    }

    fn atom(&mut self) -> SassResult<AstExpr> {
        match self.peek(ATOM_STARTS) {
            Some(T::LParen) => {
                let open = self.scan(T::LParen)?;
                let inner = self.expr_lst()?;
                let close = self.scan(T::RParen)?;
                let span = self.lexer.span_between(open, close);
                Ok(AstExpr::Paren(Arc::new(inner), span))
            }
            Some(T::Identifier) => {
                let tok = self.scan(T::Identifier)?;
                Ok(self.literal(parse_bareword(self.lexer.text(tok)), tok))
            }
            Some(T::FunctionName) => self.function_call(),
            Some(T::Number) => self.number(),
            Some(T::SqString) => {
                let tok = self.scan(T::SqString)?;
                Ok(self.string(tok, QuoteKind::Single))
            }
            Some(T::DqString) => {
                let tok = self.scan(T::DqString)?;
                Ok(self.string(tok, QuoteKind::Double))
            }
            Some(T::Color) => {
                let tok = self.scan(T::Color)?;
                let color = Color::from_hex(self.lexer.text(tok)).ok_or_else(|| {
                    Box::from((ErrorKind::Syntax, "Expected color.", self.lexer.span(tok)))
                })?;
                Ok(self.literal(Value::Color(Arc::new(color)), tok))
            }
            Some(T::Variable) => {
                let tok = self.scan(T::Variable)?;
                Ok(AstExpr::Variable(Spanned {
                    node: Identifier::from(self.lexer.text(tok)),
                    span: self.lexer.span(tok),
                }))
            }
            // only the end of input scans here; anything else is a lex error
            _ => {
                let tok = self.lexer.token(self.pos, &[T::End])?;
                Err((ErrorKind::Syntax, "Expected expression.", self.lexer.span(tok)).into())
            }
        }
    }

    fn literal(&self, value: Value, tok: Token) -> AstExpr {
        AstExpr::Literal(Spanned {
            node: value,
            span: self.lexer.span(tok),
        })
    }

    fn string(&self, tok: Token, quotes: QuoteKind) -> AstExpr {
        let text = self.lexer.text(tok);
        let inner = &text[1..text.len() - 1];
        self.literal(Value::String(inner.to_owned(), quotes), tok)
    }

    fn number(&mut self) -> SassResult<AstExpr> {
        let tok = self.scan(T::Number)?;
        let text = self.lexer.text(tok);

        let num: f64 = text.parse().map_err(|_| {
            Box::from((ErrorKind::Syntax, "Expected number.", self.lexer.span(tok)))
        })?;

        if self.peek(AFTER_NUMBER_RSTS) == Some(T::Units) {
            let units = self.scan(T::Units)?;
            let unit = Unit::from(self.lexer.text(units));
            return Ok(AstExpr::Literal(Spanned {
                node: Value::Dimension(SassNumber::new_with_unit(num, unit)),
                span: self.lexer.span_between(tok, units),
            }));
        }

        Ok(self.literal(Value::Dimension(SassNumber::new_unitless(num)), tok))
    }

    fn function_call(&mut self) -> SassResult<AstExpr> {
        let name = self.scan(T::FunctionName)?;
        let open = self.scan(T::LParen)?;

        let mut args = Vec::new();
        if self.peek(ATOM_RSTS) != Some(T::RParen) {
            args.push(self.argspec_item()?);

            while self.peek(ARGSPEC_RSTS) == Some(T::Comma) {
                self.scan(T::Comma)?;
                args.push(self.argspec_item()?);
            }
        }

        let close = self.scan(T::RParen)?;
        let original_name = self.lexer.text(name).to_owned();

        Ok(AstExpr::FunctionCall(FunctionCallExpr {
            name: Identifier::from(original_name.as_str()),
            original_name,
            arguments: Arc::new(ArgumentInvocation {
                args,
                span: self.lexer.span_between(open, close),
            }),
            span: self.lexer.span_between(name, close),
        }))
    }

    /// A variable followed by a colon names the argument; otherwise the
    /// variable starts the argument's value
    fn argspec_item(&mut self) -> SassResult<CallArg> {
        let mut name = None;

        if self.peek(ARGSPEC_ITEM_RSTS) == Some(T::Variable) {
            let var = self.scan(T::Variable)?;

            if self.peek(AFTER_ARG_VARIABLE_RSTS) == Some(T::Colon) {
                self.scan(T::Colon)?;
                name = Some(self.lexer.text(var).to_owned());
            } else {
                self.rewind();
            }
        }

        Ok(CallArg {
            name,
            value: self.expr_slst()?,
        })
    }
}

#[cfg(test)]
mod test {
    use codemap::CodeMap;

    use super::*;

    fn parse(input: &str) -> SassResult<AstExpr> {
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), input.to_owned());
        parse_expression(input, file.span)
    }

    #[test]
    fn precedence_of_arithmetic() {
        match parse("1 + 2 * 3").unwrap() {
            AstExpr::BinaryOp(op) => {
                assert_eq!(op.op, BinaryOp::Plus);
                assert!(matches!(&op.rhs, AstExpr::BinaryOp(inner) if inner.op == BinaryOp::Mul));
            }
            other => panic!("expected addition, got {:?}", other),
        }
    }

    #[test]
    fn adjacent_minus_subtracts() {
        assert!(matches!(
            parse("1-2").unwrap(),
            AstExpr::BinaryOp(op) if op.op == BinaryOp::Minus
        ));
        assert!(matches!(
            parse("1 -2").unwrap(),
            AstExpr::List(list) if list.separator == ListSeparator::Space
        ));
    }

    #[test]
    fn commas_bind_looser_than_spaces() {
        match parse("1px 2px, 3px").unwrap() {
            AstExpr::List(list) => {
                assert_eq!(list.separator, ListSeparator::Comma);
                assert_eq!(list.elems.len(), 2);
                assert!(matches!(&list.elems[0], AstExpr::List(inner) if inner.elems.len() == 2));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn logical_operands_are_flattened() {
        match parse("a or b or c").unwrap() {
            AstExpr::Any(operands, ..) => assert_eq!(operands.len(), 3),
            other => panic!("expected or, got {:?}", other),
        }
    }

    #[test]
    fn named_arguments_need_a_colon() {
        let call = match parse("f($a: 1, $b, $c + 1)").unwrap() {
            AstExpr::FunctionCall(call) => call,
            other => panic!("expected call, got {:?}", other),
        };

        let names: Vec<_> = call
            .arguments
            .args
            .iter()
            .map(|arg| arg.name.as_deref())
            .collect();
        assert_eq!(names, vec![Some("$a"), None, None]);
        assert!(matches!(call.arguments.args[1].value, AstExpr::Variable(..)));
        assert!(matches!(call.arguments.args[2].value, AstExpr::BinaryOp(..)));
    }

    #[test]
    fn barewords() {
        assert!(matches!(parse_bareword("red"), Value::Color(..)));
        assert!(matches!(parse_bareword("Red"), Value::String(..)));
        assert!(matches!(parse_bareword("undefined"), Value::Null));
        assert!(matches!(parse_bareword("false"), Value::False));
        assert!(matches!(parse_bareword("solid"), Value::String(s, QuoteKind::None) if s == "solid"));
    }

    #[test]
    fn failures_are_parse_errors() {
        assert_eq!(parse("1 +").unwrap_err().kind(), ErrorKind::Syntax);
        assert!(parse("(1").unwrap_err().kind().is_parse_failure());
        assert!(parse("1 @ 2").unwrap_err().kind().is_parse_failure());
    }
}
