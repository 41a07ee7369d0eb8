use std::{cmp::Ordering, sync::Arc};

use codemap::{Span, Spanned};

use crate::{
    color::Color,
    common::{BinaryOp, ListSeparator, QuoteKind},
    error::{ErrorKind, SassResult},
    serializer::{inspect_value, serialize_value},
    Options, OutputStyle,
};

pub(crate) use number::*;
pub use number::Number;
pub use sass_number::SassNumber;

mod number;
mod sass_number;

/// A value produced by evaluating an expression
#[derive(Debug, Clone)]
pub enum Value {
    True,
    False,
    Null,
    Dimension(SassNumber),
    List(Vec<Value>, ListSeparator),
    Color(Arc<Color>),
    String(String, QuoteKind),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(s1, ..), Value::String(s2, ..)) => s1 == s2,
            (Value::Dimension(n1), Value::Dimension(n2)) => n1.equals(n2),
            (Value::List(list1, ..), Value::List(list2, ..)) => {
                list1.len() == list2.len() && list1.iter().zip(list2).all(|(a, b)| a == b)
            }
            (Value::Color(color1), Value::Color(color2)) => color1 == color2,
            (Value::Null, Value::Null)
            | (Value::True, Value::True)
            | (Value::False, Value::False) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    pub fn bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }

    /// A list of `elems`, or the element itself when there is exactly one
    pub fn list_or_single(mut elems: Vec<Value>, sep: ListSeparator) -> Self {
        if elems.len() == 1 {
            elems.remove(0)
        } else {
            Value::List(elems, sep)
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::False)
    }

    /// The name `type-of()` reports for this value
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Color(..) => "color",
            Value::String(..) => "string",
            Value::Dimension(..) => "number",
            Value::List(..) => "list",
            Value::True | Value::False => "bool",
            Value::Null => "null",
        }
    }

    pub fn assert_number(self, span: Span) -> SassResult<SassNumber> {
        match self {
            Value::Dimension(n) => Ok(n),
            _ => Err((format!("{} is not a number.", self.inspect(span)?), span).into()),
        }
    }

    pub fn assert_number_with_name(self, name: &str, span: Span) -> SassResult<SassNumber> {
        match self {
            Value::Dimension(n) => Ok(n),
            _ => Err((
                format!("${name}: {} is not a number.", self.inspect(span)?),
                span,
            )
                .into()),
        }
    }

    pub fn assert_color_with_name(self, name: &str, span: Span) -> SassResult<Arc<Color>> {
        match self {
            Value::Color(c) => Ok(c),
            _ => Err((
                format!("${name}: {} is not a color.", self.inspect(span)?),
                span,
            )
                .into()),
        }
    }

    pub fn assert_string_with_name(
        self,
        name: &str,
        span: Span,
    ) -> SassResult<(String, QuoteKind)> {
        match self {
            Value::String(s, quotes) => Ok((s, quotes)),
            _ => Err((
                format!("${name}: {} is not a string.", self.inspect(span)?),
                span,
            )
                .into()),
        }
    }

    /// Render this value as CSS text
    pub fn to_css_string(&self, span: Span, is_compressed: bool) -> SassResult<String> {
        serialize_value(
            self,
            &Options::default().style(if is_compressed {
                OutputStyle::Compressed
            } else {
                OutputStyle::Expanded
            }),
            span,
        )
    }

    /// Render this value for a diagnostic, which never fails
    pub fn inspect(&self, span: Span) -> SassResult<String> {
        inspect_value(self, &Options::default(), span)
    }

    pub fn unquote(self) -> Self {
        match self {
            Value::String(s1, _) => Value::String(s1, QuoteKind::None),
            Value::List(v, sep) => Value::List(v.into_iter().map(Value::unquote).collect(), sep),
            v => v,
        }
    }

    pub const fn span(self, span: Span) -> Spanned<Self> {
        Spanned { node: self, span }
    }

    pub fn as_list(self) -> Vec<Value> {
        match self {
            Value::List(v, ..) => v,
            v => vec![v],
        }
    }

    pub fn separator(&self) -> ListSeparator {
        match self {
            Value::List(_, list_separator) => *list_separator,
            _ => ListSeparator::Space,
        }
    }

    /// Ordering is only defined between numbers
    pub fn cmp(&self, other: &Self, span: Span, op: BinaryOp) -> SassResult<Ordering> {
        match (self, other) {
            (Value::Dimension(n1), Value::Dimension(n2)) => n1.compare(n2, span),
            _ => Err((
                ErrorKind::Type,
                format!(
                    "Undefined operation \"{} {} {}\".",
                    self.inspect(span)?,
                    op,
                    other.inspect(span)?
                ),
                span,
            )
                .into()),
        }
    }

    pub fn unary_plus(self, is_compressed: bool, span: Span) -> SassResult<Self> {
        Ok(match self {
            Self::Dimension(..) => self,
            _ => Self::String(
                format!("+{}", &self.to_css_string(span, is_compressed)?),
                QuoteKind::None,
            ),
        })
    }

    pub fn unary_neg(self, is_compressed: bool, span: Span) -> SassResult<Self> {
        Ok(match self {
            Self::Dimension(n) => Self::Dimension(n.with_num(-n.num)),
            _ => Self::String(
                format!("-{}", &self.to_css_string(span, is_compressed)?),
                QuoteKind::None,
            ),
        })
    }

    pub fn unary_not(self) -> Self {
        Self::bool(!self.is_truthy())
    }
}
