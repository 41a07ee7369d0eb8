use std::{cmp::Ordering, sync::Arc};

use codemap::Span;

use crate::{
    color::Color,
    common::{BinaryOp, QuoteKind},
    error::{ErrorKind, SassError, SassResult},
    value::{fuzzy_equals, Value},
    Options,
};

fn undefined_operation(left: &Value, op: BinaryOp, right: &Value, span: Span) -> Box<SassError> {
    let message = match (left.inspect(span), right.inspect(span)) {
        (Ok(left), Ok(right)) => format!("Undefined operation \"{} {} {}\".", left, op, right),
        _ => format!("Undefined operation \"{}\".", op),
    };

    (ErrorKind::Type, message, span).into()
}

/// Arithmetic between a color and either another color or a unitless number,
/// applied to each RGB channel
fn color_op(
    left: &Value,
    color: &Color,
    right: &Value,
    op: BinaryOp,
    span: Span,
) -> SassResult<Value> {
    let other = match right {
        Value::Dimension(n) => {
            if !n.is_unitless() {
                return Err((
                    format!("Expected unitless number, got {}.", right.inspect(span)?),
                    span,
                )
                    .into());
            }
            [n.num(); 3]
        }
        Value::Color(other) => {
            if !fuzzy_equals(color.alpha().0, other.alpha().0) {
                return Err((
                    format!(
                        "Alpha channels must match between {} and {}.",
                        left.inspect(span)?,
                        right.inspect(span)?
                    ),
                    span,
                )
                    .into());
            }
            other.rgb_channels()
        }
        _ => unreachable!("color operands are checked by the caller"),
    };

    let result = match op {
        BinaryOp::Plus => color.map_channels(other, |a, b| a + b),
        BinaryOp::Minus => color.map_channels(other, |a, b| a - b),
        BinaryOp::Mul => color.map_channels(other, |a, b| a * b),
        BinaryOp::Div => {
            if other.iter().any(|&channel| channel == 0.0) {
                return Err((ErrorKind::Domain, "Division by zero.", span).into());
            }
            color.map_channels(other, |a, b| a / b)
        }
        _ => unreachable!("only arithmetic applies to colors"),
    };

    Ok(Value::Color(Arc::new(result)))
}

/// Concatenate the renders of both sides, keeping the quotes of a string on
/// the right
fn concat(
    left: &Value,
    sep: &str,
    right: &Value,
    options: &Options,
    span: Span,
) -> SassResult<Value> {
    let left_css = left.to_css_string(span, options.is_compressed())?;

    Ok(match right {
        Value::String(text, quotes) if sep.is_empty() => {
            Value::String(format!("{}{}", left_css, text), *quotes)
        }
        _ => Value::String(
            format!(
                "{}{}{}",
                left_css,
                sep,
                right.to_css_string(span, options.is_compressed())?
            ),
            QuoteKind::None,
        ),
    })
}

pub(crate) fn add(left: Value, right: Value, options: &Options, span: Span) -> SassResult<Value> {
    Ok(match left {
        Value::Dimension(ref n1) => match right {
            Value::Dimension(n2) => Value::Dimension(n1.plus(&n2, span)?),
            Value::String(text, ..) => Value::String(
                format!("{}{}", left.to_css_string(span, options.is_compressed())?, text),
                QuoteKind::None,
            ),
            _ => return Err(undefined_operation(&left, BinaryOp::Plus, &right, span)),
        },
        Value::Color(ref c) => match right {
            Value::Dimension(..) | Value::Color(..) => {
                color_op(&left, c, &right, BinaryOp::Plus, span)?
            }
            _ => concat(&left, "", &right, options, span)?,
        },
        Value::String(text, quotes) => {
            let rest = match right {
                Value::String(text2, ..) => text2,
                _ => right.to_css_string(span, options.is_compressed())?,
            };

            Value::String(
                text + &rest,
                if quotes.is_quoted() {
                    QuoteKind::Double
                } else {
                    QuoteKind::None
                },
            )
        }
        Value::True | Value::False | Value::Null | Value::List(..) => {
            concat(&left, "", &right, options, span)?
        }
    })
}

pub(crate) fn sub(left: Value, right: Value, options: &Options, span: Span) -> SassResult<Value> {
    Ok(match left {
        Value::Dimension(ref n1) => match right {
            Value::Dimension(n2) => Value::Dimension(n1.minus(&n2, span)?),
            _ => return Err(undefined_operation(&left, BinaryOp::Minus, &right, span)),
        },
        Value::Color(ref c) => match right {
            Value::Dimension(..) | Value::Color(..) => {
                color_op(&left, c, &right, BinaryOp::Minus, span)?
            }
            _ => concat(&left, "-", &right, options, span)?,
        },
        _ => concat(&left, "-", &right, options, span)?,
    })
}

pub(crate) fn mul(left: Value, right: Value, _: &Options, span: Span) -> SassResult<Value> {
    Ok(match (&left, &right) {
        (Value::Dimension(n1), Value::Dimension(n2)) => Value::Dimension(n1.times(n2)),
        (Value::Color(c), Value::Dimension(..) | Value::Color(..)) => {
            color_op(&left, c, &right, BinaryOp::Mul, span)?
        }
        _ => return Err(undefined_operation(&left, BinaryOp::Mul, &right, span)),
    })
}

pub(crate) fn div(left: Value, right: Value, options: &Options, span: Span) -> SassResult<Value> {
    Ok(match (&left, &right) {
        (Value::Dimension(n1), Value::Dimension(n2)) => Value::Dimension(n1.divided_by(n2, span)?),
        (Value::Dimension(..), _) => {
            return Err(undefined_operation(&left, BinaryOp::Div, &right, span))
        }
        (Value::Color(c), Value::Dimension(..) | Value::Color(..)) => {
            color_op(&left, c, &right, BinaryOp::Div, span)?
        }
        _ => concat(&left, "/", &right, options, span)?,
    })
}

pub(crate) fn cmp(left: &Value, right: &Value, span: Span, op: BinaryOp) -> SassResult<Value> {
    let ordering = left.cmp(right, span, op)?;

    Ok(Value::bool(match op {
        BinaryOp::GreaterThan => ordering == Ordering::Greater,
        BinaryOp::GreaterThanEqual => ordering != Ordering::Less,
        BinaryOp::LessThan => ordering == Ordering::Less,
        BinaryOp::LessThanEqual => ordering != Ordering::Greater,
        _ => unreachable!("not an ordering operator"),
    }))
}

/// The literal `a / b` that CSS uses as a separator, e.g. in `font: 12px/1.5`
pub(crate) fn slash_separated(
    left: &Value,
    right: &Value,
    options: &Options,
    span: Span,
) -> SassResult<Value> {
    Ok(Value::String(
        format!(
            "{} / {}",
            left.to_css_string(span, options.is_compressed())?,
            right.to_css_string(span, options.is_compressed())?
        ),
        QuoteKind::None,
    ))
}
