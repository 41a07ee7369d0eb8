use crate::builtin::builtin_imports::*;

pub mod hsl;
pub mod opacity;
pub mod other;
pub mod rgb;

/// Read a number given either unitless or as a percentage of `max`
///
/// `rgb(50%, 0, 0)` has a red channel of `127.5`, the same as `rgb(127.5, 0, 0)`.
pub(crate) fn percentage_or_unitless(
    number: &SassNumber,
    max: f64,
    name: &str,
    span: Span,
) -> SassResult<f64> {
    if number.is_unitless() {
        return Ok(number.num());
    }

    if number.unit() == Some(Unit::Percent) {
        return Ok(number.num() * max / 100.0);
    }

    Err((
        format!(
            "${name}: Expected {}{} to have no units or \"%\".",
            number.num.to_string(false),
            number.unit_string()
        ),
        span,
    )
        .into())
}

/// Read a hue in degrees from a unitless number or any angle
pub(crate) fn angle_value(number: &SassNumber, name: &str, span: Span) -> SassResult<f64> {
    match number.magnitude_in(Unit::Deg) {
        Some(degrees) => Ok(degrees),
        None => Err((
            format!(
                "${name}: Expected {}{} to be an angle.",
                number.num.to_string(false),
                number.unit_string()
            ),
            span,
        )
            .into()),
    }
}

/// Move `current` a `fraction` of the way toward `max` when positive, or
/// toward zero when negative
pub(crate) fn scale_toward(current: f64, max: f64, fraction: f64) -> f64 {
    if fraction > 0.0 {
        current + (max - current) * fraction
    } else {
        current + current * fraction
    }
}

/// Read a scaling amount between `-100%` and `100%` as a fraction
pub(crate) fn scale_amount(value: Value, name: &str, span: Span) -> SassResult<f64> {
    let number = value.assert_number_with_name(name, span)?;
    let fraction = percentage_or_unitless(&number, 1.0, name, span)?;

    if !(-1.0..=1.0).contains(&fraction) {
        return Err((
            ErrorKind::Domain,
            format!(
                "${name}: Expected {}{} to be within -100% and 100%.",
                number.num.to_string(false),
                number.unit_string()
            ),
            span,
        )
            .into());
    }

    Ok(fraction)
}

/// A call of a CSS function of the same name, which some color functions
/// become when given a number instead of a color
pub(crate) fn plain_css_call(
    name: &str,
    args: &[Value],
    visitor: &Visitor,
    span: Span,
) -> SassResult<Value> {
    let args = args
        .iter()
        .map(|arg| arg.to_css_string(span, visitor.is_compressed()))
        .collect::<SassResult<Vec<_>>>()?;

    Ok(Value::String(
        format!(
            "{}({})",
            name,
            args.join(ListSeparator::Comma.as_str(visitor.is_compressed()))
        ),
        QuoteKind::None,
    ))
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    hsl::declare(f);
    opacity::declare(f);
    other::declare(f);
    rgb::declare(f);
}
