use crate::builtin::builtin_imports::*;

use super::{
    angle_value, percentage_or_unitless, plain_css_call, rgb::retag_color, scale_amount,
    scale_toward,
};

/// A hue in degrees, where a percentage is a fraction of a full turn
fn hue_value(value: Value, span: Span) -> SassResult<f64> {
    let hue = value.assert_number_with_name("hue", span)?;

    if hue.unit() == Some(Unit::Percent) {
        return Ok(hue.num() * 3.6);
    }

    angle_value(&hue, "hue", span)
}

/// Saturation or lightness, unitless or as a percentage, as a fraction of 1
fn hsl_fraction(value: Value, name: &str, span: Span) -> SassResult<f64> {
    let number = value.assert_number_with_name(name, span)?;
    Ok(percentage_or_unitless(&number, 100.0, name, span)?.clamp(0.0, 100.0) / 100.0)
}

/// An amount of saturation or lightness in percentage points
///
/// `lighten($color, 10)` and `lighten($color, 10%)` are the same.
fn percentage_points(value: Value, name: &str, span: Span) -> SassResult<f64> {
    let number = value.assert_number_with_name(name, span)?;
    percentage_or_unitless(&number, 100.0, name, span)
}

fn inner_hsl(mut args: ArgumentResult, format: ColorFormat) -> SassResult<Value> {
    let span = args.span();

    let hue = hue_value(args.get_err(0, "hue")?, span)?;
    let saturation = hsl_fraction(args.get_err(1, "saturation")?, "saturation", span)?;
    let lightness = hsl_fraction(args.get_err(2, "lightness")?, "lightness", span)?;
    let alpha = match args.get(3, "alpha") {
        Some(alpha) => super::rgb::alpha_channel(alpha.node, span)?,
        None => Number(1.0),
    };

    Ok(Value::Color(Arc::new(
        Color::from_hsla(Number(hue), Number(saturation), Number(lightness), alpha)
            .with_format(format),
    )))
}

pub(crate) fn hsl(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    inner_hsl(args, ColorFormat::Hsl)
}

pub(crate) fn hsla(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(4)?;
    inner_hsl(args, ColorFormat::Hsla)
}

fn hsl_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    retag_color(args, ColorFormat::Hsl)
}

fn hsla_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    retag_color(args, ColorFormat::Hsla)
}

pub(crate) fn hue(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_with_unit(
        color.hue(),
        Unit::Deg,
    )))
}

pub(crate) fn saturation(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_with_unit(
        color.saturation(),
        Unit::Percent,
    )))
}

pub(crate) fn lightness(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_with_unit(
        color.lightness(),
        Unit::Percent,
    )))
}

/// Shared body of the functions that shift saturation or lightness
fn adjust(
    mut args: ArgumentResult,
    saturation_sign: f64,
    lightness_sign: f64,
) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();

    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;
    let amount = percentage_points(args.get_err(1, "amount")?, "amount", span)? / 100.0;

    Ok(Value::Color(Arc::new(color.adjust_hsl(
        0.0,
        amount * saturation_sign,
        amount * lightness_sign,
    ))))
}

fn lighten(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    adjust(args, 0.0, 1.0)
}

fn darken(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    adjust(args, 0.0, -1.0)
}

fn desaturate(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    adjust(args, -1.0, 0.0)
}

fn saturate(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    adjust(args, 1.0, 0.0)
}

/// `saturate(50%)` is the CSS filter function
fn saturate_filter(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();
    let number = args
        .get_err(0, "amount")?
        .assert_number_with_name("amount", span)?;

    plain_css_call("saturate", &[Value::Dimension(number)], visitor, span)
}

fn adjust_hue(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();

    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;
    let degrees = args
        .get_err(1, "degrees")?
        .assert_number_with_name("degrees", span)?;

    Ok(Value::Color(Arc::new(
        color.adjust_hue(angle_value(&degrees, "degrees", span)?),
    )))
}

fn complement(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Color(Arc::new(color.complement())))
}

/// `grayscale(1)` is the CSS filter function
fn grayscale(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();

    match args.get_err(0, "color")? {
        Value::Color(color) => {
            let (hue, _, lightness) = color.as_hsl();
            Ok(Value::Color(Arc::new(color.with_hsl(hue, 0.0, lightness))))
        }
        number @ Value::Dimension(..) => plain_css_call("grayscale", &[number], visitor, span),
        v => Err((
            format!("$color: {} is not a color.", v.inspect(span)?),
            span,
        )
            .into()),
    }
}

/// Shared body of the functions that scale saturation or lightness toward
/// their bounds
fn scale(mut args: ArgumentResult, scale_saturation: bool) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();

    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;
    let amount = scale_amount(args.get_err(1, "amount")?, "amount", span)?;

    let (hue, mut saturation, mut lightness) = color.as_hsl();
    if scale_saturation {
        saturation = scale_toward(saturation, 1.0, amount);
    } else {
        lightness = scale_toward(lightness, 1.0, amount);
    }

    Ok(Value::Color(Arc::new(
        color.with_hsl(hue, saturation, lightness),
    )))
}

fn scale_lightness(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    scale(args, false)
}

fn scale_saturation(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    scale(args, true)
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["hsl"], Some(3), hsl);
    f.declare(&["hsla"], Some(4), hsla);
    f.declare(&["hsl"], Some(1), hsl_color);
    f.declare(&["hsla"], Some(1), hsla_color);
    f.declare(&["hsla"], Some(2), hsla_color);
    f.declare(&["hue"], Some(1), hue);
    f.declare(&["saturation"], Some(1), saturation);
    f.declare(&["lightness"], Some(1), lightness);
    f.declare(&["lighten", "adjust-lightness"], Some(2), lighten);
    f.declare(&["darken"], Some(2), darken);
    f.declare(&["saturate", "adjust-saturation"], Some(2), saturate);
    f.declare(&["saturate"], Some(1), saturate_filter);
    f.declare(&["desaturate"], Some(2), desaturate);
    f.declare(&["adjust-hue", "spin"], Some(2), adjust_hue);
    f.declare(&["complement"], Some(1), complement);
    f.declare(&["grayscale", "greyscale"], Some(1), grayscale);
    f.declare(&["scale-lightness"], Some(2), scale_lightness);
    f.declare(&["scale-saturation"], Some(2), scale_saturation);
}
