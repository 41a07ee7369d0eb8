use crate::builtin::builtin_imports::*;

use super::{percentage_or_unitless, plain_css_call};

fn channel(args: &mut ArgumentResult, position: usize, name: &str) -> SassResult<Number> {
    let span = args.span();
    let number = args
        .get_err(position, name)?
        .assert_number_with_name(name, span)?;

    Ok(Number(percentage_or_unitless(&number, 255.0, name, span)?))
}

pub(crate) fn alpha_channel(value: Value, span: Span) -> SassResult<Number> {
    let number = value.assert_number_with_name("alpha", span)?;
    Ok(Number(percentage_or_unitless(&number, 1.0, "alpha", span)?))
}

fn inner_rgb(mut args: ArgumentResult, format: ColorFormat) -> SassResult<Value> {
    let red = channel(&mut args, 0, "red")?;
    let green = channel(&mut args, 1, "green")?;
    let blue = channel(&mut args, 2, "blue")?;
    let alpha = match args.get(3, "alpha") {
        Some(alpha) => alpha_channel(alpha.node, args.span())?,
        None => Number(1.0),
    };

    Ok(Value::Color(Arc::new(
        Color::from_rgba(red, green, blue, alpha).with_format(format),
    )))
}

pub(crate) fn rgb(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    inner_rgb(args, ColorFormat::Rgb)
}

pub(crate) fn rgba(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(4)?;
    inner_rgb(args, ColorFormat::Rgba)
}

/// `rgba($color)` and `rgba($color, $alpha)` retag an existing color,
/// optionally replacing its alpha
pub(crate) fn retag_color(mut args: ArgumentResult, format: ColorFormat) -> SassResult<Value> {
    args.max_args(2)?;
    let span = args.span();
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;

    let alpha = match args.get(1, "alpha") {
        Some(alpha) => alpha_channel(alpha.node, span)?,
        None => color.alpha(),
    };

    Ok(Value::Color(Arc::new(
        color.with_alpha(alpha).with_format(format),
    )))
}

fn rgb_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    retag_color(args, ColorFormat::Rgb)
}

fn rgba_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    retag_color(args, ColorFormat::Rgba)
}

pub(crate) fn red(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_unitless(color.red())))
}

pub(crate) fn green(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_unitless(color.green())))
}

pub(crate) fn blue(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_unitless(color.blue())))
}

/// `$weight` is the proportion of the first color, as a percentage or a
/// unitless fraction
pub(crate) fn mix(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(3)?;
    let span = args.span();

    let color1 = args
        .get_err(0, "color1")?
        .assert_color_with_name("color1", span)?;
    let color2 = args
        .get_err(1, "color2")?
        .assert_color_with_name("color2", span)?;

    let weight = match args.get(2, "weight") {
        Some(weight) => {
            let weight = weight.node.assert_number_with_name("weight", span)?;
            percentage_or_unitless(&weight, 1.0, "weight", span)?
        }
        None => 0.5,
    };

    Ok(Value::Color(Arc::new(color1.mix(&color2, Number(weight)))))
}

/// `invert(10%)` is the CSS filter function
pub(crate) fn invert(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();

    match args.get_err(0, "color")? {
        Value::Color(color) => Ok(Value::Color(Arc::new(color.invert()))),
        number @ Value::Dimension(..) => plain_css_call("invert", &[number], visitor, span),
        v => Err((
            format!("$color: {} is not a color.", v.inspect(span)?),
            span,
        )
            .into()),
    }
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["rgb"], Some(3), rgb);
    f.declare(&["rgba"], Some(4), rgba);
    f.declare(&["rgb"], Some(1), rgb_color);
    f.declare(&["rgba"], Some(1), rgba_color);
    f.declare(&["rgba"], Some(2), rgba_color);
    f.declare(&["red"], Some(1), red);
    f.declare(&["green"], Some(1), green);
    f.declare(&["blue"], Some(1), blue);
    f.declare(&["mix"], Some(2), mix);
    f.declare(&["mix"], Some(3), mix);
    f.declare(&["invert"], Some(1), invert);
}
