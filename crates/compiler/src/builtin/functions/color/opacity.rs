use crate::builtin::builtin_imports::*;

use super::{percentage_or_unitless, plain_css_call};

pub(crate) fn alpha(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::Dimension(SassNumber::new_unitless(color.alpha())))
}

/// `opacity(50%)` is the CSS filter function
pub(crate) fn opacity(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let span = args.span();

    match args.get_err(0, "color")? {
        Value::Color(color) => Ok(Value::Dimension(SassNumber::new_unitless(color.alpha()))),
        number @ Value::Dimension(..) => plain_css_call("opacity", &[number], visitor, span),
        v => Err((
            format!("$color: {} is not a color.", v.inspect(span)?),
            span,
        )
            .into()),
    }
}

/// The color and the amount its alpha changes by, a unitless fraction or a
/// percentage
fn color_and_amount(mut args: ArgumentResult) -> SassResult<(Arc<Color>, Number)> {
    args.max_args(2)?;
    let span = args.span();

    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;
    let amount = args
        .get_err(1, "amount")?
        .assert_number_with_name("amount", span)?;

    Ok((
        color,
        Number(percentage_or_unitless(&amount, 1.0, "amount", span)?),
    ))
}

fn opacify(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let (color, amount) = color_and_amount(args)?;
    Ok(Value::Color(Arc::new(color.fade_in(amount))))
}

fn transparentize(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let (color, amount) = color_and_amount(args)?;
    Ok(Value::Color(Arc::new(color.fade_out(amount))))
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["alpha"], Some(1), alpha);
    f.declare(&["opacity"], Some(1), opacity);
    f.declare(&["opacify", "fade-in", "fadein"], Some(2), opacify);
    f.declare(
        &["transparentize", "fade-out", "fadeout"],
        Some(2),
        transparentize,
    );
}
