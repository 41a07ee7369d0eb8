use crate::builtin::builtin_imports::*;

use super::{angle_value, percentage_or_unitless, scale_amount, scale_toward};

/// The channel arguments of `adjust-color()`, `scale-color()` and
/// `change-color()`, which may only be passed by name
#[derive(Debug, Default)]
struct ChannelArgs {
    red: Option<SassNumber>,
    green: Option<SassNumber>,
    blue: Option<SassNumber>,
    hue: Option<SassNumber>,
    saturation: Option<SassNumber>,
    lightness: Option<SassNumber>,
    alpha: Option<SassNumber>,
}

impl ChannelArgs {
    fn has_rgb(&self) -> bool {
        self.red.is_some() || self.green.is_some() || self.blue.is_some()
    }

    fn has_hsl(&self) -> bool {
        self.hue.is_some() || self.saturation.is_some() || self.lightness.is_some()
    }
}

fn color_and_channels(
    mut args: ArgumentResult,
    allow_hue: bool,
) -> SassResult<(Arc<Color>, ChannelArgs)> {
    let span = args.span();
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", span)?;

    if args.positional.len() > 1 {
        return Err((
            "Only one positional argument is allowed. All other arguments must be passed by name.",
            span,
        )
            .into());
    }

    let mut channels = ChannelArgs::default();

    for (name, value) in args.take_named() {
        let slot = match name.as_str() {
            "red" => &mut channels.red,
            "green" => &mut channels.green,
            "blue" => &mut channels.blue,
            "hue" if allow_hue => &mut channels.hue,
            "saturation" => &mut channels.saturation,
            "lightness" => &mut channels.lightness,
            "alpha" => &mut channels.alpha,
            _ => return Err((format!("No argument named ${}.", name), span).into()),
        };

        *slot = Some(value.assert_number_with_name(name.as_str(), span)?);
    }

    Ok((color, channels))
}

/// Read an optional channel argument with `read`, defaulting to `current`
fn channel_or(
    number: Option<&SassNumber>,
    current: f64,
    read: impl FnOnce(&SassNumber) -> SassResult<f64>,
) -> SassResult<f64> {
    number.map_or(Ok(current), read)
}

/// Increase or decrease any of a color's channels by a fixed amount
fn adjust_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let span = args.span();
    let (color, channels) = color_and_channels(args, true)?;
    let mut color = Color::clone(&color);

    if channels.has_hsl() {
        let hue = channel_or(channels.hue.as_ref(), 0.0, |n| {
            angle_value(n, "hue", span)
        })?;
        let saturation = channel_or(channels.saturation.as_ref(), 0.0, |n| {
            percentage_or_unitless(n, 100.0, "saturation", span)
        })?;
        let lightness = channel_or(channels.lightness.as_ref(), 0.0, |n| {
            percentage_or_unitless(n, 100.0, "lightness", span)
        })?;

        color = color.adjust_hsl(hue, saturation / 100.0, lightness / 100.0);
    }

    if channels.has_rgb() {
        let [red, green, blue] = color.rgb_channels();
        let red = red + channel_or(channels.red.as_ref(), 0.0, |n| {
            percentage_or_unitless(n, 255.0, "red", span)
        })?;
        let green = green + channel_or(channels.green.as_ref(), 0.0, |n| {
            percentage_or_unitless(n, 255.0, "green", span)
        })?;
        let blue = blue + channel_or(channels.blue.as_ref(), 0.0, |n| {
            percentage_or_unitless(n, 255.0, "blue", span)
        })?;

        color = color.with_rgb(Number(red), Number(green), Number(blue));
    }

    if let Some(alpha) = &channels.alpha {
        color = color.fade_in(Number(percentage_or_unitless(alpha, 1.0, "alpha", span)?));
    }

    Ok(Value::Color(Arc::new(color)))
}

/// Move any of a color's channels a fraction of the way toward its bounds
fn scale_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let span = args.span();
    let (color, channels) = color_and_channels(args, false)?;
    let mut color = Color::clone(&color);

    let scale = |number: Option<&SassNumber>, name: &str, current: f64, max: f64| {
        channel_or(number, current, |n| {
            Ok(scale_toward(
                current,
                max,
                scale_amount(Value::Dimension(n.clone()), name, span)?,
            ))
        })
    };

    if channels.has_hsl() {
        let (hue, saturation, lightness) = color.as_hsl();
        let saturation = scale(channels.saturation.as_ref(), "saturation", saturation, 1.0)?;
        let lightness = scale(channels.lightness.as_ref(), "lightness", lightness, 1.0)?;

        color = color.with_hsl(hue, saturation, lightness);
    }

    if channels.has_rgb() {
        let [red, green, blue] = color.rgb_channels();
        let red = scale(channels.red.as_ref(), "red", red, 255.0)?;
        let green = scale(channels.green.as_ref(), "green", green, 255.0)?;
        let blue = scale(channels.blue.as_ref(), "blue", blue, 255.0)?;

        color = color.with_rgb(Number(red), Number(green), Number(blue));
    }

    if channels.alpha.is_some() {
        let alpha = scale(channels.alpha.as_ref(), "alpha", color.alpha().0, 1.0)?;
        color = color.with_alpha(Number(alpha));
    }

    Ok(Value::Color(Arc::new(color)))
}

/// Set any of a color's channels to a new value
fn change_color(args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    let span = args.span();
    let (color, channels) = color_and_channels(args, true)?;
    let mut color = Color::clone(&color);

    if channels.has_hsl() {
        let (hue, saturation, lightness) = color.as_hsl();
        let hue = channel_or(channels.hue.as_ref(), hue, |n| angle_value(n, "hue", span))?;
        let saturation = channel_or(channels.saturation.as_ref(), saturation, |n| {
            Ok(percentage_or_unitless(n, 100.0, "saturation", span)? / 100.0)
        })?;
        let lightness = channel_or(channels.lightness.as_ref(), lightness, |n| {
            Ok(percentage_or_unitless(n, 100.0, "lightness", span)? / 100.0)
        })?;

        color = color.with_hsl(hue, saturation, lightness);
    }

    if channels.has_rgb() {
        let [red, green, blue] = color.rgb_channels();
        let red = channel_or(channels.red.as_ref(), red, |n| {
            percentage_or_unitless(n, 255.0, "red", span)
        })?;
        let green = channel_or(channels.green.as_ref(), green, |n| {
            percentage_or_unitless(n, 255.0, "green", span)
        })?;
        let blue = channel_or(channels.blue.as_ref(), blue, |n| {
            percentage_or_unitless(n, 255.0, "blue", span)
        })?;

        color = color.with_rgb(Number(red), Number(green), Number(blue));
    }

    if let Some(alpha) = &channels.alpha {
        color = color.with_alpha(Number(percentage_or_unitless(alpha, 1.0, "alpha", span)?));
    }

    Ok(Value::Color(Arc::new(color)))
}

/// The `#AARRGGBB` notation used by Internet Explorer filters
fn ie_hex_str(mut args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
    args.max_args(1)?;
    let color = args
        .get_err(0, "color")?
        .assert_color_with_name("color", args.span())?;

    Ok(Value::String(color.to_ie_hex_str(), QuoteKind::None))
}

pub(crate) fn declare(f: &mut FunctionLibrary) {
    f.declare(&["adjust-color"], None, adjust_color);
    f.declare(&["scale-color"], None, scale_color);
    f.declare(&["change-color"], None, change_color);
    f.declare(&["ie-hex-str"], Some(1), ie_hex_str);
}
