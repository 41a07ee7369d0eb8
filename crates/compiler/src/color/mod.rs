//! A color is stored as its red, green and blue channels (0 to 255) plus an
//! alpha channel (0 to 1).
//!
//! Colors can be written as hex literals (`#abc`, `#aabbcc`), as keywords
//! (`red`, `transparent`), or created by the builtin `rgb()`, `rgba()`,
//! `hsl()` and `hsla()` functions.
//!
//! A color written literally keeps the text it was written with, so `#ABC`
//! renders as `#ABC` rather than `#abc`. Computed colors
//! remember whether they came from an RGB or an HSL function, which only
//! affects how a translucent color is rendered.
//!
//! HSL conversions are not rounded, so `saturate(#855, 20%)` has a red
//! channel of `158.1`.

use crate::value::{round_to_precision, Number};
pub(crate) use name::{name_for_rgba, rgba_for_name};

mod name;

#[derive(Debug, Clone)]
pub struct Color {
    red: Number,
    green: Number,
    blue: Number,
    alpha: Number,
    pub(crate) format: ColorFormat,
    /// Source text of a hex literal or keyword
    literal: Option<String>,
}

/// Which notation a color originated from
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ColorFormat {
    Rgb,
    Rgba,
    Hsl,
    Hsla,
}

impl ColorFormat {
    pub(crate) fn is_hsl(self) -> bool {
        matches!(self, Self::Hsl | Self::Hsla)
    }
}

/// Channels compare after rounding to five decimal places, so colors that
/// went through an HSL round trip still equal their RGB counterparts
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .all(|(a, b)| round_to_precision(*a) == round_to_precision(*b))
    }
}

impl Eq for Color {}

// RGBA color functions
impl Color {
    /// Create a new `Color` from RGBA values, clamping each channel into range
    pub fn from_rgba(red: Number, green: Number, blue: Number, alpha: Number) -> Self {
        Color {
            red: red.clamp(0.0, 255.0),
            green: green.clamp(0.0, 255.0),
            blue: blue.clamp(0.0, 255.0),
            alpha: alpha.clamp(0.0, 1.0),
            format: ColorFormat::Rgba,
            literal: None,
        }
    }

    pub(crate) fn with_format(mut self, format: ColorFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse `#rgb` or `#rrggbb`, keeping the literal text for rendering
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| Number(f64::from(v)));

        let (red, green, blue) = match hex.len() {
            3 => {
                let doubled = |i: usize| hex[i..=i].repeat(2);
                (
                    channel(&doubled(0))?,
                    channel(&doubled(1))?,
                    channel(&doubled(2))?,
                )
            }
            6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
            _ => return None,
        };

        let mut color = Color::from_rgba(red, green, blue, Number(1.0)).with_format(ColorFormat::Rgb);
        color.literal = Some(text.to_owned());
        Some(color)
    }

    /// Look up a color keyword, keeping the keyword for rendering
    pub fn from_name(name: &str) -> Option<Self> {
        let [red, green, blue, alpha] = rgba_for_name(name)?;

        let mut color = Color::from_rgba(
            Number(f64::from(red)),
            Number(f64::from(green)),
            Number(f64::from(blue)),
            Number(f64::from(alpha) / 255.0),
        );
        color.literal = Some(name.to_owned());
        Some(color)
    }

    pub(crate) fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    pub fn red(&self) -> Number {
        self.red
    }

    pub fn green(&self) -> Number {
        self.green
    }

    pub fn blue(&self) -> Number {
        self.blue
    }

    pub fn alpha(&self) -> Number {
        self.alpha
    }

    fn channels(&self) -> [f64; 4] {
        [self.red.0, self.green.0, self.blue.0, self.alpha.0]
    }

    /// The channels rounded to whole numbers, as CSS sees them
    pub(crate) fn rgb_bytes(&self) -> [u8; 3] {
        [
            self.red.0.round() as u8,
            self.green.0.round() as u8,
            self.blue.0.round() as u8,
        ]
    }

    /// A fresh color with new RGB channels and this color's alpha and origin
    pub(crate) fn with_rgb(&self, red: Number, green: Number, blue: Number) -> Self {
        Color::from_rgba(red, green, blue, self.alpha).with_format(self.format)
    }

    /// Combine each RGB channel of this color with `other`
    pub(crate) fn map_channels(&self, other: [f64; 3], op: impl Fn(f64, f64) -> f64) -> Self {
        self.with_rgb(
            Number(op(self.red.0, other[0])),
            Number(op(self.green.0, other[1])),
            Number(op(self.blue.0, other[2])),
        )
    }

    pub(crate) fn rgb_channels(&self) -> [f64; 3] {
        [self.red.0, self.green.0, self.blue.0]
    }

    /// Mix two colors together with weight
    ///
    /// `weight` is the proportion of `self`, between 0 and 1.
    pub fn mix(&self, other: &Color, weight: Number) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let normalized_weight = weight.0 * 2.0 - 1.0;
        let alpha_distance = self.alpha.0 - other.alpha.0;

        let combined_weight1 = if normalized_weight * alpha_distance == -1.0 {
            normalized_weight
        } else {
            (normalized_weight + alpha_distance) / (1.0 + normalized_weight * alpha_distance)
        };
        let weight1 = (combined_weight1 + 1.0) / 2.0;
        let weight2 = 1.0 - weight1;

        Color::from_rgba(
            Number(self.red.0 * weight1 + other.red.0 * weight2),
            Number(self.green.0 * weight1 + other.green.0 * weight2),
            Number(self.blue.0 * weight1 + other.blue.0 * weight2),
            Number(self.alpha.0 * weight.0 + other.alpha.0 * (1.0 - weight.0)),
        )
    }
}

/// HSLA color functions
impl Color {
    /// Hue in degrees, saturation and lightness as fractions of 1
    pub fn as_hsl(&self) -> (f64, f64, f64) {
        let red = self.red.0 / 255.0;
        let green = self.green.0 / 255.0;
        let blue = self.blue.0 / 255.0;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);

        let lightness = (min + max) / 2.0;

        if min == max {
            return (0.0, 0.0, lightness);
        }

        let delta = max - min;

        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let rc = (max - red) / delta;
        let gc = (max - green) / delta;
        let bc = (max - blue) / delta;

        let hue = if red == max {
            bc - gc
        } else if green == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        ((hue / 6.0).rem_euclid(1.0) * 360.0, saturation, lightness)
    }

    pub fn hue(&self) -> Number {
        Number(self.as_hsl().0)
    }

    /// Saturation as a percentage
    pub fn saturation(&self) -> Number {
        Number(self.as_hsl().1 * 100.0)
    }

    /// Lightness as a percentage
    pub fn lightness(&self) -> Number {
        Number(self.as_hsl().2 * 100.0)
    }

    /// Create a color from a hue in degrees and saturation and lightness as
    /// fractions of 1
    pub fn from_hsla(hue: Number, saturation: Number, lightness: Number, alpha: Number) -> Self {
        let scaled_hue = (hue.0 / 360.0).rem_euclid(1.0);
        let saturation = saturation.0.clamp(0.0, 1.0);
        let lightness = lightness.0.clamp(0.0, 1.0);

        let (red, green, blue) = if saturation == 0.0 {
            (lightness, lightness, lightness)
        } else {
            let m2 = if lightness <= 0.5 {
                lightness * (1.0 + saturation)
            } else {
                lightness + saturation - lightness * saturation
            };
            let m1 = 2.0 * lightness - m2;

            (
                Self::hue_to_rgb(m1, m2, scaled_hue + 1.0 / 3.0),
                Self::hue_to_rgb(m1, m2, scaled_hue),
                Self::hue_to_rgb(m1, m2, scaled_hue - 1.0 / 3.0),
            )
        };

        Color::from_rgba(
            Number(red * 255.0),
            Number(green * 255.0),
            Number(blue * 255.0),
            alpha,
        )
        .with_format(ColorFormat::Hsla)
    }

    fn hue_to_rgb(m1: f64, m2: f64, hue: f64) -> f64 {
        let hue = hue.rem_euclid(1.0);

        if hue < 1.0 / 6.0 {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
        } else {
            m1
        }
    }

    /// Rebuild this color from HSL components, keeping alpha and origin
    pub(crate) fn with_hsl(&self, hue: f64, saturation: f64, lightness: f64) -> Self {
        Color::from_hsla(
            Number(hue),
            Number(saturation),
            Number(lightness),
            self.alpha,
        )
        .with_format(self.format)
    }

    /// Shift hue, saturation and lightness by the given amounts
    ///
    /// Saturation and lightness are fractions of 1 and are clamped.
    pub(crate) fn adjust_hsl(&self, hue: f64, saturation: f64, lightness: f64) -> Self {
        let (h, s, l) = self.as_hsl();
        self.with_hsl(
            h + hue,
            (s + saturation).clamp(0.0, 1.0),
            (l + lightness).clamp(0.0, 1.0),
        )
    }

    pub fn adjust_hue(&self, degrees: f64) -> Self {
        self.adjust_hsl(degrees, 0.0, 0.0)
    }

    pub fn complement(&self) -> Self {
        self.adjust_hue(180.0)
    }

    pub fn invert(&self) -> Self {
        self.map_channels([0.0; 3], |channel, _| 255.0 - channel)
    }
}

/// Opacity color functions
impl Color {
    /// Change `alpha` to value given
    pub fn with_alpha(&self, alpha: Number) -> Self {
        let mut color = Color::from_rgba(self.red, self.green, self.blue, alpha);
        color.format = self.format;
        color
    }

    /// Makes a color more opaque by `amount`, a fraction of 1
    pub fn fade_in(&self, amount: Number) -> Self {
        self.with_alpha(self.alpha + amount)
    }

    /// Makes a color more transparent by `amount`, a fraction of 1
    pub fn fade_out(&self, amount: Number) -> Self {
        self.with_alpha(self.alpha - amount)
    }
}

/// Other color functions
impl Color {
    pub fn to_ie_hex_str(&self) -> String {
        let [red, green, blue] = self.rgb_bytes();
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            (self.alpha.0 * 255.0).round() as u8,
            red,
            green,
            blue
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn approx(a: Number, b: f64) -> bool {
        (a.0 - b).abs() < 1e-6
    }

    #[test]
    fn short_and_long_hex() {
        let short = Color::from_hex("#abc").unwrap();
        assert_eq!(short.rgb_bytes(), [0xAA, 0xBB, 0xCC]);
        assert_eq!(short.literal(), Some("#abc"));
        assert_eq!(short, Color::from_hex("#aabbcc").unwrap());
        assert!(Color::from_hex("#abcd").is_none());
    }

    #[test]
    fn saturate_is_not_rounded() {
        let color = Color::from_hex("#855").unwrap().adjust_hsl(0.0, 0.2, 0.0);
        assert!(approx(color.red(), 158.1));
        assert!(approx(color.green(), 62.9));
        assert!(approx(color.blue(), 62.9));
    }

    #[test]
    fn adjust_hue_rotates() {
        let color = Color::from_hex("#811").unwrap().adjust_hue(45.0);
        assert!(approx(color.red(), 136.0));
        assert!(approx(color.green(), 106.25));
        assert!(approx(color.blue(), 17.0));
    }

    #[test]
    fn hsl_round_trip() {
        let color = Color::from_hsla(Number(120.0), Number(1.0), Number(0.25), Number(1.0));
        assert_eq!(color.rgb_bytes(), [0, 128, 0]);
        let (h, s, l) = color.as_hsl();
        assert!((h - 120.0).abs() < 1e-9);
        assert!((s - 1.0).abs() < 1e-9);
        assert!((l - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ie_hex_str_puts_alpha_first() {
        let color = Color::from_rgba(Number(255.0), Number(0.0), Number(0.0), Number(0.5));
        assert_eq!(color.to_ie_hex_str(), "#80FF0000");
    }
}
