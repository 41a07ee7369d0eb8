use std::{
    convert::From,
    fmt,
    ops::{Add, Deref, Div, Mul, Neg, Sub},
};

/// Number of decimal places kept when numbers are compared or rendered
const PRECISION: i32 = 5;

fn epsilon() -> f64 {
    10.0_f64.powi(-PRECISION - 1)
}

/// Thin wrapper around `f64` providing utility functions and fuzzy equality
/// at the precision numbers are rendered with
#[derive(Clone, Copy, PartialOrd, Default)]
#[repr(transparent)]
pub struct Number(pub f64);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        fuzzy_equals(self.0, other.0)
    }
}

pub(crate) fn fuzzy_equals(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }

    (a - b).abs() <= epsilon() || round_to_precision(a) == round_to_precision(b)
}

pub(crate) fn fuzzy_as_int(num: f64) -> Option<i64> {
    if !num.is_finite() {
        return None;
    }

    let rounded = num.round();

    if fuzzy_equals(num, rounded) {
        Some(rounded as i64)
    } else {
        None
    }
}

pub(crate) fn round_to_precision(num: f64) -> f64 {
    let factor = 10.0_f64.powi(PRECISION);
    (num * factor).round() / factor
}

impl Number {
    pub fn min(self, other: Self) -> Self {
        if self < other {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Self) -> Self {
        if self > other {
            self
        } else {
            other
        }
    }

    pub fn is_zero(self) -> bool {
        fuzzy_equals(self.0, 0.0)
    }

    /// Round half away from zero
    pub fn round(self) -> Self {
        Self(self.0.round())
    }

    pub fn ceil(self) -> Self {
        Self(self.0.ceil())
    }

    pub fn floor(self) -> Self {
        Self(self.0.floor())
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn clamp(self, min: f64, max: f64) -> Self {
        Number(min.max(self.0.min(max)))
    }

    pub fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    pub(crate) fn to_string(self, is_compressed: bool) -> String {
        if self.0.is_nan() {
            return "NaN".to_owned();
        } else if self.0.is_infinite() && self.0.is_sign_negative() {
            return "-Infinity".to_owned();
        } else if self.0.is_infinite() {
            return "Infinity".to_owned();
        }

        let mut buffer = String::with_capacity(3);

        let num = round_to_precision(self.0);

        if num < 0.0 {
            buffer.push('-');
        }

        let formatted = format!("{:.*}", PRECISION as usize, num.abs());
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };

        if is_compressed && trimmed.starts_with("0.") {
            buffer.push_str(&trimmed[1..]);
        } else {
            buffer.push_str(trimmed);
        }

        if buffer.is_empty() || buffer == "-" || buffer == "-0" {
            return "0".to_owned();
        }

        buffer
    }
}

impl Deref for Number {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Number {
    fn from(b: f64) -> Self {
        Self(b)
    }
}

impl From<i64> for Number {
    fn from(val: i64) -> Self {
        Self(val as f64)
    }
}

impl From<usize> for Number {
    fn from(val: usize) -> Self {
        Self(val as f64)
    }
}

impl From<i32> for Number {
    fn from(val: i32) -> Self {
        Self(f64::from(val))
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number( {} )", self.to_string(false))
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl Div for Number {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Self(self.0 / other.0)
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Number;

    #[test]
    fn renders_five_decimal_places() {
        assert_eq!(Number(1.0 / 3.0).to_string(false), "0.33333");
        assert_eq!(Number(2.5).to_string(false), "2.5");
        assert_eq!(Number(100.0).to_string(false), "100");
        assert_eq!(Number(-0.000_001).to_string(false), "0");
    }

    #[test]
    fn compressed_drops_leading_zero() {
        assert_eq!(Number(0.5).to_string(true), ".5");
        assert_eq!(Number(-0.25).to_string(true), "-.25");
        assert_eq!(Number(1.5).to_string(true), "1.5");
    }

    #[test]
    fn equality_is_fuzzy() {
        assert_eq!(Number(0.1 + 0.2), Number(0.3));
        assert_ne!(Number(0.1), Number(0.2));
    }
}
