use codemap::Span;

use crate::{
    color::{name_for_rgba, Color},
    common::{ListSeparator, QuoteKind},
    error::SassResult,
    value::{fuzzy_equals, Number, SassNumber, Value},
    Options,
};

pub(crate) fn serialize_value(val: &Value, options: &Options, span: Span) -> SassResult<String> {
    let mut serializer = Serializer::new(options, false, span);

    serializer.visit_value(val)?;

    Ok(serializer.finish())
}

pub(crate) fn inspect_value(val: &Value, options: &Options, span: Span) -> SassResult<String> {
    let mut serializer = Serializer::new(options, true, span);

    serializer.visit_value(val)?;

    Ok(serializer.finish())
}

/// Writes values as CSS text
///
/// In inspect mode the output is meant for diagnostics: compound units are
/// written out instead of rejected and nested lists are parenthesized.
pub(crate) struct Serializer<'a> {
    options: &'a Options<'a>,
    inspect: bool,
    buffer: Vec<u8>,
    span: Span,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a Options<'a>, inspect: bool, span: Span) -> Self {
        Self {
            options,
            inspect,
            buffer: Vec::new(),
            span,
        }
    }

    fn finish(self) -> String {
        String::from_utf8(self.buffer).unwrap_or_default()
    }

    fn write_optional_space(&mut self) {
        if !self.options.is_compressed() {
            self.buffer.push(b' ');
        }
    }

    fn write_float(&mut self, float: f64) {
        self.buffer.extend_from_slice(
            Number(float)
                .to_string(self.options.is_compressed())
                .as_bytes(),
        );
    }

    pub fn visit_number(&mut self, number: &SassNumber) -> SassResult<()> {
        if !self.inspect && !number.has_simple_unit() {
            return Err((
                format!(
                    "{}{} isn't a valid CSS value.",
                    Number(number.num()).to_string(false),
                    number.unit_string()
                ),
                self.span,
            )
                .into());
        }

        if self.options.is_compressed()
            && number.num == Number(0.0)
            && number.unit().map_or(false, |unit| unit.is_zeroable())
        {
            self.buffer.push(b'0');
            return Ok(());
        }

        self.write_float(number.num());
        self.buffer
            .extend_from_slice(number.unit_string().as_bytes());

        Ok(())
    }

    /// Alpha is written with at most two significant digits
    fn write_alpha(&mut self, alpha: f64) {
        if alpha == 0.0 {
            self.buffer.push(b'0');
            return;
        }

        let magnitude = alpha.abs().log10().floor() as i32;
        let decimals = (1 - magnitude).max(0) as usize;
        let formatted = format!("{:.*}", decimals, alpha);
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };

        self.buffer.extend_from_slice(trimmed.as_bytes());
    }

    fn rgba_candidate(&self, color: &Color) -> String {
        let [red, green, blue] = color.rgb_bytes();
        let mut serializer = Serializer::new(self.options, self.inspect, self.span);

        serializer.buffer.extend_from_slice(b"rgba(");
        for channel in [red, green, blue] {
            serializer
                .buffer
                .extend_from_slice(channel.to_string().as_bytes());
            serializer.buffer.push(b',');
            serializer.write_optional_space();
        }
        serializer.write_alpha(color.alpha().0);
        serializer.buffer.push(b')');

        serializer.finish()
    }

    fn hsla_candidate(&self, color: &Color) -> String {
        let (hue, saturation, lightness) = color.as_hsl();
        let mut serializer = Serializer::new(self.options, self.inspect, self.span);

        serializer.buffer.extend_from_slice(b"hsla(");
        serializer.write_float(hue);
        serializer.buffer.push(b',');
        serializer.write_optional_space();
        serializer.write_float(saturation * 100.0);
        serializer.buffer.extend_from_slice(b"%,");
        serializer.write_optional_space();
        serializer.write_float(lightness * 100.0);
        serializer.buffer.extend_from_slice(b"%,");
        serializer.write_optional_space();
        serializer.write_alpha(color.alpha().0);
        serializer.buffer.push(b')');

        serializer.finish()
    }

    fn hex_candidate(color: &Color) -> String {
        let [red, green, blue] = color.rgb_bytes();

        if [red, green, blue].iter().all(|channel| channel % 17 == 0) {
            format!("#{:x}{:x}{:x}", red / 17, green / 17, blue / 17)
        } else {
            format!("#{:02x}{:02x}{:02x}", red, green, blue)
        }
    }

    /// Candidate spellings of a color, most preferred first
    fn color_candidates(&self, color: &Color) -> Vec<String> {
        let [red, green, blue] = color.rgb_bytes();
        let alpha = color.alpha().0;
        let mut candidates = Vec::with_capacity(2);

        let alpha_byte = if fuzzy_equals(alpha, 1.0) {
            Some(255)
        } else if fuzzy_equals(alpha, 0.0) {
            Some(0)
        } else {
            None
        };

        if let Some(name) = alpha_byte.and_then(|a| name_for_rgba([red, green, blue, a])) {
            candidates.push(name.to_owned());
        }

        if fuzzy_equals(alpha, 1.0) {
            candidates.push(Self::hex_candidate(color));
        } else if color.format.is_hsl() && !self.options.is_compressed() {
            candidates.push(self.hsla_candidate(color));
        } else {
            candidates.push(self.rgba_candidate(color));
        }

        candidates
    }

    pub fn visit_color(&mut self, color: &Color) {
        if !self.options.is_compressed() {
            if let Some(literal) = color.literal() {
                self.buffer.extend_from_slice(literal.as_bytes());
                return;
            }
        }

        let candidates = self.color_candidates(color);

        let chosen = if self.options.is_compressed() {
            // the first of several equally short candidates wins
            candidates
                .iter()
                .fold(None, |best: Option<&String>, candidate| match best {
                    Some(b) if b.len() <= candidate.len() => Some(b),
                    _ => Some(candidate),
                })
        } else {
            candidates.first()
        };

        if let Some(text) = chosen {
            self.buffer.extend_from_slice(text.as_bytes());
        }
    }

    fn write_list_separator(&mut self, sep: ListSeparator) {
        self.buffer
            .extend_from_slice(sep.as_str(self.options.is_compressed()).as_bytes());
    }

    fn elem_needs_parens(sep: ListSeparator, elem: &Value) -> bool {
        match elem {
            Value::List(elems, sep2) => {
                elems.len() >= 2 && (sep == ListSeparator::Space || *sep2 == ListSeparator::Comma)
            }
            _ => false,
        }
    }

    fn visit_list(&mut self, list_elems: &[Value], sep: ListSeparator) -> SassResult<()> {
        if list_elems.is_empty() && self.inspect {
            self.buffer.extend_from_slice(b"()");
            return Ok(());
        }

        let mut elems = list_elems.iter().peekable();

        while let Some(elem) = elems.next() {
            let needs_parens = self.inspect && Self::elem_needs_parens(sep, elem);

            if needs_parens {
                self.buffer.push(b'(');
            }

            self.visit_value(elem)?;

            if needs_parens {
                self.buffer.push(b')');
            }

            if elems.peek().is_some() {
                self.write_list_separator(sep);
            }
        }

        Ok(())
    }

    fn visit_quoted_string(&mut self, quote: u8, string: &str) {
        self.buffer.reserve(string.len() + 2);
        self.buffer.push(quote);

        for c in string.bytes() {
            if c == quote || c == b'\\' {
                self.buffer.push(b'\\');
            }
            self.buffer.push(c);
        }

        self.buffer.push(quote);
    }

    fn visit_value(&mut self, value: &Value) -> SassResult<()> {
        match value {
            Value::Dimension(num) => self.visit_number(num)?,
            Value::Color(color) => self.visit_color(color),
            Value::List(elems, sep) => self.visit_list(elems, *sep)?,
            Value::True => self.buffer.extend_from_slice(b"true"),
            Value::False => self.buffer.extend_from_slice(b"false"),
            Value::Null => self.buffer.extend_from_slice(b"null"),
            Value::String(s, quotes) => match quotes.as_char() {
                Some(quote) => self.visit_quoted_string(quote as u8, s),
                None => self.buffer.extend_from_slice(s.as_bytes()),
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use codemap::CodeMap;

    use super::*;
    use crate::{unit::Unit, OutputStyle};

    fn span() -> Span {
        let mut map = CodeMap::new();
        map.add_file("test".to_owned(), "1".to_owned()).span
    }

    fn render(value: &Value, style: OutputStyle) -> String {
        serialize_value(value, &Options::default().style(style), span()).unwrap()
    }

    fn rgba(r: f64, g: f64, b: f64, a: f64) -> Value {
        Value::Color(Arc::new(Color::from_rgba(
            Number(r),
            Number(g),
            Number(b),
            Number(a),
        )))
    }

    #[test]
    fn computed_colors_prefer_names_then_hex() {
        assert_eq!(render(&rgba(255.0, 0.0, 0.0, 1.0), OutputStyle::Expanded), "red");
        assert_eq!(render(&rgba(17.0, 34.0, 51.0, 1.0), OutputStyle::Expanded), "#123");
        assert_eq!(render(&rgba(18.0, 34.0, 51.0, 1.0), OutputStyle::Expanded), "#122233");
        assert_eq!(render(&rgba(0.0, 0.0, 0.0, 0.0), OutputStyle::Expanded), "transparent");
    }

    #[test]
    fn translucent_colors_use_rgba() {
        assert_eq!(
            render(&rgba(10.0, 20.0, 30.0, 0.333), OutputStyle::Expanded),
            "rgba(10, 20, 30, 0.33)"
        );
        assert_eq!(
            render(&rgba(10.0, 20.0, 30.0, 0.5), OutputStyle::Compressed),
            "rgba(10,20,30,0.5)"
        );
    }

    #[test]
    fn compressed_colors_pick_shortest() {
        assert_eq!(render(&rgba(255.0, 0.0, 0.0, 1.0), OutputStyle::Compressed), "red");
        assert_eq!(render(&rgba(0.0, 0.0, 255.0, 1.0), OutputStyle::Compressed), "blue");
        assert_eq!(render(&rgba(0.0, 255.0, 255.0, 1.0), OutputStyle::Compressed), "aqua");
        assert_eq!(render(&rgba(255.0, 255.0, 0.0, 1.0), OutputStyle::Compressed), "#ff0");
    }

    #[test]
    fn compound_units_are_not_css() {
        let number = Value::Dimension(SassNumber::new(1.0, vec![Unit::Px], vec![Unit::Em]));
        let options = Options::default();
        assert!(serialize_value(&number, &options, span()).is_err());
        assert_eq!(inspect_value(&number, &options, span()).unwrap(), "1px/em");
    }

    #[test]
    fn compressed_zero_lengths_drop_units() {
        let zero = Value::Dimension(SassNumber::new_with_unit(0.0, Unit::Px));
        assert_eq!(render(&zero, OutputStyle::Compressed), "0");
        let zero_deg = Value::Dimension(SassNumber::new_with_unit(0.0, Unit::Deg));
        assert_eq!(render(&zero_deg, OutputStyle::Compressed), "0deg");
    }

    #[test]
    fn quotes_are_escaped() {
        let string = Value::String("it's".to_owned(), QuoteKind::Single);
        assert_eq!(render(&string, OutputStyle::Expanded), "'it\\'s'");
    }
}
