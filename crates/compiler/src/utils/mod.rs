use phf::phf_set;

/// Functions that CSS itself defines, which are passed through silently when
/// no function of the same name is registered
static PLAIN_CSS_FUNCTIONS: phf::Set<&'static str> = phf_set! {
    // values
    "url", "calc", "var", "attr", "env", "counter", "counters", "format", "local",
    "min", "max", "clamp", "minmax", "repeat", "fit-content", "symbols", "expression",
    "element", "image", "image-set", "cross-fade", "selector", "supports", "alpha",
    // colors
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "color",
    // gradients
    "linear-gradient", "radial-gradient", "conic-gradient",
    "repeating-linear-gradient", "repeating-radial-gradient", "repeating-conic-gradient",
    "gradient", "color-stop", "from", "to",
    // transforms
    "matrix", "matrix3d", "perspective",
    "translate", "translatex", "translatey", "translatez", "translate3d",
    "rotate", "rotatex", "rotatey", "rotatez", "rotate3d",
    "scale", "scalex", "scaley", "scalez", "scale3d",
    "skew", "skewx", "skewy",
    // filters
    "blur", "brightness", "contrast", "drop-shadow", "grayscale", "hue-rotate",
    "invert", "opacity", "saturate", "sepia",
    // timing functions
    "cubic-bezier", "steps",
    // selectors
    "not", "is", "where", "has", "lang", "dir", "nth-child", "nth-last-child",
    "nth-of-type", "nth-last-of-type",
};

/// Whether `name` is a function defined by CSS, ignoring case and any vendor
/// prefix such as `-webkit-`
pub(crate) fn is_plain_css_function(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    let unprefixed = match name.strip_prefix('-') {
        Some(rest) => match rest.find('-') {
            Some(idx) => &rest[idx + 1..],
            None => return false,
        },
        None => name.as_str(),
    };

    PLAIN_CSS_FUNCTIONS.contains(unprefixed)
}

/// Strip one pair of matching quotes from around `s`
pub(crate) fn dequote(s: &str) -> &str {
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if s.len() >= 2 => {
            &s[1..s.len() - 1]
        }
        _ => s,
    }
}

#[cfg(test)]
mod test {
    use super::{dequote, is_plain_css_function};

    #[test]
    fn plain_css_functions() {
        assert!(is_plain_css_function("url"));
        assert!(is_plain_css_function("linear-gradient"));
        assert!(is_plain_css_function("-webkit-linear-gradient"));
        assert!(is_plain_css_function("translateX"));
        assert!(!is_plain_css_function("foo"));
        assert!(!is_plain_css_function("-compass-nth"));
    }

    #[test]
    fn dequote_strips_one_pair() {
        assert_eq!(dequote("\"a\""), "a");
        assert_eq!(dequote("'a'"), "a");
        assert_eq!(dequote("'a\""), "'a\"");
        assert_eq!(dequote("\""), "\"");
        assert_eq!(dequote("a"), "a");
    }
}
