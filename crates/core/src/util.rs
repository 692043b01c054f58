//! Low-level parsing helpers shared by every color model.
//!
//! Covers field-presence checks, decimal rounding, hex octets, regex group
//! extraction, and the two functional-notation grammars:
//!
//! - comma form: `name(a, b, c)` / `name(a, b, c, alpha)`
//! - whitespace form: `name(a b c)` / `name(a b c / alpha)`
//!
//! Functional notations are tokenized into unit-tagged [`Component`]s. What a
//! percentage means depends on the channel, so each model resolves its own
//! components into canonical numbers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

/// Long hex form: `#RRGGBB` with optional `AA`.
pub static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$")
        .expect("valid regex")
});

/// Shorthand hex form: `#RGB` with optional `A`.
pub static HEX_RE_S: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F])([0-9a-fA-F])([0-9a-fA-F])([0-9a-fA-F])?$").expect("valid regex")
});

/// Outer shape of a functional notation: `name( body )`.
static FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-zA-Z]+)\s*\(\s*(.*?)\s*\)\s*$").expect("valid regex")
});

/// Returns true iff every value is present.
pub fn defined(values: &[Option<f64>]) -> bool {
    values.iter().all(Option::is_some)
}

/// Most decimal digits [`round`] will resolve; `f64` holds about 15.
pub const MAX_PRECISION: u32 = 15;

/// Rounds `value` to `precision` decimal digits, halves away from zero.
///
/// Precisions above [`MAX_PRECISION`] return `value` unchanged.
pub fn round(value: f64, precision: u32) -> f64 {
    if precision > MAX_PRECISION {
        return value;
    }
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Parses one or two hex digits into an octet.
///
/// A single digit is doubled, so `"f"` reads as `0xff`; this is how `#RGB`
/// shorthand expands.
pub fn hex_to_octet(hex: &str) -> Result<u8, ParseError> {
    if hex.is_empty() || hex.len() > 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHex(hex.to_string()));
    }
    let value =
        u8::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidHex(hex.to_string()))?;
    Ok(if hex.len() == 1 { value * 17 } else { value })
}

/// Applies `pattern` to `input` and returns the participating capture groups
/// in order. Optional groups that did not match are skipped.
pub fn extract_groups<'a>(pattern: &Regex, input: &'a str) -> Result<Vec<&'a str>, ParseError> {
    let caps = pattern
        .captures(input)
        .ok_or_else(|| ParseError::NoMatch {
            pattern: pattern.as_str().to_string(),
            input: input.to_string(),
        })?;
    Ok(caps.iter().skip(1).flatten().map(|m| m.as_str()).collect())
}

/// A numeric token from a functional notation, tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    /// A bare number.
    Number(f64),
    /// A number with a `%` suffix, stored as written (`50%` is `50.0`).
    Percentage(f64),
    /// An angle, converted to degrees.
    Angle(f64),
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Number(v) => write!(f, "{v}"),
            Component::Percentage(v) => write!(f, "{v}%"),
            Component::Angle(v) => write!(f, "{v}deg"),
        }
    }
}

impl Component {
    /// Parses one token such as `255`, `50%`, `120deg` or `0.5turn`.
    pub fn parse(token: &str) -> Result<Component, ParseError> {
        let token = token.trim();
        if let Some(number) = token.strip_suffix('%') {
            return parse_number(number, token).map(Component::Percentage);
        }
        // "grad" must be tried before "rad".
        let angle_units: [(&str, f64); 4] = [
            ("deg", 1.0),
            ("grad", 0.9),
            ("rad", 180.0 / std::f64::consts::PI),
            ("turn", 360.0),
        ];
        for (suffix, to_degrees) in angle_units {
            if let Some(number) = token.strip_suffix(suffix) {
                return parse_number(number, token).map(|v| Component::Angle(v * to_degrees));
            }
        }
        parse_number(token, token).map(Component::Number)
    }

    /// Resolves a hue slot: bare numbers and angles are degrees.
    pub fn to_hue(self) -> Result<f64, ParseError> {
        match self {
            Component::Number(v) | Component::Angle(v) => Ok(v),
            Component::Percentage(_) => Err(self.unexpected("hue")),
        }
    }

    /// Resolves an alpha slot: numbers are fractions, percentages are /100.
    pub fn to_alpha(self) -> Result<f64, ParseError> {
        match self {
            Component::Number(v) => Ok(v),
            Component::Percentage(p) => Ok(p / 100.0),
            Component::Angle(_) => Err(self.unexpected("alpha")),
        }
    }

    /// Resolves a non-hue channel. `100%` maps to `percent_ref`; a bare
    /// number is multiplied by `number_scale`.
    pub fn to_scaled(
        self,
        channel: &str,
        percent_ref: f64,
        number_scale: f64,
    ) -> Result<f64, ParseError> {
        match self {
            Component::Number(v) => Ok(v * number_scale),
            Component::Percentage(p) => Ok(p / 100.0 * percent_ref),
            Component::Angle(_) => Err(self.unexpected(channel)),
        }
    }

    fn unexpected(self, channel: &str) -> ParseError {
        ParseError::UnexpectedUnit {
            channel: channel.to_string(),
            token: self.to_string(),
        }
    }
}

fn parse_number(number: &str, token: &str) -> Result<f64, ParseError> {
    let value: f64 = number
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::InvalidNumber(token.to_string()));
    }
    Ok(value)
}

/// Matches `name(body)` and returns the trimmed body.
///
/// `rgb` and `hsl` also accept their legacy `rgba`/`hsla` spellings.
fn function_body<'a>(name: &str, input: &'a str) -> Result<&'a str, ParseError> {
    let caps = FN_RE
        .captures(input)
        .ok_or_else(|| ParseError::Malformed(input.to_string()))?;
    let (Some(found), Some(body)) = (caps.get(1), caps.get(2)) else {
        return Err(ParseError::Malformed(input.to_string()));
    };
    let found = found.as_str();
    let legacy = matches!(name, "rgb" | "hsl")
        && found.len() == name.len() + 1
        && found[..name.len()].eq_ignore_ascii_case(name)
        && found.ends_with(['a', 'A']);
    if !found.eq_ignore_ascii_case(name) && !legacy {
        return Err(ParseError::UnknownFunction {
            expected: name.to_string(),
            input: input.to_string(),
        });
    }
    Ok(body.as_str())
}

/// Parses `name(a, b, c)` or `name(a, b, c, alpha)` into components.
pub fn extract_fn_comma_groups(name: &str, input: &str) -> Result<Vec<Component>, ParseError> {
    let body = function_body(name, input)?;
    let tokens: Vec<&str> = body.split(',').map(str::trim).collect();
    if !(3..=4).contains(&tokens.len()) {
        return Err(ParseError::Arity {
            expected: "3 or 4".into(),
            got: tokens.len(),
        });
    }
    if tokens
        .iter()
        .any(|t| t.is_empty() || t.contains(char::is_whitespace) || t.contains('/'))
    {
        return Err(ParseError::Malformed(input.to_string()));
    }
    tokens.into_iter().map(Component::parse).collect()
}

/// Parses `name(a b c)` or `name(a b c / alpha)` into components.
pub fn extract_fn_whitespace_groups(
    name: &str,
    input: &str,
) -> Result<Vec<Component>, ParseError> {
    let body = function_body(name, input)?;
    whitespace_components(body, input)
}

/// Parses `color(space a b c)` or `color(space a b c / alpha)` into
/// components. Returns `Ok(None)` when the string names another space.
pub fn extract_color_space_groups(
    space: &str,
    input: &str,
) -> Result<Option<Vec<Component>>, ParseError> {
    let body = function_body("color", input)?;
    let (found, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    if !found.eq_ignore_ascii_case(space) {
        return Ok(None);
    }
    whitespace_components(rest.trim_start(), input).map(Some)
}

/// Splits `a b c` or `a b c / alpha` into components.
fn whitespace_components(body: &str, input: &str) -> Result<Vec<Component>, ParseError> {
    let (channels, alpha) = match body.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (body, None),
    };
    let mut tokens: Vec<&str> = channels.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(ParseError::Arity {
            expected: "3".into(),
            got: tokens.len() + usize::from(alpha.is_some()),
        });
    }
    if let Some(alpha) = alpha {
        if alpha.is_empty() || alpha.contains(char::is_whitespace) || alpha.contains('/') {
            return Err(ParseError::Malformed(input.to_string()));
        }
        tokens.push(alpha);
    }
    tokens.into_iter().map(Component::parse).collect()
}

/// Splits a positional slice into its three channels and optional alpha.
pub(crate) fn split_channels<T: Copy>(values: &[T]) -> Result<([T; 3], Option<T>), ParseError> {
    match *values {
        [c1, c2, c3] => Ok(([c1, c2, c3], None)),
        [c1, c2, c3, alpha] => Ok(([c1, c2, c3], Some(alpha))),
        _ => Err(ParseError::Arity {
            expected: "3 or 4".into(),
            got: values.len(),
        }),
    }
}

/// Clamps alpha into [0, 1]; absent means opaque. NaN reads as opaque.
pub(crate) fn normalize_alpha(alpha: Option<f64>) -> f64 {
    match alpha {
        Some(a) if !a.is_nan() => a.clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// Normalizes a hue in degrees into [0, 360).
pub(crate) fn normalize_hue(hue: f64) -> f64 {
    let h = hue.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Formats a channel for CSS-like output, rounded to `precision` digits.
pub(crate) fn fmt_number(value: f64, precision: u32) -> String {
    let v = round(value, precision);
    // Avoid printing "-0".
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- defined / round --

    #[test]
    fn defined_requires_every_value() {
        assert!(defined(&[Some(1.0), Some(0.0), Some(-3.0)]));
        assert!(!defined(&[Some(1.0), None, Some(2.0)]));
        assert!(defined(&[]));
    }

    #[test]
    fn round_to_precision() {
        assert_eq!(round(0.123456789, 3), 0.123);
        assert_eq!(round(128.0 / 255.0, 7), 0.5019608);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -3.0);
    }

    #[test]
    fn round_past_f64_digits_is_identity() {
        assert_eq!(round(1.5, MAX_PRECISION + 1), 1.5);
        assert_eq!(round(0.0, 400), 0.0);
        assert_eq!(round(1.234, 3_000_000_000), 1.234);
        assert_eq!(round(0.1, MAX_PRECISION), 0.1);
        assert_eq!(fmt_number(2.5, u32::MAX), "2.5");
    }

    // -- hex --

    #[test]
    fn hex_to_octet_parses_pairs() {
        assert_eq!(hex_to_octet("ff").unwrap(), 255);
        assert_eq!(hex_to_octet("00").unwrap(), 0);
        assert_eq!(hex_to_octet("80").unwrap(), 128);
        assert_eq!(hex_to_octet("Ab").unwrap(), 0xab);
    }

    #[test]
    fn hex_to_octet_doubles_single_digit() {
        assert_eq!(hex_to_octet("f").unwrap(), 255);
        assert_eq!(hex_to_octet("8").unwrap(), 0x88);
    }

    #[test]
    fn hex_to_octet_rejects_non_hex() {
        assert!(matches!(hex_to_octet("g0"), Err(ParseError::InvalidHex(_))));
        assert!(matches!(hex_to_octet("+f"), Err(ParseError::InvalidHex(_))));
        assert!(matches!(hex_to_octet(""), Err(ParseError::InvalidHex(_))));
        assert!(matches!(hex_to_octet("fff"), Err(ParseError::InvalidHex(_))));
    }

    #[test]
    fn extract_groups_long_hex() {
        assert_eq!(
            extract_groups(&HEX_RE, "#c0ffee").unwrap(),
            vec!["c0", "ff", "ee"]
        );
        assert_eq!(
            extract_groups(&HEX_RE, "#C0FFEE80").unwrap(),
            vec!["C0", "FF", "EE", "80"]
        );
    }

    #[test]
    fn extract_groups_short_hex() {
        assert_eq!(extract_groups(&HEX_RE_S, "#abc").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(
            extract_groups(&HEX_RE_S, "#abcd").unwrap(),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn extract_groups_reports_no_match() {
        assert!(matches!(
            extract_groups(&HEX_RE, "#c0ffe"),
            Err(ParseError::NoMatch { .. })
        ));
        assert!(matches!(
            extract_groups(&HEX_RE_S, "#xyz"),
            Err(ParseError::NoMatch { .. })
        ));
    }

    // -- components --

    #[test]
    fn component_parses_units() {
        assert_eq!(Component::parse("255").unwrap(), Component::Number(255.0));
        assert_eq!(Component::parse("50%").unwrap(), Component::Percentage(50.0));
        assert_eq!(Component::parse("120deg").unwrap(), Component::Angle(120.0));
        assert_eq!(Component::parse("0.5turn").unwrap(), Component::Angle(180.0));
        assert_eq!(Component::parse("100grad").unwrap(), Component::Angle(90.0));
        let Component::Angle(deg) = Component::parse("3.14159265rad").unwrap() else {
            panic!("expected angle");
        };
        assert!((deg - 180.0).abs() < 1e-5);
    }

    #[test]
    fn component_rejects_garbage() {
        assert!(matches!(
            Component::parse("abc"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            Component::parse("%"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            Component::parse("inf"),
            Err(ParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            Component::parse("NaN"),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn component_resolution_by_slot() {
        assert_eq!(Component::Percentage(50.0).to_alpha().unwrap(), 0.5);
        assert_eq!(Component::Number(0.25).to_alpha().unwrap(), 0.25);
        assert_eq!(
            Component::Percentage(100.0)
                .to_scaled("red", 255.0, 1.0)
                .unwrap(),
            255.0
        );
        assert_eq!(
            Component::Number(40.0)
                .to_scaled("saturation", 1.0, 0.01)
                .unwrap(),
            0.4
        );
        assert!(Component::Percentage(10.0).to_hue().is_err());
        assert!(Component::Angle(10.0).to_alpha().is_err());
        assert!(Component::Angle(10.0).to_scaled("red", 255.0, 1.0).is_err());
    }

    // -- functional notation --

    #[test]
    fn comma_groups_three_and_four() {
        assert_eq!(
            extract_fn_comma_groups("rgb", "rgb(255, 0, 10%)").unwrap(),
            vec![
                Component::Number(255.0),
                Component::Number(0.0),
                Component::Percentage(10.0)
            ]
        );
        assert_eq!(
            extract_fn_comma_groups("rgb", "rgba(1,2,3,0.5)").unwrap().len(),
            4
        );
    }

    #[test]
    fn whitespace_groups_with_slash_alpha() {
        assert_eq!(
            extract_fn_whitespace_groups("hsl", "hsl(120deg 50% 25% / 40%)").unwrap(),
            vec![
                Component::Angle(120.0),
                Component::Percentage(50.0),
                Component::Percentage(25.0),
                Component::Percentage(40.0)
            ]
        );
        assert_eq!(
            extract_fn_whitespace_groups("lab", "lab(  50   20 -30  )")
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn wrong_function_name_is_rejected() {
        assert!(matches!(
            extract_fn_whitespace_groups("rgb", "hsl(1 2 3)"),
            Err(ParseError::UnknownFunction { .. })
        ));
        assert!(matches!(
            extract_fn_whitespace_groups("lab", "laba(1 2 3)"),
            Err(ParseError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(matches!(
            extract_fn_comma_groups("rgb", "rgb(1, 2)"),
            Err(ParseError::Arity { got: 2, .. })
        ));
        assert!(matches!(
            extract_fn_comma_groups("rgb", "rgb(1, 2, 3, 4, 5)"),
            Err(ParseError::Arity { got: 5, .. })
        ));
        assert!(matches!(
            extract_fn_whitespace_groups("rgb", "rgb(1 2 3 4)"),
            Err(ParseError::Arity { got: 4, .. })
        ));
    }

    #[test]
    fn malformed_notation_is_rejected() {
        assert!(matches!(
            extract_fn_whitespace_groups("rgb", "rgb(1 2 3"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            extract_fn_whitespace_groups("rgb", "rgb(1 2 3 / 4 / 5)"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            extract_fn_comma_groups("rgb", "rgb(1 2, 3, 4)"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            extract_fn_whitespace_groups("rgb", "rgb(1 2 3 /)"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn color_space_groups() {
        assert_eq!(
            extract_color_space_groups("xyz-d65", "color(xyz-d65 0.5 1 50% / 0.25)").unwrap(),
            Some(vec![
                Component::Number(0.5),
                Component::Number(1.0),
                Component::Percentage(50.0),
                Component::Number(0.25)
            ])
        );
        assert_eq!(
            extract_color_space_groups("xyz-d65", "color(srgb 1 0 0)").unwrap(),
            None
        );
        assert!(matches!(
            extract_color_space_groups("xyz-d65", "color(xyz-d65)"),
            Err(ParseError::Arity { got: 0, .. })
        ));
        assert!(matches!(
            extract_color_space_groups("xyz-d65", "colour(xyz-d65 1 1 1)"),
            Err(ParseError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn unparsable_token_is_rejected() {
        assert!(matches!(
            extract_fn_comma_groups("rgb", "rgb(abc, 0, 0)"),
            Err(ParseError::InvalidNumber(_))
        ));
    }

    // -- helpers --

    #[test]
    fn split_channels_accepts_three_or_four() {
        assert_eq!(split_channels(&[1, 2, 3]).unwrap(), ([1, 2, 3], None));
        assert_eq!(split_channels(&[1, 2, 3, 4]).unwrap(), ([1, 2, 3], Some(4)));
        assert!(split_channels(&[1, 2]).is_err());
        assert!(split_channels::<i32>(&[]).is_err());
    }

    #[test]
    fn normalize_alpha_defaults_and_clamps() {
        assert_eq!(normalize_alpha(None), 1.0);
        assert_eq!(normalize_alpha(Some(1.5)), 1.0);
        assert_eq!(normalize_alpha(Some(-0.5)), 0.0);
        assert_eq!(normalize_alpha(Some(f64::NAN)), 1.0);
        assert_eq!(normalize_alpha(Some(0.25)), 0.25);
    }

    #[test]
    fn normalize_hue_wraps() {
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(-90.0), 270.0);
        assert_eq!(normalize_hue(725.0), 5.0);
        assert!(normalize_hue(-1e-20) < 360.0);
    }

    #[test]
    fn fmt_number_trims_and_avoids_negative_zero() {
        assert_eq!(fmt_number(255.0, 3), "255");
        assert_eq!(fmt_number(0.50000001, 3), "0.5");
        assert_eq!(fmt_number(-0.0001, 3), "0");
    }
}
