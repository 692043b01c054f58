//! The descriptor dispatcher.
//!
//! [`color`] inspects one descriptor, an object-like [`Fields`] bag or a
//! string, and routes it to the matching model constructor:
//!
//! - objects: by which complete field set is present (see [`Fields::model`])
//! - strings: named color, then `#` hex, then the `rgb`, `hsl`, `hwb`,
//!   `lab`, `lch` function prefixes, then `color(xyz-d65 …)`, in that order
//!
//! Anything unrecognized yields `Ok(None)`. Only malformed input that *was*
//! recognized (`#12`, `rgb(abc)`) produces a [`ParseError`].

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::descriptor::{Fields, Input};
use crate::error::ParseError;
use crate::lab::{Lab, Lch};
use crate::named::{is_named, parse_named};
use crate::srgb::{Hsl, Hwb, Srgb};
use crate::util::{
    extract_color_space_groups, extract_fn_comma_groups, extract_fn_whitespace_groups,
    extract_groups, hex_to_octet, round, Component, HEX_RE, HEX_RE_S,
};
use crate::xyz::Xyz;

/// Anything [`color`] can classify.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor<'a> {
    /// Loose fields, classified by presence.
    Object(Fields),
    /// An already-typed input.
    Typed(Input),
    /// A color string.
    Text(&'a str),
    /// A value of a shape no model accepts (a JSON number, array, ...).
    Unsupported,
}

impl<'a> From<&'a str> for Descriptor<'a> {
    fn from(text: &'a str) -> Self {
        Descriptor::Text(text)
    }
}

impl<'a> From<&'a String> for Descriptor<'a> {
    fn from(text: &'a String) -> Self {
        Descriptor::Text(text)
    }
}

impl From<Fields> for Descriptor<'_> {
    fn from(fields: Fields) -> Self {
        Descriptor::Object(fields)
    }
}

impl From<Input> for Descriptor<'_> {
    fn from(input: Input) -> Self {
        Descriptor::Typed(input)
    }
}

/// JSON objects become [`Descriptor::Object`], strings [`Descriptor::Text`];
/// everything else is [`Descriptor::Unsupported`].
impl<'a> From<&'a serde_json::Value> for Descriptor<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Descriptor::Text(text),
            other => Fields::from_json(other).map_or(Descriptor::Unsupported, Descriptor::Object),
        }
    }
}

/// Which value type a [`ColorValue`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Srgb,
    Xyz,
    Lab,
    Lch,
}

impl Space {
    pub fn name(self) -> &'static str {
        match self {
            Space::Srgb => "srgb",
            Space::Xyz => "xyz",
            Space::Lab => "lab",
            Space::Lch => "lch",
        }
    }
}

/// A parsed color in whichever model its descriptor named.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    Srgb(Srgb),
    Xyz(Xyz),
    Lab(Lab),
    Lch(Lch),
}

impl From<Srgb> for ColorValue {
    fn from(c: Srgb) -> Self {
        ColorValue::Srgb(c)
    }
}

impl From<Xyz> for ColorValue {
    fn from(c: Xyz) -> Self {
        ColorValue::Xyz(c)
    }
}

impl From<Lab> for ColorValue {
    fn from(c: Lab) -> Self {
        ColorValue::Lab(c)
    }
}

impl From<Lch> for ColorValue {
    fn from(c: Lch) -> Self {
        ColorValue::Lch(c)
    }
}

impl From<Input> for ColorValue {
    fn from(input: Input) -> Self {
        match input {
            Input::Rgb(i) => Srgb::rgb(i).into(),
            Input::Hsl(i) => Srgb::hsl(i).into(),
            Input::Hwb(i) => Srgb::hwb(i).into(),
            Input::Xyz(i) => Xyz::new(i).into(),
            Input::Lab(i) => Lab::new(i).into(),
            Input::Lch(i) => Lch::new(i).into(),
        }
    }
}

impl ColorValue {
    pub fn space(&self) -> Space {
        match self {
            ColorValue::Srgb(_) => Space::Srgb,
            ColorValue::Xyz(_) => Space::Xyz,
            ColorValue::Lab(_) => Space::Lab,
            ColorValue::Lch(_) => Space::Lch,
        }
    }

    pub fn alpha(&self) -> f64 {
        match self {
            ColorValue::Srgb(c) => c.alpha(),
            ColorValue::Xyz(c) => c.alpha(),
            ColorValue::Lab(c) => c.alpha(),
            ColorValue::Lch(c) => c.alpha(),
        }
    }

    pub fn to_srgb(&self) -> Srgb {
        match self {
            ColorValue::Srgb(c) => *c,
            ColorValue::Xyz(c) => c.to_srgb(),
            ColorValue::Lab(c) => c.to_srgb(),
            ColorValue::Lch(c) => c.to_srgb(),
        }
    }

    pub fn to_hsl(&self) -> Hsl {
        self.to_srgb().to_hsl()
    }

    pub fn to_hwb(&self) -> Hwb {
        self.to_srgb().to_hwb()
    }

    pub fn to_xyz(&self) -> Xyz {
        match self {
            ColorValue::Srgb(c) => c.to_xyz(),
            ColorValue::Xyz(c) => *c,
            ColorValue::Lab(c) => c.to_xyz(),
            ColorValue::Lch(c) => c.to_xyz(),
        }
    }

    pub fn to_lab(&self) -> Lab {
        match self {
            ColorValue::Srgb(c) => c.to_lab(),
            ColorValue::Xyz(c) => c.to_lab(),
            ColorValue::Lab(c) => *c,
            ColorValue::Lch(c) => c.to_lab(),
        }
    }

    pub fn to_lch(&self) -> Lch {
        match self {
            ColorValue::Srgb(c) => c.to_lch(),
            ColorValue::Xyz(c) => c.to_lch(),
            ColorValue::Lab(c) => c.to_lch(),
            ColorValue::Lch(c) => *c,
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Srgb(c) => fmt::Display::fmt(c, f),
            ColorValue::Xyz(c) => fmt::Display::fmt(c, f),
            ColorValue::Lab(c) => fmt::Display::fmt(c, f),
            ColorValue::Lch(c) => fmt::Display::fmt(c, f),
        }
    }
}

/// Parses a color string; unrecognized strings are [`ParseError::Unrecognized`].
impl FromStr for ColorValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        color(s)?.ok_or_else(|| ParseError::Unrecognized(s.to_string()))
    }
}

/// Parses one color descriptor.
///
/// Returns `Ok(None)` for descriptors no model recognizes and `Err` for
/// recognized but malformed strings.
///
/// ```
/// use chroma_core::{color, Fields};
///
/// let a = color("rgb(255, 0, 0)").unwrap().unwrap();
/// let b = color("#ff0000").unwrap().unwrap();
/// let c = color(Fields { red: Some(255.0), green: Some(0.0), blue: Some(0.0), ..Fields::default() })
///     .unwrap()
///     .unwrap();
/// assert_eq!(a, b);
/// assert_eq!(b, c);
/// assert!(color("not-a-color").unwrap().is_none());
/// ```
pub fn color<'a>(descriptor: impl Into<Descriptor<'a>>) -> Result<Option<ColorValue>, ParseError> {
    match descriptor.into() {
        Descriptor::Object(fields) => {
            let input = fields.into_input();
            match &input {
                Some(input) => debug!(model = ?input.model(), "classified object descriptor"),
                None => trace!(?fields, "object descriptor matched no model"),
            }
            Ok(input.map(ColorValue::from))
        }
        Descriptor::Typed(input) => Ok(Some(input.into())),
        Descriptor::Text(text) => parse_text(text),
        Descriptor::Unsupported => Ok(None),
    }
}

type ComponentParser = fn(&[Component]) -> Result<ColorValue, ParseError>;

/// Function prefixes in dispatch order.
const FUNCTIONS: [(&str, ComponentParser); 5] = [
    ("rgb", |c| Srgb::rgb_components(c).map(ColorValue::Srgb)),
    ("hsl", |c| Srgb::hsl_components(c).map(ColorValue::Srgb)),
    ("hwb", |c| Srgb::hwb_components(c).map(ColorValue::Srgb)),
    ("lab", |c| Lab::lab_components(c).map(ColorValue::Lab)),
    ("lch", |c| Lch::lch_components(c).map(ColorValue::Lch)),
];

fn parse_text(raw: &str) -> Result<Option<ColorValue>, ParseError> {
    let text = raw.trim().to_lowercase();

    if is_named(&text) {
        let (red, green, blue, hue, saturation, lightness, alpha) = parse_named(&text)?;
        debug!(name = %text, "matched named color");
        let hsl = Hsl {
            hue,
            saturation,
            lightness,
        };
        return Ok(Some(Srgb::with_hsl(red, green, blue, hsl, alpha).into()));
    }

    if text.starts_with('#') {
        let pattern = if text.len() > 5 { &*HEX_RE } else { &*HEX_RE_S };
        let mut rgba = extract_groups(pattern, &text)?
            .into_iter()
            .map(|group| hex_to_octet(group).map(f64::from))
            .collect::<Result<Vec<f64>, ParseError>>()?;
        if let Some(alpha) = rgba.get_mut(3) {
            *alpha = round(*alpha / 255.0, 7);
        }
        debug!(hex = %text, "matched hex color");
        return Srgb::rgb_array(&rgba).map(|c| Some(c.into()));
    }

    for (name, build) in FUNCTIONS {
        if text.starts_with(name) {
            let components = if text.contains(',') {
                extract_fn_comma_groups(name, &text)?
            } else {
                extract_fn_whitespace_groups(name, &text)?
            };
            debug!(function = name, components = components.len(), "matched color function");
            return build(&components).map(Some);
        }
    }

    if text.starts_with("color(") {
        for space in ["xyz-d65", "xyz"] {
            if let Some(components) = extract_color_space_groups(space, &text)? {
                debug!(space, "matched color() function");
                return Xyz::xyz_components(&components).map(|c| Some(c.into()));
            }
        }
        trace!(input = raw, "color() names an unsupported space");
        return Ok(None);
    }

    trace!(input = raw, "no color format matched");
    Ok(None)
}
