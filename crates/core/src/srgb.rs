//! The sRGB color value and its cylindrical views (HSL, HWB).
//!
//! Channels are stored as `f64` in [0, 255]; alpha in [0, 1]. Out-of-range
//! inputs are clamped rather than rejected, so `rgb(999, 0, 0)` is pure red.
//! HSL and HWB are not separate color values: they construct an [`Srgb`] and
//! are reported back through [`Srgb::to_hsl`] / [`Srgb::to_hwb`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::color;
use crate::descriptor::{HslInput, HwbInput, RgbInput};
use crate::error::ParseError;
use crate::lab::{Lab, Lch};
use crate::util::{fmt_number, normalize_alpha, normalize_hue, split_channels, Component};
use crate::xyz::Xyz;

/// HSL coordinates: hue in degrees [0, 360), saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// HWB coordinates: hue in degrees [0, 360), whiteness and blackness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hwb {
    pub hue: f64,
    pub whiteness: f64,
    pub blackness: f64,
}

/// An immutable sRGB color.
///
/// Colors built from HSL (or from a named color) remember their HSL
/// coordinates so [`Srgb::to_hsl`] gives them back exactly. Equality ignores
/// that cache and compares channels and alpha only.
#[derive(Debug, Clone, Copy)]
pub struct Srgb {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
    hsl: Option<Hsl>,
}

impl PartialEq for Srgb {
    fn eq(&self, other: &Self) -> bool {
        self.red == other.red
            && self.green == other.green
            && self.blue == other.blue
            && self.alpha == other.alpha
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// HSL to RGB fractions, hue in degrees.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    fn hue_to_rgb(m1: f64, m2: f64, mut h3: f64) -> f64 {
        if h3 < 0.0 {
            h3 += 3.0;
        }
        if h3 > 3.0 {
            h3 -= 3.0;
        }
        if h3 * 2.0 < 1.0 {
            m1 + (m2 - m1) * h3 * 2.0
        } else if h3 * 2.0 < 3.0 {
            m2
        } else if h3 < 2.0 {
            m1 + (m2 - m1) * (2.0 - h3) * 2.0
        } else {
            m1
        }
    }
    let m2 = if lightness <= 0.5 {
        lightness * (saturation + 1.0)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = lightness * 2.0 - m2;
    // Hue in thirds of a turn.
    let h3 = hue / 120.0;
    [
        hue_to_rgb(m1, m2, h3 + 1.0),
        hue_to_rgb(m1, m2, h3),
        hue_to_rgb(m1, m2, h3 - 1.0),
    ]
}

/// Hue in degrees of RGB fractions given their max, min and spread.
fn rgb_hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    normalize_hue(h * 60.0)
}

/// Applies inverse sRGB gamma to one component in [0, 1].
pub(crate) fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to one linear component.
pub(crate) fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl Srgb {
    /// Builds a color from channels in [0, 255] and alpha in [0, 1], clamping both.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Srgb {
        Srgb::rgb(RgbInput {
            red,
            green,
            blue,
            alpha: Some(alpha),
        })
    }

    /// Builds a color from an RGB descriptor. Missing alpha means opaque.
    pub fn rgb(input: RgbInput) -> Srgb {
        Srgb {
            red: clamp_channel(input.red),
            green: clamp_channel(input.green),
            blue: clamp_channel(input.blue),
            alpha: normalize_alpha(input.alpha),
            hsl: None,
        }
    }

    /// Builds a color from an HSL descriptor.
    ///
    /// Hue wraps modulo 360; saturation and lightness are clamped to [0, 1].
    pub fn hsl(input: HslInput) -> Srgb {
        let hsl = Hsl {
            hue: normalize_hue(input.hue),
            saturation: clamp_unit(input.saturation),
            lightness: clamp_unit(input.lightness),
        };
        let [r, g, b] = hsl_to_rgb(hsl.hue, hsl.saturation, hsl.lightness);
        Srgb {
            red: clamp_channel(r * 255.0),
            green: clamp_channel(g * 255.0),
            blue: clamp_channel(b * 255.0),
            alpha: normalize_alpha(input.alpha),
            hsl: Some(hsl),
        }
    }

    /// Builds a color from an HWB descriptor.
    ///
    /// When whiteness and blackness add up to 1 or more they are scaled to
    /// sum to exactly 1, which yields a gray.
    pub fn hwb(input: HwbInput) -> Srgb {
        let hue = normalize_hue(input.hue);
        let mut whiteness = clamp_unit(input.whiteness);
        let mut blackness = clamp_unit(input.blackness);
        let sum = whiteness + blackness;
        if sum >= 1.0 {
            whiteness /= sum;
            blackness /= sum;
        }
        let [r, g, b] = hsl_to_rgb(hue, 1.0, 0.5);
        let scale = 1.0 - whiteness - blackness;
        let channel = |c: f64| clamp_channel((c * scale + whiteness) * 255.0);
        Srgb {
            red: channel(r),
            green: channel(g),
            blue: channel(b),
            alpha: normalize_alpha(input.alpha),
            hsl: None,
        }
    }

    /// Builds a color from `[red, green, blue, alpha?]`.
    pub fn rgb_array(values: &[f64]) -> Result<Srgb, ParseError> {
        let ([red, green, blue], alpha) = split_channels(values)?;
        Ok(Srgb::rgb(RgbInput {
            red,
            green,
            blue,
            alpha,
        }))
    }

    /// Builds a color from `[hue, saturation, lightness, alpha?]`.
    pub fn hsl_array(values: &[f64]) -> Result<Srgb, ParseError> {
        let ([hue, saturation, lightness], alpha) = split_channels(values)?;
        Ok(Srgb::hsl(HslInput {
            hue,
            saturation,
            lightness,
            alpha,
        }))
    }

    /// Builds a color from `[hue, whiteness, blackness, alpha?]`.
    pub fn hwb_array(values: &[f64]) -> Result<Srgb, ParseError> {
        let ([hue, whiteness, blackness], alpha) = split_channels(values)?;
        Ok(Srgb::hwb(HwbInput {
            hue,
            whiteness,
            blackness,
            alpha,
        }))
    }

    /// Resolves `rgb()` components: `100%` is 255.
    pub fn rgb_components(components: &[Component]) -> Result<Srgb, ParseError> {
        let ([r, g, b], alpha) = split_channels(components)?;
        let mut values = vec![
            r.to_scaled("red", 255.0, 1.0)?,
            g.to_scaled("green", 255.0, 1.0)?,
            b.to_scaled("blue", 255.0, 1.0)?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Srgb::rgb_array(&values)
    }

    /// Resolves `hsl()` components: percentages and bare numbers are both
    /// percent of full saturation/lightness.
    pub fn hsl_components(components: &[Component]) -> Result<Srgb, ParseError> {
        let ([h, s, l], alpha) = split_channels(components)?;
        let mut values = vec![
            h.to_hue()?,
            s.to_scaled("saturation", 1.0, 0.01)?,
            l.to_scaled("lightness", 1.0, 0.01)?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Srgb::hsl_array(&values)
    }

    /// Resolves `hwb()` components, same units as `hsl()`.
    pub fn hwb_components(components: &[Component]) -> Result<Srgb, ParseError> {
        let ([h, w, b], alpha) = split_channels(components)?;
        let mut values = vec![
            h.to_hue()?,
            w.to_scaled("whiteness", 1.0, 0.01)?,
            b.to_scaled("blackness", 1.0, 0.01)?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Srgb::hwb_array(&values)
    }

    /// Builds a color whose HSL form is already known.
    pub(crate) fn with_hsl(red: f64, green: f64, blue: f64, hsl: Hsl, alpha: f64) -> Srgb {
        Srgb {
            hsl: Some(hsl),
            ..Srgb::new(red, green, blue, alpha)
        }
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Channels as fractions in [0, 1].
    pub fn to_unit(&self) -> [f64; 3] {
        [self.red / 255.0, self.green / 255.0, self.blue / 255.0]
    }

    /// Gamma-decoded channels in [0, 1].
    pub fn to_linear(&self) -> [f64; 3] {
        self.to_unit().map(srgb_component_to_linear)
    }

    /// Builds a color from gamma-decoded channels, clamping to the gamut.
    pub fn from_linear(linear: [f64; 3], alpha: f64) -> Srgb {
        let [r, g, b] = linear.map(|c| linear_component_to_srgb(c) * 255.0);
        Srgb::new(r, g, b, alpha)
    }

    /// HSL coordinates; exact for colors built from HSL or a name.
    pub fn to_hsl(&self) -> Hsl {
        if let Some(hsl) = self.hsl {
            return hsl;
        }
        let [r, g, b] = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = (max + min) / 2.0;
        let saturation = if delta == 0.0 {
            0.0
        } else {
            delta / (1.0 - (2.0 * lightness - 1.0).abs())
        };
        Hsl {
            hue: rgb_hue(r, g, b, max, delta),
            saturation: clamp_unit(saturation),
            lightness,
        }
    }

    /// HWB coordinates.
    pub fn to_hwb(&self) -> Hwb {
        let [r, g, b] = self.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        Hwb {
            hue: self.hsl.map_or_else(|| rgb_hue(r, g, b, max, max - min), |h| h.hue),
            whiteness: min,
            blackness: 1.0 - max,
        }
    }

    /// CIE XYZ (D65) via linear RGB.
    pub fn to_xyz(&self) -> Xyz {
        Xyz::from_linear_rgb(self.to_linear(), self.alpha)
    }

    /// CIE Lab via XYZ.
    pub fn to_lab(&self) -> Lab {
        self.to_xyz().to_lab()
    }

    /// CIE LCH via XYZ and Lab.
    pub fn to_lch(&self) -> Lch {
        self.to_lab().to_lch()
    }

    /// Rounded 8-bit channels.
    pub fn to_octets(&self) -> [u8; 3] {
        [self.red, self.green, self.blue].map(|c| c.round() as u8)
    }

    /// Hex string `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_octets();
        if self.alpha < 1.0 {
            let a = (self.alpha * 255.0).round() as u8;
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }

    /// `hsl(h s% l%)` form, optionally with `/ alpha`.
    pub fn to_hsl_string(&self, precision: u32) -> String {
        let hsl = self.to_hsl();
        let body = format!(
            "{} {}% {}%",
            fmt_number(hsl.hue, precision),
            fmt_number(hsl.saturation * 100.0, precision),
            fmt_number(hsl.lightness * 100.0, precision)
        );
        with_alpha("hsl", &body, self.alpha, precision)
    }

    /// `hwb(h w% b%)` form, optionally with `/ alpha`.
    pub fn to_hwb_string(&self, precision: u32) -> String {
        let hwb = self.to_hwb();
        let body = format!(
            "{} {}% {}%",
            fmt_number(hwb.hue, precision),
            fmt_number(hwb.whiteness * 100.0, precision),
            fmt_number(hwb.blackness * 100.0, precision)
        );
        with_alpha("hwb", &body, self.alpha, precision)
    }
}

/// Formats `name(body)` or `name(body / alpha)`.
pub(crate) fn with_alpha(name: &str, body: &str, alpha: f64, precision: u32) -> String {
    if alpha < 1.0 {
        format!("{name}({body} / {})", fmt_number(alpha, precision))
    } else {
        format!("{name}({body})")
    }
}

/// Formats as `rgb(r g b)` / `rgb(r g b / a)`. The formatter precision
/// (`{:.1}`) sets the decimal digits, default 3.
impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3) as u32;
        let body = format!(
            "{} {} {}",
            fmt_number(self.red, precision),
            fmt_number(self.green, precision),
            fmt_number(self.blue, precision)
        );
        f.write_str(&with_alpha("rgb", &body, self.alpha, precision))
    }
}

/// Parses any recognized color string and converts it to sRGB.
impl FromStr for Srgb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        color(s)?
            .map(|value| value.to_srgb())
            .ok_or_else(|| ParseError::Unrecognized(s.to_string()))
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
