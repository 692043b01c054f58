//! CIE Lab and its polar form LCH.
//!
//! Lightness is in [0, 100]; `a` and `b` are unbounded (sRGB colors fall
//! roughly within ±128). LCH reparametrizes the a/b plane as chroma and hue:
//! `a = chroma·cos(hue)`, `b = chroma·sin(hue)`.
//!
//! Constructors clamp lightness into [0, 100], chroma to ≥ 0, and wrap hue
//! into [0, 360). Conversion results are not clamped, except on the way into
//! sRGB.

use std::fmt;

use serde::Serialize;

use crate::descriptor::{LabInput, LchInput, XyzInput};
use crate::error::ParseError;
use crate::srgb::{with_alpha, Srgb};
use crate::util::{fmt_number, normalize_alpha, normalize_hue, split_channels, Component};
use crate::xyz::{Xyz, D65_WHITE};

/// 6/29: the cube-root threshold in `f` space.
const DELTA: f64 = 6.0 / 29.0;

/// Below this chroma the hue is meaningless and reported as 0. The sRGB
/// matrix carries 7 decimals, so sRGB grays land near 1e-5, not at 0.
const ACHROMATIC: f64 = 1e-4;

fn clamp_lightness(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// An immutable CIE Lab color (D65).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lab {
    lightness: f64,
    a: f64,
    b: f64,
    alpha: f64,
}

/// An immutable CIE LCH color (D65), hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lch {
    lightness: f64,
    chroma: f64,
    hue: f64,
    alpha: f64,
}

impl Lab {
    pub fn new(input: LabInput) -> Lab {
        Lab {
            lightness: clamp_lightness(input.lightness),
            a: input.a,
            b: input.b,
            alpha: normalize_alpha(input.alpha),
        }
    }

    /// Builds a Lab color from `[lightness, a, b, alpha?]`.
    pub fn lab_array(values: &[f64]) -> Result<Lab, ParseError> {
        let ([lightness, a, b], alpha) = split_channels(values)?;
        Ok(Lab::new(LabInput {
            lightness,
            a,
            b,
            alpha,
        }))
    }

    /// Resolves `lab()` components: `100%` is L = 100 and a/b = ±125.
    pub fn lab_components(components: &[Component]) -> Result<Lab, ParseError> {
        let ([l, a, b], alpha) = split_channels(components)?;
        let mut values = vec![
            l.to_scaled("lightness", 100.0, 1.0)?,
            a.to_scaled("a", 125.0, 1.0)?,
            b.to_scaled("b", 125.0, 1.0)?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Lab::lab_array(&values)
    }

    pub(crate) fn from_raw(lightness: f64, a: f64, b: f64, alpha: f64) -> Lab {
        Lab {
            lightness,
            a,
            b,
            alpha,
        }
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Converts to LCH.
    ///
    /// If chroma is below 1e-4 the hue is 0.0, so grays never carry a hue
    /// from rounding noise or an indeterminate `atan2(0, 0)`.
    pub fn to_lch(&self) -> Lch {
        let chroma = self.a.hypot(self.b);
        let hue = if chroma < ACHROMATIC {
            0.0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Lch {
            lightness: self.lightness,
            chroma,
            hue,
            alpha: self.alpha,
        }
    }

    /// Converts to XYZ against the D65 white.
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.lightness + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;
        let [xn, yn, zn] = D65_WHITE;
        Xyz::new(XyzInput {
            x: xn * lab_f_inv(fx),
            y: yn * lab_f_inv(fy),
            z: zn * lab_f_inv(fz),
            alpha: Some(self.alpha),
        })
    }

    /// Converts to sRGB via XYZ, clamping to the gamut.
    pub fn to_srgb(&self) -> Srgb {
        self.to_xyz().to_srgb()
    }
}

impl Lch {
    pub fn new(input: LchInput) -> Lch {
        Lch {
            lightness: clamp_lightness(input.lightness),
            chroma: if input.chroma.is_nan() {
                0.0
            } else {
                input.chroma.max(0.0)
            },
            hue: normalize_hue(input.hue),
            alpha: normalize_alpha(input.alpha),
        }
    }

    /// Builds an LCH color from `[lightness, chroma, hue, alpha?]`.
    pub fn lch_array(values: &[f64]) -> Result<Lch, ParseError> {
        let ([lightness, chroma, hue], alpha) = split_channels(values)?;
        Ok(Lch::new(LchInput {
            lightness,
            chroma,
            hue,
            alpha,
        }))
    }

    /// Resolves `lch()` components: `100%` is L = 100 and chroma = 150.
    pub fn lch_components(components: &[Component]) -> Result<Lch, ParseError> {
        let ([l, c, h], alpha) = split_channels(components)?;
        let mut values = vec![
            l.to_scaled("lightness", 100.0, 1.0)?,
            c.to_scaled("chroma", 150.0, 1.0)?,
            h.to_hue()?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Lch::lch_array(&values)
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Converts to Lab.
    pub fn to_lab(&self) -> Lab {
        let h_rad = self.hue.to_radians();
        Lab {
            lightness: self.lightness,
            a: self.chroma * h_rad.cos(),
            b: self.chroma * h_rad.sin(),
            alpha: self.alpha,
        }
    }

    pub fn to_xyz(&self) -> Xyz {
        self.to_lab().to_xyz()
    }

    pub fn to_srgb(&self) -> Srgb {
        self.to_lab().to_srgb()
    }
}

/// Formats as `lab(l a b)`, optionally with `/ alpha`.
impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3) as u32;
        let body = format!(
            "{} {} {}",
            fmt_number(self.lightness, precision),
            fmt_number(self.a, precision),
            fmt_number(self.b, precision)
        );
        f.write_str(&with_alpha("lab", &body, self.alpha, precision))
    }
}

/// Formats as `lch(l c h)`, optionally with `/ alpha`.
impl fmt::Display for Lch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3) as u32;
        let body = format!(
            "{} {} {}",
            fmt_number(self.lightness, precision),
            fmt_number(self.chroma, precision),
            fmt_number(self.hue, precision)
        );
        f.write_str(&with_alpha("lch", &body, self.alpha, precision))
    }
}
