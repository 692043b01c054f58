//! CIE XYZ, the hub every sRGB ↔ Lab/LCH conversion passes through.
//!
//! Values are relative tristimulus values scaled so the D65 white point has
//! `y = 1`, i.e. `D65_WHITE = (0.95047, 1.0, 1.08883)`.

use std::fmt;

use serde::Serialize;

use crate::descriptor::XyzInput;
use crate::error::ParseError;
use crate::lab::{Lab, Lch};
use crate::srgb::Srgb;
use crate::util::{fmt_number, normalize_alpha, split_channels, Component};

/// D65 reference white, `y = 1`.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// Linear sRGB to XYZ (D65).
const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ (D65) to linear sRGB.
const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// (6/29)^3: below this, Lab uses its linear segment.
const EPSILON: f64 = 216.0 / 24389.0;

/// 1 / (3 · (6/29)^2): slope of the linear segment.
const LINEAR_SLOPE: f64 = 841.0 / 108.0;

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + 4.0 / 29.0
    }
}

/// An immutable CIE XYZ color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Xyz {
    x: f64,
    y: f64,
    z: f64,
    alpha: f64,
}

impl Xyz {
    /// Builds an XYZ color. Tristimulus values are taken as given; alpha is
    /// clamped to [0, 1] and defaults to 1.
    pub fn new(input: XyzInput) -> Xyz {
        Xyz {
            x: input.x,
            y: input.y,
            z: input.z,
            alpha: normalize_alpha(input.alpha),
        }
    }

    /// Builds an XYZ color from `[x, y, z, alpha?]`.
    pub fn xyz_array(values: &[f64]) -> Result<Xyz, ParseError> {
        let ([x, y, z], alpha) = split_channels(values)?;
        Ok(Xyz::new(XyzInput { x, y, z, alpha }))
    }

    /// Resolves `color(xyz-d65 …)` components: `100%` is 1.0.
    pub fn xyz_components(components: &[Component]) -> Result<Xyz, ParseError> {
        let ([x, y, z], alpha) = split_channels(components)?;
        let mut values = vec![
            x.to_scaled("x", 1.0, 1.0)?,
            y.to_scaled("y", 1.0, 1.0)?,
            z.to_scaled("z", 1.0, 1.0)?,
        ];
        if let Some(alpha) = alpha {
            values.push(alpha.to_alpha()?);
        }
        Xyz::xyz_array(&values)
    }

    pub(crate) fn from_linear_rgb(linear: [f64; 3], alpha: f64) -> Xyz {
        let [x, y, z] = mul(&SRGB_TO_XYZ, linear);
        Xyz { x, y, z, alpha }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Converts to sRGB; channels outside the gamut are clamped to [0, 255].
    pub fn to_srgb(&self) -> Srgb {
        let linear = mul(&XYZ_TO_SRGB, [self.x, self.y, self.z]);
        Srgb::from_linear(linear, self.alpha)
    }

    /// Converts to Lab against the D65 white.
    pub fn to_lab(&self) -> Lab {
        let [xn, yn, zn] = D65_WHITE;
        let fx = lab_f(self.x / xn);
        let fy = lab_f(self.y / yn);
        let fz = lab_f(self.z / zn);
        Lab::from_raw(
            116.0 * fy - 16.0,
            500.0 * (fx - fy),
            200.0 * (fy - fz),
            self.alpha,
        )
    }

    pub fn to_lch(&self) -> Lch {
        self.to_lab().to_lch()
    }
}

/// Formats as `color(xyz-d65 x y z)`, optionally with `/ alpha`. The
/// dispatcher reads this form back.
impl fmt::Display for Xyz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(5) as u32;
        let body = format!(
            "xyz-d65 {} {} {}",
            fmt_number(self.x, precision),
            fmt_number(self.y, precision),
            fmt_number(self.z, precision)
        );
        f.write_str(&crate::srgb::with_alpha("color", &body, self.alpha, precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    fn xyz(x: f64, y: f64, z: f64) -> Xyz {
        Xyz::new(XyzInput {
            x,
            y,
            z,
            alpha: None,
        })
    }

    #[test]
    fn srgb_white_is_d65_white() {
        let white = Srgb::new(255.0, 255.0, 255.0, 1.0).to_xyz();
        assert!((white.x() - D65_WHITE[0]).abs() < TOLERANCE, "x {}", white.x());
        assert!((white.y() - D65_WHITE[1]).abs() < TOLERANCE, "y {}", white.y());
        assert!((white.z() - D65_WHITE[2]).abs() < TOLERANCE, "z {}", white.z());
    }

    #[test]
    fn d65_white_converts_back_to_srgb_white() {
        let [x, y, z] = D65_WHITE;
        let srgb = xyz(x, y, z).to_srgb();
        assert_eq!(srgb.to_octets(), [255, 255, 255]);
        assert!((srgb.red() - 255.0).abs() < 1e-3);
        assert!((srgb.green() - 255.0).abs() < 1e-3);
        assert!((srgb.blue() - 255.0).abs() < 1e-3);
    }

    #[test]
    fn black_is_origin() {
        let black = Srgb::new(0.0, 0.0, 0.0, 1.0).to_xyz();
        assert_eq!((black.x(), black.y(), black.z()), (0.0, 0.0, 0.0));
        let lab = black.to_lab();
        assert!(lab.lightness().abs() < 1e-9);
    }

    #[test]
    fn out_of_gamut_xyz_is_clamped() {
        let srgb = xyz(2.0, -1.0, 0.5).to_srgb();
        for c in [srgb.red(), srgb.green(), srgb.blue()] {
            assert!((0.0..=255.0).contains(&c), "channel {c} out of range");
        }
    }

    #[test]
    fn white_has_lightness_100_and_no_chroma() {
        let [x, y, z] = D65_WHITE;
        let lab = xyz(x, y, z).to_lab();
        assert!((lab.lightness() - 100.0).abs() < 1e-9);
        assert!(lab.a().abs() < 1e-9);
        assert!(lab.b().abs() < 1e-9);
    }

    #[test]
    fn red_matches_reference_lab() {
        // sRGB red is roughly Lab(53.24, 80.09, 67.20).
        let lab = Srgb::new(255.0, 0.0, 0.0, 1.0).to_xyz().to_lab();
        assert!((lab.lightness() - 53.24).abs() < 0.05, "L {}", lab.lightness());
        assert!((lab.a() - 80.09).abs() < 0.05, "a {}", lab.a());
        assert!((lab.b() - 67.20).abs() < 0.05, "b {}", lab.b());
    }

    #[test]
    fn linear_segment_below_threshold() {
        let y = EPSILON / 2.0;
        let lab = xyz(0.0, y, 0.0).to_lab();
        assert!((lab.lightness() - 116.0 * (LINEAR_SLOPE * y + 4.0 / 29.0) + 16.0).abs() < 1e-9);
    }

    #[test]
    fn alpha_is_preserved_and_clamped() {
        let c = Xyz::xyz_array(&[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(c.alpha(), 0.4);
        assert_eq!(c.to_srgb().alpha(), 0.4);
        assert_eq!(c.to_lab().alpha(), 0.4);
        assert_eq!(Xyz::xyz_array(&[0.1, 0.2, 0.3, 7.0]).unwrap().alpha(), 1.0);
        assert!(Xyz::xyz_array(&[0.1]).is_err());
    }

    #[test]
    fn display_uses_color_function() {
        assert_eq!(xyz(0.5, 0.25, 0.0).to_string(), "color(xyz-d65 0.5 0.25 0)");
    }

    #[test]
    fn components_resolve_percentages() {
        let c = Xyz::xyz_components(&[
            Component::Number(0.25),
            Component::Percentage(50.0),
            Component::Number(1.0),
            Component::Percentage(40.0),
        ])
        .unwrap();
        assert_eq!((c.x(), c.y(), c.z(), c.alpha()), (0.25, 0.5, 1.0, 0.4));
        assert!(matches!(
            Xyz::xyz_components(&[
                Component::Angle(1.0),
                Component::Number(1.0),
                Component::Number(1.0),
            ]),
            Err(ParseError::UnexpectedUnit { .. })
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn srgb_xyz_srgb_round_trip(
                r in 0.0_f64..=255.0,
                g in 0.0_f64..=255.0,
                b in 0.0_f64..=255.0,
            ) {
                let original = Srgb::new(r, g, b, 1.0);
                let back = original.to_xyz().to_srgb();
                prop_assert!((back.red() - r).abs() < 1e-3, "r: {} vs {}", back.red(), r);
                prop_assert!((back.green() - g).abs() < 1e-3, "g: {} vs {}", back.green(), g);
                prop_assert!((back.blue() - b).abs() < 1e-3, "b: {} vs {}", back.blue(), b);
            }

            #[test]
            fn xyz_lab_xyz_round_trip(
                x in 0.0_f64..1.0,
                y in 0.0_f64..1.0,
                z in 0.0_f64..1.1,
            ) {
                let original = xyz(x, y, z);
                let back = original.to_lab().to_xyz();
                prop_assert!((back.x() - x).abs() < 1e-9, "x: {} vs {}", back.x(), x);
                prop_assert!((back.y() - y).abs() < 1e-9, "y: {} vs {}", back.y(), y);
                prop_assert!((back.z() - z).abs() < 1e-9, "z: {} vs {}", back.z(), z);
            }
        }
    }
}
