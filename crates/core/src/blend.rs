//! Derived colors and comparisons.
//!
//! These work on [`Srgb`] values: [`gray`] and [`contrast`] use relative
//! luminance of the linearized channels, [`mix`] interpolates in gamma space
//! and [`mix_lab`] in CIE Lab.

use crate::descriptor::LabInput;
use crate::lab::Lab;
use crate::srgb::Srgb;

/// Rec. 709 luma weights for linear R, G, B.
pub const REC709_LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

fn clamp_t(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Relative luminance in [0, 1].
pub fn luminance(color: &Srgb) -> f64 {
    let [r, g, b] = color.to_linear();
    REC709_LUMA[0] * r + REC709_LUMA[1] * g + REC709_LUMA[2] * b
}

/// The gray with the same relative luminance; alpha is kept.
pub fn gray(color: &Srgb) -> Srgb {
    let y = luminance(color);
    Srgb::from_linear([y, y, y], color.alpha())
}

/// WCAG 2 contrast ratio, in [1, 21]. Order of the arguments does not matter.
pub fn contrast(a: &Srgb, b: &Srgb) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Interpolates channels and alpha in sRGB.
///
/// `t` is clamped to [0, 1]; NaN is treated as 0.
pub fn mix(a: &Srgb, b: &Srgb, t: f64) -> Srgb {
    let t = clamp_t(t);
    Srgb::new(
        lerp(a.red(), b.red(), t),
        lerp(a.green(), b.green(), t),
        lerp(a.blue(), b.blue(), t),
        lerp(a.alpha(), b.alpha(), t),
    )
}

/// Interpolates in CIE Lab and converts back, clamping to the sRGB gamut.
pub fn mix_lab(a: &Srgb, b: &Srgb, t: f64) -> Srgb {
    let t = clamp_t(t);
    let (la, lb) = (a.to_lab(), b.to_lab());
    Lab::new(LabInput {
        lightness: lerp(la.lightness(), lb.lightness(), t),
        a: lerp(la.a(), lb.a(), t),
        b: lerp(la.b(), lb.b(), t),
        alpha: Some(lerp(a.alpha(), b.alpha(), t)),
    })
    .to_srgb()
}
