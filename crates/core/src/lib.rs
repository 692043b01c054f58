#![deny(unsafe_code)]
//! Color descriptor parsing and conversion.
//!
//! Accepts colors as CSS-like strings (`#rrggbb`, `rgb(…)`, `hsl(…)`,
//! `hwb(…)`, `lab(…)`, `lch(…)`, named keywords) or as field bags, and turns
//! them into immutable values (`Srgb`, `Xyz`, `Lab`, `Lch`) that convert
//! into one another through CIE XYZ (D65).

pub mod blend;
pub mod color;
pub mod descriptor;
pub mod error;
pub mod lab;
pub mod named;
pub mod srgb;
pub mod util;
pub mod xyz;

pub use color::{color, ColorValue, Descriptor, Space};
pub use descriptor::{
    Fields, HslInput, HwbInput, Input, LabInput, LchInput, Model, RgbInput, XyzInput,
};
pub use error::ParseError;
pub use lab::{Lab, Lch};
pub use srgb::{Hsl, Hwb, Srgb};
pub use xyz::Xyz;
