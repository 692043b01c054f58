//! Object descriptors and their classification.
//!
//! A [`Fields`] bag holds whichever channel fields a caller supplied (for
//! example, decoded from a JSON object). [`Fields::model`] decides which
//! color model those fields describe by checking field sets in a fixed
//! priority order, and [`Fields::into_input`] turns them into a typed
//! [`Input`].
//!
//! Units follow the crate-wide convention: sRGB channels in [0, 255], hue in
//! degrees, saturation/lightness/whiteness/blackness as fractions in [0, 1],
//! XYZ relative to a D65 white of `y = 1`, Lab/LCH lightness in [0, 100].

use serde::{Deserialize, Serialize};

use crate::util::defined;

/// sRGB channels in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbInput {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// HSL with saturation and lightness as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslInput {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// HWB with whiteness and blackness as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HwbInput {
    pub hue: f64,
    pub whiteness: f64,
    pub blackness: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// CIE XYZ tristimulus values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XyzInput {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// CIE Lab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabInput {
    pub lightness: f64,
    pub a: f64,
    pub b: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// CIE LCH (polar Lab).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LchInput {
    pub lightness: f64,
    pub chroma: f64,
    pub hue: f64,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// A typed color descriptor, one variant per input model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Rgb(RgbInput),
    Hsl(HslInput),
    Hwb(HwbInput),
    Xyz(XyzInput),
    Lab(LabInput),
    Lch(LchInput),
}

impl Input {
    /// The model tag of this input.
    pub fn model(&self) -> Model {
        match self {
            Input::Rgb(_) => Model::Rgb,
            Input::Hsl(_) => Model::Hsl,
            Input::Hwb(_) => Model::Hwb,
            Input::Xyz(_) => Model::Xyz,
            Input::Lab(_) => Model::Lab,
            Input::Lch(_) => Model::Lch,
        }
    }
}

/// Which input model a descriptor describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Rgb,
    Hsl,
    Hwb,
    Xyz,
    Lab,
    Lch,
}

/// A loosely-typed descriptor: any subset of the known channel fields.
///
/// Deserializing from JSON ignores unknown keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub red: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub lightness: Option<f64>,
    pub whiteness: Option<f64>,
    pub blackness: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub chroma: Option<f64>,
    pub alpha: Option<f64>,
}

impl Fields {
    /// Classifies the descriptor.
    ///
    /// Field sets are tested in priority order: `{red, green, blue}`,
    /// `{hue, saturation, lightness}`, `{hue, whiteness, blackness}`,
    /// `{x, y, z}`, `{lightness, a, b}`, `{lightness, chroma, hue}`. The first
    /// complete set wins, so a descriptor carrying several complete sets
    /// resolves to the earliest one. Returns `None` if no set is complete.
    pub fn model(&self) -> Option<Model> {
        if defined(&[self.red, self.green, self.blue]) {
            Some(Model::Rgb)
        } else if defined(&[self.hue, self.saturation, self.lightness]) {
            Some(Model::Hsl)
        } else if defined(&[self.hue, self.whiteness, self.blackness]) {
            Some(Model::Hwb)
        } else if defined(&[self.x, self.y, self.z]) {
            Some(Model::Xyz)
        } else if defined(&[self.lightness, self.a, self.b]) {
            Some(Model::Lab)
        } else if defined(&[self.lightness, self.chroma, self.hue]) {
            Some(Model::Lch)
        } else {
            None
        }
    }

    /// Converts the descriptor into the typed input chosen by [`Fields::model`].
    pub fn into_input(self) -> Option<Input> {
        let alpha = self.alpha;
        let input = match self.model()? {
            Model::Rgb => Input::Rgb(RgbInput {
                red: self.red?,
                green: self.green?,
                blue: self.blue?,
                alpha,
            }),
            Model::Hsl => Input::Hsl(HslInput {
                hue: self.hue?,
                saturation: self.saturation?,
                lightness: self.lightness?,
                alpha,
            }),
            Model::Hwb => Input::Hwb(HwbInput {
                hue: self.hue?,
                whiteness: self.whiteness?,
                blackness: self.blackness?,
                alpha,
            }),
            Model::Xyz => Input::Xyz(XyzInput {
                x: self.x?,
                y: self.y?,
                z: self.z?,
                alpha,
            }),
            Model::Lab => Input::Lab(LabInput {
                lightness: self.lightness?,
                a: self.a?,
                b: self.b?,
                alpha,
            }),
            Model::Lch => Input::Lch(LchInput {
                lightness: self.lightness?,
                chroma: self.chroma?,
                hue: self.hue?,
                alpha,
            }),
        };
        Some(input)
    }

    /// Decodes a JSON object into fields.
    ///
    /// Keys whose values are not numbers are ignored, so
    /// `{"red": "255", "green": 0}` yields only `green`. Non-objects yield
    /// `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Fields> {
        let object = value.as_object()?;
        let get = |key: &str| object.get(key).and_then(serde_json::Value::as_f64);
        Some(Fields {
            red: get("red"),
            green: get("green"),
            blue: get("blue"),
            hue: get("hue"),
            saturation: get("saturation"),
            lightness: get("lightness"),
            whiteness: get("whiteness"),
            blackness: get("blackness"),
            x: get("x"),
            y: get("y"),
            z: get("z"),
            a: get("a"),
            b: get("b"),
            chroma: get("chroma"),
            alpha: get("alpha"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_fields_have_no_model() {
        assert_eq!(Fields::default().model(), None);
        assert_eq!(Fields::default().into_input(), None);
    }

    #[test]
    fn partial_rgb_has_no_model() {
        let fields = Fields {
            red: Some(1.0),
            green: Some(2.0),
            ..Fields::default()
        };
        assert_eq!(fields.model(), None);
    }

    #[test]
    fn rgb_wins_over_everything() {
        let fields = Fields {
            red: Some(1.0),
            green: Some(2.0),
            blue: Some(3.0),
            hue: Some(0.0),
            saturation: Some(0.5),
            lightness: Some(0.5),
            x: Some(0.1),
            y: Some(0.1),
            z: Some(0.1),
            ..Fields::default()
        };
        assert_eq!(fields.model(), Some(Model::Rgb));
    }

    #[test]
    fn hsl_wins_over_lch_when_both_complete() {
        let fields = Fields {
            hue: Some(10.0),
            saturation: Some(0.5),
            lightness: Some(0.5),
            chroma: Some(20.0),
            ..Fields::default()
        };
        assert_eq!(fields.model(), Some(Model::Hsl));
    }

    #[test]
    fn each_field_set_is_recognized() {
        let cases = [
            (json!({"hue": 1, "whiteness": 0.1, "blackness": 0.2}), Model::Hwb),
            (json!({"x": 0.1, "y": 0.2, "z": 0.3}), Model::Xyz),
            (json!({"lightness": 50, "a": 10, "b": -10}), Model::Lab),
            (json!({"lightness": 50, "chroma": 30, "hue": 120}), Model::Lch),
            (json!({"hue": 1, "saturation": 0.1, "lightness": 0.2}), Model::Hsl),
            (json!({"red": 1, "green": 2, "blue": 3}), Model::Rgb),
        ];
        for (value, model) in cases {
            let fields = Fields::from_json(&value).unwrap();
            assert_eq!(fields.model(), Some(model), "for {value}");
            assert_eq!(fields.into_input().unwrap().model(), model);
        }
    }

    #[test]
    fn into_input_carries_alpha() {
        let fields = Fields {
            x: Some(0.1),
            y: Some(0.2),
            z: Some(0.3),
            alpha: Some(0.4),
            ..Fields::default()
        };
        assert_eq!(
            fields.into_input(),
            Some(Input::Xyz(XyzInput {
                x: 0.1,
                y: 0.2,
                z: 0.3,
                alpha: Some(0.4)
            }))
        );
    }

    #[test]
    fn from_json_ignores_non_numeric_values() {
        let fields = Fields::from_json(&json!({"red": "255", "green": 0, "extra": true})).unwrap();
        assert_eq!(fields.red, None);
        assert_eq!(fields.green, Some(0.0));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert_eq!(Fields::from_json(&json!("red")), None);
        assert_eq!(Fields::from_json(&json!([1, 2, 3])), None);
        assert_eq!(Fields::from_json(&json!(null)), None);
    }

    #[test]
    fn fields_deserialize_with_serde() {
        let fields: Fields = serde_json::from_str(r#"{"lightness": 50, "a": 1, "b": 2}"#).unwrap();
        assert_eq!(fields.model(), Some(Model::Lab));
        assert_eq!(fields.a, Some(1.0));
    }

    #[test]
    fn typed_input_deserializes_with_optional_alpha() {
        let rgb: RgbInput = serde_json::from_str(r#"{"red": 1, "green": 2, "blue": 3}"#).unwrap();
        assert_eq!(rgb.alpha, None);
        let rgb: RgbInput =
            serde_json::from_str(r#"{"red": 1, "green": 2, "blue": 3, "alpha": 0.5}"#).unwrap();
        assert_eq!(rgb.alpha, Some(0.5));
    }
}
