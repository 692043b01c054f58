//! CSS Level 4 named colors.
//!
//! Each entry carries both its sRGB octets and its HSL coordinates (hue in
//! degrees, saturation and lightness as fractions), so a named color converts
//! to HSL without recomputation and the two forms always agree.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::ParseError;

/// Named color table: keyword, `[red, green, blue]`, `[hue, saturation, lightness]`.
const NAMED_COLORS: [(&str, [u8; 3], [f64; 3]); 148] = [
    ("aliceblue", [240, 248, 255], [208.0, 1.0, 0.970588]),
    ("antiquewhite", [250, 235, 215], [34.285714, 0.777778, 0.911765]),
    ("aqua", [0, 255, 255], [180.0, 1.0, 0.5]),
    ("aquamarine", [127, 255, 212], [159.84375, 1.0, 0.74902]),
    ("azure", [240, 255, 255], [180.0, 1.0, 0.970588]),
    ("beige", [245, 245, 220], [60.0, 0.555556, 0.911765]),
    ("bisque", [255, 228, 196], [32.542373, 1.0, 0.884314]),
    ("black", [0, 0, 0], [0.0, 0.0, 0.0]),
    ("blanchedalmond", [255, 235, 205], [36.0, 1.0, 0.901961]),
    ("blue", [0, 0, 255], [240.0, 1.0, 0.5]),
    ("blueviolet", [138, 43, 226], [271.147541, 0.759336, 0.527451]),
    ("brown", [165, 42, 42], [0.0, 0.594203, 0.405882]),
    ("burlywood", [222, 184, 135], [33.793103, 0.568627, 0.7]),
    ("cadetblue", [95, 158, 160], [181.846154, 0.254902, 0.5]),
    ("chartreuse", [127, 255, 0], [90.117647, 1.0, 0.5]),
    ("chocolate", [210, 105, 30], [25.0, 0.75, 0.470588]),
    ("coral", [255, 127, 80], [16.114286, 1.0, 0.656863]),
    ("cornflowerblue", [100, 149, 237], [218.540146, 0.791908, 0.660784]),
    ("cornsilk", [255, 248, 220], [48.0, 1.0, 0.931373]),
    ("crimson", [220, 20, 60], [348.0, 0.833333, 0.470588]),
    ("cyan", [0, 255, 255], [180.0, 1.0, 0.5]),
    ("darkblue", [0, 0, 139], [240.0, 1.0, 0.272549]),
    ("darkcyan", [0, 139, 139], [180.0, 1.0, 0.272549]),
    ("darkgoldenrod", [184, 134, 11], [42.65896, 0.887179, 0.382353]),
    ("darkgray", [169, 169, 169], [0.0, 0.0, 0.662745]),
    ("darkgreen", [0, 100, 0], [120.0, 1.0, 0.196078]),
    ("darkgrey", [169, 169, 169], [0.0, 0.0, 0.662745]),
    ("darkkhaki", [189, 183, 107], [55.609756, 0.383178, 0.580392]),
    ("darkmagenta", [139, 0, 139], [300.0, 1.0, 0.272549]),
    ("darkolivegreen", [85, 107, 47], [82.0, 0.38961, 0.301961]),
    ("darkorange", [255, 140, 0], [32.941176, 1.0, 0.5]),
    ("darkorchid", [153, 50, 204], [280.12987, 0.606299, 0.498039]),
    ("darkred", [139, 0, 0], [0.0, 1.0, 0.272549]),
    ("darksalmon", [233, 150, 122], [15.135135, 0.716129, 0.696078]),
    ("darkseagreen", [143, 188, 143], [120.0, 0.251397, 0.64902]),
    ("darkslateblue", [72, 61, 139], [248.461538, 0.39, 0.392157]),
    ("darkslategray", [47, 79, 79], [180.0, 0.253968, 0.247059]),
    ("darkslategrey", [47, 79, 79], [180.0, 0.253968, 0.247059]),
    ("darkturquoise", [0, 206, 209], [180.861244, 1.0, 0.409804]),
    ("darkviolet", [148, 0, 211], [282.085308, 1.0, 0.413725]),
    ("deeppink", [255, 20, 147], [327.574468, 1.0, 0.539216]),
    ("deepskyblue", [0, 191, 255], [195.058824, 1.0, 0.5]),
    ("dimgray", [105, 105, 105], [0.0, 0.0, 0.411765]),
    ("dimgrey", [105, 105, 105], [0.0, 0.0, 0.411765]),
    ("dodgerblue", [30, 144, 255], [209.6, 1.0, 0.558824]),
    ("firebrick", [178, 34, 34], [0.0, 0.679245, 0.415686]),
    ("floralwhite", [255, 250, 240], [40.0, 1.0, 0.970588]),
    ("forestgreen", [34, 139, 34], [120.0, 0.606936, 0.339216]),
    ("fuchsia", [255, 0, 255], [300.0, 1.0, 0.5]),
    ("gainsboro", [220, 220, 220], [0.0, 0.0, 0.862745]),
    ("ghostwhite", [248, 248, 255], [240.0, 1.0, 0.986275]),
    ("gold", [255, 215, 0], [50.588235, 1.0, 0.5]),
    ("goldenrod", [218, 165, 32], [42.903226, 0.744, 0.490196]),
    ("gray", [128, 128, 128], [0.0, 0.0, 0.501961]),
    ("green", [0, 128, 0], [120.0, 1.0, 0.25098]),
    ("greenyellow", [173, 255, 47], [83.653846, 1.0, 0.592157]),
    ("grey", [128, 128, 128], [0.0, 0.0, 0.501961]),
    ("honeydew", [240, 255, 240], [120.0, 1.0, 0.970588]),
    ("hotpink", [255, 105, 180], [330.0, 1.0, 0.705882]),
    ("indianred", [205, 92, 92], [0.0, 0.530516, 0.582353]),
    ("indigo", [75, 0, 130], [274.615385, 1.0, 0.254902]),
    ("ivory", [255, 255, 240], [60.0, 1.0, 0.970588]),
    ("khaki", [240, 230, 140], [54.0, 0.769231, 0.745098]),
    ("lavender", [230, 230, 250], [240.0, 0.666667, 0.941176]),
    ("lavenderblush", [255, 240, 245], [340.0, 1.0, 0.970588]),
    ("lawngreen", [124, 252, 0], [90.47619, 1.0, 0.494118]),
    ("lemonchiffon", [255, 250, 205], [54.0, 1.0, 0.901961]),
    ("lightblue", [173, 216, 230], [194.736842, 0.53271, 0.790196]),
    ("lightcoral", [240, 128, 128], [0.0, 0.788732, 0.721569]),
    ("lightcyan", [224, 255, 255], [180.0, 1.0, 0.939216]),
    ("lightgoldenrodyellow", [250, 250, 210], [60.0, 0.8, 0.901961]),
    ("lightgray", [211, 211, 211], [0.0, 0.0, 0.827451]),
    ("lightgreen", [144, 238, 144], [120.0, 0.734375, 0.74902]),
    ("lightgrey", [211, 211, 211], [0.0, 0.0, 0.827451]),
    ("lightpink", [255, 182, 193], [350.958904, 1.0, 0.856863]),
    ("lightsalmon", [255, 160, 122], [17.142857, 1.0, 0.739216]),
    ("lightseagreen", [32, 178, 170], [176.712329, 0.695238, 0.411765]),
    ("lightskyblue", [135, 206, 250], [202.956522, 0.92, 0.754902]),
    ("lightslategray", [119, 136, 153], [210.0, 0.142857, 0.533333]),
    ("lightslategrey", [119, 136, 153], [210.0, 0.142857, 0.533333]),
    ("lightsteelblue", [176, 196, 222], [213.913043, 0.410714, 0.780392]),
    ("lightyellow", [255, 255, 224], [60.0, 1.0, 0.939216]),
    ("lime", [0, 255, 0], [120.0, 1.0, 0.5]),
    ("limegreen", [50, 205, 50], [120.0, 0.607843, 0.5]),
    ("linen", [250, 240, 230], [30.0, 0.666667, 0.941176]),
    ("magenta", [255, 0, 255], [300.0, 1.0, 0.5]),
    ("maroon", [128, 0, 0], [0.0, 1.0, 0.25098]),
    ("mediumaquamarine", [102, 205, 170], [159.61165, 0.507389, 0.601961]),
    ("mediumblue", [0, 0, 205], [240.0, 1.0, 0.401961]),
    ("mediumorchid", [186, 85, 211], [288.095238, 0.588785, 0.580392]),
    ("mediumpurple", [147, 112, 219], [259.626168, 0.597765, 0.64902]),
    ("mediumseagreen", [60, 179, 113], [146.722689, 0.497908, 0.468627]),
    ("mediumslateblue", [123, 104, 238], [248.507463, 0.797619, 0.670588]),
    ("mediumspringgreen", [0, 250, 154], [156.96, 1.0, 0.490196]),
    ("mediumturquoise", [72, 209, 204], [177.810219, 0.598253, 0.55098]),
    ("mediumvioletred", [199, 21, 133], [322.247191, 0.809091, 0.431373]),
    ("midnightblue", [25, 25, 112], [240.0, 0.635036, 0.268627]),
    ("mintcream", [245, 255, 250], [150.0, 1.0, 0.980392]),
    ("mistyrose", [255, 228, 225], [6.0, 1.0, 0.941176]),
    ("moccasin", [255, 228, 181], [38.108108, 1.0, 0.854902]),
    ("navajowhite", [255, 222, 173], [35.853659, 1.0, 0.839216]),
    ("navy", [0, 0, 128], [240.0, 1.0, 0.25098]),
    ("oldlace", [253, 245, 230], [39.130435, 0.851852, 0.947059]),
    ("olive", [128, 128, 0], [60.0, 1.0, 0.25098]),
    ("olivedrab", [107, 142, 35], [79.626168, 0.60452, 0.347059]),
    ("orange", [255, 165, 0], [38.823529, 1.0, 0.5]),
    ("orangered", [255, 69, 0], [16.235294, 1.0, 0.5]),
    ("orchid", [218, 112, 214], [302.264151, 0.588889, 0.647059]),
    ("palegoldenrod", [238, 232, 170], [54.705882, 0.666667, 0.8]),
    ("palegreen", [152, 251, 152], [120.0, 0.925234, 0.790196]),
    ("paleturquoise", [175, 238, 238], [180.0, 0.649485, 0.809804]),
    ("palevioletred", [219, 112, 147], [340.373832, 0.597765, 0.64902]),
    ("papayawhip", [255, 239, 213], [37.142857, 1.0, 0.917647]),
    ("peachpuff", [255, 218, 185], [28.285714, 1.0, 0.862745]),
    ("peru", [205, 133, 63], [29.577465, 0.586777, 0.52549]),
    ("pink", [255, 192, 203], [349.52381, 1.0, 0.876471]),
    ("plum", [221, 160, 221], [300.0, 0.472868, 0.747059]),
    ("powderblue", [176, 224, 230], [186.666667, 0.519231, 0.796078]),
    ("purple", [128, 0, 128], [300.0, 1.0, 0.25098]),
    ("rebeccapurple", [102, 51, 153], [270.0, 0.5, 0.4]),
    ("red", [255, 0, 0], [0.0, 1.0, 0.5]),
    ("rosybrown", [188, 143, 143], [0.0, 0.251397, 0.64902]),
    ("royalblue", [65, 105, 225], [225.0, 0.727273, 0.568627]),
    ("saddlebrown", [139, 69, 19], [25.0, 0.759494, 0.309804]),
    ("salmon", [250, 128, 114], [6.176471, 0.931507, 0.713725]),
    ("sandybrown", [244, 164, 96], [27.567568, 0.870588, 0.666667]),
    ("seagreen", [46, 139, 87], [146.451613, 0.502703, 0.362745]),
    ("seashell", [255, 245, 238], [24.705882, 1.0, 0.966667]),
    ("sienna", [160, 82, 45], [19.304348, 0.560976, 0.401961]),
    ("silver", [192, 192, 192], [0.0, 0.0, 0.752941]),
    ("skyblue", [135, 206, 235], [197.4, 0.714286, 0.72549]),
    ("slateblue", [106, 90, 205], [248.347826, 0.534884, 0.578431]),
    ("slategray", [112, 128, 144], [210.0, 0.125984, 0.501961]),
    ("slategrey", [112, 128, 144], [210.0, 0.125984, 0.501961]),
    ("snow", [255, 250, 250], [0.0, 1.0, 0.990196]),
    ("springgreen", [0, 255, 127], [149.882353, 1.0, 0.5]),
    ("steelblue", [70, 130, 180], [207.272727, 0.44, 0.490196]),
    ("tan", [210, 180, 140], [34.285714, 0.4375, 0.686275]),
    ("teal", [0, 128, 128], [180.0, 1.0, 0.25098]),
    ("thistle", [216, 191, 216], [300.0, 0.242718, 0.798039]),
    ("tomato", [255, 99, 71], [9.130435, 1.0, 0.639216]),
    ("turquoise", [64, 224, 208], [174.0, 0.720721, 0.564706]),
    ("violet", [238, 130, 238], [300.0, 0.760563, 0.721569]),
    ("wheat", [245, 222, 179], [39.090909, 0.767442, 0.831373]),
    ("white", [255, 255, 255], [0.0, 0.0, 1.0]),
    ("whitesmoke", [245, 245, 245], [0.0, 0.0, 0.960784]),
    ("yellow", [255, 255, 0], [60.0, 1.0, 0.5]),
    ("yellowgreen", [154, 205, 50], [79.741935, 0.607843, 0.5]),
];

static INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    NAMED_COLORS
        .iter()
        .enumerate()
        .map(|(i, (name, _, _))| (*name, i))
        .collect()
});

/// `(red, green, blue, hue, saturation, lightness, alpha)` for a named color.
pub type NamedTuple = (f64, f64, f64, f64, f64, f64, f64);

fn canonical(keyword: &str) -> String {
    keyword.trim().to_ascii_lowercase()
}

/// Returns true if `keyword` (trimmed, any case) is a named color.
pub fn is_named(keyword: &str) -> bool {
    let key = canonical(keyword);
    key == "transparent" || INDEX.contains_key(key.as_str())
}

/// Looks up a named color.
///
/// `transparent` is black with zero alpha. Callers are expected to check
/// [`is_named`] first; an unknown keyword is reported as
/// [`ParseError::UnknownName`].
pub fn parse_named(keyword: &str) -> Result<NamedTuple, ParseError> {
    let key = canonical(keyword);
    if key == "transparent" {
        return Ok((0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
    }
    let &i = INDEX
        .get(key.as_str())
        .ok_or_else(|| ParseError::UnknownName(keyword.to_string()))?;
    let (_, [r, g, b], [h, s, l]) = NAMED_COLORS[i];
    Ok((r.into(), g.into(), b.into(), h, s, l, 1.0))
}

/// Iterates over every keyword in alphabetical order (excluding `transparent`).
pub fn names() -> impl Iterator<Item = &'static str> {
    NAMED_COLORS.iter().map(|(name, _, _)| *name)
}
