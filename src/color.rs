//! Color values and color-space conversions.
//!
//! A [`Color`] is an 8-bit sRGB triple. Everything else in the crate works on
//! top of the conversions defined here:
//! - HSL (hue in degrees, saturation and lightness in percent)
//! - CIE L*a*b* and its cylindrical form LCH (D65 white point)
//! - WCAG relative luminance and contrast ratio
//!
//! # Examples
//!
//! ```
//! use hueforge::color::Color;
//!
//! let orange = Color::parse("#ff8800").unwrap();
//! assert_eq!(orange.hex(), "#ff8800");
//!
//! let short = Color::parse("#f80").unwrap();
//! assert_eq!(short, orange);
//!
//! let css = Color::parse("rgb(255, 136, 0)").unwrap();
//! assert_eq!(css, orange);
//! ```
//!
//! ## Conversions
//!
//! ```
//! use hueforge::color::Color;
//!
//! let red = Color::from_rgb(255, 0, 0);
//! let hsl = red.to_hsl();
//! assert_eq!(hsl.hue, 0.0);
//! assert_eq!(hsl.saturation, 100.0);
//!
//! let lch = red.to_lch();
//! assert_eq!(Color::from_lch(lch), red);
//! ```

use lru::LruCache;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::Mutex;

use crate::sync::{lock_recover, lock_recover_logged};

/// Chroma below which an LCH value is treated as having no hue.
pub const ACHROMATIC_CHROMA: f64 = 1e-4;

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// HSL representation: hue in `[0, 360)`, saturation and lightness in `[0, 100]`.
///
/// Achromatic colors report a hue of `0.0`; use [`Color::hue`] to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

/// CIE L*a*b* relative to the D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Cylindrical L*a*b*: lightness `[0, 100]`, chroma `>= 0`, hue `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[must_use]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Returns true when the chroma is too small for the hue to mean anything.
    #[must_use]
    pub fn is_achromatic(&self) -> bool {
        self.c < ACHROMATIC_CHROMA
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        let radians = self.h.to_radians();
        Lab {
            l: self.l,
            a: self.c * radians.cos(),
            b: self.c * radians.sin(),
        }
    }
}

impl Lab {
    #[must_use]
    pub fn to_lch(self) -> Lch {
        let c = self.a.hypot(self.b);
        let h = if c < ACHROMATIC_CHROMA {
            0.0
        } else {
            self.b.atan2(self.a).to_degrees().rem_euclid(360.0)
        };
        Lch { l: self.l, c, h }
    }
}

// sRGB -> XYZ (D65). The white point is the row sums so that neutral grays
// land exactly on a = b = 0.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.240_454_2, -1.537_138_5, -0.498_531_4],
    [-0.969_266_0, 1.876_010_8, 0.041_556_0],
    [0.055_643_4, -0.204_025_9, 1.057_225_2],
];

const WHITE_POINT: [f64; 3] = [
    RGB_TO_XYZ[0][0] + RGB_TO_XYZ[0][1] + RGB_TO_XYZ[0][2],
    RGB_TO_XYZ[1][0] + RGB_TO_XYZ[1][1] + RGB_TO_XYZ[1][2],
    RGB_TO_XYZ[2][0] + RGB_TO_XYZ[2][1] + RGB_TO_XYZ[2][2],
];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// Decode one sRGB channel (0.0-1.0) into linear light.
#[must_use]
pub fn srgb_to_linear(channel: f64) -> f64 {
    if channel <= 0.040_45 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode linear light into one sRGB channel (0.0-1.0).
#[must_use]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0-255 before the cast"
)]
fn quantize(unit: f64) -> u8 {
    if unit.is_nan() {
        return 0;
    }
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    /// The gray that tones blend toward.
    pub const NEUTRAL_GRAY: Self = Self::from_rgb(128, 128, 128);

    /// Create a color from RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Returns CSS-style rgb format `rgb(r,g,b)`.
    #[must_use]
    pub fn rgb(&self) -> String {
        format!("rgb({},{},{})", self.red, self.green, self.blue)
    }

    /// Returns normalized RGB as floats in range 0.0-1.0.
    #[must_use]
    pub fn normalized(&self) -> (f64, f64, f64) {
        (
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
        )
    }

    /// Linear-light RGB components.
    #[must_use]
    pub fn to_linear(&self) -> [f64; 3] {
        let (r, g, b) = self.normalized();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
    }

    /// Build a color from linear-light RGB, clipping out-of-gamut channels.
    #[must_use]
    pub fn from_linear(linear: [f64; 3]) -> Self {
        Self::from_rgb(
            quantize(linear_to_srgb(linear[0].max(0.0))),
            quantize(linear_to_srgb(linear[1].max(0.0))),
            quantize(linear_to_srgb(linear[2].max(0.0))),
        )
    }

    /// Convert to HSL.
    #[must_use]
    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = f64::midpoint(max, min);

        if (max - min).abs() < f64::EPSILON {
            return Hsl::new(0.0, 0.0, lightness * 100.0);
        }

        let delta = max - min;
        let saturation = if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let hue = if (max - r).abs() < f64::EPSILON {
            (g - b) / delta + (if g < b { 6.0 } else { 0.0 })
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl::new(
            (hue * 60.0).rem_euclid(360.0),
            saturation * 100.0,
            lightness * 100.0,
        )
    }

    /// Build a color from HSL. Hue wraps, saturation and lightness are clamped.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = hsl.hue.rem_euclid(360.0);
        let s = (hsl.saturation / 100.0).clamp(0.0, 1.0);
        let l = (hsl.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self::from_rgb(quantize(r + m), quantize(g + m), quantize(b + m))
    }

    /// Hue in degrees, or `None` for grays.
    #[must_use]
    pub fn hue(&self) -> Option<f64> {
        if self.is_achromatic() {
            None
        } else {
            Some(self.to_hsl().hue)
        }
    }

    /// Returns true if all channels are equal.
    #[must_use]
    pub const fn is_achromatic(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// Convert to CIE L*a*b* (D65).
    #[must_use]
    pub fn to_lab(&self) -> Lab {
        let xyz = mat_mul(&RGB_TO_XYZ, self.to_linear());
        let f = |t: f64| {
            if t > LAB_EPSILON {
                t.cbrt()
            } else {
                (LAB_KAPPA * t + 16.0) / 116.0
            }
        };
        let fx = f(xyz[0] / WHITE_POINT[0]);
        let fy = f(xyz[1] / WHITE_POINT[1]);
        let fz = f(xyz[2] / WHITE_POINT[2]);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Build a color from CIE L*a*b*, clipping to the sRGB gamut.
    #[must_use]
    pub fn from_lab(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let inverse = |f: f64| {
            let cubed = f * f * f;
            if cubed > LAB_EPSILON {
                cubed
            } else {
                (116.0 * f - 16.0) / LAB_KAPPA
            }
        };
        let yr = if lab.l > LAB_KAPPA * LAB_EPSILON {
            fy * fy * fy
        } else {
            lab.l / LAB_KAPPA
        };

        let xyz = [
            inverse(fx) * WHITE_POINT[0],
            yr * WHITE_POINT[1],
            inverse(fz) * WHITE_POINT[2],
        ];
        Self::from_linear(mat_mul(&XYZ_TO_RGB, xyz))
    }

    #[must_use]
    pub fn to_lch(&self) -> Lch {
        self.to_lab().to_lch()
    }

    #[must_use]
    pub fn from_lch(lch: Lch) -> Self {
        Self::from_lab(lch.to_lab())
    }

    /// WCAG 2.x relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        let [r, g, b] = self.to_linear();
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
    #[must_use]
    pub fn contrast_ratio(&self, other: Color) -> f64 {
        let (l1, l2) = {
            let a = self.relative_luminance();
            let b = other.relative_luminance();
            if a >= b { (a, b) } else { (b, a) }
        };
        (l1 + 0.05) / (l2 + 0.05)
    }

    /// Linear blend in sRGB space; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn mix(&self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| -> u8 {
            let a = f64::from(a) / 255.0;
            let b = f64::from(b) / 255.0;
            quantize(a + (b - a) * t)
        };
        Color::from_rgb(
            blend(self.red, other.red),
            blend(self.green, other.green),
            blend(self.blue, other.blue),
        )
    }

    /// Rotate the HSL hue, holding saturation and lightness.
    #[must_use]
    pub fn rotate_hue(&self, degrees: f64) -> Color {
        let hsl = self.to_hsl();
        Color::from_hsl(Hsl {
            hue: (hsl.hue + degrees).rem_euclid(360.0),
            ..hsl
        })
    }

    /// Parse a color string (cached).
    ///
    /// Supported formats:
    /// - Hex format: `#FF0000`, `#F00`, `FF0000`
    /// - RGB format: `rgb(255,0,0)`
    /// - HSL format: `hsl(0, 100%, 50%)`
    /// - A handful of CSS names: `red`, `white`, `gray`
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the color string is invalid:
    /// - `Empty` if the string is empty
    /// - `InvalidHex` if hex format is malformed
    /// - `InvalidRgb` if rgb(r,g,b) format is invalid
    /// - `InvalidHsl` if hsl(h,s,l) format is invalid
    /// - `UnknownColor` if the color name is not recognized
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> =
            LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

        let normalized = color.trim().to_lowercase();

        if let Some(cached) = lock_recover_logged(&CACHE, "color parse cache").get(&normalized) {
            return Ok(*cached);
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover(&CACHE).put(normalized, result);
        Ok(result)
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        static HEX_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^#?([0-9a-f]{6}|[0-9a-f]{3})$").expect("valid regex"));
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });
        static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                r"^hsl\(\s*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(\d{1,3}(?:\.\d+)?)%?\s*,\s*(\d{1,3}(?:\.\d+)?)%?\s*\)$",
            )
            .expect("valid regex")
        });

        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if let Some(caps) = HEX_RE.captures(color) {
            let digits = &caps[1];
            // Bare three-digit strings would shadow names like "bad"; require '#'.
            if digits.len() == 6 || color.starts_with('#') {
                return Self::from_hex_digits(digits)
                    .ok_or_else(|| ColorParseError::InvalidHex(color.to_string()));
            }
        }
        if color.starts_with('#') {
            return Err(ColorParseError::InvalidHex(color.to_string()));
        }

        if let Some(caps) = RGB_RE.captures(color)
            && let (Ok(r), Ok(g), Ok(b)) = (
                caps[1].parse::<u16>(),
                caps[2].parse::<u16>(),
                caps[3].parse::<u16>(),
            )
            && r <= 255
            && g <= 255
            && b <= 255
        {
            #[expect(clippy::cast_possible_truncation, reason = "verified values <= 255")]
            return Ok(Self::from_rgb(r as u8, g as u8, b as u8));
        } else if RGB_RE.is_match(color) || color.starts_with("rgb(") {
            return Err(ColorParseError::InvalidRgb(color.to_string()));
        }

        if let Some(caps) = HSL_RE.captures(color)
            && let (Ok(h), Ok(s), Ok(l)) = (
                caps[1].parse::<f64>(),
                caps[2].parse::<f64>(),
                caps[3].parse::<f64>(),
            )
            && s <= 100.0
            && l <= 100.0
        {
            return Ok(Self::from_hsl(Hsl::new(h, s, l)));
        } else if color.starts_with("hsl(") {
            return Err(ColorParseError::InvalidHsl(color.to_string()));
        }

        if let Some(&named) = NAMED_COLORS.get(color) {
            return Ok(named);
        }

        Err(ColorParseError::UnknownColor(color.to_string()))
    }

    fn from_hex_digits(digits: &str) -> Option<Self> {
        match digits.len() {
            6 => Some(Self::from_rgb(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            3 => {
                let expand = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::from_rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidRgb(String),
    InvalidHsl(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::InvalidHsl(s) => write!(f, "Invalid HSL color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Named Colors
// ============================================================================

static NAMED_COLORS: LazyLock<HashMap<&'static str, Color>> = LazyLock::new(|| {
    HashMap::from([
        ("black", Color::BLACK),
        ("white", Color::WHITE),
        ("gray", Color::NEUTRAL_GRAY),
        ("grey", Color::NEUTRAL_GRAY),
        ("red", Color::from_rgb(255, 0, 0)),
        ("green", Color::from_rgb(0, 128, 0)),
        ("lime", Color::from_rgb(0, 255, 0)),
        ("blue", Color::from_rgb(0, 0, 255)),
        ("yellow", Color::from_rgb(255, 255, 0)),
        ("cyan", Color::from_rgb(0, 255, 255)),
        ("magenta", Color::from_rgb(255, 0, 255)),
        ("orange", Color::from_rgb(255, 165, 0)),
        ("purple", Color::from_rgb(128, 0, 128)),
        ("pink", Color::from_rgb(255, 192, 203)),
        ("brown", Color::from_rgb(165, 42, 42)),
        ("navy", Color::from_rgb(0, 0, 128)),
        ("teal", Color::from_rgb(0, 128, 128)),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_hex_formatting() {
        let c = Color::from_rgb(255, 0, 128);
        assert_eq!(c.hex(), "#ff0080");
        assert_eq!(c.to_string(), "#ff0080");
    }

    #[test]
    fn test_rgb_string() {
        let c = Color::from_rgb(100, 150, 200);
        assert_eq!(c.rgb(), "rgb(100,150,200)");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#FF0000").unwrap(), Color::from_rgb(255, 0, 0));
        assert_eq!(Color::parse("#f00").unwrap(), Color::from_rgb(255, 0, 0));
        assert_eq!(Color::parse("00ff00").unwrap(), Color::from_rgb(0, 255, 0));
        assert_eq!(Color::parse("  #0000ff  ").unwrap(), Color::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_parse_rgb_and_hsl() {
        assert_eq!(
            Color::parse("rgb(100, 150, 200)").unwrap(),
            Color::from_rgb(100, 150, 200)
        );
        assert_eq!(
            Color::parse("hsl(120, 100%, 50%)").unwrap(),
            Color::from_rgb(0, 255, 0)
        );
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("White").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("grey").unwrap(), Color::NEUTRAL_GRAY);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Color::parse(""), Err(ColorParseError::Empty));
        assert!(matches!(
            Color::parse("#12345"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("#gggggg"),
            Err(ColorParseError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("rgb(300, 0, 0)"),
            Err(ColorParseError::InvalidRgb(_))
        ));
        assert!(matches!(
            Color::parse("hsl(10, 150%, 50%)"),
            Err(ColorParseError::InvalidHsl(_))
        ));
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(ColorParseError::UnknownColor(_))
        ));
        // Three bare hex digits are not accepted without '#'.
        assert!(Color::parse("bad").is_err());
    }

    #[test]
    fn test_parse_error_display() {
        let err = Color::parse("#xyz").unwrap_err();
        assert_eq!(err.to_string(), "Invalid hex color: #xyz");
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Color::from_rgb(255, 0, 0).to_hsl();
        assert_close(red.hue, 0.0, 1e-9);
        assert_close(red.saturation, 100.0, 1e-9);
        assert_close(red.lightness, 50.0, 1e-9);

        let blue = Color::from_rgb(0, 0, 255).to_hsl();
        assert_close(blue.hue, 240.0, 1e-9);
    }

    #[test]
    fn test_hsl_roundtrip() {
        for color in [
            Color::from_rgb(12, 200, 99),
            Color::from_rgb(250, 128, 3),
            Color::from_rgb(77, 77, 200),
            Color::from_rgb(128, 128, 128),
        ] {
            assert_eq!(Color::from_hsl(color.to_hsl()), color);
        }
    }

    #[test]
    fn test_hue_is_none_for_grays() {
        assert_eq!(Color::from_rgb(40, 40, 40).hue(), None);
        assert!(Color::from_rgb(40, 41, 40).hue().is_some());
    }

    #[test]
    fn test_lab_white_and_black() {
        let white = Color::WHITE.to_lab();
        assert_close(white.l, 100.0, 1e-3);
        assert_close(white.a, 0.0, 1e-6);
        assert_close(white.b, 0.0, 1e-6);

        let black = Color::BLACK.to_lab();
        assert_close(black.l, 0.0, 1e-9);
    }

    #[test]
    fn test_gray_is_achromatic_in_lch() {
        let lch = Color::NEUTRAL_GRAY.to_lch();
        assert!(lch.is_achromatic());
        assert_close(lch.l, 53.59, 0.05);
    }

    #[test]
    fn test_lch_roundtrip() {
        for color in [
            Color::from_rgb(255, 0, 0),
            Color::from_rgb(18, 52, 86),
            Color::from_rgb(240, 230, 140),
            Color::from_rgb(1, 2, 3),
        ] {
            assert_eq!(Color::from_lch(color.to_lch()), color);
        }
    }

    #[test]
    fn test_from_lch_clips_out_of_gamut() {
        let c = Color::from_lch(Lch::new(50.0, 250.0, 140.0));
        // Just needs to produce a valid color without panicking.
        let _ = c.hex();
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        assert_close(Color::BLACK.contrast_ratio(Color::WHITE), 21.0, 1e-6);
        assert_close(Color::WHITE.contrast_ratio(Color::WHITE), 1.0, 1e-12);
        let a = Color::from_rgb(10, 120, 200);
        let b = Color::from_rgb(200, 20, 40);
        assert_close(a.contrast_ratio(b), b.contrast_ratio(a), 1e-12);
    }

    #[test]
    fn test_mix_endpoints() {
        let c = Color::from_rgb(10, 20, 30);
        assert_eq!(c.mix(Color::WHITE, 0.0), c);
        assert_eq!(c.mix(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 0.5), Color::from_rgb(128, 128, 128));
    }

    #[test]
    fn test_rotate_hue_complement() {
        let c = Color::from_rgb(255, 0, 0).rotate_hue(180.0);
        assert_eq!(c, Color::from_rgb(0, 255, 255));
        let back = c.rotate_hue(-180.0);
        assert_eq!(back, Color::from_rgb(255, 0, 0));
    }
}
