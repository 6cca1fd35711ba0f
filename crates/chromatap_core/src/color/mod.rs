//! Color math shared by the wheel, the sampler and swatch display.
//!
//! # Responsibility
//! - Convert between HSV, RGB, hex and CMYK views of one color.
//! - Provide canonical display strings for swatches.
//!
//! # Invariants
//! - All conversions are pure: no shared state, no I/O.
//! - Canonical hex form is lowercase `#rrggbb`; input is case-insensitive.
//! - Hue is reported as 0 when saturation is 0.
//! - CMYK is derived for display only and never persisted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub mod wheel;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

const HEX_COLOR_LEN: usize = 7;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSV color with hue in degrees `[0, 360)` and saturation/value in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// CMYK percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

/// Rejection reasons for hex color input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexParseError {
    MissingPrefix(String),
    InvalidLength { value: String, len: usize },
    InvalidDigits(String),
}

impl Display for HexParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrefix(value) => write!(f, "hex color must start with `#`: `{value}`"),
            Self::InvalidLength { value, len } => write!(
                f,
                "hex color must be {HEX_COLOR_LEN} characters, got {len}: `{value}`"
            ),
            Self::InvalidDigits(value) => write!(f, "hex color has non-hex digits: `{value}`"),
        }
    }
}

impl Error for HexParseError {}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` string (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, HexParseError> {
        hex_to_rgb(hex)
    }

    /// Canonical lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self.r, self.g, self.b)
    }

    pub fn to_cmyk(self) -> Cmyk {
        rgb_to_cmyk(self.r, self.g, self.b)
    }

    /// CSS-style `rgb(r, g, b)` label.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = HexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Hsv {
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

impl Cmyk {
    /// `cmyk(c%, m%, y%, k%)` label.
    pub fn css(self) -> String {
        format!("cmyk({}%, {}%, {}%, {}%)", self.c, self.m, self.y, self.k)
    }
}

/// The three color views shown for a sampled or selected swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchInfo {
    pub hex: String,
    pub rgb: Rgb,
    pub cmyk: Cmyk,
}

impl SwatchInfo {
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb.to_hex(),
            rgb,
            cmyk: rgb.to_cmyk(),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, HexParseError> {
        hex_to_rgb(hex).map(Self::from_rgb)
    }
}

/// Sector-based HSV to RGB.
///
/// `h` wraps modulo 360; `s` and `v` are percentages clamped to `[0, 100]`.
/// Non-finite inputs are treated as 0.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h = finite_or_zero(h).rem_euclid(360.0);
    let s = finite_or_zero(s).clamp(0.0, 100.0) / 100.0;
    let v = finite_or_zero(v).clamp(0.0, 100.0) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

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

    Rgb {
        r: unit_to_channel(r + m),
        g: unit_to_channel(g + m),
        b: unit_to_channel(b + m),
    }
}

/// RGB to HSV; hue derived from whichever channel holds the max.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let mut h = if diff == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / diff) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / diff + 2.0)
    } else {
        60.0 * ((r - g) / diff + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h -= 360.0;
    }

    let s = if max == 0.0 { 0.0 } else { diff / max * 100.0 };

    Hsv { h, s, v: max * 100.0 }
}

/// Lowercase, zero-padded `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parses exactly `#` followed by six hex digits.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, HexParseError> {
    if !hex.starts_with('#') {
        return Err(HexParseError::MissingPrefix(hex.to_string()));
    }
    let len = hex.chars().count();
    if len != HEX_COLOR_LEN {
        return Err(HexParseError::InvalidLength {
            value: hex.to_string(),
            len,
        });
    }
    if !HEX_COLOR_RE.is_match(hex) {
        return Err(HexParseError::InvalidDigits(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| HexParseError::InvalidDigits(hex.to_string()))
    };

    Ok(Rgb {
        r: channel(1..3)?,
        g: channel(3..5)?,
        b: channel(5..7)?,
    })
}

/// Returns the canonical lowercase form of a valid hex color.
pub fn normalize_hex(hex: &str) -> Result<String, HexParseError> {
    hex_to_rgb(hex).map(Rgb::to_hex)
}

/// RGB to rounded CMYK percentages. Pure black yields `(0, 0, 0, 100)`.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let k = 1.0 - r.max(g).max(b);
    let ink = |channel: f64| {
        if k >= 1.0 {
            0.0
        } else {
            (1.0 - channel - k) / (1.0 - k)
        }
    };

    Cmyk {
        c: unit_to_percent(ink(r)),
        m: unit_to_percent(ink(g)),
        y: unit_to_percent(ink(b)),
        k: unit_to_percent(k),
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn unit_to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn unit_to_percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{hex_to_rgb, hsv_to_rgb, rgb_to_cmyk, rgb_to_hsv, HexParseError, Rgb};

    #[test]
    fn primary_sectors_map_to_pure_channels() {
        assert_eq!(hsv_to_rgb(0.0, 100.0, 100.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 100.0, 100.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 100.0, 100.0), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(60.0, 100.0, 100.0), Rgb::new(255, 255, 0));
    }

    #[test]
    fn hue_wraps_and_out_of_range_inputs_clamp() {
        assert_eq!(hsv_to_rgb(360.0, 100.0, 100.0), hsv_to_rgb(0.0, 100.0, 100.0));
        assert_eq!(hsv_to_rgb(-120.0, 100.0, 100.0), hsv_to_rgb(240.0, 100.0, 100.0));
        assert_eq!(hsv_to_rgb(0.0, 250.0, 150.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(f64::NAN, 0.0, 100.0), Rgb::WHITE);
    }

    #[test]
    fn black_and_grey_have_zero_hue_and_saturation() {
        let black = rgb_to_hsv(0, 0, 0);
        assert_eq!((black.h, black.s, black.v), (0.0, 0.0, 0.0));

        let grey = rgb_to_hsv(128, 128, 128);
        assert_eq!(grey.h, 0.0);
        assert_eq!(grey.s, 0.0);
    }

    #[test]
    fn magenta_side_hue_is_normalized_positive() {
        let hsv = rgb_to_hsv(255, 0, 128);
        assert!(hsv.h > 300.0 && hsv.h < 360.0, "hue was {}", hsv.h);
    }

    #[test]
    fn hex_parse_is_case_insensitive() {
        assert_eq!(hex_to_rgb("#FFa500").unwrap(), Rgb::new(255, 165, 0));
        assert_eq!(Rgb::new(255, 165, 0).to_hex(), "#ffa500");
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        assert!(matches!(
            hex_to_rgb("ff0000"),
            Err(HexParseError::MissingPrefix(_))
        ));
        assert!(matches!(
            hex_to_rgb("#fff"),
            Err(HexParseError::InvalidLength { len: 4, .. })
        ));
        assert!(matches!(
            hex_to_rgb("#gg0000"),
            Err(HexParseError::InvalidDigits(_))
        ));
        assert!(hex_to_rgb("#ff00é").is_err());
    }

    #[test]
    fn cmyk_handles_black_without_dividing_by_zero() {
        let cmyk = rgb_to_cmyk(0, 0, 0);
        assert_eq!((cmyk.c, cmyk.m, cmyk.y, cmyk.k), (0, 0, 0, 100));
    }

    #[test]
    fn display_strings_match_swatch_labels() {
        let rgb = Rgb::new(255, 0, 0);
        assert_eq!(rgb.css(), "rgb(255, 0, 0)");
        assert_eq!(rgb.to_cmyk().css(), "cmyk(0%, 100%, 100%, 0%)");
        assert_eq!(rgb.to_string(), "#ff0000");
    }
}
