//! Color types and conversion functions.
//!
//! Provides `Rgb` (components in [0, 1]) and `Hsb` (hue in degrees, saturation
//! and brightness in [0, 1]) plus pure conversion functions between them and
//! hex strings. Every function here is side-effect free and total over its
//! input: the lenient hex reader maps anything it cannot read to black.

use crate::error::HueError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hue at or above which (inclusive) a color counts as cool.
pub const COOL_HUE_START: f64 = 90.0;
/// Hue at or below which (inclusive) a color counts as cool.
pub const COOL_HUE_END: f64 = 270.0;
/// Upper bound (exclusive) of the `Low` saturation/brightness level.
pub const LOW_LEVEL_THRESHOLD: f64 = 0.33;
/// Upper bound (exclusive) of the `Medium` saturation/brightness level.
pub const MEDIUM_LEVEL_THRESHOLD: f64 = 0.66;

/// RGB color with components in [0, 1].
///
/// Serializes as a hex string `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSB (a.k.a. HSV) color: hue in [0, 360), saturation and brightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Builds a color from 8-bit channels.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Rgb {
        Rgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Strictly parses `#RGB`, `#RRGGBB` or `#AARRGGBB` (the `#` is optional,
    /// case insensitive). Alpha is read and discarded.
    ///
    /// Returns `HueError::InvalidColor` for anything else. Use
    /// [`rgb_components`] for dataset rows, where a bad value must not fail.
    pub fn from_hex(hex: &str) -> Result<Rgb, HueError> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !matches!(digits.len(), 3 | 6 | 8) {
            return Err(HueError::InvalidColor(format!(
                "expected 3, 6 or 8 hex digits, got {}",
                digits.len()
            )));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HueError::InvalidColor(format!(
                "'{hex}' contains non-hex characters"
            )));
        }
        let value = u64::from_str_radix(digits, 16)
            .map_err(|e| HueError::InvalidColor(format!("'{hex}': {e}")))?;
        Ok(decode_hex_value(value, digits.len()))
    }

    /// Converts the color to an uppercase hex string like `"#FF7F50"`.
    ///
    /// Components are clamped and quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Converts to HSB; see [`hsb_components`].
    pub fn to_hsb(self) -> Hsb {
        hsb_components(self)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Hsb {
    /// Hue in degrees, saturation and brightness in [0, 1]. Values are stored
    /// as given.
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Converts back to 8-bit RGB; see [`hsb_to_rgb`].
    pub fn to_rgb(self) -> Rgb {
        hsb_to_rgb(self)
    }
}

/// Splits a parsed hex integer into channels given how many digits it had.
fn decode_hex_value(value: u64, digits: usize) -> Rgb {
    match digits {
        3 => {
            let r = ((value >> 8) & 0xF) as u8;
            let g = ((value >> 4) & 0xF) as u8;
            let b = (value & 0xF) as u8;
            Rgb::from_bytes(r * 17, g * 17, b * 17)
        }
        // 8 digits carry a leading alpha byte which the upper bits hold;
        // masking the low 24 bits covers both forms.
        6 | 8 => Rgb::from_bytes(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ),
        _ => Rgb::BLACK,
    }
}

/// Leniently reads a hex color string.
///
/// Non-alphanumeric characters (such as `#` or spaces) are stripped, then the
/// 3-, 6- or 8-digit forms are decoded. Any other input yields black; this
/// never fails.
pub fn rgb_components(hex: &str) -> Rgb {
    let digits: String = hex.chars().filter(char::is_ascii_alphanumeric).collect();
    if !matches!(digits.len(), 3 | 6 | 8) {
        return Rgb::BLACK;
    }
    match u64::from_str_radix(&digits, 16) {
        Ok(value) => decode_hex_value(value, digits.len()),
        Err(_) => Rgb::BLACK,
    }
}

/// Standard RGB to HSB conversion.
///
/// `brightness = max(r, g, b)`, `saturation = (max - min) / max` (0 for
/// black) and hue from the six-sector formula, normalized into [0, 360).
pub fn hsb_components(c: Rgb) -> Hsb {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    let hue = if delta == 0.0 {
        0.0
    } else if max == c.r {
        60.0 * ((c.g - c.b) / delta)
    } else if max == c.g {
        60.0 * ((c.b - c.r) / delta + 2.0)
    } else {
        60.0 * ((c.r - c.g) / delta + 4.0)
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    Hsb {
        hue: hue.rem_euclid(360.0),
        saturation,
        brightness: max,
    }
}

/// Inverse of [`hsb_components`]. Hue is wrapped, saturation and brightness
/// are clamped to [0, 1].
pub fn hsb_to_rgb(c: Hsb) -> Rgb {
    let h = c.hue.rem_euclid(360.0);
    let s = c.saturation.clamp(0.0, 1.0);
    let v = c.brightness.clamp(0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = if h < 60.0 {
        (chroma, x, 0.0)
    } else if h < 120.0 {
        (x, chroma, 0.0)
    } else if h < 180.0 {
        (0.0, chroma, x)
    } else if h < 240.0 {
        (0.0, x, chroma)
    } else if h < 300.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    Rgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// Coarse warm/cool split of the hue wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
}

impl Temperature {
    /// Cool for hues in [90, 270], warm elsewhere.
    pub fn of(hsb: Hsb) -> Self {
        if (COOL_HUE_START..=COOL_HUE_END).contains(&hsb.hue) {
            Temperature::Cool
        } else {
            Temperature::Warm
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
        }
    }
}

/// Three-step bucketing used for saturation and brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Buckets a [0, 1] component: below 0.33 is low, below 0.66 medium,
    /// the rest high.
    pub fn of(value: f64) -> Self {
        if value < LOW_LEVEL_THRESHOLD {
            Level::Low
        } else if value < MEDIUM_LEVEL_THRESHOLD {
            Level::Medium
        } else {
            Level::High
        }
    }
}
