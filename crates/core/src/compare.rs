//! Qualitative comparison of two colors.
//!
//! [`characteristics`] describes how color `a` differs from color `b` as a
//! short ordered list: hue family shift, then saturation, then brightness,
//! then the muted/vibrant composite. An empty list means the two colors are
//! indistinguishable at the configured thresholds.

use crate::color::{Hsb, Level, Temperature};
use crate::error::HueError;
use crate::sample::ColorSample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven named wedges of the hue wheel, in wheel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HueFamily {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Magenta,
}

/// Wheel order, starting at red.
const WHEEL: [HueFamily; 7] = [
    HueFamily::Red,
    HueFamily::Orange,
    HueFamily::Yellow,
    HueFamily::Green,
    HueFamily::Blue,
    HueFamily::Purple,
    HueFamily::Magenta,
];

impl HueFamily {
    /// Classifies a hue in degrees. Red wraps across 0: [345, 360) and [0, 15).
    pub fn of(hue: f64) -> Self {
        let h = hue.rem_euclid(360.0);
        match h {
            h if h < 15.0 => HueFamily::Red,
            h if h < 45.0 => HueFamily::Orange,
            h if h < 70.0 => HueFamily::Yellow,
            h if h < 170.0 => HueFamily::Green,
            h if h < 260.0 => HueFamily::Blue,
            h if h < 290.0 => HueFamily::Purple,
            h if h < 345.0 => HueFamily::Magenta,
            _ => HueFamily::Red,
        }
    }

    fn index(self) -> usize {
        WHEEL.iter().position(|&f| f == self).unwrap_or(0)
    }

    /// The family following this one in the direction of increasing hue.
    pub fn next(self) -> Self {
        WHEEL[(self.index() + 1) % WHEEL.len()]
    }

    /// The family preceding this one on the wheel.
    pub fn previous(self) -> Self {
        WHEEL[(self.index() + WHEEL.len() - 1) % WHEEL.len()]
    }

    /// Capitalized family name as used in phrases, e.g. `"Orange"`.
    pub fn name(self) -> &'static str {
        match self {
            HueFamily::Red => "Red",
            HueFamily::Orange => "Orange",
            HueFamily::Yellow => "Yellow",
            HueFamily::Green => "Green",
            HueFamily::Blue => "Blue",
            HueFamily::Purple => "Purple",
            HueFamily::Magenta => "Magenta",
        }
    }
}

impl fmt::Display for HueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which way a component moved going from `b` to `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    More,
    Less,
}

/// A single qualitative difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Characteristic {
    /// The colors sit in different hue families ("More Orange").
    HueFamily {
        family: HueFamily,
        direction: Direction,
    },
    /// Same family, leaning clearly toward a neighbour ("More Green").
    HueLean { family: HueFamily },
    /// Same family, leaning barely toward a neighbour ("Hint of Yellow").
    HueHint { family: HueFamily },
    Saturation { direction: Direction, slight: bool },
    Brightness { direction: Direction, slight: bool },
    Muted,
    Vibrant,
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slightly = |slight: bool| if slight { "Slightly " } else { "" };
        match *self {
            Characteristic::HueFamily {
                family,
                direction: Direction::More,
            } => write!(f, "More {family}"),
            Characteristic::HueFamily {
                family,
                direction: Direction::Less,
            } => write!(f, "Less {family}"),
            Characteristic::HueLean { family } => write!(f, "More {family}"),
            Characteristic::HueHint { family } => write!(f, "Hint of {family}"),
            Characteristic::Saturation { direction, slight } => {
                let word = match direction {
                    Direction::More => "More",
                    Direction::Less => "Less",
                };
                write!(f, "{}{word} Saturated", slightly(slight))
            }
            Characteristic::Brightness { direction, slight } => {
                let word = match direction {
                    Direction::More => "Brighter",
                    Direction::Less => "Darker",
                };
                write!(f, "{}{word}", slightly(slight))
            }
            Characteristic::Muted => f.write_str("More Muted"),
            Characteristic::Vibrant => f.write_str("More Vibrant"),
        }
    }
}

/// Cut-offs deciding which differences are worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonThresholds {
    /// Same-family hue separations at or below this many degrees are ignored.
    pub hue_min_degrees: f64,
    /// Same-family separations below this read as a "Hint of" the neighbour.
    pub hue_hint_degrees: f64,
    /// Saturation/brightness changes above this are reported ("Slightly").
    pub minor: f64,
    /// Changes above this are reported without the "Slightly" qualifier.
    pub major: f64,
}

impl Default for ComparisonThresholds {
    fn default() -> Self {
        Self {
            hue_min_degrees: 1.0,
            hue_hint_degrees: 5.0,
            minor: 0.02,
            major: 0.05,
        }
    }
}

impl ComparisonThresholds {
    /// Rejects negative or non-finite values and inverted pairs
    /// (`hue_min_degrees > hue_hint_degrees`, `minor > major`).
    pub fn validate(&self) -> Result<(), HueError> {
        let values = [
            ("hue_min_degrees", self.hue_min_degrees),
            ("hue_hint_degrees", self.hue_hint_degrees),
            ("minor", self.minor),
            ("major", self.major),
        ];
        if let Some((name, value)) = values
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(HueError::InvalidThresholds(format!(
                "comparison threshold {name} must be finite and non-negative, got {value}"
            )));
        }
        if self.hue_min_degrees > self.hue_hint_degrees {
            return Err(HueError::InvalidThresholds(format!(
                "hue_min_degrees ({}) exceeds hue_hint_degrees ({})",
                self.hue_min_degrees, self.hue_hint_degrees
            )));
        }
        if self.minor > self.major {
            return Err(HueError::InvalidThresholds(format!(
                "minor ({}) exceeds major ({})",
                self.minor, self.major
            )));
        }
        Ok(())
    }
}

/// Signed hue difference `h1 - h2` wrapped into (-180, 180].
pub fn signed_hue_difference(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

fn hue_characteristic(a: Hsb, b: Hsb, t: &ComparisonThresholds) -> Option<Characteristic> {
    let d = signed_hue_difference(a.hue, b.hue);
    if d == 0.0 {
        return None;
    }
    let family_a = HueFamily::of(a.hue);
    let family_b = HueFamily::of(b.hue);

    if family_a != family_b {
        let direction = if d > 0.0 {
            Direction::More
        } else {
            Direction::Less
        };
        return Some(Characteristic::HueFamily {
            family: family_a,
            direction,
        });
    }

    let separation = d.abs();
    if separation <= t.hue_min_degrees {
        return None;
    }
    let neighbour = if d > 0.0 {
        family_a.next()
    } else {
        family_a.previous()
    };
    if separation < t.hue_hint_degrees {
        Some(Characteristic::HueHint { family: neighbour })
    } else {
        Some(Characteristic::HueLean { family: neighbour })
    }
}

/// Direction and "slightly" flag for a signed component change, or `None`
/// when it is below the reporting threshold.
fn graded(diff: f64, t: &ComparisonThresholds) -> Option<(Direction, bool)> {
    let magnitude = diff.abs();
    if magnitude <= t.minor {
        return None;
    }
    let direction = if diff > 0.0 {
        Direction::More
    } else {
        Direction::Less
    };
    Some((direction, magnitude <= t.major))
}

/// Describes how HSB point `a` differs from `b`.
pub fn hsb_characteristics(a: Hsb, b: Hsb, t: &ComparisonThresholds) -> Vec<Characteristic> {
    let mut out = Vec::with_capacity(4);

    if let Some(hue) = hue_characteristic(a, b, t) {
        out.push(hue);
    }

    let saturation = graded(a.saturation - b.saturation, t);
    if let Some((direction, slight)) = saturation {
        out.push(Characteristic::Saturation { direction, slight });
    }

    let brightness = graded(a.brightness - b.brightness, t);
    if let Some((direction, slight)) = brightness {
        out.push(Characteristic::Brightness { direction, slight });
    }

    match (saturation, brightness) {
        (Some((Direction::Less, _)), Some((Direction::Less, _))) => {
            out.push(Characteristic::Muted)
        }
        (Some((Direction::More, _)), Some((Direction::More, _))) => {
            out.push(Characteristic::Vibrant)
        }
        _ => {}
    }

    out
}

/// Describes how color `a` differs from color `b`.
pub fn characteristics(
    a: &ColorSample,
    b: &ColorSample,
    t: &ComparisonThresholds,
) -> Vec<Characteristic> {
    hsb_characteristics(a.hsb(), b.hsb(), t)
}

/// Human-readable phrases describing how `a` differs from `b`, using the
/// default thresholds. Swapping the arguments flips the direction words.
pub fn compare(a: &ColorSample, b: &ColorSample) -> Vec<String> {
    characteristics(a, b, &ComparisonThresholds::default())
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Builds the explanatory text stored on a pair.
///
/// One sentence per differing temperature, saturation level and brightness
/// level, followed by the comparator summary.
pub fn learning_notes(a: &ColorSample, b: &ColorSample, t: &ComparisonThresholds) -> String {
    let (ha, hb) = (a.hsb(), b.hsb());
    let mut notes = Vec::new();

    let (temp_a, temp_b) = (Temperature::of(ha), Temperature::of(hb));
    if temp_a != temp_b {
        let (warmer, cooler) = if temp_a == Temperature::Warm {
            (a, b)
        } else {
            (b, a)
        };
        notes.push(format!(
            "{} is warmer than {}.",
            warmer.name(),
            cooler.name()
        ));
    }

    let (sat_a, sat_b) = (Level::of(ha.saturation), Level::of(hb.saturation));
    if sat_a != sat_b {
        let (more, less) = if sat_a > sat_b { (a, b) } else { (b, a) };
        notes.push(format!(
            "{} is more saturated than {}.",
            more.name(),
            less.name()
        ));
    }

    let (bright_a, bright_b) = (Level::of(ha.brightness), Level::of(hb.brightness));
    if bright_a != bright_b {
        let (brighter, darker) = if bright_a > bright_b { (a, b) } else { (b, a) };
        notes.push(format!(
            "{} is brighter than {}.",
            brighter.name(),
            darker.name()
        ));
    }

    let phrases: Vec<String> = hsb_characteristics(ha, hb, t)
        .iter()
        .map(ToString::to_string)
        .collect();
    if phrases.is_empty() {
        notes.push(format!(
            "{} and {} are identical for human eyes.",
            a.name(),
            b.name()
        ));
    } else {
        notes.push(format!(
            "{} vs {}: {}.",
            a.name(),
            b.name(),
            phrases.join(", ")
        ));
    }

    notes.join(" ")
}
