//! Weighted perceptual distance in HSB space.
//!
//! Hue dominates human color discrimination, then saturation, then
//! brightness. The weights are fixed: the difficulty thresholds are tuned
//! against this exact scale.

use crate::color::Hsb;
use crate::sample::ColorSample;

pub const HUE_WEIGHT: f64 = 0.6;
pub const SATURATION_WEIGHT: f64 = 0.25;
pub const BRIGHTNESS_WEIGHT: f64 = 0.15;

/// Shortest angular distance between two hues, in [0, 180].
pub fn hue_difference(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs().rem_euclid(360.0);
    d.min(360.0 - d)
}

/// Perceptual distance between two HSB points on a 0–100 scale.
///
/// Symmetric, zero for identical inputs. The hue term alone tops out at 30
/// (opposite hues), so the full range is only reached when saturation and
/// brightness also differ maximally.
pub fn hsb_distance(a: Hsb, b: Hsb) -> f64 {
    let normalized_hue = hue_difference(a.hue, b.hue) / 360.0;
    let saturation = (a.saturation - b.saturation).abs();
    let brightness = (a.brightness - b.brightness).abs();

    let weighted = normalized_hue * HUE_WEIGHT
        + saturation * SATURATION_WEIGHT
        + brightness * BRIGHTNESS_WEIGHT;
    (weighted * 100.0).clamp(0.0, 100.0)
}

/// Perceptual distance between two named colors, see [`hsb_distance`].
pub fn distance(a: &ColorSample, b: &ColorSample) -> f64 {
    hsb_distance(a.hsb(), b.hsb())
}
