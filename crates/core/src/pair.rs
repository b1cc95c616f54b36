//! Color pairs: the unit of a learning/quiz round, and the filters used to
//! select them.

use crate::color::Hsb;
use crate::compare::{learning_notes, ComparisonThresholds};
use crate::difficulty::{DifficultyLevel, DifficultyThresholds};
use crate::distance::distance;
use crate::sample::{ColorCategory, ColorSample};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Two colors compared in one round. Position matters: `primary` is the
/// target color. The difficulty tier is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub primary: ColorSample,
    pub comparison: ColorSample,
    pub learning_notes: String,
    pub category: ColorCategory,
}

impl ColorPair {
    pub fn new(
        primary: ColorSample,
        comparison: ColorSample,
        learning_notes: String,
        category: ColorCategory,
    ) -> Self {
        Self {
            primary,
            comparison,
            learning_notes,
            category,
        }
    }

    /// `"{primary}-{comparison}"`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.primary.name(), self.comparison.name())
    }

    pub fn distance(&self) -> f64 {
        distance(&self.primary, &self.comparison)
    }

    pub fn difficulty(&self, thresholds: &DifficultyThresholds) -> DifficultyLevel {
        thresholds.classify(self.distance())
    }

    /// Tier under the default thresholds. Callers holding custom
    /// [`DifficultyThresholds`] (as a repository loaded with non-default
    /// settings does) must use [`ColorPair::difficulty`] instead, or the tier
    /// will disagree with difficulty filtering.
    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty(&DifficultyThresholds::default())
    }

    pub fn colors(&self) -> [&ColorSample; 2] {
        [&self.primary, &self.comparison]
    }
}

/// Generates every unordered pair within each category. No cross-category
/// pairs. Within a category, pairs follow pool order.
pub fn generate_pairs(pool: &[ColorSample], thresholds: &ComparisonThresholds) -> Vec<ColorPair> {
    let mut by_category: BTreeMap<ColorCategory, Vec<&ColorSample>> = BTreeMap::new();
    for sample in pool {
        by_category.entry(sample.category()).or_default().push(sample);
    }

    let mut pairs = Vec::new();
    for (category, members) in by_category {
        for (i, first) in members.iter().enumerate() {
            for second in &members[i + 1..] {
                let notes = learning_notes(first, second, thresholds);
                pairs.push(ColorPair::new(
                    (*first).clone(),
                    (*second).clone(),
                    notes,
                    category,
                ));
            }
        }
    }
    pairs
}

/// Half-widths of an [`HsbFilter`] window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsbTolerance {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Default for HsbTolerance {
    fn default() -> Self {
        Self {
            hue: 30.0,
            saturation: 0.2,
            brightness: 0.2,
        }
    }
}

/// A tolerance window around an HSB point. Each range is clamped to the valid
/// bounds; the hue range does not wrap across 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HsbFilter {
    pub hue_range: RangeInclusive<f64>,
    pub saturation_range: RangeInclusive<f64>,
    pub brightness_range: RangeInclusive<f64>,
}

impl HsbFilter {
    /// Window with the default tolerance (±30°, ±0.2, ±0.2).
    pub fn new(center: Hsb) -> Self {
        Self::with_tolerance(center, HsbTolerance::default())
    }

    /// Default saturation/brightness tolerance with a custom hue tolerance.
    pub fn with_hue_tolerance(center: Hsb, hue_tolerance: f64) -> Self {
        Self::with_tolerance(
            center,
            HsbTolerance {
                hue: hue_tolerance,
                ..HsbTolerance::default()
            },
        )
    }

    pub fn with_tolerance(center: Hsb, tolerance: HsbTolerance) -> Self {
        let window = |c: f64, t: f64, max: f64| {
            let t = t.abs();
            (c - t).clamp(0.0, max)..=(c + t).clamp(0.0, max)
        };
        Self {
            hue_range: window(center.hue, tolerance.hue, 360.0),
            saturation_range: window(center.saturation, tolerance.saturation, 1.0),
            brightness_range: window(center.brightness, tolerance.brightness, 1.0),
        }
    }

    pub fn contains(&self, hsb: Hsb) -> bool {
        self.hue_range.contains(&hsb.hue)
            && self.saturation_range.contains(&hsb.saturation)
            && self.brightness_range.contains(&hsb.brightness)
    }

    /// True when either color of the pair falls in the window.
    pub fn matches_pair(&self, pair: &ColorPair) -> bool {
        pair.colors().iter().any(|c| self.contains(c.hsb()))
    }
}

/// Selection criteria for pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PairFilter {
    #[default]
    All,
    Category(ColorCategory),
    Difficulty(DifficultyLevel),
    Hsb(HsbFilter),
}

impl PairFilter {
    pub fn matches(&self, pair: &ColorPair, thresholds: &DifficultyThresholds) -> bool {
        match self {
            PairFilter::All => true,
            PairFilter::Category(category) => pair.category == *category,
            PairFilter::Difficulty(level) => pair.difficulty(thresholds) == *level,
            PairFilter::Hsb(filter) => filter.matches_pair(pair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, hex: &str, category: ColorCategory) -> ColorSample {
        ColorSample::new(name, hex, category)
    }

    fn pool() -> Vec<ColorSample> {
        vec![
            sample("Red", "#FF0000", ColorCategory::Reds),
            sample("Crimson", "#DC143C", ColorCategory::Reds),
            sample("Carmine", "#960018", ColorCategory::Reds),
            sample("Blue", "#0000FF", ColorCategory::Blues),
            sample("Navy", "#000080", ColorCategory::Blues),
            sample("Lemon", "#FFF700", ColorCategory::Yellows),
        ]
    }

    #[test]
    fn pairs_are_all_intra_category_combinations() {
        let pairs = generate_pairs(&pool(), &ComparisonThresholds::default());
        // 3 reds -> 3 pairs, 2 blues -> 1 pair, 1 yellow -> 0
        assert_eq!(pairs.len(), 4);
        assert!(pairs
            .iter()
            .all(|p| p.primary.category() == p.comparison.category()
                && p.category == p.primary.category()));
        let ids: Vec<String> = pairs.iter().map(ColorPair::id).collect();
        assert!(ids.contains(&"Red-Crimson".to_string()));
        assert!(ids.contains(&"Red-Carmine".to_string()));
        assert!(ids.contains(&"Crimson-Carmine".to_string()));
        assert!(ids.contains(&"Blue-Navy".to_string()));
    }

    #[test]
    fn empty_pool_generates_no_pairs() {
        assert!(generate_pairs(&[], &ComparisonThresholds::default()).is_empty());
    }

    #[test]
    fn pairs_carry_learning_notes() {
        let pairs = generate_pairs(&pool(), &ComparisonThresholds::default());
        let blue_navy = pairs.iter().find(|p| p.id() == "Blue-Navy").unwrap();
        assert!(
            blue_navy.learning_notes.contains("Blue vs Navy: Brighter"),
            "{}",
            blue_navy.learning_notes
        );
    }

    #[test]
    fn difficulty_is_recomputed_from_thresholds() {
        let pairs = generate_pairs(&pool(), &ComparisonThresholds::default());
        let blue_navy = pairs.iter().find(|p| p.id() == "Blue-Navy").unwrap();
        // distance ~7.47
        assert_eq!(blue_navy.difficulty_level(), DifficultyLevel::Advanced);
        let strict = DifficultyThresholds {
            expert: 8.0,
            advanced: 15.0,
            intermediate: 35.0,
        };
        assert_eq!(blue_navy.difficulty(&strict), DifficultyLevel::Expert);
    }

    #[test]
    fn hsb_filter_window_and_clamping() {
        let filter = HsbFilter::with_hue_tolerance(Hsb::new(180.0, 0.5, 0.5), 30.0);
        assert_eq!(filter.hue_range, 150.0..=210.0);
        assert_eq!(filter.saturation_range, 0.3..=0.7);
        assert_eq!(filter.brightness_range, 0.3..=0.7);

        let edge = HsbFilter::new(Hsb::new(10.0, 0.9, 0.1));
        assert_eq!(edge.hue_range, 0.0..=40.0);
        assert_eq!(edge.saturation_range, 0.7..=1.0);
        assert_eq!(*edge.brightness_range.start(), 0.0);
    }

    #[test]
    fn hsb_filter_upper_hue_is_clamped_to_360() {
        let filter = HsbFilter::new(Hsb::new(350.0, 0.5, 0.5));
        assert_eq!(filter.hue_range, 320.0..=360.0);
    }

    #[test]
    fn hsb_filter_matches_either_color() {
        let pairs = generate_pairs(&pool(), &ComparisonThresholds::default());
        let filter = PairFilter::Hsb(HsbFilter::new(Hsb::new(240.0, 1.0, 0.5)));
        let matched: Vec<String> = pairs
            .iter()
            .filter(|p| filter.matches(p, &DifficultyThresholds::default()))
            .map(ColorPair::id)
            .collect();
        assert_eq!(matched, vec!["Blue-Navy".to_string()]);
    }

    #[test]
    fn category_and_difficulty_filters() {
        let pairs = generate_pairs(&pool(), &ComparisonThresholds::default());
        let t = DifficultyThresholds::default();
        let reds = PairFilter::Category(ColorCategory::Reds);
        assert_eq!(pairs.iter().filter(|p| reds.matches(p, &t)).count(), 3);

        let expert = PairFilter::Difficulty(DifficultyLevel::Expert);
        assert!(pairs
            .iter()
            .filter(|p| expert.matches(p, &t))
            .all(|p| p.distance() < 5.0));

        assert!(pairs.iter().all(|p| PairFilter::All.matches(p, &t)));
    }
}
