//! The color dataset: lookup trait and the loaded repository.
//!
//! [`ColorDatabase`] is the seam the game layer talks to for plain color
//! lookups; it is object-safe so tests can swap in a double.
//! [`ColorRepository`] is the concrete, immutable dataset built once by
//! [`load_dataset`]: the color pool, every intra-category pair, and a
//! memoizing [`Selector`] over the pool.

use crate::color::Hsb;
use crate::config::Settings;
use crate::difficulty::{check_tiers, tier_distribution, DifficultyLevel};
use crate::pair::{generate_pairs, ColorPair, HsbFilter, PairFilter};
use crate::prng::Xorshift64;
use crate::sample::{ColorRecord, ColorSample};
use crate::selector::Selector;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Read-only access to a set of named colors.
pub trait ColorDatabase {
    /// Every color, in dataset order.
    fn all_colors(&self) -> &[ColorSample];

    /// Case-insensitive lookup by name.
    fn color_named(&self, name: &str) -> Option<&ColorSample> {
        let name = name.trim();
        self.all_colors()
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Colors tagged with `environment` (case-insensitive).
    fn colors_for_environment(&self, environment: &str) -> Vec<&ColorSample> {
        let environment = environment.trim();
        self.all_colors()
            .iter()
            .filter(|c| {
                c.environment()
                    .is_some_and(|e| e.eq_ignore_ascii_case(environment))
            })
            .collect()
    }

    /// Distinct environment tags, lowercased and sorted.
    fn available_environments(&self) -> Vec<String> {
        self.all_colors()
            .iter()
            .filter_map(ColorSample::environment)
            .map(str::to_lowercase)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// The loaded dataset. Immutable after construction.
pub struct ColorRepository {
    colors: Vec<ColorSample>,
    pairs: Vec<ColorPair>,
    settings: Settings,
    selector: Selector,
    empty_tiers: Vec<DifficultyLevel>,
}

/// Builds the repository from raw rows.
///
/// Duplicate names keep the first row. Pairs are generated for every
/// combination within a category, then the tier distribution is checked and
/// empty tiers are logged. An empty record list produces a valid, empty
/// repository.
pub fn load_dataset(records: Vec<ColorRecord>, settings: Settings) -> ColorRepository {
    let mut seen = HashSet::new();
    let mut colors = Vec::with_capacity(records.len());
    for record in records {
        let sample = ColorSample::from_record(record);
        if sample.name().is_empty() {
            log::warn!("skipping color row with an empty name");
            continue;
        }
        if !seen.insert(sample.name().to_lowercase()) {
            log::warn!("duplicate color '{}' ignored", sample.name());
            continue;
        }
        colors.push(sample);
    }

    let pairs = generate_pairs(&colors, &settings.comparison);
    let distances = pairs.iter().map(ColorPair::distance);
    let empty_tiers = check_tiers(&tier_distribution(distances, &settings.difficulty));
    log::debug!("loaded {} colors and {} pairs", colors.len(), pairs.len());

    let selector = Selector::with_precision(colors.clone(), settings.cache_precision);
    ColorRepository {
        colors,
        pairs,
        settings,
        selector,
        empty_tiers,
    }
}

impl ColorRepository {
    /// Loads with default settings.
    pub fn load(records: Vec<ColorRecord>) -> Self {
        load_dataset(records, Settings::default())
    }

    /// A repository with no colors, the state before a dataset is available.
    pub fn empty() -> Self {
        Self::load(Vec::new())
    }

    /// The settings the repository was loaded with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Every generated pair, grouped by category in pool order.
    pub fn pairs(&self) -> &[ColorPair] {
        &self.pairs
    }

    /// Memoizing nearest-color lookup over the pool.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Looks a pair up by its `"{primary}-{comparison}"` id.
    pub fn pair(&self, id: &str) -> Option<&ColorPair> {
        self.pairs.iter().find(|p| p.id() == id)
    }

    /// Pairs matching `filter`, in generation order.
    pub fn get_pairs(&self, filter: &PairFilter) -> Vec<&ColorPair> {
        self.pairs
            .iter()
            .filter(|p| filter.matches(p, &self.settings.difficulty))
            .collect()
    }

    /// Builds an [`HsbFilter`] around `center` with the configured tolerance.
    pub fn hsb_filter(&self, center: Hsb) -> HsbFilter {
        HsbFilter::with_tolerance(center, self.settings.hsb_tolerance)
    }

    /// Picks a random pair matching `filter`, preferring ids not in
    /// `excluding`.
    ///
    /// Makes up to `random_attempts` uniform draws looking for a
    /// non-excluded pair, then draws uniformly from the non-excluded
    /// matches, then from all matches. `None` only when nothing matches the
    /// filter.
    pub fn random_pair(
        &self,
        filter: &PairFilter,
        excluding: &HashSet<String>,
        rng: &mut Xorshift64,
    ) -> Option<&ColorPair> {
        let candidates = self.get_pairs(filter);
        if candidates.is_empty() {
            return None;
        }

        for _ in 0..self.settings.random_attempts {
            let pick = rng.choose(&candidates)?;
            if !excluding.contains(&pick.id()) {
                return Some(*pick);
            }
        }

        let eligible: Vec<&ColorPair> = candidates
            .iter()
            .copied()
            .filter(|p| !excluding.contains(&p.id()))
            .collect();
        rng.choose(&eligible)
            .or_else(|| rng.choose(&candidates))
            .copied()
    }

    /// Up to `count` distinct random colors other than `excluding`, e.g.
    /// distractors for a quiz question.
    pub fn random_colors(
        &self,
        count: usize,
        excluding: &ColorSample,
        rng: &mut Xorshift64,
    ) -> Vec<&ColorSample> {
        let mut others: Vec<&ColorSample> =
            self.colors.iter().filter(|c| *c != excluding).collect();
        rng.shuffle(&mut others);
        others.truncate(count);
        others
    }

    /// Pair count per tier under the configured thresholds.
    pub fn tier_distribution(&self) -> BTreeMap<DifficultyLevel, usize> {
        tier_distribution(
            self.pairs.iter().map(ColorPair::distance),
            &self.settings.difficulty,
        )
    }

    /// Tiers that had no pairs when the dataset was loaded.
    pub fn empty_tiers(&self) -> &[DifficultyLevel] {
        &self.empty_tiers
    }

    /// The pool member closest to a sampled point.
    pub fn closest(&self, point: Hsb) -> Option<&ColorSample> {
        self.selector.closest_to_point(point)
    }

    /// The `k` pool members closest to a sampled point.
    pub fn nearest_to_point(&self, point: Hsb, k: usize) -> Vec<&ColorSample> {
        self.selector.nearest_to_point(point, k)
    }

    /// The `k` colors most similar to `color`, excluding itself.
    pub fn k_nearest(&self, color: &ColorSample, k: usize) -> Vec<ColorSample> {
        self.selector.k_nearest(color, k)
    }
}

impl ColorDatabase for ColorRepository {
    fn all_colors(&self) -> &[ColorSample] {
        &self.colors
    }
}
