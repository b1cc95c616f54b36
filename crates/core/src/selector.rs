//! Nearest-color lookup over a pool of samples.
//!
//! The free functions are pure linear scans. [`Selector`] owns an immutable
//! pool and memoizes point-sample queries (continuous camera sampling hits
//! the same quantized point over and over). The memo is keyed on the
//! quantized HSB point and `k`, is never invalidated because the pool never
//! changes, and is safe to share across threads.

use crate::color::Hsb;
use crate::distance::{distance, hsb_distance};
use crate::sample::ColorSample;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Returns the pool member closest to `point`, or `None` for an empty pool.
/// Ties keep the earliest member.
pub fn closest<'a>(point: Hsb, pool: &'a [ColorSample]) -> Option<&'a ColorSample> {
    let mut best: Option<(&ColorSample, f64)> = None;
    for candidate in pool {
        let d = hsb_distance(point, candidate.hsb());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(sample, _)| sample)
}

/// Size-bounded ascending list of `(distance, index)` pairs.
///
/// Inserting keeps the list sorted; once it holds `k` entries the worst is
/// evicted. Equal distances keep insertion order.
struct Ranking {
    k: usize,
    entries: Vec<(f64, usize)>,
}

impl Ranking {
    fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k.saturating_add(1).min(64)),
        }
    }

    fn offer(&mut self, d: f64, index: usize) {
        if self.k == 0 {
            return;
        }
        if self.entries.len() == self.k {
            match self.entries.last() {
                Some(&(worst, _)) if d >= worst => return,
                _ => {}
            }
        }
        let at = self.entries.partition_point(|&(e, _)| e <= d);
        self.entries.insert(at, (d, index));
        if self.entries.len() > self.k {
            self.entries.pop();
        }
    }

    fn indices(self) -> Vec<usize> {
        self.entries.into_iter().map(|(_, i)| i).collect()
    }
}

fn rank_by<F>(pool: &[ColorSample], k: usize, mut score: F) -> Vec<usize>
where
    F: FnMut(&ColorSample) -> Option<f64>,
{
    let mut ranking = Ranking::new(k);
    for (index, candidate) in pool.iter().enumerate() {
        if let Some(d) = score(candidate) {
            ranking.offer(d, index);
        }
    }
    ranking.indices()
}

/// The `k` pool members closest to `color`, ascending by distance.
///
/// The query color itself (matched by name) is excluded. Returns fewer than
/// `k` results when the pool is smaller.
pub fn k_nearest(color: &ColorSample, pool: &[ColorSample], k: usize) -> Vec<ColorSample> {
    let query = color.hsb();
    rank_by(pool, k, |candidate| {
        (candidate != color).then(|| hsb_distance(query, candidate.hsb()))
    })
    .into_iter()
    .map(|i| pool[i].clone())
    .collect()
}

/// The `k` pool members closest to a raw HSB point, ascending by distance.
pub fn k_nearest_to_point(point: Hsb, pool: &[ColorSample], k: usize) -> Vec<ColorSample> {
    nearest_indices(point, pool, k)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

fn nearest_indices(point: Hsb, pool: &[ColorSample], k: usize) -> Vec<usize> {
    rank_by(pool, k, |candidate| Some(hsb_distance(point, candidate.hsb())))
}

/// Quantized HSB point used as the memo key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    hue: i64,
    saturation: i64,
    brightness: i64,
}

impl PointKey {
    /// Rounds each component to `precision` decimal places.
    pub fn quantize(point: Hsb, precision: u32) -> Self {
        let scale = 10_f64.powi(precision as i32);
        let q = |v: f64| if v.is_finite() { (v * scale).round() as i64 } else { 0 };
        Self {
            hue: q(point.hue),
            saturation: q(point.saturation),
            brightness: q(point.brightness),
        }
    }
}

/// Default rounding for memo keys: two decimal places.
pub const DEFAULT_CACHE_PRECISION: u32 = 2;

/// Nearest-color lookup over an immutable pool, with memoized point queries.
pub struct Selector {
    pool: Vec<ColorSample>,
    precision: u32,
    cache: Mutex<HashMap<(PointKey, usize), Vec<usize>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Selector {
    /// Selector with the default two-decimal cache keys.
    pub fn new(pool: Vec<ColorSample>) -> Self {
        Self::with_precision(pool, DEFAULT_CACHE_PRECISION)
    }

    /// Selector whose cache keys round to `precision` decimal places.
    pub fn with_precision(pool: Vec<ColorSample>, precision: u32) -> Self {
        Self {
            pool,
            precision,
            cache: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn pool(&self) -> &[ColorSample] {
        &self.pool
    }

    /// Closest pool member to a sampled point. Memoized.
    pub fn closest_to_point(&self, point: Hsb) -> Option<&ColorSample> {
        self.nearest_to_point(point, 1).into_iter().next()
    }

    /// The `k` closest pool members to a sampled point, ascending. Memoized
    /// per quantized point and `k`.
    pub fn nearest_to_point(&self, point: Hsb, k: usize) -> Vec<&ColorSample> {
        let key = (PointKey::quantize(point, self.precision), k);

        // A poisoned lock still holds a consistent map: entries are only
        // inserted whole.
        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();

        let indices = match cached {
            Some(indices) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                indices
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::trace!("selector cache miss for {key:?}");
                let indices = nearest_indices(point, &self.pool, k);
                self.cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, indices.clone());
                indices
            }
        };

        indices.into_iter().map(|i| &self.pool[i]).collect()
    }

    /// The `k` pool members closest to `color`, excluding `color` itself.
    /// Not memoized: named-color queries are user-driven and infrequent.
    pub fn k_nearest(&self, color: &ColorSample, k: usize) -> Vec<ColorSample> {
        k_nearest(color, &self.pool, k)
    }

    /// Distance from `color` to every pool member, ascending. Useful for
    /// catalog sorting.
    pub fn ranked_by_distance<'a>(&'a self, color: &ColorSample) -> Vec<(&'a ColorSample, f64)> {
        let mut ranked: Vec<(&ColorSample, f64)> = self
            .pool
            .iter()
            .map(|candidate| (candidate, distance(color, candidate)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    /// Point queries answered from the cache.
    pub fn cache_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::ColorCategory;
    use std::sync::Arc;
    use std::thread;

    fn sample(name: &str, hex: &str) -> ColorSample {
        ColorSample::new(name, hex, ColorCategory::Neutrals)
    }

    fn pool() -> Vec<ColorSample> {
        vec![
            sample("Red", "#FF0000"),
            sample("Blue", "#0000FF"),
            sample("Cyan", "#00FFFF"),
            sample("Crimson", "#DC143C"),
            sample("Navy", "#000080"),
            sample("Lemon", "#FFF700"),
        ]
    }

    fn names(samples: &[ColorSample]) -> Vec<&str> {
        samples.iter().map(ColorSample::name).collect()
    }

    #[test]
    fn closest_on_empty_pool_is_none() {
        assert!(closest(Hsb::new(0.0, 1.0, 1.0), &[]).is_none());
    }

    #[test]
    fn closest_finds_exact_match() {
        let pool = pool();
        let found = closest(Hsb::new(240.0, 1.0, 1.0), &pool).unwrap();
        assert_eq!(found.name(), "Blue");
    }

    #[test]
    fn closest_ties_keep_first() {
        let pool = vec![sample("First", "#FF0000"), sample("Second", "#FF0000")];
        assert_eq!(closest(Hsb::new(0.0, 1.0, 1.0), &pool).unwrap().name(), "First");
    }

    #[test]
    fn k_nearest_excludes_query_and_sorts_ascending() {
        let pool = pool();
        let blue = &pool[1];
        let result = k_nearest(blue, &pool, 3);
        assert_eq!(result.len(), 3);
        assert!(!result.contains(blue));
        // Navy ~7.5 (brightness only), Cyan 10 (60 degrees), Red 20.
        assert_eq!(names(&result), vec!["Navy", "Cyan", "Red"]);
        let ds: Vec<f64> = result.iter().map(|c| distance(blue, c)).collect();
        assert!(ds.windows(2).all(|w| w[0] <= w[1]), "{ds:?}");
    }

    #[test]
    fn k_larger_than_pool_returns_everything_else() {
        let pool = pool();
        let result = k_nearest(&pool[0], &pool, 50);
        assert_eq!(result.len(), pool.len() - 1);
        assert!(!result.contains(&pool[0]));
    }

    #[test]
    fn k_zero_and_empty_pool_return_nothing() {
        let pool = pool();
        assert!(k_nearest(&pool[0], &pool, 0).is_empty());
        assert!(k_nearest(&pool[0], &[], 3).is_empty());
        assert!(k_nearest_to_point(Hsb::new(0.0, 0.0, 0.0), &[], 3).is_empty());
    }

    #[test]
    fn point_query_includes_exact_match_first() {
        let pool = pool();
        let result = k_nearest_to_point(Hsb::new(0.0, 1.0, 1.0), &pool, 2);
        assert_eq!(names(&result), vec!["Red", "Crimson"]);
    }

    #[test]
    fn point_key_rounds_to_two_places() {
        let a = PointKey::quantize(Hsb::new(120.001, 0.5049, 0.25), 2);
        let b = PointKey::quantize(Hsb::new(119.996, 0.5012, 0.2549), 2);
        assert_eq!(a, b);
        let c = PointKey::quantize(Hsb::new(120.02, 0.5, 0.25), 2);
        assert_ne!(a, c);
    }

    #[test]
    fn selector_memoizes_repeated_point_queries() {
        let selector = Selector::new(pool());
        let point = Hsb::new(238.0, 0.97, 0.95);

        let first: Vec<String> = selector
            .nearest_to_point(point, 3)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(selector.cache_misses(), 1);
        assert_eq!(selector.cache_hits(), 0);

        let nudged = Hsb::new(238.001, 0.9701, 0.9499);
        let second: Vec<String> = selector
            .nearest_to_point(nudged, 3)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(first, second);
        assert_eq!(selector.cache_hits(), 1);
        assert_eq!(selector.cached_entries(), 1);
    }

    #[test]
    fn selector_keys_include_k() {
        let selector = Selector::new(pool());
        let point = Hsb::new(10.0, 0.5, 0.5);
        assert_eq!(selector.nearest_to_point(point, 1).len(), 1);
        assert_eq!(selector.nearest_to_point(point, 4).len(), 4);
        assert_eq!(selector.cache_misses(), 2);
    }

    #[test]
    fn selector_on_empty_pool_returns_nothing() {
        let selector = Selector::new(Vec::new());
        assert!(selector.closest_to_point(Hsb::new(0.0, 0.0, 0.0)).is_none());
        assert!(selector.nearest_to_point(Hsb::new(0.0, 0.0, 0.0), 3).is_empty());
    }

    #[test]
    fn selector_closest_matches_free_function() {
        let pool = pool();
        let selector = Selector::new(pool.clone());
        let point = Hsb::new(350.0, 0.9, 0.85);
        assert_eq!(
            selector.closest_to_point(point).map(ColorSample::name),
            closest(point, &pool).map(ColorSample::name)
        );
    }

    #[test]
    fn ranked_by_distance_starts_with_self() {
        let selector = Selector::new(pool());
        let red = sample("Red", "#FF0000");
        let ranked = selector.ranked_by_distance(&red);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].0.name(), "Red");
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn selector_is_shareable_across_threads() {
        let selector = Arc::new(Selector::new(pool()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let selector = Arc::clone(&selector);
                thread::spawn(move || {
                    for step in 0..50 {
                        let hue = ((i * 50 + step) % 360) as f64;
                        let found = selector.closest_to_point(Hsb::new(hue, 0.8, 0.8));
                        assert!(found.is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(selector.cache_hits() + selector.cache_misses(), 200);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn pool_strategy() -> impl Strategy<Value = Vec<ColorSample>> {
            prop::collection::vec(any::<(u8, u8, u8)>(), 1..20).prop_map(|rgbs| {
                rgbs.into_iter()
                    .enumerate()
                    .map(|(i, (r, g, b))| {
                        ColorSample::new(
                            &format!("c{i}"),
                            &format!("#{r:02X}{g:02X}{b:02X}"),
                            ColorCategory::Neutrals,
                        )
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn k_nearest_is_correct(pool in pool_strategy(), k in 0_usize..25, q in 0_usize..20) {
                let query = pool[q % pool.len()].clone();
                let result = k_nearest(&query, &pool, k);

                prop_assert_eq!(result.len(), k.min(pool.len() - 1));
                prop_assert!(!result.contains(&query));

                let ds: Vec<f64> = result.iter().map(|c| distance(&query, c)).collect();
                prop_assert!(ds.windows(2).all(|w| w[0] <= w[1]));

                if let Some(&worst) = ds.last() {
                    for other in pool.iter().filter(|c| **c != query && !result.contains(c)) {
                        prop_assert!(distance(&query, other) >= worst);
                    }
                }
            }

            #[test]
            fn closest_is_the_argmin(pool in pool_strategy(), h in 0.0_f64..360.0, s in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
                let point = Hsb::new(h, s, b);
                let best = closest(point, &pool).unwrap();
                let best_d = hsb_distance(point, best.hsb());
                for other in &pool {
                    prop_assert!(hsb_distance(point, other.hsb()) >= best_d);
                }
            }
        }
    }
}
