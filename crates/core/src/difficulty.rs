//! Difficulty tiers derived from perceptual distance.
//!
//! Closer colors are harder to tell apart, so a smaller distance maps to a
//! harder tier. Tiers are never stored; they are recomputed from the distance
//! on demand so that retuning the thresholds reclassifies every pair at once.

use crate::error::HueError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

const LEVELS: &[DifficultyLevel] = &[
    DifficultyLevel::Beginner,
    DifficultyLevel::Intermediate,
    DifficultyLevel::Advanced,
    DifficultyLevel::Expert,
];

impl DifficultyLevel {
    /// All tiers, easiest first.
    pub fn all() -> &'static [DifficultyLevel] {
        LEVELS
    }

    /// Display label, e.g. `"Expert"`.
    pub fn label(self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyLevel {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            "expert" | "hard" => Ok(DifficultyLevel::Expert),
            _ => Err(HueError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Upper distance bounds (exclusive) for the three harder tiers; anything at
/// or above `intermediate` is `Beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyThresholds {
    pub expert: f64,
    pub advanced: f64,
    pub intermediate: f64,
}

impl Default for DifficultyThresholds {
    fn default() -> Self {
        Self {
            expert: 5.0,
            advanced: 15.0,
            intermediate: 35.0,
        }
    }
}

impl DifficultyThresholds {
    /// Cut-offs must be finite and strictly increasing, otherwise a tier
    /// would be unreachable or the step function would not be monotonic.
    pub fn validate(&self) -> Result<(), HueError> {
        let cuts = [self.expert, self.advanced, self.intermediate];
        if cuts.iter().any(|c| !c.is_finite()) {
            return Err(HueError::InvalidThresholds(format!(
                "difficulty thresholds must be finite, got {cuts:?}"
            )));
        }
        if !(0.0 < self.expert && self.expert < self.advanced && self.advanced < self.intermediate)
        {
            return Err(HueError::InvalidThresholds(format!(
                "difficulty thresholds must satisfy 0 < expert < advanced < intermediate, got {cuts:?}"
            )));
        }
        Ok(())
    }

    /// Maps a distance score to a tier. Non-increasing in difficulty as the
    /// score grows. NaN is treated as maximally different.
    pub fn classify(&self, score: f64) -> DifficultyLevel {
        if score < self.expert {
            DifficultyLevel::Expert
        } else if score < self.advanced {
            DifficultyLevel::Advanced
        } else if score < self.intermediate {
            DifficultyLevel::Intermediate
        } else {
            DifficultyLevel::Beginner
        }
    }
}

/// Classifies with the default thresholds.
pub fn classify(score: f64) -> DifficultyLevel {
    DifficultyThresholds::default().classify(score)
}

/// Counts scores per tier. Every tier is present in the map, possibly with 0.
pub fn tier_distribution<I>(
    scores: I,
    thresholds: &DifficultyThresholds,
) -> BTreeMap<DifficultyLevel, usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut counts: BTreeMap<DifficultyLevel, usize> =
        LEVELS.iter().map(|&level| (level, 0)).collect();
    for score in scores {
        *counts.entry(thresholds.classify(score)).or_default() += 1;
    }
    counts
}

/// Tiers with no members. Logs the distribution and warns per empty tier;
/// an empty input yields no warnings since nothing is loaded yet.
pub fn check_tiers(distribution: &BTreeMap<DifficultyLevel, usize>) -> Vec<DifficultyLevel> {
    let total: usize = distribution.values().sum();
    if total == 0 {
        return Vec::new();
    }
    log::info!("difficulty distribution over {total} pairs: {distribution:?}");
    let empty: Vec<DifficultyLevel> = LEVELS
        .iter()
        .copied()
        .filter(|level| distribution.get(level).copied().unwrap_or(0) == 0)
        .collect();
    for level in &empty {
        log::warn!("no pairs fall into the {level} tier; check the difficulty thresholds");
    }
    empty
}
