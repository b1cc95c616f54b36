//! Seedable PRNG for quiz selection.
//!
//! Random pair and distractor picks go through [`Xorshift64`] so a given seed
//! replays the same quiz. Pure integer arithmetic; identical on every
//! platform.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Xorshift64 (shifts 13, 7, 17). A zero seed is replaced by a fixed
/// non-zero constant since zero is a fixed point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x4855_454B_4E45_5721;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Seeds from the wall clock, for interactive use where replay does not
    /// matter.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform index in `[0, len)`, or `None` when `len` is 0.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| (self.next_u64() % len as u64) as usize)
    }

    /// Uniformly picks one element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).map(|i| &items[i])
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}
