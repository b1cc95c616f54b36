#![deny(unsafe_code)]
//! Core types for the hue-knew color discrimination trainer.
//!
//! Provides HSB conversion (`Rgb`, `Hsb`), the perceptual `distance` metric,
//! the human-readable `compare` characteristics, difficulty tiers, nearest
//! color selection with a memoizing `Selector`, and the `ColorRepository`
//! that turns a dataset of named colors into quiz pairs.

pub mod builtin;
pub mod color;
pub mod compare;
pub mod config;
pub mod database;
pub mod difficulty;
pub mod distance;
pub mod error;
pub mod pair;
pub mod prng;
pub mod sample;
pub mod selector;

pub use color::{Hsb, Level, Rgb, Temperature};
pub use compare::{compare, learning_notes, Characteristic, ComparisonThresholds, HueFamily};
pub use config::Settings;
pub use database::{load_dataset, ColorDatabase, ColorRepository};
pub use difficulty::{classify, DifficultyLevel, DifficultyThresholds};
pub use distance::distance;
pub use error::HueError;
pub use pair::{ColorPair, HsbFilter, HsbTolerance, PairFilter};
pub use prng::Xorshift64;
pub use sample::{ColorCategory, ColorRecord, ColorSample};
pub use selector::{closest, k_nearest, Selector};
