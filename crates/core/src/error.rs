//! Error types for the Hue Knew core.
//!
//! The comparison algorithms themselves are total and never fail; these
//! errors only surface at construction and validation seams (strict hex
//! parsing, settings, category parsing, dataset ingestion).

use thiserror::Error;

/// Errors produced by core construction and validation.
#[derive(Debug, Error)]
pub enum HueError {
    /// A color string could not be parsed by the strict parser.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Difficulty or comparison thresholds are not internally consistent.
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// A settings key existed but had the wrong JSON type.
    #[error("settings type mismatch for '{name}': expected {expected}, got {got}")]
    SettingsTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A category label did not match any known category.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A difficulty label did not match any known tier.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// No color with the given name exists in the dataset.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// The dataset could not be ingested.
    #[error("dataset error: {0}")]
    Dataset(String),
}
