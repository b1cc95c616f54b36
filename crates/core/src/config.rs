//! Tunable settings for the engine.
//!
//! Every constant the comparison pipeline depends on lives in [`Settings`].
//! Settings are read from a partial JSON object: missing keys take their
//! default, present keys must have the right JSON type.

use crate::compare::ComparisonThresholds;
use crate::difficulty::DifficultyThresholds;
use crate::error::HueError;
use crate::pair::HsbTolerance;
use crate::selector::DEFAULT_CACHE_PRECISION;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default retry bound for random pair selection.
pub const DEFAULT_RANDOM_ATTEMPTS: usize = 32;

/// Upper bound for `cache_precision`; beyond this quantization is pointless.
const MAX_CACHE_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: DifficultyThresholds,
    pub comparison: ComparisonThresholds,
    pub cache_precision: u32,
    pub random_attempts: usize,
    pub hsb_tolerance: HsbTolerance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyThresholds::default(),
            comparison: ComparisonThresholds::default(),
            cache_precision: DEFAULT_CACHE_PRECISION,
            random_attempts: DEFAULT_RANDOM_ATTEMPTS,
            hsb_tolerance: HsbTolerance::default(),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(name: &str, expected: &str, got: &Value) -> HueError {
    HueError::SettingsTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: json_type(got).to_string(),
    }
}

/// Reads `params[name]` as `f64`; missing keys yield `default`.
fn read_f64(params: &Value, name: &str, default: f64) -> Result<f64, HueError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| mismatch(name, "number", v)),
    }
}

/// Reads `params[name]` as a non-negative integer; missing keys yield `default`.
fn read_u64(params: &Value, name: &str, default: u64) -> Result<u64, HueError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .ok_or_else(|| mismatch(name, "non-negative integer", v)),
    }
}

/// Returns the nested object at `params[name]`, an empty object when missing.
fn read_section(params: &Value, name: &str) -> Result<Value, HueError> {
    match params.get(name) {
        None => Ok(Value::Object(serde_json::Map::new())),
        Some(v @ Value::Object(_)) => Ok(v.clone()),
        Some(v) => Err(mismatch(name, "object", v)),
    }
}

impl Settings {
    /// Reads settings from a (possibly partial) JSON object and validates
    /// them.
    pub fn from_json(params: &Value) -> Result<Self, HueError> {
        if !params.is_object() {
            return Err(mismatch("settings", "object", params));
        }
        let defaults = Settings::default();

        let d = read_section(params, "difficulty")?;
        let difficulty = DifficultyThresholds {
            expert: read_f64(&d, "expert", defaults.difficulty.expert)?,
            advanced: read_f64(&d, "advanced", defaults.difficulty.advanced)?,
            intermediate: read_f64(&d, "intermediate", defaults.difficulty.intermediate)?,
        };

        let c = read_section(params, "comparison")?;
        let comparison = ComparisonThresholds {
            hue_min_degrees: read_f64(&c, "hue_min_degrees", defaults.comparison.hue_min_degrees)?,
            hue_hint_degrees: read_f64(
                &c,
                "hue_hint_degrees",
                defaults.comparison.hue_hint_degrees,
            )?,
            minor: read_f64(&c, "minor", defaults.comparison.minor)?,
            major: read_f64(&c, "major", defaults.comparison.major)?,
        };

        let t = read_section(params, "hsb_tolerance")?;
        let hsb_tolerance = HsbTolerance {
            hue: read_f64(&t, "hue", defaults.hsb_tolerance.hue)?,
            saturation: read_f64(&t, "saturation", defaults.hsb_tolerance.saturation)?,
            brightness: read_f64(&t, "brightness", defaults.hsb_tolerance.brightness)?,
        };

        let cache_precision = read_u64(
            params,
            "cache_precision",
            defaults.cache_precision as u64,
        )?;
        let random_attempts = read_u64(
            params,
            "random_attempts",
            defaults.random_attempts as u64,
        )?;

        let settings = Settings {
            difficulty,
            comparison,
            cache_precision: u32::try_from(cache_precision).unwrap_or(u32::MAX),
            random_attempts: usize::try_from(random_attempts).unwrap_or(usize::MAX),
            hsb_tolerance,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every section, the cache precision bound and the tolerance.
    pub fn validate(&self) -> Result<(), HueError> {
        self.difficulty.validate()?;
        self.comparison.validate()?;
        if self.cache_precision > MAX_CACHE_PRECISION {
            return Err(HueError::InvalidThresholds(format!(
                "cache_precision must be at most {MAX_CACHE_PRECISION}, got {}",
                self.cache_precision
            )));
        }
        let t = &self.hsb_tolerance;
        if [t.hue, t.saturation, t.brightness]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(HueError::InvalidThresholds(format!(
                "hsb tolerance must be finite and non-negative, got {t:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_defaults() {
        let settings = Settings::from_json(&json!({})).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_sections_override_only_given_keys() {
        let settings = Settings::from_json(&json!({
            "difficulty": {"intermediate": 30},
            "comparison": {"major": 0.08},
            "random_attempts": 5
        }))
        .unwrap();
        assert_eq!(settings.difficulty.expert, 5.0);
        assert_eq!(settings.difficulty.intermediate, 30.0);
        assert_eq!(settings.comparison.major, 0.08);
        assert_eq!(settings.comparison.minor, 0.02);
        assert_eq!(settings.random_attempts, 5);
        assert_eq!(settings.cache_precision, 2);
    }

    #[test]
    fn wrong_type_is_reported_with_key() {
        let err = Settings::from_json(&json!({"cache_precision": "two"})).unwrap_err();
        match err {
            HueError::SettingsTypeMismatch {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "cache_precision");
                assert_eq!(expected, "non-negative integer");
                assert_eq!(got, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn section_must_be_an_object() {
        let err = Settings::from_json(&json!({"difficulty": [1, 2, 3]})).unwrap_err();
        assert!(matches!(err, HueError::SettingsTypeMismatch { .. }));
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(Settings::from_json(&json!("strict")).is_err());
    }

    #[test]
    fn inconsistent_thresholds_fail_validation() {
        let err = Settings::from_json(&json!({
            "difficulty": {"expert": 20, "advanced": 15}
        }))
        .unwrap_err();
        assert!(matches!(err, HueError::InvalidThresholds(_)));
    }

    #[test]
    fn excessive_cache_precision_is_rejected() {
        assert!(Settings::from_json(&json!({"cache_precision": 9})).is_err());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        assert!(Settings::from_json(&json!({"hsb_tolerance": {"hue": -5}})).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, restored);
    }
}
