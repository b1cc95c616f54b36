//! Named color samples and the categories they belong to.
//!
//! A [`ColorSample`] is the immutable, name-keyed unit every other component
//! works with. RGB and HSB are derived on demand from the stored hex string.

use crate::color::{hsb_components, rgb_components, Hsb, Rgb};
use crate::error::HueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Closed set of color families used to group the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorCategory {
    Yellows,
    Blues,
    Reds,
    Greens,
    Purples,
    Oranges,
    Neutrals,
    #[serde(rename = "Earth Tones")]
    Earth,
    Pastels,
    #[serde(rename = "Jewel Tones")]
    Jewel,
}

const CATEGORIES: &[ColorCategory] = &[
    ColorCategory::Yellows,
    ColorCategory::Blues,
    ColorCategory::Reds,
    ColorCategory::Greens,
    ColorCategory::Purples,
    ColorCategory::Oranges,
    ColorCategory::Neutrals,
    ColorCategory::Earth,
    ColorCategory::Pastels,
    ColorCategory::Jewel,
];

impl ColorCategory {
    pub fn all() -> &'static [ColorCategory] {
        CATEGORIES
    }

    /// Display label, e.g. `"Earth Tones"`.
    pub fn label(self) -> &'static str {
        match self {
            ColorCategory::Yellows => "Yellows",
            ColorCategory::Blues => "Blues",
            ColorCategory::Reds => "Reds",
            ColorCategory::Greens => "Greens",
            ColorCategory::Purples => "Purples",
            ColorCategory::Oranges => "Oranges",
            ColorCategory::Neutrals => "Neutrals",
            ColorCategory::Earth => "Earth Tones",
            ColorCategory::Pastels => "Pastels",
            ColorCategory::Jewel => "Jewel Tones",
        }
    }

    /// Lenient mapping used for dataset rows: unknown labels become
    /// `Neutrals` so a single odd row cannot break loading.
    pub fn from_label(label: &str) -> ColorCategory {
        label.parse().unwrap_or_else(|_| {
            log::debug!("unknown category '{label}', filing under Neutrals");
            ColorCategory::Neutrals
        })
    }
}

impl FromStr for ColorCategory {
    type Err = HueError;

    /// Case-insensitive; accepts the display label, the short name
    /// (`"earth"`, `"jewel"`) and kebab/underscore variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', '_'], " ");
        let category = match key.as_str() {
            "yellows" => ColorCategory::Yellows,
            "blues" => ColorCategory::Blues,
            "reds" => ColorCategory::Reds,
            "greens" => ColorCategory::Greens,
            "purples" => ColorCategory::Purples,
            "oranges" => ColorCategory::Oranges,
            "neutrals" => ColorCategory::Neutrals,
            "earth" | "earth tones" => ColorCategory::Earth,
            "pastels" => ColorCategory::Pastels,
            "jewel" | "jewel tones" => ColorCategory::Jewel,
            _ => return Err(HueError::UnknownCategory(s.to_string())),
        };
        Ok(category)
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One raw dataset row as produced by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub name: String,
    pub hex: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// A named color. Equality and hashing use the name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSample {
    name: String,
    #[serde(rename = "hex")]
    hex_value: String,
    description: String,
    category: ColorCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment: Option<String>,
}

impl ColorSample {
    pub fn new(name: &str, hex_value: &str, category: ColorCategory) -> Self {
        Self {
            name: name.to_string(),
            hex_value: hex_value.to_string(),
            description: String::new(),
            category,
            environment: None,
        }
    }

    /// Builder-style setter for the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Builder-style setter for the environment tag.
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environment = Some(environment.to_string());
        self
    }

    /// Builds a sample from a raw row. Never fails: the category falls back
    /// to `Neutrals` and the hex is only interpreted when colors are derived.
    pub fn from_record(record: ColorRecord) -> Self {
        let environment = record
            .environment
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self {
            name: record.name.trim().to_string(),
            hex_value: record.hex.trim().to_string(),
            description: record.description,
            category: ColorCategory::from_label(&record.category),
            environment,
        }
    }

    /// Unique display name; also the identity of the sample.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hex string exactly as loaded, not normalized.
    pub fn hex_value(&self) -> &str {
        &self.hex_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The category the sample is paired within.
    pub fn category(&self) -> ColorCategory {
        self.category
    }

    /// Scene tag such as `"forest"`, if any.
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// RGB decoded leniently from the hex string; malformed hex gives black.
    pub fn rgb(&self) -> Rgb {
        rgb_components(&self.hex_value)
    }

    /// HSB derived from [`ColorSample::rgb`].
    pub fn hsb(&self) -> Hsb {
        hsb_components(self.rgb())
    }
}

impl PartialEq for ColorSample {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ColorSample {}

impl Hash for ColorSample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_name_only() {
        let a = ColorSample::new("Red", "#FF0000", ColorCategory::Reds);
        let b = ColorSample::new("Red", "#EE0000", ColorCategory::Oranges);
        let c = ColorSample::new("Blue", "#FF0000", ColorCategory::Reds);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn derived_components_come_from_hex() {
        let blue = ColorSample::new("Blue", "#0000FF", ColorCategory::Blues);
        assert_eq!(blue.rgb(), Rgb::from_bytes(0, 0, 255));
        let hsb = blue.hsb();
        assert!((hsb.hue - 240.0).abs() < 1e-9);
        assert!((hsb.saturation - 1.0).abs() < 1e-9);
        assert!((hsb.brightness - 1.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_hex_derives_black() {
        let broken = ColorSample::new("Broken", "#nope", ColorCategory::Neutrals);
        assert_eq!(broken.rgb(), Rgb::BLACK);
        assert_eq!(broken.hsb().brightness, 0.0);
    }

    #[test]
    fn from_record_trims_and_maps_category() {
        let sample = ColorSample::from_record(ColorRecord {
            name: " Sienna ".into(),
            hex: " #A0522D".into(),
            category: "Earth Tones".into(),
            description: "Burnt clay".into(),
            environment: Some("desert".into()),
        });
        assert_eq!(sample.name(), "Sienna");
        assert_eq!(sample.hex_value(), "#A0522D");
        assert_eq!(sample.category(), ColorCategory::Earth);
        assert_eq!(sample.description(), "Burnt clay");
        assert_eq!(sample.environment(), Some("desert"));
    }

    #[test]
    fn from_record_drops_blank_environment() {
        let sample = ColorSample::from_record(ColorRecord {
            name: "Ivory".into(),
            hex: "#FFFFF0".into(),
            category: "neutrals".into(),
            description: String::new(),
            environment: Some("  ".into()),
        });
        assert_eq!(sample.environment(), None);
    }

    #[test]
    fn unknown_category_label_falls_back_to_neutrals() {
        assert_eq!(ColorCategory::from_label("teals"), ColorCategory::Neutrals);
    }

    #[test]
    fn category_parsing_accepts_common_spellings() {
        assert_eq!("REDS".parse::<ColorCategory>().unwrap(), ColorCategory::Reds);
        assert_eq!("earth".parse::<ColorCategory>().unwrap(), ColorCategory::Earth);
        assert_eq!(
            "jewel-tones".parse::<ColorCategory>().unwrap(),
            ColorCategory::Jewel
        );
        assert!(matches!(
            "teals".parse::<ColorCategory>(),
            Err(HueError::UnknownCategory(_))
        ));
    }

    #[test]
    fn every_label_parses_back_to_its_category() {
        for &category in ColorCategory::all() {
            assert_eq!(category.label().parse::<ColorCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&ColorCategory::Jewel).unwrap();
        assert_eq!(json, "\"Jewel Tones\"");
    }

    #[test]
    fn record_deserializes_with_optional_fields_missing() {
        let record: ColorRecord =
            serde_json::from_str(r##"{"name":"Teal","hex":"#008080","category":"Blues"}"##)
                .unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.environment, None);
    }
}
