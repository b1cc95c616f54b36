//! Dataset and settings ingestion.
//!
//! Datasets come as JSON (`{"colors": [...]}` or a bare array of rows) or as
//! TSV with a `name hex category description [environment]` header. Rows are
//! returned raw; interpretation happens in the core repository.

use crate::error::CliError;
use hue_knew_core::{ColorRecord, HueError, Settings};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const TSV_COLUMNS: [&str; 5] = ["name", "hex", "category", "description", "environment"];

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { colors: Vec<ColorRecord> },
    Bare(Vec<ColorRecord>),
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))
}

/// Loads dataset rows from a `.json` or `.tsv` file.
pub fn load_records(path: &Path) -> Result<Vec<ColorRecord>, CliError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let text = read(path)?;
    let records = match extension.as_deref() {
        Some("json") => parse_json(&text)?,
        Some("tsv") | Some("txt") => parse_tsv(&text)?,
        _ => {
            return Err(CliError::Input(format!(
                "unsupported dataset format: {} (expected .json or .tsv)",
                path.display()
            )))
        }
    };
    log::info!("read {} rows from {}", records.len(), path.display());
    Ok(records)
}

pub fn parse_json(text: &str) -> Result<Vec<ColorRecord>, HueError> {
    let file: DatasetFile = serde_json::from_str(text)
        .map_err(|e| HueError::Dataset(format!("invalid JSON dataset: {e}")))?;
    Ok(match file {
        DatasetFile::Wrapped { colors } => colors,
        DatasetFile::Bare(colors) => colors,
    })
}

/// Parses tab-separated rows. Blank lines are skipped; the first non-blank
/// line must be the header. Missing trailing columns default to empty.
pub fn parse_tsv(text: &str) -> Result<Vec<ColorRecord>, HueError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| HueError::Dataset("empty TSV dataset".into()))?;
    let columns: Vec<String> = header
        .split('\t')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();
    if columns.len() < 3 || columns[..3] != TSV_COLUMNS[..3] {
        return Err(HueError::Dataset(format!(
            "TSV header must start with name, hex, category; got '{header}'"
        )));
    }

    let mut records = Vec::new();
    for (index, line) in lines {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < 3 || fields[0].is_empty() || fields[1].is_empty() {
            return Err(HueError::Dataset(format!(
                "line {}: expected at least name, hex and category",
                index + 1
            )));
        }
        let field = |i: usize| fields.get(i).copied().unwrap_or_default();
        records.push(ColorRecord {
            name: field(0).to_string(),
            hex: field(1).to_string(),
            category: field(2).to_string(),
            description: field(3).to_string(),
            environment: Some(field(4)).filter(|e| !e.is_empty()).map(str::to_string),
        });
    }
    Ok(records)
}

/// Reads and validates a settings file.
pub fn load_settings(path: &Path) -> Result<Settings, CliError> {
    let text = read(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))?;
    Ok(Settings::from_json(&value)?)
}
