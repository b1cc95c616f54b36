#![deny(unsafe_code)]
//! CLI binary for the hue-knew color trainer.
//!
//! Subcommands:
//! - `list`, `environments`: browse the dataset
//! - `compare <a> <b>`: distance, tier, characteristics and notes
//! - `classify <score>`: tier for a raw distance
//! - `nearest <color>`, `sample <point>`: nearest named colors
//! - `pairs`, `random`: quiz pairs, filtered
//! - `stats`: tier distribution self-check

mod error;
mod loader;

use clap::{ArgAction, Args, Parser, Subcommand};
use error::CliError;
use hue_knew_core::builtin::builtin_records;
use hue_knew_core::compare::characteristics;
use hue_knew_core::{
    learning_notes, load_dataset, ColorCategory, ColorDatabase, ColorPair, ColorRepository,
    ColorSample, DifficultyLevel, DifficultyThresholds, Hsb, HueError, PairFilter, Rgb, Settings,
    Xorshift64,
};
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "hue-knew", about = "Color discrimination trainer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Dataset file (.json or .tsv). Defaults to the built-in colors.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Settings file (JSON, partial objects allowed).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// PRNG seed for reproducible random picks.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Default)]
#[group(multiple = false)]
struct FilterArgs {
    /// Only pairs in this category (e.g. "blues", "earth tones").
    #[arg(long)]
    category: Option<String>,

    /// Only pairs in this tier (beginner, intermediate, advanced, expert).
    #[arg(long)]
    difficulty: Option<String>,

    /// Only pairs with a color near this point, given as "h,s,b".
    #[arg(long)]
    hsb: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List colors, optionally by category or environment.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        environment: Option<String>,
    },
    /// List environment tags.
    Environments,
    /// Compare two colors given by name or hex value.
    Compare { a: String, b: String },
    /// Map a distance score to a difficulty tier.
    Classify {
        #[arg(allow_negative_numbers = true)]
        score: f64,
    },
    /// The colors most similar to a named color or hex value.
    Nearest {
        color: String,
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
    /// The named colors closest to a sampled point ("#RRGGBB" or "h,s,b").
    Sample {
        point: String,
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
    /// List generated pairs.
    Pairs {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Pick a random pair.
    Random {
        #[command(flatten)]
        filter: FilterArgs,

        /// Pair ids to avoid ("Primary-Comparison"); repeatable.
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Show the tier distribution of the loaded pairs.
    Stats,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn open_repository(cli: &Cli) -> Result<ColorRepository, CliError> {
    let settings = match &cli.config {
        Some(path) => loader::load_settings(path)?,
        None => Settings::default(),
    };
    let records = match &cli.data {
        Some(path) => loader::load_records(path)?,
        None => builtin_records(),
    };
    Ok(load_dataset(records, settings))
}

/// Parses "h,s,b" into a point.
fn parse_hsb(text: &str) -> Result<Hsb, CliError> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| CliError::Input(format!("invalid HSB point '{text}': {e}")))?;
    match parts.as_slice() {
        &[hue, saturation, brightness] => {
            if !(0.0..=360.0).contains(&hue)
                || !(0.0..=1.0).contains(&saturation)
                || !(0.0..=1.0).contains(&brightness)
            {
                return Err(CliError::Input(format!(
                    "HSB point '{text}' out of range (hue 0-360, saturation and brightness 0-1)"
                )));
            }
            Ok(Hsb::new(hue % 360.0, saturation, brightness))
        }
        _ => Err(CliError::Input(format!(
            "HSB point '{text}' must have three components"
        ))),
    }
}

/// A point given as hex or "h,s,b".
fn parse_point(text: &str) -> Result<Hsb, CliError> {
    if text.contains(',') {
        parse_hsb(text)
    } else {
        Rgb::from_hex(text)
            .map(Rgb::to_hsb)
            .map_err(|e| CliError::Input(e.to_string()))
    }
}

/// Resolves a dataset name, falling back to an ad-hoc color for hex input.
fn resolve_color(repo: &ColorRepository, text: &str) -> Result<ColorSample, CliError> {
    if let Some(found) = repo.color_named(text) {
        return Ok(found.clone());
    }
    match Rgb::from_hex(text) {
        Ok(rgb) => {
            let hex = rgb.to_hex();
            Ok(ColorSample::new(&hex, &hex, ColorCategory::Neutrals))
        }
        Err(_) => Err(HueError::UnknownColor(text.to_string()).into()),
    }
}

fn build_filter(repo: &ColorRepository, args: &FilterArgs) -> Result<PairFilter, CliError> {
    if let Some(category) = &args.category {
        return Ok(PairFilter::Category(category.parse()?));
    }
    if let Some(level) = &args.difficulty {
        return Ok(PairFilter::Difficulty(level.parse()?));
    }
    if let Some(point) = &args.hsb {
        return Ok(PairFilter::Hsb(repo.hsb_filter(parse_hsb(point)?)));
    }
    Ok(PairFilter::All)
}

fn pair_json(pair: &ColorPair, thresholds: &DifficultyThresholds) -> serde_json::Value {
    json!({
        "id": pair.id(),
        "primary": pair.primary,
        "comparison": pair.comparison,
        "category": pair.category.label(),
        "distance": pair.distance(),
        "difficulty": pair.difficulty(thresholds).label(),
        "learning_notes": pair.learning_notes,
    })
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let repo = open_repository(&cli)?;
    let thresholds = repo.settings().difficulty;

    match &cli.command {
        Command::List {
            category,
            environment,
        } => {
            let category: Option<ColorCategory> =
                category.as_deref().map(str::parse).transpose()?;
            let colors: Vec<&ColorSample> = match environment {
                Some(env) => repo.colors_for_environment(env),
                None => repo.all_colors().iter().collect(),
            };
            let colors: Vec<&ColorSample> = colors
                .into_iter()
                .filter(|c| category.map_or(true, |cat| c.category() == cat))
                .collect();
            if cli.json {
                print_json(&json!(colors))?;
            } else {
                for c in colors {
                    println!("{:<16} {} {}", c.name(), c.hex_value(), c.category());
                }
            }
        }
        Command::Environments => {
            let envs = repo.available_environments();
            if cli.json {
                print_json(&json!(envs))?;
            } else {
                for env in envs {
                    println!("{env}");
                }
            }
        }
        Command::Compare { a, b } => {
            let a = resolve_color(&repo, a)?;
            let b = resolve_color(&repo, b)?;
            let comparison = &repo.settings().comparison;
            let traits: Vec<String> = characteristics(&a, &b, comparison)
                .iter()
                .map(ToString::to_string)
                .collect();
            let distance = hue_knew_core::distance(&a, &b);
            let level = thresholds.classify(distance);
            let notes = learning_notes(&a, &b, comparison);
            if cli.json {
                print_json(&json!({
                    "a": a,
                    "b": b,
                    "distance": distance,
                    "difficulty": level.label(),
                    "characteristics": traits,
                    "learning_notes": notes,
                }))?;
            } else {
                println!("{} ({}) vs {} ({})", a.name(), a.hex_value(), b.name(), b.hex_value());
                println!("distance:   {distance:.2}");
                println!("difficulty: {level}");
                println!("traits:     {}", traits.join(", "));
                println!("{notes}");
            }
        }
        Command::Classify { score } => {
            let level = thresholds.classify(*score);
            if cli.json {
                print_json(&json!({"score": score, "difficulty": level.label()}))?;
            } else {
                println!("{level}");
            }
        }
        Command::Nearest { color, k } => {
            let color = resolve_color(&repo, color)?;
            let nearest = repo.k_nearest(&color, *k);
            let rows: Vec<(ColorSample, f64)> = nearest
                .into_iter()
                .map(|c| {
                    let d = hue_knew_core::distance(&color, &c);
                    (c, d)
                })
                .collect();
            if cli.json {
                let rows: Vec<_> = rows
                    .iter()
                    .map(|(c, d)| json!({"color": c, "distance": d}))
                    .collect();
                print_json(&json!({"query": color, "nearest": rows}))?;
            } else {
                for (c, d) in rows {
                    println!("{:<16} {} {d:.2}", c.name(), c.hex_value());
                }
            }
        }
        Command::Sample { point, k } => {
            let point = parse_point(point)?;
            let nearest = repo.nearest_to_point(point, *k);
            if cli.json {
                print_json(&json!({"point": point, "nearest": nearest}))?;
            } else {
                for c in nearest {
                    println!("{:<16} {}", c.name(), c.hex_value());
                }
            }
        }
        Command::Pairs { filter } => {
            let filter = build_filter(&repo, filter)?;
            let pairs = repo.get_pairs(&filter);
            if cli.json {
                let rows: Vec<_> = pairs.iter().map(|p| pair_json(p, &thresholds)).collect();
                print_json(&json!(rows))?;
            } else {
                for p in pairs {
                    println!(
                        "{:<32} {:>6.2} {}",
                        p.id(),
                        p.distance(),
                        p.difficulty(&thresholds)
                    );
                }
            }
        }
        Command::Random { filter, exclude } => {
            let filter = build_filter(&repo, filter)?;
            let excluding: HashSet<String> = exclude.iter().cloned().collect();
            let mut rng = cli.seed.map_or_else(Xorshift64::from_time, Xorshift64::new);
            let pair = repo
                .random_pair(&filter, &excluding, &mut rng)
                .ok_or_else(|| CliError::Input("no pairs match the filter".into()))?;
            if cli.json {
                print_json(&pair_json(pair, &thresholds))?;
            } else {
                println!("{}", pair.id());
                println!(
                    "distance {:.2}, {}",
                    pair.distance(),
                    pair.difficulty(&thresholds)
                );
                println!("{}", pair.learning_notes);
            }
        }
        Command::Stats => {
            let distribution = repo.tier_distribution();
            if cli.json {
                let tiers: serde_json::Map<String, serde_json::Value> = distribution
                    .iter()
                    .map(|(level, n)| (level.label().to_string(), json!(n)))
                    .collect();
                let empty: Vec<&str> = repo
                    .empty_tiers()
                    .iter()
                    .map(|l: &DifficultyLevel| l.label())
                    .collect();
                print_json(&json!({
                    "colors": repo.all_colors().len(),
                    "pairs": repo.pairs().len(),
                    "tiers": tiers,
                    "empty_tiers": empty,
                }))?;
            } else {
                println!("colors: {}", repo.all_colors().len());
                println!("pairs:  {}", repo.pairs().len());
                for (level, n) in &distribution {
                    println!("  {:<13} {n}", level.label());
                }
                for level in repo.empty_tiers() {
                    println!("warning: no {level} pairs");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> ColorRepository {
        ColorRepository::load(builtin_records())
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flags_are_mutually_exclusive() {
        let parsed = Cli::try_parse_from([
            "hue-knew",
            "pairs",
            "--category",
            "reds",
            "--difficulty",
            "expert",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn hsb_points_parse_and_validate() {
        let p = parse_hsb("180, 0.5, 0.5").unwrap();
        assert_eq!((p.hue, p.saturation, p.brightness), (180.0, 0.5, 0.5));
        assert_eq!(parse_hsb("360,1,1").unwrap().hue, 0.0);
        assert_eq!(parse_hsb("400,0.5,0.5").unwrap_err().exit_code(), 12);
        assert_eq!(parse_hsb("1,2").unwrap_err().exit_code(), 12);
        assert_eq!(parse_hsb("a,b,c").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn points_accept_hex() {
        let p = parse_point("#0000FF").unwrap();
        assert!((p.hue - 240.0).abs() < 1e-9);
        assert!(parse_point("#GG0000").is_err());
    }

    #[test]
    fn colors_resolve_by_name_then_hex() {
        let repo = builtin();
        assert_eq!(resolve_color(&repo, "navy").unwrap().name(), "Navy");
        let adhoc = resolve_color(&repo, "#abcdef").unwrap();
        assert_eq!(adhoc.name(), "#ABCDEF");
        assert_eq!(resolve_color(&repo, "Mauve").unwrap_err().exit_code(), 10);
    }

    #[test]
    fn filters_build_from_flags() {
        let repo = builtin();
        let args = FilterArgs {
            category: Some("jewel tones".into()),
            ..FilterArgs::default()
        };
        assert_eq!(
            build_filter(&repo, &args).unwrap(),
            PairFilter::Category(ColorCategory::Jewel)
        );

        let args = FilterArgs {
            difficulty: Some("nonsense".into()),
            ..FilterArgs::default()
        };
        assert_eq!(build_filter(&repo, &args).unwrap_err().exit_code(), 10);

        let args = FilterArgs {
            hsb: Some("180,0.5,0.5".into()),
            ..FilterArgs::default()
        };
        match build_filter(&repo, &args).unwrap() {
            PairFilter::Hsb(f) => assert_eq!(f.hue_range, 150.0..=210.0),
            other => panic!("unexpected filter {other:?}"),
        }

        assert_eq!(
            build_filter(&repo, &FilterArgs::default()).unwrap(),
            PairFilter::All
        );
    }

    #[test]
    fn pair_json_carries_derived_fields() {
        let repo = builtin();
        let pair = repo.pair("Gamboge-Indian Yellow").unwrap();
        let value = pair_json(pair, &DifficultyThresholds::default());
        assert_eq!(value["difficulty"], "Expert");
        assert_eq!(value["primary"]["hex"], "#E49B0F");
        assert!(value["distance"].as_f64().unwrap() < 5.0);
    }
}
