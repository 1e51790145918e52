//! Beach waste forecast entry point — CLI wiring and config-driven batch run.

use std::path::Path;
use std::process;

use chrono::Local;
use tracing::info;

use beach_waste_forecast::config::ScenarioConfig;
use beach_waste_forecast::io::export::{export_csv, export_json};
use beach_waste_forecast::logging;
use beach_waste_forecast::model::{BatchSummary, GaussianNoise, PredictionEngine};

/// Seed offset for the weather RNG to avoid correlation with prediction noise.
const WEATHER_SEED_OFFSET: u64 = 57;

/// Parsed CLI arguments.
#[derive(Default)]
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    start_date: Option<String>,
    days: Option<usize>,
    locations: Option<Vec<String>>,
    out: Option<String>,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("beach-waste-forecast — heuristic beach waste predictions for cleanup planning");
    eprintln!();
    eprintln!("Usage: beach-waste-forecast [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Seed noise and weather for a reproducible run");
    eprintln!("  --start-date <date>      First forecast day as YYYY-MM-DD (default: today)");
    eprintln!("  --days <n>               Forecast horizon in days (default: 7)");
    eprintln!("  --locations <a,b,...>    Comma-separated beach names");
    eprintln!("  --out <path>             JSON output path (default: waste_predictions.json)");
    eprintln!("  --csv-out <path>         Also export predictions to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the weekly preset is used.");
    eprintln!("Set RUST_LOG=debug for per-prediction diagnostics.");
}

/// Returns the value following flag `args[*i]`, advancing `i`.
fn flag_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(flag_value(&args, &mut i, "a name argument").to_string());
            }
            "--seed" => {
                let raw = flag_value(&args, &mut i, "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--start-date" => {
                cli.start_date = Some(flag_value(&args, &mut i, "a date argument").to_string());
            }
            "--days" => {
                let raw = flag_value(&args, &mut i, "a day count");
                if let Ok(d) = raw.parse::<usize>() {
                    cli.days = Some(d);
                } else {
                    eprintln!("error: --days value \"{raw}\" is not a valid day count");
                    process::exit(1);
                }
            }
            "--locations" => {
                let raw = flag_value(&args, &mut i, "a comma-separated list");
                cli.locations = Some(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "--out" => {
                cli.out = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            "--csv-out" => {
                cli.csv_out = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Applies command-line overrides on top of the loaded scenario.
fn apply_overrides(scenario: &mut ScenarioConfig, cli: CliArgs) {
    if let Some(seed) = cli.seed_override {
        scenario.forecast.seed = Some(seed);
    }
    if let Some(date) = cli.start_date {
        scenario.forecast.start_date = Some(date);
    }
    if let Some(days) = cli.days {
        scenario.forecast.horizon_days = days;
    }
    if let Some(locations) = cli.locations {
        scenario.forecast.locations = locations;
    }
    if let Some(out) = cli.out {
        scenario.output.json_path = out;
    }
    if let Some(csv_out) = cli.csv_out {
        scenario.output.csv_path = Some(csv_out);
    }
}

fn main() {
    logging::init();
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then weekly default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::weekly())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    apply_overrides(&mut scenario, cli);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let start = scenario
        .start_date_or(Local::now().date_naive())
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });

    let fc = &scenario.forecast;
    let noise = match fc.seed {
        Some(seed) => GaussianNoise::new(fc.noise_std, seed),
        None => GaussianNoise::from_os_rng(fc.noise_std),
    };
    let mut weather = scenario
        .weather
        .build_seeded(fc.seed.map(|s| s.wrapping_add(WEATHER_SEED_OFFSET)));
    let mut engine = PredictionEngine::new(noise);

    let predictions =
        engine.generate_batch(fc.locations.as_slice(), fc.horizon_days, start, &mut weather);

    let json_path = Path::new(&scenario.output.json_path);
    if let Err(e) = export_json(&predictions, json_path) {
        eprintln!("error: failed to write {}: {e}", json_path.display());
        process::exit(1);
    }
    info!(path = %json_path.display(), "wrote predictions");

    if let Some(ref csv_path) = scenario.output.csv_path {
        if let Err(e) = export_csv(&predictions, Path::new(csv_path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("CSV written to {csv_path}");
    }

    println!("Generated {} predictions", predictions.len());
    if let Some(first) = predictions.first() {
        println!("Sample prediction:");
        match serde_json::to_string_pretty(first) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("warning: cannot render sample prediction: {e}"),
        }
    }

    println!("\n{}", BatchSummary::from_records(&predictions));
}
