//! TOML-based forecast configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;

use crate::model::engine::{DEFAULT_HORIZON_DAYS, DEFAULT_LOCATIONS, MAX_HORIZON_DAYS};
use crate::model::noise::DEFAULT_NOISE_STD;
use crate::model::types::parse_date;
use crate::weather::SyntheticWeather;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the weekly forecast. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::weekly`]
/// for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Locations, horizon and randomness.
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Synthetic weather distribution parameters.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Output artifact paths.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Locations, horizon and randomness.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Beaches to forecast, in output order.
    pub locations: Vec<String>,
    /// Number of consecutive days to forecast (1 to 366).
    pub horizon_days: usize,
    /// Master random seed; unseeded runs draw from OS entropy.
    pub seed: Option<u64>,
    /// First forecast day as `YYYY-MM-DD`; defaults to today.
    pub start_date: Option<String>,
    /// Standard deviation of the relative prediction noise.
    pub noise_std: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            locations: DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            horizon_days: DEFAULT_HORIZON_DAYS,
            seed: None,
            start_date: None,
            noise_std: DEFAULT_NOISE_STD,
        }
    }
}

/// Synthetic weather distribution parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Mean temperature (°C).
    pub temperature_mean: f64,
    /// Temperature standard deviation (°C).
    pub temperature_std: f64,
    /// Mean wind speed (km/h).
    pub wind_speed_mean: f64,
    /// Wind speed standard deviation (km/h).
    pub wind_speed_std: f64,
    /// Mean relative humidity (%).
    pub humidity_mean: f64,
    /// Humidity standard deviation (%).
    pub humidity_std: f64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_mean: 25.0,
            temperature_std: 3.0,
            wind_speed_mean: 12.0,
            wind_speed_std: 4.0,
            humidity_mean: 70.0,
            humidity_std: 10.0,
        }
    }
}

impl WeatherConfig {
    /// Builds the synthetic weather generator around `rng`.
    pub fn build(&self, rng: StdRng) -> SyntheticWeather {
        SyntheticWeather::new(
            (self.temperature_mean, self.temperature_std),
            (self.wind_speed_mean, self.wind_speed_std),
            (self.humidity_mean, self.humidity_std),
            rng,
        )
    }

    /// Builds a generator seeded with `seed`, or from OS entropy when `None`.
    pub fn build_seeded(&self, seed: Option<u64>) -> SyntheticWeather {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        self.build(rng)
    }
}

/// Output artifact paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the JSON predictions file.
    pub json_path: String,
    /// Optional path of a CSV copy.
    pub csv_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "waste_predictions.json".to_string(),
            csv_path: None,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"forecast.horizon_days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the default weekly forecast for the four main beaches.
    pub fn weekly() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            weather: WeatherConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Returns the weekly forecast extended to every beach in the base table.
    pub fn all_beaches() -> Self {
        Self {
            forecast: ForecastConfig {
                locations: vec![
                    "Versova Beach".to_string(),
                    "Juhu Beach".to_string(),
                    "Marine Drive".to_string(),
                    "Chowpatty".to_string(),
                    "Bandra Bandstand".to_string(),
                ],
                ..ForecastConfig::default()
            },
            weather: WeatherConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Returns the monsoon-storm preset: hot, windy, and more uncertain.
    pub fn monsoon_storm() -> Self {
        Self {
            forecast: ForecastConfig {
                noise_std: 0.15,
                ..ForecastConfig::default()
            },
            weather: WeatherConfig {
                temperature_mean: 29.0,
                temperature_std: 2.0,
                wind_speed_mean: 30.0,
                wind_speed_std: 8.0,
                humidity_mean: 90.0,
                humidity_std: 5.0,
            },
            output: OutputConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["weekly", "all_beaches", "monsoon_storm"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "weekly" => Ok(Self::weekly()),
            "all_beaches" => Ok(Self::all_beaches()),
            "monsoon_storm" => Ok(Self::monsoon_storm()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolves the first forecast day, falling back to `today`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `forecast.start_date` is not a valid date.
    pub fn start_date_or(&self, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
        match self.forecast.start_date.as_deref() {
            Some(raw) => parse_date(raw).map_err(|e| ConfigError {
                field: "forecast.start_date".to_string(),
                message: e.to_string(),
            }),
            None => Ok(today),
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let fc = &self.forecast;

        if fc.locations.is_empty() {
            errors.push(ConfigError {
                field: "forecast.locations".into(),
                message: "must name at least one location".into(),
            });
        }
        for (i, name) in fc.locations.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("forecast.locations[{i}]"),
                    message: "must not be blank".into(),
                });
            }
        }
        if fc.horizon_days == 0 {
            errors.push(ConfigError {
                field: "forecast.horizon_days".into(),
                message: "must be > 0".into(),
            });
        } else if fc.horizon_days > MAX_HORIZON_DAYS {
            errors.push(ConfigError {
                field: "forecast.horizon_days".into(),
                message: format!("must be <= {MAX_HORIZON_DAYS}, got {}", fc.horizon_days),
            });
        }
        if !fc.noise_std.is_finite() || fc.noise_std < 0.0 {
            errors.push(ConfigError {
                field: "forecast.noise_std".into(),
                message: format!("must be finite and >= 0, got {}", fc.noise_std),
            });
        }
        if let Some(raw) = fc.start_date.as_deref() {
            if let Err(e) = parse_date(raw) {
                errors.push(ConfigError {
                    field: "forecast.start_date".into(),
                    message: e.to_string(),
                });
            }
        }

        let w = &self.weather;
        let params = [
            ("temperature", w.temperature_mean, w.temperature_std),
            ("wind_speed", w.wind_speed_mean, w.wind_speed_std),
            ("humidity", w.humidity_mean, w.humidity_std),
        ];
        for (name, mean, std) in params {
            if !mean.is_finite() {
                errors.push(ConfigError {
                    field: format!("weather.{name}_mean"),
                    message: format!("must be finite, got {mean}"),
                });
            }
            if !std.is_finite() || std < 0.0 {
                errors.push(ConfigError {
                    field: format!("weather.{name}_std"),
                    message: format!("must be finite and >= 0, got {std}"),
                });
            }
        }

        if self.output.json_path.trim().is_empty() {
            errors.push(ConfigError {
                field: "output.json_path".into(),
                message: "must not be empty".into(),
            });
        }

        errors
    }
}
