//! Core prediction types: output records, derived features, and input errors.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Confidence attached to every prediction.
///
/// The heuristic model has no per-prediction uncertainty estimate, so this
/// is reported unchanged on each record.
pub const MODEL_CONFIDENCE: f64 = 0.87;

/// Multiplicative factors that produced a prediction, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    /// Weather multiplier in \[0.5, 2.0\].
    pub weather_impact: f64,
    /// Season multiplier (1.0, 1.2 or 1.4).
    pub seasonal_impact: f64,
    /// Day-of-week multiplier (1.0, 1.1 or 1.3).
    pub activity_impact: f64,
}

/// One predicted waste amount for a (location, date) pair.
///
/// The serialized form is the contract consumed by the dashboard:
///
/// ```json
/// {
///   "location": "Juhu Beach",
///   "date": "2025-04-16",
///   "predicted_waste_kg": 290.0,
///   "confidence": 0.87,
///   "factors": {
///     "weather_impact": 1.0,
///     "seasonal_impact": 1.0,
///     "activity_impact": 1.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Beach name as given by the caller.
    pub location: String,
    /// Forecast day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Predicted collectable waste in kg, one decimal place, never negative.
    pub predicted_waste_kg: f64,
    /// Fixed model confidence, see [`MODEL_CONFIDENCE`].
    pub confidence: f64,
    /// Factor breakdown.
    pub factors: FactorBreakdown,
}

impl fmt::Display for PredictionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<18} | {:>7.1} kg | weather={:.2}  season={:.2}  activity={:.2}",
            self.date,
            self.location,
            self.predicted_waste_kg,
            self.factors.weather_impact,
            self.factors.seasonal_impact,
            self.factors.activity_impact,
        )
    }
}

/// Derived model inputs for one prediction.
///
/// Weather fields already have defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Day of week, 0 = Monday .. 6 = Sunday.
    pub day_of_week: u32,
    /// Month, 1-12.
    pub month: u32,
    /// Temperature (°C).
    pub temperature: f64,
    /// Wind speed (km/h).
    pub wind_speed: f64,
    /// Relative humidity (%).
    pub humidity: f64,
}

/// An input of the wrong fundamental shape, such as an unparsable date.
///
/// Reported to the caller as-is; nothing retries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    /// The offending raw input.
    pub input: String,
    /// What was expected instead.
    pub message: String,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input \"{}\": {}", self.input, self.message)
    }
}

impl std::error::Error for InvalidInput {}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`InvalidInput`] if `s` is not a valid calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, InvalidInput> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| InvalidInput {
        input: s.to_string(),
        message: format!("expected a date as YYYY-MM-DD ({e})"),
    })
}

/// Rounds `value` half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
