//! Shared test fixtures for integration tests.

use beach_waste_forecast::model::{GaussianNoise, NoNoise, PredictionEngine};
use beach_waste_forecast::weather::{FixedWeather, SyntheticWeather, WeatherReading};
use chrono::NaiveDate;

/// Builds a date, panicking on invalid input.
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A Wednesday in April: seasonal and activity factors are both 1.0.
pub fn neutral_day() -> NaiveDate {
    ymd(2025, 4, 16)
}

/// Weather that yields a weather factor of exactly 1.0.
pub fn neutral_weather() -> FixedWeather {
    FixedWeather::new(WeatherReading::new(25.0, 10.0, 70.0))
}

/// Engine with noise forced to zero.
pub fn deterministic_engine() -> PredictionEngine<NoNoise> {
    PredictionEngine::new(NoNoise)
}

/// Seeded engine and weather pair matching the CLI's seeding scheme.
pub fn seeded_pair(seed: u64) -> (PredictionEngine<GaussianNoise>, SyntheticWeather) {
    (
        PredictionEngine::new(GaussianNoise::new(0.1, seed)),
        SyntheticWeather::seeded(seed.wrapping_add(57)),
    )
}
