//! Multiplicative adjustment factors and the per-location base amounts.
//!
//! Everything here is a pure function of its arguments plus the constant
//! tables below.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use super::types::FeatureVector;
use crate::weather::WeatherReading;

/// Base amount (kg) for locations missing from [`BASE_AMOUNTS_KG`].
pub const DEFAULT_BASE_AMOUNT_KG: f64 = 200.0;

/// Typical collectable waste per cleanup at each known beach (kg).
pub const BASE_AMOUNTS_KG: &[(&str, f64)] = &[
    ("Versova Beach", 380.0),
    ("Juhu Beach", 290.0),
    ("Marine Drive", 150.0),
    ("Chowpatty", 200.0),
    ("Bandra Bandstand", 180.0),
];

/// Lower bound of the weather multiplier.
pub const WEATHER_FACTOR_MIN: f64 = 0.5;
/// Upper bound of the weather multiplier.
pub const WEATHER_FACTOR_MAX: f64 = 2.0;

const REFERENCE_TEMPERATURE_C: f64 = 25.0;
const TEMPERATURE_SENSITIVITY: f64 = 0.02;
const REFERENCE_WIND_KMH: f64 = 10.0;
const WIND_SENSITIVITY: f64 = 0.03;

/// Coarse season of the Mumbai coastline, keyed by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// June to September.
    Monsoon,
    /// October to March.
    Tourist,
    /// April and May.
    Off,
}

impl Season {
    /// Classifies a month number (1-12). Out-of-range months are `Off`.
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=9 => Season::Monsoon,
            10..=12 | 1..=3 => Season::Tourist,
            _ => Season::Off,
        }
    }

    /// Season containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_month(date.month())
    }

    /// Waste multiplier for the season.
    pub fn factor(self) -> f64 {
        match self {
            Season::Monsoon => 1.4,
            Season::Tourist => 1.2,
            Season::Off => 1.0,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Monsoon => "monsoon",
            Season::Tourist => "tourist",
            Season::Off => "off-season",
        };
        f.write_str(name)
    }
}

/// Looks up the base waste amount for a location.
///
/// Unknown names fall back to [`DEFAULT_BASE_AMOUNT_KG`]; matching is exact.
///
/// # Examples
///
/// ```
/// use beach_waste_forecast::model::factors::base_amount;
///
/// assert_eq!(base_amount("Versova Beach"), 380.0);
/// assert_eq!(base_amount("Aksa Beach"), 200.0);
/// ```
pub fn base_amount(location: &str) -> f64 {
    BASE_AMOUNTS_KG
        .iter()
        .find(|(name, _)| *name == location)
        .map(|(_, kg)| *kg)
        .unwrap_or(DEFAULT_BASE_AMOUNT_KG)
}

/// Returns `true` if `location` has its own entry in the base table.
pub fn is_known_location(location: &str) -> bool {
    BASE_AMOUNTS_KG.iter().any(|(name, _)| *name == location)
}

/// Weather multiplier from temperature and wind speed.
///
/// Heat and wind both push more debris onto the sand:
///
/// ```text
/// temp = 1 + (temperature - 25) * 0.02
/// wind = 1 + (wind_speed - 10) * 0.03
/// factor = clamp(temp * wind, 0.5, 2.0)
/// ```
///
/// Humidity is not used. A NaN product saturates to the upper bound 2.0.
pub fn weather_factor(reading: &WeatherReading) -> f64 {
    let temp = 1.0 + (reading.temperature_c() - REFERENCE_TEMPERATURE_C) * TEMPERATURE_SENSITIVITY;
    let wind = 1.0 + (reading.wind_speed_kmh() - REFERENCE_WIND_KMH) * WIND_SENSITIVITY;
    let product = temp * wind;
    if product.is_nan() {
        return WEATHER_FACTOR_MAX;
    }
    product.clamp(WEATHER_FACTOR_MIN, WEATHER_FACTOR_MAX)
}

/// Seasonal multiplier: 1.4 in the monsoon, 1.2 in tourist season, else 1.0.
pub fn seasonal_factor(date: NaiveDate) -> f64 {
    Season::of(date).factor()
}

/// Day-of-week multiplier: 1.3 on weekends, 1.1 on Fridays, else 1.0.
pub fn activity_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => 1.3,
        Weekday::Fri => 1.1,
        _ => 1.0,
    }
}

/// Derives the feature vector for a date and reading.
pub fn extract_features(date: NaiveDate, reading: &WeatherReading) -> FeatureVector {
    FeatureVector {
        day_of_week: date.weekday().num_days_from_monday(),
        month: date.month(),
        temperature: reading.temperature_c(),
        wind_speed: reading.wind_speed_kmh(),
        humidity: reading.humidity_pct(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn known_locations_return_tabulated_amounts() {
        assert_eq!(base_amount("Versova Beach"), 380.0);
        assert_eq!(base_amount("Juhu Beach"), 290.0);
        assert_eq!(base_amount("Marine Drive"), 150.0);
        assert_eq!(base_amount("Chowpatty"), 200.0);
        assert_eq!(base_amount("Bandra Bandstand"), 180.0);
    }

    #[test]
    fn unknown_locations_default_to_200() {
        for name in ["", "Gorai Beach", "juhu beach", "Versova Beach "] {
            assert_eq!(base_amount(name), DEFAULT_BASE_AMOUNT_KG, "location {name:?}");
            assert!(!is_known_location(name));
        }
    }

    #[test]
    fn neutral_weather_gives_unit_factor() {
        let reading = WeatherReading::new(25.0, 10.0, 70.0);
        assert_eq!(weather_factor(&reading), 1.0);
        assert_eq!(weather_factor(&WeatherReading::default()), 1.0);
    }

    #[test]
    fn weather_factor_combines_temperature_and_wind() {
        // 1.1 * 1.15
        let reading = WeatherReading::new(30.0, 15.0, 70.0);
        assert!((weather_factor(&reading) - 1.265).abs() < 1e-12);
    }

    #[test]
    fn weather_factor_stays_clamped() {
        for temp in [-40.0, -5.0, 0.0, 25.0, 45.0, 120.0, 1e9] {
            for wind in [-50.0, 0.0, 10.0, 60.0, 200.0, -1e9] {
                let f = weather_factor(&WeatherReading::new(temp, wind, 70.0));
                assert!(
                    (WEATHER_FACTOR_MIN..=WEATHER_FACTOR_MAX).contains(&f),
                    "temp={temp} wind={wind} gave {f}"
                );
            }
        }
        let storm = WeatherReading::new(40.0, 80.0, 95.0);
        assert_eq!(weather_factor(&storm), WEATHER_FACTOR_MAX);
        let calm_cold = WeatherReading::new(0.0, 0.0, 50.0);
        assert_eq!(weather_factor(&calm_cold), WEATHER_FACTOR_MIN);
    }

    #[test]
    fn nan_weather_saturates_high() {
        let reading = WeatherReading::new(f64::NAN, 10.0, 70.0);
        assert_eq!(weather_factor(&reading), WEATHER_FACTOR_MAX);
        let reading = WeatherReading::new(25.0, f64::NAN, 70.0);
        assert_eq!(weather_factor(&reading), WEATHER_FACTOR_MAX);
    }

    #[test]
    fn seasonal_factor_by_month() {
        for month in 1..=12 {
            let expected = match month {
                6..=9 => 1.4,
                10..=12 | 1..=3 => 1.2,
                _ => 1.0,
            };
            assert_eq!(seasonal_factor(ymd(2025, month, 15)), expected, "month {month}");
        }
        assert_eq!(Season::of(ymd(2025, 7, 1)), Season::Monsoon);
        assert_eq!(Season::from_month(13), Season::Off);
    }

    #[test]
    fn activity_factor_by_weekday() {
        // 2025-04-14 is a Monday.
        let expected = [1.0, 1.0, 1.0, 1.0, 1.1, 1.3, 1.3];
        for (offset, want) in expected.iter().enumerate() {
            let date = ymd(2025, 4, 14 + offset as u32);
            assert_eq!(activity_factor(date), *want, "{date}");
        }
    }

    #[test]
    fn features_apply_weather_defaults() {
        let reading = WeatherReading {
            wind_speed: Some(22.0),
            ..WeatherReading::default()
        };
        let f = extract_features(ymd(2025, 4, 20), &reading);
        assert_eq!(f.day_of_week, 6);
        assert_eq!(f.month, 4);
        assert_eq!(f.temperature, 25.0);
        assert_eq!(f.wind_speed, 22.0);
        assert_eq!(f.humidity, 70.0);
    }
}
