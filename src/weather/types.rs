//! Common types and traits for weather inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Temperature assumed when a reading omits it (°C).
pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
/// Wind speed assumed when a reading omits it (km/h).
pub const DEFAULT_WIND_SPEED_KMH: f64 = 10.0;
/// Relative humidity assumed when a reading omits it (%).
pub const DEFAULT_HUMIDITY_PCT: f64 = 70.0;

/// One day's weather observation or forecast for the whole coastline.
///
/// Every field is optional so partial feeds are accepted; the accessor
/// methods substitute the documented defaults for missing values.
///
/// # Examples
///
/// ```
/// use beach_waste_forecast::weather::WeatherReading;
///
/// let partial = WeatherReading {
///     temperature: Some(31.0),
///     ..WeatherReading::default()
/// };
/// assert_eq!(partial.temperature_c(), 31.0);
/// assert_eq!(partial.wind_speed_kmh(), 10.0);
/// assert_eq!(partial.humidity_pct(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Air temperature in degrees Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Wind speed in km/h.
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Relative humidity in percent.
    #[serde(default)]
    pub humidity: Option<f64>,
}

impl WeatherReading {
    /// Creates a reading with every field present.
    pub fn new(temperature: f64, wind_speed: f64, humidity: f64) -> Self {
        Self {
            temperature: Some(temperature),
            wind_speed: Some(wind_speed),
            humidity: Some(humidity),
        }
    }

    /// Temperature in °C, or 25 when missing.
    pub fn temperature_c(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE_C)
    }

    /// Wind speed in km/h, or 10 when missing.
    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed.unwrap_or(DEFAULT_WIND_SPEED_KMH)
    }

    /// Relative humidity in %, or 70 when missing.
    pub fn humidity_pct(&self) -> f64 {
        self.humidity.unwrap_or(DEFAULT_HUMIDITY_PCT)
    }
}

/// Trait for anything that can supply the weather for a forecast day.
///
/// The batch generator asks for exactly one reading per day and shares it
/// across every location forecast on that day.
pub trait WeatherSource {
    /// Returns the reading to use for `date`.
    ///
    /// # Arguments
    ///
    /// * `date` - Calendar day being forecast
    fn reading_for(&mut self, date: NaiveDate) -> WeatherReading;

    /// Returns a human-readable name for the source.
    fn source_name(&self) -> &'static str;
}
