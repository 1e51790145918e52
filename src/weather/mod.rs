//! Weather inputs for the forecast: reading type, source trait, and generators.

/// Normally distributed synthetic weather generator.
pub mod synthetic;
pub mod types;

pub use synthetic::{FixedWeather, SyntheticWeather};
pub use types::{WeatherReading, WeatherSource};
