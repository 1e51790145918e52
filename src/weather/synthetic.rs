//! Synthetic daily weather drawn from independent normal distributions.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use super::types::{WeatherReading, WeatherSource};

/// Generates one weather reading per day with Gaussian variation.
///
/// Each field is sampled independently as `mean + std * z` with
/// `z ~ N(0, 1)`. The defaults match the Mumbai coastline profile:
/// temperature N(25, 3) °C, wind N(12, 4) km/h, humidity N(70, 10) %.
///
/// # Examples
///
/// ```
/// use beach_waste_forecast::weather::{SyntheticWeather, WeatherSource};
/// use chrono::NaiveDate;
///
/// let mut weather = SyntheticWeather::seeded(42);
/// let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
/// let reading = weather.reading_for(day);
/// assert!(reading.temperature.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticWeather {
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

    rng: StdRng,
}

impl SyntheticWeather {
    /// Creates a generator with explicit distribution parameters.
    ///
    /// Negative standard deviations are clamped to zero, which turns the
    /// field into a constant.
    ///
    /// # Arguments
    ///
    /// * `temperature` - `(mean, std)` of temperature in °C
    /// * `wind_speed` - `(mean, std)` of wind speed in km/h
    /// * `humidity` - `(mean, std)` of relative humidity in %
    /// * `rng` - Random number generator driving the samples
    pub fn new(
        temperature: (f64, f64),
        wind_speed: (f64, f64),
        humidity: (f64, f64),
        rng: StdRng,
    ) -> Self {
        Self {
            temperature_mean: temperature.0,
            temperature_std: temperature.1.max(0.0),
            wind_speed_mean: wind_speed.0,
            wind_speed_std: wind_speed.1.max(0.0),
            humidity_mean: humidity.0,
            humidity_std: humidity.1.max(0.0),
            rng,
        }
    }

    /// Default coastline profile with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(
            (25.0, 3.0),
            (12.0, 4.0),
            (70.0, 10.0),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Default coastline profile seeded from OS entropy.
    pub fn from_os_rng() -> Self {
        Self::new((25.0, 3.0), (12.0, 4.0), (70.0, 10.0), StdRng::from_os_rng())
    }

    fn draw(&mut self, mean: f64, std: f64) -> f64 {
        if std <= 0.0 {
            return mean;
        }
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std * z
    }
}

impl WeatherSource for SyntheticWeather {
    fn reading_for(&mut self, _date: NaiveDate) -> WeatherReading {
        // Draw order is temperature, wind, humidity so seeded runs stay stable.
        let temperature = self.draw(self.temperature_mean, self.temperature_std);
        let wind_speed = self.draw(self.wind_speed_mean, self.wind_speed_std);
        let humidity = self.draw(self.humidity_mean, self.humidity_std);
        WeatherReading::new(temperature, wind_speed, humidity)
    }

    fn source_name(&self) -> &'static str {
        "synthetic"
    }
}

/// Returns the same reading for every day.
///
/// Useful for what-if runs ("a week of storms") and for pinning the weather
/// factor in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWeather {
    /// Reading returned for every date.
    pub reading: WeatherReading,
}

impl FixedWeather {
    /// Creates a source that always yields `reading`.
    pub fn new(reading: WeatherReading) -> Self {
        Self { reading }
    }
}

impl WeatherSource for FixedWeather {
    fn reading_for(&mut self, _date: NaiveDate) -> WeatherReading {
        self.reading
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).expect("valid date")
    }

    #[test]
    fn seed_determinism() {
        let mut w1 = SyntheticWeather::seeded(7);
        let mut w2 = SyntheticWeather::seeded(7);
        for d in 1..=10 {
            assert_eq!(w1.reading_for(day(d)), w2.reading_for(day(d)));
        }
    }

    #[test]
    fn zero_std_yields_the_mean() {
        let mut w = SyntheticWeather::new(
            (30.0, 0.0),
            (5.0, 0.0),
            (80.0, -2.0),
            StdRng::seed_from_u64(1),
        );
        assert_eq!(w.humidity_std, 0.0);
        let r = w.reading_for(day(1));
        assert_eq!(r, WeatherReading::new(30.0, 5.0, 80.0));
    }

    #[test]
    fn samples_center_on_configured_means() {
        let mut w = SyntheticWeather::seeded(42);
        let n = 2000;
        let mut temp_sum = 0.0;
        let mut wind_sum = 0.0;
        let mut hum_sum = 0.0;
        for i in 0..n {
            let r = w.reading_for(day(1 + (i % 28) as u32));
            temp_sum += r.temperature_c();
            wind_sum += r.wind_speed_kmh();
            hum_sum += r.humidity_pct();
        }
        let n = n as f64;
        assert!((temp_sum / n - 25.0).abs() < 0.5, "temp mean {}", temp_sum / n);
        assert!((wind_sum / n - 12.0).abs() < 0.5, "wind mean {}", wind_sum / n);
        assert!((hum_sum / n - 70.0).abs() < 1.5, "humidity mean {}", hum_sum / n);
    }

    #[test]
    fn fixed_weather_repeats_reading() {
        let reading = WeatherReading::new(33.0, 40.0, 90.0);
        let mut w = FixedWeather::new(reading);
        assert_eq!(w.reading_for(day(1)), reading);
        assert_eq!(w.reading_for(day(20)), reading);
        assert_eq!(w.source_name(), "fixed");
    }
}
