//! Prediction engine that composes factors, base amounts, and noise.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::factors::{self, Season};
use super::noise::NoiseSource;
use super::types::{FactorBreakdown, MODEL_CONFIDENCE, PredictionRecord, round_to};
use crate::weather::{WeatherReading, WeatherSource};

/// Number of days covered by a weekly batch.
pub const DEFAULT_HORIZON_DAYS: usize = 7;

/// Longest horizon accepted from configuration (one leap year).
pub const MAX_HORIZON_DAYS: usize = 366;

/// Beaches forecast when the caller does not name any.
pub const DEFAULT_LOCATIONS: &[&str] =
    &["Versova Beach", "Juhu Beach", "Marine Drive", "Chowpatty"];

/// Waste prediction engine.
///
/// Generic over `N: NoiseSource` for static dispatch. The noise source is
/// the only state; factor tables are constants, so predictions for
/// different (location, date) pairs are independent of each other.
///
/// # Examples
///
/// ```
/// use beach_waste_forecast::model::engine::PredictionEngine;
/// use beach_waste_forecast::model::noise::NoNoise;
/// use beach_waste_forecast::weather::WeatherReading;
/// use chrono::NaiveDate;
///
/// let mut engine = PredictionEngine::new(NoNoise);
/// let wednesday = NaiveDate::from_ymd_opt(2025, 4, 16).unwrap();
/// let record = engine.predict("Chowpatty", wednesday, &WeatherReading::new(25.0, 10.0, 70.0));
/// assert_eq!(record.predicted_waste_kg, 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct PredictionEngine<N: NoiseSource> {
    noise: N,
}

impl<N: NoiseSource> PredictionEngine<N> {
    /// Creates an engine drawing perturbations from `noise`.
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Predicts the collectable waste for one location on one day.
    ///
    /// Computes `base * weather * seasonal * activity`, applies one noise
    /// sample as `raw * (1 + n)`, clamps at zero, and rounds to 0.1 kg.
    ///
    /// # Arguments
    ///
    /// * `location` - Beach name; unknown names use the default base amount
    /// * `date` - Forecast day
    /// * `weather` - Weather for that day; missing fields use defaults
    ///
    /// # Returns
    ///
    /// A fresh `PredictionRecord` with factors rounded to 2 decimals.
    pub fn predict(
        &mut self,
        location: &str,
        date: NaiveDate,
        weather: &WeatherReading,
    ) -> PredictionRecord {
        if !factors::is_known_location(location) {
            warn!(location, "unknown location, using default base amount");
        }
        let base = factors::base_amount(location);
        let weather_impact = factors::weather_factor(weather);
        let seasonal_impact = factors::seasonal_factor(date);
        let activity_impact = factors::activity_factor(date);

        let raw = base * weather_impact * seasonal_impact * activity_impact;
        let n = self.noise.sample();
        let predicted = (raw * (1.0 + n)).max(0.0);

        let features = factors::extract_features(date, weather);
        debug!(
            location,
            %date,
            day_of_week = features.day_of_week,
            month = features.month,
            temperature = features.temperature,
            wind_speed = features.wind_speed,
            base,
            weather_impact,
            seasonal_impact,
            activity_impact,
            noise = n,
            predicted,
            "predicted waste"
        );

        PredictionRecord {
            location: location.to_string(),
            date,
            predicted_waste_kg: round_to(predicted, 1),
            confidence: MODEL_CONFIDENCE,
            factors: FactorBreakdown {
                weather_impact: round_to(weather_impact, 2),
                seasonal_impact: round_to(seasonal_impact, 2),
                activity_impact: round_to(activity_impact, 2),
            },
        }
    }

    /// Predicts every location for each day of a horizon.
    ///
    /// One weather reading is taken per day and shared by all locations on
    /// that day. Records are ordered by day ascending, then by location in
    /// input order.
    ///
    /// # Arguments
    ///
    /// * `locations` - Beaches to forecast, in output order
    /// * `horizon_days` - Number of consecutive days starting at `start`
    /// * `start` - First forecast day
    /// * `weather` - Source of the daily readings
    ///
    /// # Returns
    ///
    /// `horizon_days * locations.len()` records.
    pub fn generate_batch<S, W>(
        &mut self,
        locations: &[S],
        horizon_days: usize,
        start: NaiveDate,
        weather: &mut W,
    ) -> Vec<PredictionRecord>
    where
        S: AsRef<str>,
        W: WeatherSource + ?Sized,
    {
        let days = horizon_days
            .min(days_until_max(start))
            .min(MAX_HORIZON_DAYS);
        let mut records = Vec::with_capacity(days.saturating_mul(locations.len()));
        let mut next = Some(start);
        for _ in 0..horizon_days {
            let Some(date) = next else { break };
            next = date.succ_opt();
            let reading = weather.reading_for(date);
            debug!(%date, season = %Season::of(date), ?reading, "daily weather");
            for location in locations {
                records.push(self.predict(location.as_ref(), date, &reading));
            }
        }

        info!(
            records = records.len(),
            locations = locations.len(),
            horizon_days,
            %start,
            weather_source = weather.source_name(),
            "generated prediction batch"
        );
        records
    }

    /// Seven-day batch starting at `start`.
    pub fn generate_weekly_batch<S, W>(
        &mut self,
        locations: &[S],
        start: NaiveDate,
        weather: &mut W,
    ) -> Vec<PredictionRecord>
    where
        S: AsRef<str>,
        W: WeatherSource + ?Sized,
    {
        self.generate_batch(locations, DEFAULT_HORIZON_DAYS, start, weather)
    }
}

/// Number of days from `start` through `NaiveDate::MAX`, inclusive.
fn days_until_max(start: NaiveDate) -> usize {
    let span = NaiveDate::MAX.signed_duration_since(start).num_days();
    usize::try_from(span).map_or(usize::MAX, |d| d.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::noise::{GaussianNoise, NoNoise};
    use crate::weather::{FixedWeather, SyntheticWeather};

    /// Replays a fixed list of noise samples, then zeros.
    struct ScriptedNoise(Vec<f64>);

    impl NoiseSource for ScriptedNoise {
        fn sample(&mut self) -> f64 {
            if self.0.is_empty() { 0.0 } else { self.0.remove(0) }
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn neutral() -> WeatherReading {
        WeatherReading::new(25.0, 10.0, 70.0)
    }

    #[test]
    fn neutral_wednesday_in_april_returns_base_amount() {
        let mut engine = PredictionEngine::new(NoNoise);
        let record = engine.predict("Chowpatty", ymd(2025, 4, 16), &neutral());
        assert_eq!(record.predicted_waste_kg, 200.0);
        assert_eq!(record.confidence, MODEL_CONFIDENCE);
        assert_eq!(
            record.factors,
            FactorBreakdown {
                weather_impact: 1.0,
                seasonal_impact: 1.0,
                activity_impact: 1.0,
            }
        );
    }

    #[test]
    fn unknown_location_falls_back_to_default_base() {
        let mut engine = PredictionEngine::new(NoNoise);
        let record = engine.predict("Gorai Beach", ymd(2025, 4, 16), &neutral());
        assert!(!factors::is_known_location("Gorai Beach"));
        assert_eq!(record.predicted_waste_kg, factors::DEFAULT_BASE_AMOUNT_KG);
    }

    #[test]
    fn factors_multiply_into_prediction() {
        // Saturday in July: 380 * 1.0 * 1.4 * 1.3
        let mut engine = PredictionEngine::new(NoNoise);
        let record = engine.predict("Versova Beach", ymd(2025, 7, 5), &neutral());
        assert_eq!(record.predicted_waste_kg, 691.6);
        assert_eq!(record.factors.seasonal_impact, 1.4);
        assert_eq!(record.factors.activity_impact, 1.3);
    }

    #[test]
    fn noise_scales_prediction_and_clamps_at_zero() {
        let mut engine = PredictionEngine::new(ScriptedNoise(vec![0.1, -1.5]));
        let up = engine.predict("Chowpatty", ymd(2025, 4, 16), &neutral());
        assert_eq!(up.predicted_waste_kg, 220.0);
        let floored = engine.predict("Chowpatty", ymd(2025, 4, 16), &neutral());
        assert_eq!(floored.predicted_waste_kg, 0.0);
    }

    #[test]
    fn prediction_is_never_negative_under_heavy_noise() {
        let mut engine = PredictionEngine::new(GaussianNoise::new(3.0, 11));
        let mut weather = SyntheticWeather::seeded(11);
        let locations = ["Juhu Beach", "Nowhere"];
        let records = engine.generate_batch(&locations, 60, ymd(2025, 1, 1), &mut weather);
        assert_eq!(records.len(), 120);
        assert!(records.iter().all(|r| r.predicted_waste_kg >= 0.0));
    }

    #[test]
    fn batch_orders_by_day_then_location() {
        let mut engine = PredictionEngine::new(NoNoise);
        let mut weather = FixedWeather::new(neutral());
        let locations = ["Juhu Beach", "Marine Drive"];
        let records = engine.generate_batch(&locations, 3, ymd(2025, 4, 14), &mut weather);

        let order: Vec<(String, String)> = records
            .iter()
            .map(|r| (r.date.to_string(), r.location.clone()))
            .collect();
        let expected = [
            ("2025-04-14", "Juhu Beach"),
            ("2025-04-14", "Marine Drive"),
            ("2025-04-15", "Juhu Beach"),
            ("2025-04-15", "Marine Drive"),
            ("2025-04-16", "Juhu Beach"),
            ("2025-04-16", "Marine Drive"),
        ];
        assert_eq!(order.len(), expected.len());
        for (got, want) in order.iter().zip(expected) {
            assert_eq!((got.0.as_str(), got.1.as_str()), want);
        }
    }

    #[test]
    fn locations_on_the_same_day_share_weather() {
        let mut engine = PredictionEngine::new(NoNoise);
        let mut weather = SyntheticWeather::seeded(5);
        let locations = ["Versova Beach", "Chowpatty", "Bandra Bandstand"];
        let records = engine.generate_weekly_batch(&locations, ymd(2025, 10, 1), &mut weather);
        assert_eq!(records.len(), 21);
        for day in records.chunks(locations.len()) {
            assert!(day.iter().all(|r| r.date == day[0].date));
            assert!(
                day.iter()
                    .all(|r| r.factors.weather_impact == day[0].factors.weather_impact)
            );
        }
    }

    #[test]
    fn oversized_horizon_stops_at_last_representable_day() {
        let mut engine = PredictionEngine::new(NoNoise);
        let mut weather = FixedWeather::new(neutral());
        let locations = ["Juhu Beach", "Chowpatty"];
        let records =
            engine.generate_batch(&locations, usize::MAX / 2 + 1, NaiveDate::MAX, &mut weather);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date == NaiveDate::MAX));

        let horizon = 1_000_000_000_000;
        let records = engine.generate_batch(&["Juhu Beach"], horizon, NaiveDate::MAX, &mut weather);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn days_until_max_counts_inclusively() {
        assert_eq!(days_until_max(NaiveDate::MAX), 1);
        let day_before = NaiveDate::MAX.pred_opt().expect("has predecessor");
        assert_eq!(days_until_max(day_before), 2);
    }

    #[test]
    fn empty_inputs_produce_empty_batch() {
        let mut engine = PredictionEngine::new(NoNoise);
        let mut weather = FixedWeather::default();
        let none: [&str; 0] = [];
        assert!(
            engine
                .generate_batch(&none, 7, ymd(2025, 4, 14), &mut weather)
                .is_empty()
        );
        assert!(
            engine
                .generate_batch(&["Juhu Beach"], 0, ymd(2025, 4, 14), &mut weather)
                .is_empty()
        );
    }
}
