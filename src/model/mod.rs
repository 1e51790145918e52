//! Waste prediction model: factors, noise, engine, and batch summaries.

pub mod engine;
/// Base amounts and weather/season/activity multipliers.
pub mod factors;
pub mod noise;
/// Per-location aggregation of a prediction batch.
pub mod summary;
pub mod types;

pub use engine::PredictionEngine;
pub use noise::{GaussianNoise, NoNoise, NoiseSource};
pub use summary::BatchSummary;
pub use types::{PredictionRecord, parse_date};
