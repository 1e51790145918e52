//! Post-hoc batch summary: per-location totals and cleanup priorities.

use std::fmt;

use chrono::NaiveDate;

use super::types::{PredictionRecord, round_to};

/// Mean daily kg at or above which a beach is a high cleanup priority.
pub const HIGH_PRIORITY_KG: f64 = 400.0;
/// Mean daily kg at or above which a beach is a medium cleanup priority.
pub const MEDIUM_PRIORITY_KG: f64 = 250.0;

/// Cleanup urgency bucket for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// Below [`MEDIUM_PRIORITY_KG`] per day.
    Low,
    /// Between [`MEDIUM_PRIORITY_KG`] and [`HIGH_PRIORITY_KG`] per day.
    Medium,
    /// At least [`HIGH_PRIORITY_KG`] per day.
    High,
}

impl Priority {
    /// Buckets a mean daily amount.
    pub fn from_daily_kg(kg: f64) -> Self {
        if kg >= HIGH_PRIORITY_KG {
            Priority::High
        } else if kg >= MEDIUM_PRIORITY_KG {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.pad(label)
    }
}

/// Aggregates for one location across a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    /// Beach name.
    pub location: String,
    /// Sum of predicted waste over the horizon (kg).
    pub total_kg: f64,
    /// Number of records (days) for this location.
    pub days: usize,
    /// Mean predicted waste per day (kg).
    pub mean_daily_kg: f64,
    /// Day with the largest prediction; earliest wins ties.
    pub peak_date: NaiveDate,
    /// Prediction on `peak_date` (kg).
    pub peak_kg: f64,
    /// Cleanup priority from `mean_daily_kg`.
    pub priority: Priority,
}

/// Aggregate view of a prediction batch.
///
/// Computed from the records alone so the report always agrees with the
/// exported data.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Number of records in the batch.
    pub record_count: usize,
    /// Sum of all predictions (kg).
    pub total_kg: f64,
    /// First forecast day, if any.
    pub first_date: Option<NaiveDate>,
    /// Last forecast day, if any.
    pub last_date: Option<NaiveDate>,
    /// Per-location aggregates in first-seen order.
    pub locations: Vec<LocationSummary>,
}

impl BatchSummary {
    /// Builds the summary from a batch.
    ///
    /// # Arguments
    ///
    /// * `records` - Batch output in any order
    ///
    /// # Returns
    ///
    /// A `BatchSummary`; empty input yields the default (all zeros).
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut locations: Vec<LocationSummary> = Vec::new();
        let mut total_kg = 0.0_f64;
        let mut first_date = records[0].date;
        let mut last_date = records[0].date;

        for r in records {
            total_kg += r.predicted_waste_kg;
            first_date = first_date.min(r.date);
            last_date = last_date.max(r.date);

            match locations.iter_mut().find(|s| s.location == r.location) {
                Some(s) => {
                    s.total_kg += r.predicted_waste_kg;
                    s.days += 1;
                    if r.predicted_waste_kg > s.peak_kg
                        || (r.predicted_waste_kg == s.peak_kg && r.date < s.peak_date)
                    {
                        s.peak_kg = r.predicted_waste_kg;
                        s.peak_date = r.date;
                    }
                }
                None => locations.push(LocationSummary {
                    location: r.location.clone(),
                    total_kg: r.predicted_waste_kg,
                    days: 1,
                    mean_daily_kg: 0.0,
                    peak_date: r.date,
                    peak_kg: r.predicted_waste_kg,
                    priority: Priority::Low,
                }),
            }
        }

        for s in &mut locations {
            s.total_kg = round_to(s.total_kg, 1);
            s.mean_daily_kg = round_to(s.total_kg / s.days as f64, 1);
            s.priority = Priority::from_daily_kg(s.mean_daily_kg);
        }

        Self {
            record_count: records.len(),
            total_kg: round_to(total_kg, 1),
            first_date: Some(first_date),
            last_date: Some(last_date),
            locations,
        }
    }

    /// Locations sorted by total predicted waste, largest first.
    pub fn ranked(&self) -> Vec<&LocationSummary> {
        let mut ranked: Vec<&LocationSummary> = self.locations.iter().collect();
        ranked.sort_by(|a, b| b.total_kg.total_cmp(&a.total_kg));
        ranked
    }

    /// Summary for one location, if it appears in the batch.
    pub fn location(&self, name: &str) -> Option<&LocationSummary> {
        self.locations.iter().find(|s| s.location == name)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Forecast Summary ---")?;
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => writeln!(f, "Horizon:          {first} to {last}")?,
            _ => writeln!(f, "Horizon:          (empty)")?,
        }
        writeln!(f, "Predictions:      {}", self.record_count)?;
        writeln!(f, "Total waste:      {:.1} kg", self.total_kg)?;
        for s in self.ranked() {
            writeln!(
                f,
                "  {:<18} {:>8.1} kg total  {:>6.1} kg/day  peak {:>6.1} kg on {}  [{:<6}]",
                s.location, s.total_kg, s.mean_daily_kg, s.peak_kg, s.peak_date, s.priority
            )?;
        }
        Ok(())
    }
}
