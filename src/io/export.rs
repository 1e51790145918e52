//! JSON and CSV export for prediction batches.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::model::types::PredictionRecord;

/// Column header for CSV export.
const CSV_HEADER: &str = "location,date,predicted_waste_kg,confidence,\
                          weather_impact,seasonal_impact,activity_impact";

/// Failure while writing an output artifact.
#[derive(Debug)]
pub enum ExportError {
    /// File creation or write failed.
    Io(io::Error),
    /// JSON serialization failed.
    Json(serde_json::Error),
    /// CSV encoding failed.
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "export failed: {e}"),
            ExportError::Json(e) => write!(f, "JSON export failed: {e}"),
            ExportError::Csv(e) => write!(f, "CSV export failed: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Json(e) => Some(e),
            ExportError::Csv(e) => Some(e),
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

/// Exports a batch as a pretty-printed JSON array to the given path.
///
/// # Errors
///
/// Returns an `ExportError` if file creation, serialization or writing fails.
pub fn export_json(records: &[PredictionRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_json(records, BufWriter::new(file))
}

/// Writes a batch as a pretty-printed JSON array (2-space indent) to any writer.
///
/// # Errors
///
/// Returns an `ExportError` if serialization or writing fails.
pub fn write_json(records: &[PredictionRecord], mut writer: impl Write) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Exports a batch as CSV to the given path.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_csv(records: &[PredictionRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(records, BufWriter::new(file))
}

/// Writes a batch as CSV to any writer.
///
/// One header row, then one row per record in batch order. Amounts keep
/// one decimal and factors two, matching the JSON precision.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_csv(records: &[PredictionRecord], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(CSV_HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.location.clone(),
            r.date.to_string(),
            format!("{:.1}", r.predicted_waste_kg),
            format!("{:.2}", r.confidence),
            format!("{:.2}", r.factors.weather_impact),
            format!("{:.2}", r.factors.seasonal_impact),
            format!("{:.2}", r.factors.activity_impact),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
