//! CSV export of history records.
//!
//! One header row, then one row per record. Columns are the passenger fields
//! followed by the prediction fields, then the record ordinal and timestamp.

use std::path::Path;

use chrono::NaiveDateTime;
use lb_core::entities::{HistoryRecord, PassengerInput, PredictionResult, TIMESTAMP_FORMAT, timestamp_format};
use lb_core::enums::{PassengerClass, Port, Sex, SurvivalLabel, Title};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

pub const DEFAULT_HISTORY_FILE_NAME: &str = "titanic_prediction_history.csv";

/// Column order of every export.
pub const HEADER: [&str; 16] = [
    "name",
    "passenger_class",
    "age",
    "siblings_spouses",
    "parents_children",
    "fare",
    "has_cabin",
    "family_size",
    "sex",
    "embarked",
    "title",
    "prediction",
    "probability_survived",
    "probability_not_survived",
    "record",
    "timestamp",
];

/// Flat CSV view of a [`HistoryRecord`]. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CsvRow {
    name: String,
    passenger_class: u8,
    age: f64,
    siblings_spouses: u8,
    parents_children: u8,
    fare: f64,
    has_cabin: u8,
    family_size: u16,
    sex: Sex,
    embarked: Port,
    title: Title,
    prediction: SurvivalLabel,
    probability_survived: f64,
    probability_not_survived: f64,
    record: usize,
    #[serde(with = "timestamp_format")]
    timestamp: NaiveDateTime,
}

impl From<&HistoryRecord> for CsvRow {
    fn from(record: &HistoryRecord) -> Self {
        let input = &record.input;
        Self {
            name: input.name.clone(),
            passenger_class: input.passenger_class.as_number(),
            age: input.age,
            siblings_spouses: input.siblings_spouses,
            parents_children: input.parents_children,
            fare: input.fare,
            has_cabin: u8::from(input.has_cabin),
            family_size: input.family_size(),
            sex: input.sex,
            embarked: input.embarked,
            title: input.title,
            prediction: record.result.label,
            probability_survived: record.result.probability_survived,
            probability_not_survived: record.result.probability_not_survived,
            record: record.record,
            timestamp: record.timestamp,
        }
    }
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<HistoryRecord, ReportError> {
        let invalid = |reason: String| ReportError::InvalidRow { row, reason };

        let passenger_class =
            PassengerClass::try_from(self.passenger_class).map_err(|e| invalid(e.to_string()))?;
        let has_cabin = match self.has_cabin {
            0 => false,
            1 => true,
            other => return Err(invalid(format!("has_cabin must be 0 or 1, got {other}"))),
        };
        let result = PredictionResult::new(self.prediction, self.probability_survived)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(HistoryRecord {
            record: self.record,
            timestamp: self.timestamp,
            input: PassengerInput {
                name: self.name,
                passenger_class,
                sex: self.sex,
                age: self.age,
                siblings_spouses: self.siblings_spouses,
                parents_children: self.parents_children,
                fare: self.fare,
                embarked: self.embarked,
                has_cabin,
                title: self.title,
            },
            result: PredictionResult {
                probability_not_survived: self.probability_not_survived,
                ..result
            },
        })
    }
}

/// Export records as CSV bytes. An empty slice yields just the header row.
///
/// # Errors
///
/// Returns `ReportError::Csv` if serialization fails.
pub fn export_csv(records: &[HistoryRecord]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))
}

/// Export one record as CSV bytes.
///
/// # Errors
///
/// Returns `ReportError::Csv` if serialization fails.
pub fn export_record_csv(record: &HistoryRecord) -> Result<Vec<u8>, ReportError> {
    export_csv(std::slice::from_ref(record))
}

/// Parse CSV produced by [`export_csv`] back into records.
///
/// # Errors
///
/// Returns `ReportError::Csv` for malformed CSV and `ReportError::InvalidRow`
/// for rows that do not describe a valid record.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<HistoryRecord>, ReportError> {
    let mut reader = csv::Reader::from_reader(bytes);
    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(index, row)| row?.into_record(index + 1))
        .collect()
}

/// Write export bytes to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `ReportError::Io` if the directory or file cannot be written.
pub fn save(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, bytes).map_err(io_error)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

/// `titanic_prediction_{name}_{timestamp}` with the name and timestamp
/// reduced to filename-safe characters.
#[must_use]
pub fn record_file_stem(record: &HistoryRecord) -> String {
    let stamp = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
    format!(
        "titanic_prediction_{}_{}",
        sanitize(&record.input.name),
        sanitize(&stamp)
    )
}

/// Default file name for a single-record CSV export.
#[must_use]
pub fn record_file_name(record: &HistoryRecord) -> String {
    format!("{}.csv", record_file_stem(record))
}

fn sanitize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ':' => out.push('-'),
            c if c.is_whitespace() => {
                if !out.ends_with('_') {
                    out.push('_');
                }
            }
            c if c.is_alphanumeric() || c == '-' || c == '_' => out.push(c),
            _ => {}
        }
    }
    out.trim_matches('_').to_string()
}
