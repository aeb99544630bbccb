//! Session-scoped prediction history.
//!
//! `History` is an append-only list owned by the session context. Records get
//! consecutive 1-based ordinals and a local wall-clock timestamp.

use chrono::{Local, NaiveDateTime, Timelike};

use crate::entities::{HistoryRecord, PassengerInput, PredictionResult};
use crate::errors::CoreError;

/// Source of record timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock, truncated to whole seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

pub struct History {
    records: Vec<HistoryRecord>,
    clock: Box<dyn Clock>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            clock,
        }
    }

    /// Append a prediction and return the stored record.
    pub fn append(&mut self, input: PassengerInput, result: PredictionResult) -> &HistoryRecord {
        let record = HistoryRecord {
            record: self.records.len() + 1,
            timestamp: self.clock.now(),
            input,
            result,
        };
        tracing::info!(
            record = record.record,
            label = %record.result.label,
            "prediction appended to history"
        );
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Ordered copy of every record, for export.
    #[must_use]
    pub fn export_all(&self) -> Vec<HistoryRecord> {
        self.records.clone()
    }

    /// Look up a record by its 1-based ordinal.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordNotFound` when no such record exists.
    pub fn get(&self, ordinal: usize) -> Result<&HistoryRecord, CoreError> {
        ordinal
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
            .ok_or(CoreError::RecordNotFound(ordinal))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
