//! Passenger input, prediction result, and history record entities.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{PassengerClass, Port, Sex, SurvivalLabel, Title};
use crate::errors::CoreError;

/// Timestamp format used in history records and export file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A validated set of passenger attributes, ready for feature encoding.
///
/// Built by [`crate::form::PassengerForm::collect`]; the name is cosmetic
/// apart from the title derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PassengerInput {
    pub name: String,
    pub passenger_class: PassengerClass,
    pub sex: Sex,
    /// Age in years, after median imputation.
    pub age: f64,
    pub siblings_spouses: u8,
    pub parents_children: u8,
    /// Fare in British pounds.
    pub fare: f64,
    pub embarked: Port,
    pub has_cabin: bool,
    pub title: Title,
}

impl PassengerInput {
    /// Relatives aboard plus the passenger.
    #[must_use]
    pub const fn family_size(&self) -> u16 {
        self.siblings_spouses as u16 + self.parents_children as u16 + 1
    }
}

/// Outcome of one prediction.
///
/// `probability_survived + probability_not_survived == 1` holds for every
/// value built through [`PredictionResult::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResult {
    pub label: SurvivalLabel,
    pub probability_survived: f64,
    pub probability_not_survived: f64,
}

impl PredictionResult {
    /// Build a result from the classifier's label and its probability of survival.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ProbabilityOutOfRange` for NaN or values outside `[0, 1]`.
    pub fn new(label: SurvivalLabel, probability_survived: f64) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&probability_survived) {
            return Err(CoreError::ProbabilityOutOfRange(
                probability_survived.to_string(),
            ));
        }
        Ok(Self {
            label,
            probability_survived,
            probability_not_survived: 1.0 - probability_survived,
        })
    }

    /// Probability of survival as a percentage. This is the "confidence"
    /// shown to users: above 50% means likely survived.
    #[must_use]
    pub fn confidence_percent(&self) -> f64 {
        self.probability_survived * 100.0
    }
}

/// A prediction kept in the session history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryRecord {
    /// 1-based position in the session history.
    pub record: usize,
    #[serde(with = "timestamp_format")]
    #[schemars(with = "String")]
    pub timestamp: NaiveDateTime,
    pub input: PassengerInput,
    pub result: PredictionResult,
}

/// Serde adapter for `NaiveDateTime` in [`TIMESTAMP_FORMAT`].
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    /// # Errors
    ///
    /// Fails when the string is not in [`TIMESTAMP_FORMAT`].
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
