//! Prediction summaries.

use lb_core::entities::{HistoryRecord, PassengerInput, PredictionResult, TIMESTAMP_FORMAT};
use lb_core::enums::SurvivalLabel;
use serde::Serialize;

use crate::chart::{ChartColors, PieChart};

pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Human-readable outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label: SurvivalLabel,
    /// "Would Have Survived" / "Would Not Have Survived"
    pub headline: String,
    /// Probability of survival, 0-100.
    pub confidence_percent: f64,
    /// `"87.12%"`
    pub confidence_text: String,
    /// Filled/empty cells proportional to the confidence.
    pub confidence_bar: String,
}

impl Summary {
    #[must_use]
    pub fn from_result(result: &PredictionResult, bar_width: usize) -> Self {
        let confidence_percent = result.confidence_percent();
        Self {
            label: result.label,
            headline: result.label.headline().to_string(),
            confidence_percent,
            confidence_text: format!("{confidence_percent:.2}%"),
            confidence_bar: confidence_bar(result.probability_survived, bar_width),
        }
    }
}

/// `█` for the survived share, `░` for the rest.
#[must_use]
pub fn confidence_bar(probability: f64, width: usize) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((probability.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

/// Everything shown after a prediction: the stored record, its summary, the
/// chart, and the model version footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub record: usize,
    pub timestamp: String,
    pub passenger: PassengerInput,
    pub family_size: u16,
    pub summary: Summary,
    pub chart: PieChart,
    pub model_version: String,
}

impl PredictionReport {
    #[must_use]
    pub fn new(
        record: &HistoryRecord,
        model_version: &str,
        colors: &ChartColors,
        bar_width: usize,
    ) -> Self {
        Self {
            record: record.record,
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            passenger: record.input.clone(),
            family_size: record.input.family_size(),
            summary: Summary::from_result(&record.result, bar_width),
            chart: PieChart::from_result(&record.result, colors),
            model_version: model_version.to_string(),
        }
    }
}
