//! # lb-report
//!
//! Turns prediction results and session history into things people read or
//! download:
//! - [`Summary`]: headline, confidence percentage, and confidence bar
//! - [`PieChart`]: two-slice survival chart, renderable as SVG
//! - [`export`]: CSV export and parsing of history records, export file names
//! - [`text`]: plain-terminal rendering of a [`PredictionReport`]

mod chart;
mod error;
pub mod export;
mod summary;
pub mod text;

pub use chart::{ChartColors, PieChart, PieSlice};
pub use error::ReportError;
pub use summary::{PredictionReport, Summary};
