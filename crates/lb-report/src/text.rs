//! Plain-terminal rendering of prediction reports.

use std::fmt::Write as _;

use lb_core::enums::SurvivalLabel;

use crate::summary::PredictionReport;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, label: SurvivalLabel, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let code = match label {
        SurvivalLabel::Survived => GREEN,
        SurvivalLabel::NotSurvived => RED,
    };
    format!("{BOLD}{code}{text}{RESET}")
}

/// Multi-line report: passenger details, outcome, confidence bar, chart
/// shares, and the model version footer.
#[must_use]
pub fn render_report(report: &PredictionReport, color: bool) -> String {
    let passenger = &report.passenger;
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Prediction #{} at {}", report.record, report.timestamp);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Name          {}", passenger.name);
    let _ = writeln!(out, "  Title         {}", passenger.title);
    let _ = writeln!(out, "  Class         {}", passenger.passenger_class);
    let _ = writeln!(out, "  Sex           {}", passenger.sex);
    let _ = writeln!(out, "  Age           {}", passenger.age);
    let _ = writeln!(out, "  Siblings/Sp.  {}", passenger.siblings_spouses);
    let _ = writeln!(out, "  Parents/Ch.   {}", passenger.parents_children);
    let _ = writeln!(out, "  Family size   {}", report.family_size);
    let _ = writeln!(out, "  Fare          {:.2}", passenger.fare);
    let _ = writeln!(
        out,
        "  Embarked      {} ({})",
        passenger.embarked,
        passenger.embarked.town()
    );
    let _ = writeln!(
        out,
        "  Cabin         {}",
        if passenger.has_cabin { "yes" } else { "no" }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", paint(&summary.headline, summary.label, color));
    let _ = writeln!(
        out,
        "  Confidence    {} {}",
        summary.confidence_bar, summary.confidence_text
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", report.chart.title);
    for slice in &report.chart.slices {
        let _ = writeln!(out, "    {:<16} {:>6}", slice.label, slice.percent_text);
    }
    let _ = writeln!(out);
    let _ = write!(out, "Model version: {}", report.model_version);
    out
}
