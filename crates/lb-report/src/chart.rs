//! Two-slice survival pie chart.

use std::f64::consts::PI;
use std::fmt::Write as _;

use lb_core::entities::PredictionResult;
use serde::Serialize;

pub const CHART_TITLE: &str = "Survival Probability Distribution";

const SIZE: f64 = 320.0;
const CENTER_X: f64 = 160.0;
const CENTER_Y: f64 = 170.0;
const RADIUS: f64 = 110.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartColors {
    pub survived: String,
    pub not_survived: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            survived: "#81C784".to_string(),
            not_survived: "#E57373".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    /// Share of the pie in `[0, 1]`.
    pub fraction: f64,
    /// `"87.1%"`
    pub percent_text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Survived first, then did-not-survive.
    #[must_use]
    pub fn from_result(result: &PredictionResult, colors: &ChartColors) -> Self {
        let slice = |label: &str, fraction: f64, color: &str| PieSlice {
            label: label.to_string(),
            fraction,
            percent_text: format!("{:.1}%", fraction * 100.0),
            color: color.to_string(),
        };
        Self {
            title: CHART_TITLE.to_string(),
            slices: vec![
                slice("Survived", result.probability_survived, &colors.survived),
                slice(
                    "Did Not Survive",
                    result.probability_not_survived,
                    &colors.not_survived,
                ),
            ],
        }
    }

    /// Render a standalone SVG document. Slices run clockwise from twelve
    /// o'clock; a slice covering the whole pie is drawn as a circle.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{h}" viewBox="0 0 {SIZE} {h}" font-family="sans-serif">"#,
            h = SIZE + 40.0
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{CENTER_X}" y="30" text-anchor="middle" font-size="16">{}</text>"#,
            escape(&self.title)
        );

        let mut start = 0.0_f64;
        for slice in &self.slices {
            let fraction = slice.fraction.clamp(0.0, 1.0);
            if fraction <= f64::EPSILON {
                continue;
            }
            let end = start + fraction;
            if fraction >= 1.0 - f64::EPSILON {
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{CENTER_X}" cy="{CENTER_Y}" r="{RADIUS}" fill="{}"/>"#,
                    escape(&slice.color)
                );
            } else {
                let (x0, y0) = point_at(start, RADIUS);
                let (x1, y1) = point_at(end, RADIUS);
                let large_arc = u8::from(fraction > 0.5);
                let _ = writeln!(
                    svg,
                    r#"  <path d="M {CENTER_X} {CENTER_Y} L {x0:.3} {y0:.3} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.3} {y1:.3} Z" fill="{}"/>"#,
                    escape(&slice.color)
                );
            }
            let (lx, ly) = point_at(start + fraction / 2.0, RADIUS * 0.6);
            let _ = writeln!(
                svg,
                r#"  <text x="{lx:.3}" y="{ly:.3}" text-anchor="middle" font-size="13">{}</text>"#,
                escape(&slice.percent_text)
            );
            start = end;
        }

        let legend_y = CENTER_Y + RADIUS + 30.0;
        for (index, slice) in self.slices.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = 20.0 + index as f64 * 150.0;
            let _ = writeln!(
                svg,
                r#"  <rect x="{x}" y="{ry}" width="12" height="12" fill="{}"/>"#,
                escape(&slice.color),
                ry = legend_y - 11.0
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{tx}" y="{legend_y}" font-size="12">{}</text>"#,
                escape(&slice.label),
                tx = x + 18.0
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

/// Point on the circle at `turns` of a full revolution, clockwise from the top.
fn point_at(turns: f64, radius: f64) -> (f64, f64) {
    let angle = turns * 2.0 * PI - PI / 2.0;
    (
        radius.mul_add(angle.cos(), CENTER_X),
        radius.mul_add(angle.sin(), CENTER_Y),
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
