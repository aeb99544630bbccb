//! Report and chart presentation.

use serde::{Deserialize, Serialize};

fn default_survived_color() -> String {
    "#81C784".to_string()
}

fn default_not_survived_color() -> String {
    "#E57373".to_string()
}

const fn default_bar_width() -> usize {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Pie slice color for "Survived", `#RRGGBB`.
    #[serde(default = "default_survived_color")]
    pub survived_color: String,

    /// Pie slice color for "Did Not Survive", `#RRGGBB`.
    #[serde(default = "default_not_survived_color")]
    pub not_survived_color: String,

    /// Cells in the confidence bar.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            survived_color: default_survived_color(),
            not_survived_color: default_not_survived_color(),
            bar_width: default_bar_width(),
        }
    }
}

/// `#` followed by exactly six hex digits.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
