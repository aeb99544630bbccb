//! Where CSV exports land.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_history_file_name() -> String {
    "titanic_prediction_history.csv".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory for exports written without an explicit path.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name used by `export-all`.
    #[serde(default = "default_history_file_name")]
    pub history_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            history_file_name: default_history_file_name(),
        }
    }
}

impl ExportConfig {
    /// `file_name` inside the export directory.
    #[must_use]
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.resolve(&self.history_file_name)
    }
}
