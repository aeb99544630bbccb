//! # lb-config
//!
//! Layered configuration loading for Lifeboat using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LIFEBOAT_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.lifeboat/config.toml`
//! 4. User-level `~/.config/lifeboat/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LIFEBOAT_MODEL__PATH` -> `model.path`,
//! `LIFEBOAT_REPORT__BAR_WIDTH` -> `report.bar_width`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lb_config::LifeboatConfig;
//!
//! let config = LifeboatConfig::load_with_dotenv(None).expect("config");
//! println!("model: {}", config.model.path.display());
//! ```

mod error;
mod export;
mod model;
mod report;

pub use error::ConfigError;
pub use export::ExportConfig;
pub use model::ModelConfig;
pub use report::{ReportConfig, is_hex_color};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LifeboatConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl LifeboatConfig {
    /// Load configuration from TOML files and environment variables, then
    /// validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `extra` does not exist,
    /// `ConfigError::Figment` if a layer fails to parse or extract and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = extra.filter(|p| !p.is_file()) {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory first, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain. `extra` is layered above the
    /// project file and below the environment.
    #[must_use]
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lifeboat/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: --config
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("LIFEBOAT_").split("__"))
    }

    /// Reject values that would only fail later, at prediction or export time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("model.path", "must not be empty"));
        }
        if self.export.directory.as_os_str().is_empty() {
            return Err(ConfigError::invalid("export.directory", "must not be empty"));
        }
        if self.export.history_file_name.trim().is_empty() {
            return Err(ConfigError::invalid(
                "export.history_file_name",
                "must not be empty",
            ));
        }
        for (field, value) in [
            ("report.survived_color", &self.report.survived_color),
            ("report.not_survived_color", &self.report.not_survived_color),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("expected a #RRGGBB color, got '{value}'"),
                ));
            }
        }
        if self.report.bar_width == 0 {
            return Err(ConfigError::invalid("report.bar_width", "must be at least 1"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lifeboat").join("config.toml"))
    }
}
