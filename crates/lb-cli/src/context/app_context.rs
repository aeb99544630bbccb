use anyhow::Context;
use lb_config::LifeboatConfig;
use lb_core::entities::HistoryRecord;
use lb_core::form::PassengerForm;
use lb_core::history::History;
use lb_model::Predictor;
use lb_report::{ChartColors, PredictionReport};

/// Session state: configuration, the loaded model, and prediction history.
#[derive(Debug)]
pub struct AppContext {
    pub config: LifeboatConfig,
    pub predictor: Predictor,
    pub history: History,
}

impl AppContext {
    /// Load the configured model artifact. Any load failure is fatal.
    pub fn init(config: LifeboatConfig) -> anyhow::Result<Self> {
        let path = config.model.path.clone();
        let predictor = Predictor::load(&path)
            .with_context(|| format!("failed to load model artifact {}", path.display()))?;
        Ok(Self::new(config, predictor, History::new()))
    }

    #[must_use]
    pub const fn new(config: LifeboatConfig, predictor: Predictor, history: History) -> Self {
        Self {
            config,
            predictor,
            history,
        }
    }

    /// Validate, encode, predict, and append to history.
    ///
    /// Nothing is appended unless every step succeeds. Validation failures
    /// surface as [`lb_core::errors::ValidationErrors`] inside the error.
    pub fn predict(&mut self, form: &PassengerForm) -> anyhow::Result<HistoryRecord> {
        let input = form.collect(&self.predictor.form_defaults())?;
        let result = self
            .predictor
            .predict_input(&input)
            .context("prediction failed")?;
        Ok(self.history.append(input, result).clone())
    }

    #[must_use]
    pub fn report(&self, record: &HistoryRecord) -> PredictionReport {
        PredictionReport::new(
            record,
            &self.predictor.info().display_version,
            &self.chart_colors(),
            self.config.report.bar_width,
        )
    }

    #[must_use]
    pub fn chart_colors(&self) -> ChartColors {
        ChartColors {
            survived: self.config.report.survived_color.clone(),
            not_survived: self.config.report.not_survived_color.clone(),
        }
    }
}
