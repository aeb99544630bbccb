use std::io::{BufRead, Write};
use std::path::PathBuf;

use lb_core::errors::ValidationErrors;
use lb_core::form::{self, FormDefaults, PassengerForm, fields};
use lb_model::PredictError;
use lb_report::PredictionReport;
use lb_report::text::render_report;

use super::command::{HELP, SessionCommand};
use crate::cli::OutputFormat;
use crate::commands::shared;
use crate::context::AppContext;
use crate::output::{self, table};
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct Prompt {
    field: &'static str,
    label: &'static str,
    default: String,
}

fn prompts(defaults: &FormDefaults) -> [Prompt; 9] {
    let prompt = |field, label, default: String| Prompt {
        field,
        label,
        default,
    };
    [
        prompt(fields::NAME, "Name (e.g. Braund, Mr. Owen Harris)", String::new()),
        prompt(
            fields::PASSENGER_CLASS,
            "Passenger class (1/2/3)",
            form::DEFAULT_CLASS.as_number().to_string(),
        ),
        prompt(fields::SEX, "Sex (male/female)", form::DEFAULT_SEX.as_str().to_string()),
        prompt(fields::AGE, "Age (0 = unknown)", form::DEFAULT_AGE.to_string()),
        prompt(fields::SIBLINGS_SPOUSES, "Siblings/spouses aboard", "0".to_string()),
        prompt(fields::PARENTS_CHILDREN, "Parents/children aboard", "0".to_string()),
        prompt(fields::FARE, "Fare", form::DEFAULT_FARE.to_string()),
        prompt(
            fields::EMBARKED,
            "Port of embarkation (S/C/Q)",
            defaults.default_embarked.as_str().to_string(),
        ),
        prompt(fields::HAS_CABIN, "Had a cabin (yes/no)", "no".to_string()),
    ]
}

/// Line-oriented prediction session over any reader and writer.
///
/// Per-command failures are printed as `⚠` lines and the session goes on;
/// stream I/O errors and model failures end it with an error.
pub struct Session<'a, R, W> {
    ctx: &'a mut AppContext,
    input: R,
    out: W,
    format: OutputFormat,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub const fn new(
        ctx: &'a mut AppContext,
        input: R,
        out: W,
        format: OutputFormat,
        color: bool,
    ) -> Self {
        Self {
            ctx,
            input,
            out,
            format,
            color,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "Lifeboat session, model {}. Type 'help' for commands.",
            self.ctx.predictor.info().display_version
        )?;

        loop {
            write!(self.out, "lifeboat> ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.out)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let flow = match line.parse::<SessionCommand>() {
                Ok(command) => self.execute(command)?,
                Err(message) => {
                    self.warn(&message)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Stop {
                break;
            }
        }

        tracing::debug!(predictions = self.ctx.history.len(), "session ended");
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn execute(&mut self, command: SessionCommand) -> anyhow::Result<Flow> {
        match command {
            SessionCommand::Predict => return self.predict(),
            SessionCommand::History => self.history()?,
            SessionCommand::Export { record, path } => {
                let saved = self
                    .ctx
                    .history
                    .get(record)
                    .map_err(anyhow::Error::from)
                    .and_then(|r| shared::write_record_csv(self.ctx, r, path.as_deref()));
                self.saved(saved)?;
            }
            SessionCommand::ExportAll { path } => {
                let saved = shared::write_history_csv(self.ctx, path.as_deref());
                self.saved(saved)?;
            }
            SessionCommand::Chart { record, path } => {
                let saved = self
                    .ctx
                    .history
                    .get(record)
                    .map_err(anyhow::Error::from)
                    .and_then(|r| shared::write_chart_svg(self.ctx, r, path.as_deref()));
                self.saved(saved)?;
            }
            SessionCommand::Model => {
                let rendered = output::render(self.ctx.predictor.info(), self.format)?;
                writeln!(self.out, "{rendered}")?;
            }
            SessionCommand::Help => writeln!(self.out, "{HELP}")?,
            SessionCommand::Quit => return Ok(Flow::Stop),
        }
        Ok(Flow::Continue)
    }

    /// Prompt for every field; blank answers keep the default. Validation and
    /// encoding problems are printed; a model failure ends the session.
    fn predict(&mut self) -> anyhow::Result<Flow> {
        let mut form = PassengerForm::default();
        for prompt in prompts(&self.ctx.predictor.form_defaults()) {
            if prompt.default.is_empty() {
                write!(self.out, "{}: ", prompt.label)?;
            } else {
                write!(self.out, "{} [{}]: ", prompt.label, prompt.default)?;
            }
            self.out.flush()?;

            let Some(answer) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(Flow::Stop);
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                form.set(prompt.field, answer);
            }
        }

        match self.ctx.predict(&form) {
            Ok(record) => {
                let report = self.ctx.report(&record);
                self.show_report(&report)?;
            }
            Err(error) => {
                if matches!(error.downcast_ref::<PredictError>(), Some(PredictError::Model(_))) {
                    return Err(error);
                }
                match error.downcast_ref::<ValidationErrors>() {
                    Some(errors) => {
                        for problem in errors.iter() {
                            writeln!(self.out, "⚠ {problem}")?;
                        }
                    }
                    None => self.warn(&format!("{error:#}"))?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn show_report(&mut self, report: &PredictionReport) -> anyhow::Result<()> {
        let rendered = if self.format == OutputFormat::Table {
            render_report(report, self.color)
        } else {
            output::render(report, self.format)?
        };
        writeln!(self.out, "{rendered}")?;
        Ok(())
    }

    fn history(&mut self) -> anyhow::Result<()> {
        let records = self.ctx.history.records();
        let rendered = if self.format != OutputFormat::Table {
            output::render(&records, self.format)?
        } else if records.is_empty() {
            "No predictions yet.".to_string()
        } else {
            let rows = records
                .iter()
                .map(|record| {
                    vec![
                        record.record.to_string(),
                        record
                            .timestamp
                            .format(lb_core::entities::TIMESTAMP_FORMAT)
                            .to_string(),
                        record.input.name.clone(),
                        record.result.label.as_str().to_string(),
                        format!("{:.2}%", record.result.confidence_percent()),
                    ]
                })
                .collect::<Vec<_>>();
            let options = table::TableOptions {
                max_width: ui::prefs().term_width,
                color: self.color,
            };
            table::render_table(
                &["#", "timestamp", "name", "prediction", "survival"],
                &rows,
                options,
            )
        };
        writeln!(self.out, "{rendered}")?;
        Ok(())
    }

    fn saved(&mut self, result: anyhow::Result<PathBuf>) -> anyhow::Result<()> {
        match result {
            Ok(path) => writeln!(self.out, "Saved {}", path.display())?,
            Err(error) => self.warn(&format!("{error:#}"))?,
        }
        Ok(())
    }

    fn warn(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.out, "⚠ {message}")?;
        Ok(())
    }
}
