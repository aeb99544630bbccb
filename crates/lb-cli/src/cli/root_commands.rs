use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use lb_core::form::{PassengerForm, fields};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Predict survival for one passenger.
    Predict(PredictArgs),
    /// Interactive session: repeated predictions, history, and exports.
    Session,
    /// Show the loaded model card.
    Model,
    /// Print a JSON Schema.
    Schema(SchemaArgs),
}

/// Passenger details. Omitted flags take the form defaults.
#[derive(Clone, Debug, Default, Args)]
pub struct PassengerArgs {
    /// Full name, e.g. "Braund, Mr. Owen Harris"
    #[arg(long)]
    pub name: Option<String>,

    /// Ticket class: 1, 2 or 3
    #[arg(long = "class")]
    pub passenger_class: Option<String>,

    /// male or female
    #[arg(long)]
    pub sex: Option<String>,

    /// Age in years, 0-100 (0 means unknown)
    #[arg(long, allow_hyphen_values = true)]
    pub age: Option<String>,

    /// Siblings and spouses aboard
    #[arg(long)]
    pub sibsp: Option<String>,

    /// Parents and children aboard
    #[arg(long)]
    pub parch: Option<String>,

    /// Ticket fare
    #[arg(long, allow_hyphen_values = true)]
    pub fare: Option<String>,

    /// Port of embarkation: S, C or Q
    #[arg(long)]
    pub embarked: Option<String>,

    /// Had a cabin: yes or no
    #[arg(long)]
    pub cabin: Option<String>,
}

impl PassengerArgs {
    /// Raw form values; validation happens in [`PassengerForm::collect`].
    #[must_use]
    pub fn to_form(&self) -> PassengerForm {
        let mut form = PassengerForm::default();
        for (field, value) in [
            (fields::NAME, &self.name),
            (fields::PASSENGER_CLASS, &self.passenger_class),
            (fields::SEX, &self.sex),
            (fields::AGE, &self.age),
            (fields::SIBLINGS_SPOUSES, &self.sibsp),
            (fields::PARENTS_CHILDREN, &self.parch),
            (fields::FARE, &self.fare),
            (fields::EMBARKED, &self.embarked),
            (fields::HAS_CABIN, &self.cabin),
        ] {
            if let Some(value) = value {
                form.set(field, value.clone());
            }
        }
        form
    }
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub passenger: PassengerArgs,

    /// Write the record as CSV. Without a path, uses the export directory
    /// and a name derived from the passenger and timestamp.
    #[arg(long, value_name = "CSV", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Write the survival pie chart as SVG. Path defaults like --export.
    #[arg(long, value_name = "SVG", num_args = 0..=1)]
    pub chart: Option<Option<PathBuf>>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    /// Model artifact file format.
    #[default]
    Artifact,
    /// Validated passenger input.
    Passenger,
    /// Prediction result.
    Prediction,
    /// History record, as exported to JSON.
    Record,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Which schema to print.
    #[arg(value_enum, default_value_t = SchemaTarget::Artifact)]
    pub target: SchemaTarget,
}
