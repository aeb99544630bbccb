use lb_core::entities::{HistoryRecord, PassengerInput, PredictionResult};
use schemars::schema_for;

use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::cli::{GlobalFlags, OutputFormat};

/// JSON Schema for `target`.
pub fn schema_value(target: SchemaTarget) -> anyhow::Result<serde_json::Value> {
    let value = match target {
        SchemaTarget::Artifact => lb_model::schema::artifact_schema().clone(),
        SchemaTarget::Passenger => serde_json::to_value(schema_for!(PassengerInput))?,
        SchemaTarget::Prediction => serde_json::to_value(schema_for!(PredictionResult))?,
        SchemaTarget::Record => serde_json::to_value(schema_for!(HistoryRecord))?,
    };
    Ok(value)
}

/// Handle `lifeboat schema`. Always JSON: compact with `--format raw`,
/// pretty otherwise.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_value(args.target)?;
    let rendered = if flags.format == OutputFormat::Raw {
        serde_json::to_string(&schema)?
    } else {
        serde_json::to_string_pretty(&schema)?
    };
    println!("{rendered}");
    Ok(())
}
