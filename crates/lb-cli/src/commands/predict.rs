use serde::Serialize;

use lb_report::PredictionReport;
use lb_report::text::render_report;

use crate::cli::root_commands::PredictArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

#[derive(Debug, Serialize)]
struct PredictResponse {
    report: PredictionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_csv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_chart: Option<String>,
}

/// Handle `lifeboat predict`.
pub fn handle(args: &PredictArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = ctx.predict(&args.passenger.to_form())?;

    let exported_csv = args
        .export
        .as_ref()
        .map(|path| shared::write_record_csv(ctx, &record, path.as_deref()))
        .transpose()?;
    let exported_chart = args
        .chart
        .as_ref()
        .map(|path| shared::write_chart_svg(ctx, &record, path.as_deref()))
        .transpose()?;

    let report = ctx.report(&record);
    if flags.format != OutputFormat::Table {
        return output(
            &PredictResponse {
                report,
                exported_csv: exported_csv.map(|p| p.display().to_string()),
                exported_chart: exported_chart.map(|p| p.display().to_string()),
            },
            flags.format,
        );
    }

    println!("{}", render_report(&report, ui::prefs().color));
    if !flags.quiet {
        for path in exported_csv.iter().chain(exported_chart.iter()) {
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}
