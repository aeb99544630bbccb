//! Export helpers shared by `predict` and `session`.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use lb_core::entities::HistoryRecord;
use lb_report::PieChart;
use lb_report::export;

use crate::context::AppContext;

/// Explicit path, or `default_name` inside the configured export directory.
fn target(ctx: &AppContext, path: Option<&Path>, default_name: &str) -> PathBuf {
    path.map_or_else(|| ctx.config.export.resolve(default_name), Path::to_path_buf)
}

pub fn write_record_csv(
    ctx: &AppContext,
    record: &HistoryRecord,
    path: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let path = target(ctx, path, &export::record_file_name(record));
    let bytes = export::export_record_csv(record)
        .with_context(|| format!("failed to export record #{}", record.record))?;
    export::save(&path, &bytes)?;
    Ok(path)
}

pub fn write_history_csv(ctx: &AppContext, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let records = ctx.history.export_all();
    if records.is_empty() {
        bail!("no predictions to export yet");
    }
    let path = path.map_or_else(|| ctx.config.export.history_path(), Path::to_path_buf);
    let bytes = export::export_csv(&records).context("failed to export history")?;
    export::save(&path, &bytes)?;
    Ok(path)
}

pub fn write_chart_svg(
    ctx: &AppContext,
    record: &HistoryRecord,
    path: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let default_name = format!("{}.svg", export::record_file_stem(record));
    let path = target(ctx, path, &default_name);
    let svg = PieChart::from_result(&record.result, &ctx.chart_colors()).to_svg();
    export::save(&path, svg.as_bytes())?;
    Ok(path)
}
