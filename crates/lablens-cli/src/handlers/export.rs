use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::types::{ExportFormat, ExportTarget};
use anyhow::{Context, Result};
use lablens_engine::Panel;
use lablens_types::Record;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct ExportRequest {
    pub what: ExportTarget,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub limit: Option<usize>,
    pub subject: Option<String>,
    pub filter: FilterArgs,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    what: String,
    format: String,
    output: String,
    rows: usize,
    /// Matches before the limit (subset only)
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<usize>,
}

pub fn handle(ctx: &ExecutionContext, request: ExportRequest) -> Result<()> {
    let workspace = ctx.workspace()?;

    let (rows, matched) = match request.what {
        ExportTarget::Subset => {
            let filter = request.filter.require()?;
            let response = workspace.subset(&filter, request.limit)?;
            write_records(&request.output, request.format, &response.records)?;
            (response.records.len(), Some(response.rowcount))
        }
        ExportTarget::Panels => {
            let panels = workspace.panels(request.subject.as_deref())?;
            write_panels(&request.output, request.format, &panels)?;
            (panels.len(), None)
        }
    };

    tracing::info!(output = %request.output.display(), rows, "export written");

    let summary = ExportSummary {
        what: request.what.to_string(),
        format: request.format.to_string(),
        output: request.output.display().to_string(),
        rows,
        matched,
    };

    if ctx.json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Exported {} {} rows to {}", rows, summary.what, summary.output);
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_records(path: &Path, format: ExportFormat, records: &[Record]) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(create(path)?);
            writer.write_record(lablens_loader::EXPECTED_COLUMNS)?;
            for record in records {
                writer.write_record([
                    record.subject_id.clone(),
                    record.sex.to_string(),
                    record.age.map(|a| a.to_string()).unwrap_or_default(),
                    record.test_name.clone(),
                    record.result_value.to_string(),
                    record.service_unit.clone(),
                    record.date.to_string(),
                ])?;
            }
            writer.flush()?;
        }
        ExportFormat::Jsonl => write_jsonl(path, records)?,
    }
    Ok(())
}

fn write_panels(path: &Path, format: ExportFormat, panels: &[Panel]) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(create(path)?);
            writer.write_record(["numorden", "Date", "n_tests", "tests_list"])?;
            for panel in panels {
                writer.write_record([
                    panel.subject_id.clone(),
                    panel.date.to_string(),
                    panel.n_tests.to_string(),
                    panel.tests_list(),
                ])?;
            }
            writer.flush()?;
        }
        ExportFormat::Jsonl => write_jsonl(path, panels)?,
    }
    Ok(())
}

fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = create(path)?;
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
