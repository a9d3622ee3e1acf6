use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::pipeline::audit::QualityReport;
use crate::types::Row;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write the report as 2-space indented JSON.
pub fn write_report(report: &QualityReport, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Quality report generated successfully: {}", path.display());
    Ok(())
}

/// Write rows under `columns`, one `\n`-terminated line per record.
///
/// The terminator is always `\n`, whatever the input used. Columns a row does
/// not carry are written as empty fields.
pub fn write_rows(columns: &[String], rows: &[Row], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| row.get(c).unwrap_or("")))?;
    }
    writer.flush()?;

    info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(())
}
