// Data quality pipeline: loading, auditing, cleaning and artifact output

pub mod audit;
pub mod clean;
pub mod loader;
pub mod output;

pub use audit::{audit, CountMap, QualityReport};
pub use clean::{clean, clean_numeric, CleanFields, CleanResult};
pub use loader::{load, LoadResult};

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub input: PathBuf,
    pub row_count: usize,
    pub retained_rows: usize,
    pub dropped_rows: usize,
    pub report_path: PathBuf,
    pub clean_path: PathBuf,
}

/// Runs the stages against files, using field roles from [`Config`].
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn clean_fields(&self) -> CleanFields<'_> {
        CleanFields {
            required: &self.config.clean.required_field,
            numeric: &self.config.clean.numeric_field,
            normalize: &self.config.clean.normalize_field,
        }
    }

    /// Load `input` and audit it.
    pub fn report_file(&self, input: &Path) -> Result<QualityReport> {
        let document = load(input)?;
        Ok(audit(&document, self.config.audit.numeric_fields.as_slice()))
    }

    /// Load `input`, clean it and write the retained rows to `output`.
    ///
    /// A load fault writes nothing.
    pub fn clean_file(&self, input: &Path, output: &Path) -> Result<CleanResult> {
        let document = load(input)?;
        let result = clean(document, self.clean_fields());
        output::write_rows(&result.columns, &result.rows, output)?;
        Ok(result)
    }

    /// Load once, then write both the quality report and the cleaned rows to
    /// the configured output paths.
    #[instrument(skip_all, fields(input = %input.display()))]
    pub fn run(&self, input: &Path) -> Result<PipelineResult> {
        let document = load(input)?;
        let row_count = document.row_count();

        let report = audit(&document, self.config.audit.numeric_fields.as_slice());
        output::write_report(&report, &self.config.output.report_path)?;

        let cleaned = clean(document, self.clean_fields());
        output::write_rows(&cleaned.columns, &cleaned.rows, &self.config.output.clean_path)?;

        info!("Pipeline finished");
        Ok(PipelineResult {
            input: input.to_path_buf(),
            row_count,
            retained_rows: cleaned.retained,
            dropped_rows: cleaned.dropped,
            report_path: self.config.output.report_path.clone(),
            clean_path: self.config.output.clean_path.clone(),
        })
    }
}
