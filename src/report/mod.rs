mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::pipeline::PipelineOutput;
use crate::sink::SinkSummary;
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for run summaries
#[derive(Debug, Clone, Default)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// What one generation run did, as reported to the user
pub struct RunReport<'a> {
    pub variant: &'a str,
    pub package_name: &'a str,
    pub output_dir: &'a Path,
    /// Files were kept in memory instead of written
    pub dry_run: bool,
    pub output: &'a PipelineOutput,
    pub sink: &'a SinkSummary,
}

/// Reporter for generation runs
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn report(&self, run: &RunReport<'_>) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new().report(run),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(run),
        }
    }
}
