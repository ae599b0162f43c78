use super::RunReport;
use crate::codegen::GenerationStats;
use crate::error::{MergeCollision, SkippedEntry};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, run: &RunReport<'_>) -> Result<()> {
        let report = JsonReport::from_run(run);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    variant: &'a str,
    package: &'a str,
    output_dir: String,
    dry_run: bool,
    resources: usize,
    by_type: BTreeMap<&'static str, usize>,
    files: Vec<JsonFile>,
    stats: GenerationStats,
    written: usize,
    unchanged: usize,
    pruned: Vec<String>,
    skipped: &'a [SkippedEntry],
    collisions: &'a [MergeCollision],
    errors: Vec<String>,
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    resource_type: &'static str,
    resources_accessors: usize,
    compose_accessors: usize,
}

impl<'a> JsonReport<'a> {
    fn from_run(run: &RunReport<'a>) -> Self {
        let output = run.output;
        let generation = &output.generation;

        Self {
            version: "1.0",
            variant: run.variant,
            package: run.package_name,
            output_dir: run.output_dir.to_string_lossy().to_string(),
            dry_run: run.dry_run,
            resources: output.catalog.len(),
            by_type: output
                .catalog
                .counts()
                .into_iter()
                .map(|(resource_type, count)| (resource_type.as_str(), count))
                .collect(),
            files: generation
                .files
                .iter()
                .map(|file| JsonFile {
                    path: file.relative_path.to_string_lossy().replace('\\', "/"),
                    resource_type: file.resource_type.as_str(),
                    resources_accessors: file.resources_accessors,
                    compose_accessors: file.compose_accessors,
                })
                .collect(),
            stats: generation.stats,
            written: run.sink.written,
            unchanged: run.sink.unchanged,
            pruned: run
                .sink
                .pruned
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect(),
            skipped: &output.diagnostics.skipped,
            collisions: &output.diagnostics.collisions,
            errors: generation.errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}
