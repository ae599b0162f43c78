//! Parse → merge → generate for one build variant

use crate::codegen::{Codegen, Generation, GenerationOptions};
use crate::config::Config;
use crate::discovery::ResDirSnapshot;
use crate::error::{CatalogError, Diagnostics, ParseError, SkippedEntry};
use crate::merge::{CanonicalCatalog, Merger};
use crate::model::{QualifiedSourceSet, ResourceDeclaration};
use crate::parser::ResourceParser;
use crate::sink::{EmissionSink, SinkSummary};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

/// Everything a run produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub catalog: CanonicalCatalog,
    pub generation: Generation,
    pub diagnostics: Diagnostics,
}

/// Parse results of one source set
struct SourceSetParse {
    source_set: QualifiedSourceSet,
    declarations: Vec<ResourceDeclaration>,
    skipped: Vec<SkippedEntry>,
    errors: Vec<ParseError>,
    files: usize,
}

pub struct Pipeline {
    config: Config,
    parser: ResourceParser,
    parallel: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: ResourceParser::new(),
            parallel: false,
        }
    }

    /// Parse source sets on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run the pipeline over the given source sets. Absent res directories
    /// contribute nothing.
    pub fn run(&self, source_sets: &[QualifiedSourceSet], options: &GenerationOptions) -> Result<PipelineOutput, CatalogError> {
        if options.package_name.trim().is_empty() {
            return Err(CatalogError::MissingPackageName {
                variant: options.variant_name.clone(),
            });
        }

        let start = Instant::now();

        let snapshots = source_sets
            .iter()
            .map(|source_set| ResDirSnapshot::scan(source_set, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        let parsed: Vec<SourceSetParse> = if self.parallel {
            snapshots.par_iter().map(|s| self.parse_snapshot(s)).collect()
        } else {
            snapshots.iter().map(|s| self.parse_snapshot(s)).collect()
        };

        let mut diagnostics = Diagnostics::default();
        let mut errors = Vec::new();
        let mut inputs = Vec::with_capacity(parsed.len());
        let mut file_count = 0;
        for result in parsed {
            file_count += result.files;
            diagnostics.skipped.extend(result.skipped);
            errors.extend(result.errors);
            inputs.push((result.source_set, result.declarations));
        }

        info!(
            "Parsed {} resource files from {} source sets in {:?}",
            file_count,
            source_sets.len(),
            start.elapsed()
        );

        for skipped in &diagnostics.skipped {
            warn!("{}", skipped);
        }
        if !errors.is_empty() {
            return Err(CatalogError::MalformedResources { errors });
        }

        let merged = Merger::new().merge(inputs);
        diagnostics.collisions = merged.collisions;
        info!("Catalog for '{}' holds {} resources", options.variant_name, merged.catalog.len());

        let generation = Codegen::new(options.clone()).generate(&merged.catalog);

        Ok(PipelineOutput {
            catalog: merged.catalog,
            generation,
            diagnostics,
        })
    }

    fn parse_snapshot(&self, snapshot: &ResDirSnapshot) -> SourceSetParse {
        let mut result = SourceSetParse {
            source_set: snapshot.source_set().clone(),
            declarations: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            files: snapshot.files().len(),
        };
        for parsed in snapshot.parse(&self.parser) {
            match parsed {
                Ok(file) => {
                    result.declarations.extend(file.declarations);
                    result.skipped.extend(file.skipped);
                }
                Err(e) => result.errors.push(e),
            }
        }
        result
    }
}

/// Hand every generated file to `sink`
pub fn emit(generation: &Generation, sink: &mut dyn EmissionSink) -> Result<SinkSummary, CatalogError> {
    for file in &generation.files {
        sink.emit(file)?;
    }
    sink.finish()
}
