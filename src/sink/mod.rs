//! Destinations for generated files

use crate::codegen::{GeneratedFile, GENERATED_HEADER};
use crate::error::CatalogError;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    Written,
    /// Existing file already had the same contents
    Unchanged,
}

/// What a sink did over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkSummary {
    pub written: usize,
    pub unchanged: usize,
    pub pruned: Vec<PathBuf>,
}

/// Receives generated files
pub trait EmissionSink {
    fn emit(&mut self, file: &GeneratedFile) -> Result<EmitOutcome, CatalogError>;

    /// Called once after the last file of a run
    fn finish(&mut self) -> Result<SinkSummary, CatalogError>;
}

/// Writes files below a per-variant output directory
pub struct DirectorySink {
    root: PathBuf,
    emitted: HashSet<PathBuf>,
    summary: SinkSummary,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            emitted: HashSet::new(),
            summary: SinkSummary::default(),
        }
    }

    /// Generated files under the root that this run did not emit
    fn stale_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let mut stale = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                CatalogError::io(&path, e.into())
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map(|e| e != "kt").unwrap_or(true)
                || self.emitted.contains(path)
            {
                continue;
            }
            let contents = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
            if contents.lines().next() == Some(GENERATED_HEADER) {
                stale.push(path.to_path_buf());
            }
        }
        stale.sort();
        Ok(stale)
    }
}

impl EmissionSink for DirectorySink {
    fn emit(&mut self, file: &GeneratedFile) -> Result<EmitOutcome, CatalogError> {
        let path = self.root.join(&file.relative_path);
        self.emitted.insert(path.clone());

        // Leave timestamps alone when nothing changed
        if let Ok(existing) = fs::read_to_string(&path) {
            if existing == file.contents {
                trace!("Unchanged: {}", path.display());
                self.summary.unchanged += 1;
                return Ok(EmitOutcome::Unchanged);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        fs::write(&path, &file.contents).map_err(|e| CatalogError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        self.summary.written += 1;
        Ok(EmitOutcome::Written)
    }

    fn finish(&mut self) -> Result<SinkSummary, CatalogError> {
        if self.root.is_dir() {
            for path in self.stale_files()? {
                fs::remove_file(&path).map_err(|e| CatalogError::io(&path, e))?;
                debug!("Removed stale {}", path.display());
                self.summary.pruned.push(path);
            }
        }
        Ok(std::mem::take(&mut self.summary))
    }
}

/// Keeps generated files in memory, keyed by relative path
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative_path.as_ref()).map(String::as_str)
    }
}

impl EmissionSink for MemorySink {
    fn emit(&mut self, file: &GeneratedFile) -> Result<EmitOutcome, CatalogError> {
        let previous = self.files.insert(file.relative_path.clone(), file.contents.clone());
        Ok(match previous {
            Some(previous) if previous == file.contents => EmitOutcome::Unchanged,
            _ => EmitOutcome::Written,
        })
    }

    fn finish(&mut self) -> Result<SinkSummary, CatalogError> {
        Ok(SinkSummary {
            written: self.files.len(),
            unchanged: 0,
            pruned: Vec::new(),
        })
    }
}
