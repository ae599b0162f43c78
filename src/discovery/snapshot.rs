use crate::config::Config;
use crate::error::{CatalogError, ParseError};
use crate::model::{QualifiedSourceSet, ResourceType};
use crate::parser::{ParsedFile, ResourceParser};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// How a file inside a res directory declares resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFileKind {
    /// `values*/` file holding `<resources>` declarations
    Values,
    /// The file itself is a resource of this type
    File(ResourceType),
}

/// A file inside a res directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    /// Folder name including configuration qualifiers, e.g. "values-night"
    pub folder: String,
    pub kind: ResourceFileKind,
}

impl ResourceFile {
    pub fn new(path: PathBuf, folder: impl Into<String>, kind: ResourceFileKind) -> Self {
        Self {
            path,
            folder: folder.into(),
            kind,
        }
    }

    /// Classify a file by its folder; `None` for files that declare nothing
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.starts_with('.') {
            return None;
        }
        let folder = path.parent()?.file_name()?.to_str()?;

        let kind = if folder == "values" || folder.starts_with("values-") {
            if path.extension()?.to_str()? != "xml" {
                return None;
            }
            ResourceFileKind::Values
        } else {
            ResourceFileKind::File(ResourceType::from_folder(folder)?)
        };

        Some(Self::new(path.to_path_buf(), folder, kind))
    }

    /// Resource name of a file-based resource: the file name up to its
    /// first dot (`ic_launcher.9.png` → `ic_launcher`)
    pub fn resource_name(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match file_name.split_once('.') {
            Some((name, _)) => name.to_string(),
            None => file_name,
        }
    }

    pub fn is_xml(&self) -> bool {
        self.path.extension().map(|e| e == "xml").unwrap_or(false)
    }

    fn folder_base(&self) -> &str {
        self.folder.split('-').next().unwrap_or(&self.folder)
    }

    fn is_qualified(&self) -> bool {
        self.folder.contains('-')
    }
}

/// Fixed listing of the resource files of one source set.
///
/// Files are ordered by folder type, then qualified folders before the
/// unqualified one, then by path. Within a source set the last declaration
/// of a key wins, so the default (`values/`) declaration is the one kept.
#[derive(Debug, Clone)]
pub struct ResDirSnapshot {
    source_set: QualifiedSourceSet,
    files: Vec<ResourceFile>,
}

impl ResDirSnapshot {
    /// Scan the res directory of a source set. A missing directory yields an
    /// empty snapshot.
    pub fn scan(source_set: &QualifiedSourceSet, config: &Config) -> Result<Self, CatalogError> {
        let res_dir = &source_set.res_dir;
        if !res_dir.is_dir() {
            trace!("Resource directory does not exist: {}", res_dir.display());
            return Ok(Self::empty(source_set));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(res_dir).min_depth(2).max_depth(2).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(res_dir).to_path_buf();
                CatalogError::io(&path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if config.should_exclude(path) {
                trace!("Excluding: {}", path.display());
                continue;
            }
            if let Some(file) = ResourceFile::from_path(path) {
                files.push(file);
            }
        }

        files.sort_by(|a, b| {
            a.folder_base()
                .cmp(b.folder_base())
                .then(b.is_qualified().cmp(&a.is_qualified()))
                .then(a.folder.cmp(&b.folder))
                .then(a.path.cmp(&b.path))
        });

        debug!(
            "Source set '{}' ({}): {} resource files in {}",
            source_set.name,
            source_set.qualifier,
            files.len(),
            res_dir.display()
        );

        Ok(Self {
            source_set: source_set.clone(),
            files,
        })
    }

    pub fn empty(source_set: &QualifiedSourceSet) -> Self {
        Self {
            source_set: source_set.clone(),
            files: Vec::new(),
        }
    }

    pub fn source_set(&self) -> &QualifiedSourceSet {
        &self.source_set
    }

    pub fn files(&self) -> &[ResourceFile] {
        &self.files
    }

    /// Lazily parse the snapshot file by file. Each call starts over from
    /// the first file.
    pub fn parse<'a>(&'a self, parser: &'a ResourceParser) -> ParsedFiles<'a> {
        ParsedFiles {
            snapshot: self,
            parser,
            next: 0,
        }
    }
}

/// Iterator over the parse results of a snapshot
pub struct ParsedFiles<'a> {
    snapshot: &'a ResDirSnapshot,
    parser: &'a ResourceParser,
    next: usize,
}

impl Iterator for ParsedFiles<'_> {
    type Item = Result<ParsedFile, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let file = self.snapshot.files.get(self.next)?;
        self.next += 1;
        Some(self.parser.parse_file(file, &self.snapshot.source_set))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.snapshot.files.len() - self.next;
        (remaining, Some(remaining))
    }
}
