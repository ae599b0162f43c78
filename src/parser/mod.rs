mod format;
pub mod xml;

pub use format::{extract_format_args, merge_format_args};

use crate::discovery::{ResourceFile, ResourceFileKind};
use crate::error::{ParseError, SkipReason, SkippedEntry};
use crate::model::{FormatArg, QualifiedSourceSet, ResourceDeclaration, ResourceKey, ResourceValue};
use std::path::{Path, PathBuf};
use xml::{IdParser, ValuesParser};

/// Declarations and diagnostics of one resource file
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub declarations: Vec<ResourceDeclaration>,
    pub skipped: Vec<SkippedEntry>,
}

impl ParsedFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            declarations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn declare(
        &mut self,
        origin: &QualifiedSourceSet,
        key: ResourceKey,
        value: ResourceValue,
        format_args: Vec<FormatArg>,
        line: usize,
    ) {
        self.declarations.push(ResourceDeclaration {
            key,
            value,
            format_args,
            qualifier: origin.qualifier,
            source_set: origin.name.clone(),
            source_file: self.path.clone(),
            line,
        });
    }

    pub fn skip(&mut self, line: usize, element: &str, reason: SkipReason) {
        self.skipped.push(SkippedEntry {
            file: self.path.clone(),
            line,
            element: element.to_string(),
            reason,
        });
    }

    pub fn merge(&mut self, other: ParsedFile) {
        self.declarations.extend(other.declarations);
        self.skipped.extend(other.skipped);
    }
}

/// Trait for resource markup parsers
pub trait XmlResourceParser {
    /// Parse the contents of one file, attributing declarations to `origin`
    fn parse(&self, path: &Path, contents: &str, origin: &QualifiedSourceSet) -> Result<ParsedFile, ParseError>;
}

/// Dispatches resource files to the parser for their folder
pub struct ResourceParser {
    values: ValuesParser,
    ids: IdParser,
}

impl ResourceParser {
    pub fn new() -> Self {
        Self {
            values: ValuesParser::new(),
            ids: IdParser::new(),
        }
    }

    pub fn parse_file(&self, file: &ResourceFile, origin: &QualifiedSourceSet) -> Result<ParsedFile, ParseError> {
        match file.kind {
            ResourceFileKind::Values => {
                let contents = read(&file.path)?;
                self.values.parse(&file.path, &contents, origin)
            }
            ResourceFileKind::File(resource_type) => {
                let mut parsed = ParsedFile::new(&file.path);
                parsed.declare(
                    origin,
                    ResourceKey::new(resource_type, file.resource_name()),
                    ResourceValue::File(file.path.clone()),
                    Vec::new(),
                    1,
                );
                // Compiled XML resources may create ids
                if file.is_xml() && resource_type.spec().compiled_xml {
                    let contents = read(&file.path)?;
                    parsed.merge(self.ids.parse(&file.path, &contents, origin)?);
                }
                Ok(parsed)
            }
        }
    }
}

impl Default for ResourceParser {
    fn default() -> Self {
        Self::new()
    }
}

fn read(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path)
        .map_err(|e| ParseError::new(path, "", 0, format!("cannot read file: {}", e)))
}
