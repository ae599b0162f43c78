//! Errors and non-fatal diagnostics of a generation run.
//!
//! Fatal errors stop the affected unit of work and are surfaced to the
//! caller: a missing package name stops the run before parsing, a malformed
//! file stops that file, a generation error stops that resource type group.
//! Skipped entries and merge collisions are recorded and never block.

use crate::model::{ResourceKey, ResourceType, SourceSetQualifier};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    /// No package name could be resolved for the variant
    #[error("Missing package name for build variant {variant}")]
    #[diagnostic(
        code(catalog::precondition),
        help("Pass --package, set `namespace` in the config file, or declare `package` in an AndroidManifest.xml")
    )]
    MissingPackageName { variant: String },

    /// One or more resource files are not well-formed markup
    #[error("{} resource file(s) are not well-formed", errors.len())]
    #[diagnostic(code(catalog::parse))]
    MalformedResources {
        #[related]
        errors: Vec<ParseError>,
    },

    /// Some resource type groups produced no file
    #[error("{} generation error(s); the affected resource types were not generated", errors.len())]
    #[diagnostic(code(catalog::generation))]
    GenerationFailed {
        #[related]
        errors: Vec<GenerationError>,
    },

    #[error("I/O error on {}", path.display())]
    #[diagnostic(code(catalog::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(catalog::config))]
    Config { message: String },
}

impl CatalogError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A resource file that is not well-formed markup
#[derive(Debug, Error, Diagnostic)]
#[error("{}:{line}:{column}: {message}", path.display())]
#[diagnostic(
    code(catalog::parse),
    help("The resource compiler would reject this file as well; fix the markup")
)]
pub struct ParseError {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub message: String,
    #[source_code]
    src: NamedSource,
    #[label("not well-formed here")]
    span: SourceSpan,
}

impl ParseError {
    /// Build an error pointing at byte `offset` of `contents`
    pub fn new(path: &Path, contents: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(contents.len());
        let (line, column) = line_column(contents, offset);
        Self {
            path: path.to_path_buf(),
            line,
            column,
            message: message.into(),
            src: NamedSource::new(path.display().to_string(), contents.to_string()),
            span: (offset, 0).into(),
        }
    }
}

/// 1-based line and column of a byte offset
pub(crate) fn line_column(contents: &str, offset: usize) -> (usize, usize) {
    let prefix = &contents.as_bytes()[..offset.min(contents.len())];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix.iter().rposition(|&b| b == b'\n').map(|i| i + 1).unwrap_or(0);
    let column = String::from_utf8_lossy(&prefix[line_start..]).chars().count() + 1;
    (line, column)
}

/// A resource type group could not be generated
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    #[error("Resource {key} does not produce a valid identifier")]
    #[diagnostic(
        code(catalog::generation),
        help("Rename the resource so it contains at least one letter or digit")
    )]
    EmptyIdentifier { key: ResourceKey },

    #[error(
        "Resources {} of type {resource_type} all map to the identifier `{identifier}`",
        names.join(", ")
    )]
    #[diagnostic(
        code(catalog::generation),
        help("Rename one of the resources; accessors must have distinct names")
    )]
    IdentifierCollision {
        resource_type: ResourceType,
        identifier: String,
        names: Vec<String>,
    },
}

impl GenerationError {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            GenerationError::EmptyIdentifier { key } => key.resource_type,
            GenerationError::IdentifierCollision { resource_type, .. } => *resource_type,
        }
    }
}

/// Why a declaration was left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Element is not a recognized resource declaration
    UnsupportedElement,
    /// `<item type="...">` names an unknown type
    UnsupportedItemType(String),
    /// Declaration has no `name` attribute
    MissingName,
    /// Values file whose root element is not `<resources>`
    UnexpectedRoot,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedElement => write!(f, "unsupported element"),
            SkipReason::UnsupportedItemType(t) => write!(f, "unsupported item type '{}'", t),
            SkipReason::MissingName => write!(f, "missing name attribute"),
            SkipReason::UnexpectedRoot => write!(f, "root element is not <resources>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub file: PathBuf,
    pub line: usize,
    pub element: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: skipped <{}>: {}",
            self.file.display(),
            self.line,
            self.element,
            self.reason
        )
    }
}

/// Same key declared by two source sets of equal rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeCollision {
    pub key: ResourceKey,
    pub qualifier: SourceSetQualifier,
    /// Source set whose declaration was kept
    pub winner: String,
    pub overridden: String,
}

impl fmt::Display for MergeCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} declared by {} source sets '{}' and '{}'; using '{}'",
            self.key, self.qualifier, self.overridden, self.winner, self.winner
        )
    }
}

/// Non-fatal findings collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub skipped: Vec<SkippedEntry>,
    pub collisions: Vec<MergeCollision>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len() + self.collisions.len()
    }
}
