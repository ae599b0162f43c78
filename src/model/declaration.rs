use super::{ResourceType, SourceSetQualifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Identity of one logical resource across all source sets
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub resource_type: ResourceType,
    pub name: String,
}

impl ResourceKey {
    pub fn new(resource_type: ResourceType, name: impl Into<String>) -> Self {
        Self {
            resource_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.name)
    }
}

/// Declared content of a resource, as far as accessors need it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResourceValue {
    /// Scalar value (string text, color, dimension, ...)
    Text(String),
    /// Plural forms keyed by quantity
    Quantities(BTreeMap<String, String>),
    /// Array items
    Items(Vec<String>),
    /// File-based resource
    File(PathBuf),
    Empty,
}

impl ResourceValue {
    /// Text used for generated documentation
    pub fn summary(&self) -> Option<&str> {
        match self {
            ResourceValue::Text(text) if !text.is_empty() => Some(text),
            ResourceValue::Quantities(quantities) => quantities
                .get("other")
                .or_else(|| quantities.values().next())
                .map(String::as_str),
            _ => None,
        }
    }
}

/// Kotlin type expected by a format specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    Any,
    Int,
    Double,
    Char,
    Boolean,
}

impl FormatKind {
    pub fn kotlin_type(&self) -> &'static str {
        match self {
            FormatKind::Any => "Any",
            FormatKind::Int => "Int",
            FormatKind::Double => "Double",
            FormatKind::Char => "Char",
            FormatKind::Boolean => "Boolean",
        }
    }
}

/// A positional argument of a format string (1-based position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatArg {
    pub position: usize,
    pub kind: FormatKind,
}

/// One declaration found in a resource directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeclaration {
    pub key: ResourceKey,
    pub value: ResourceValue,
    /// Format arguments, ordered by position
    pub format_args: Vec<FormatArg>,
    pub qualifier: SourceSetQualifier,
    /// Name of the source set the declaration came from
    pub source_set: String,
    pub source_file: PathBuf,
    /// 1-based line of the declaring element (1 for file-based resources)
    pub line: usize,
}

impl ResourceDeclaration {
    pub fn resource_type(&self) -> ResourceType {
        self.key.resource_type
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }
}
