use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Override precedence of a source set.
///
/// The derived ordering is the merge order: a declaration from a higher
/// qualifier replaces one with the same key from a lower qualifier. New
/// levels are added by inserting a variant at the right position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceSetQualifier {
    Main,
    BuildType,
    ProductFlavor,
    FlavorCombination,
    Variant,
}

impl SourceSetQualifier {
    pub const ALL: [SourceSetQualifier; 5] = [
        SourceSetQualifier::Main,
        SourceSetQualifier::BuildType,
        SourceSetQualifier::ProductFlavor,
        SourceSetQualifier::FlavorCombination,
        SourceSetQualifier::Variant,
    ];

    /// Position in the precedence order, starting at 0 for `main`
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSetQualifier::Main => "main",
            SourceSetQualifier::BuildType => "build-type",
            SourceSetQualifier::ProductFlavor => "flavor",
            SourceSetQualifier::FlavorCombination => "flavor-combination",
            SourceSetQualifier::Variant => "variant",
        }
    }
}

impl fmt::Display for SourceSetQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSetQualifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "main" => Ok(SourceSetQualifier::Main),
            "build-type" | "buildtype" => Ok(SourceSetQualifier::BuildType),
            "flavor" | "product-flavor" | "productflavor" => Ok(SourceSetQualifier::ProductFlavor),
            "flavor-combination" | "flavorcombination" => Ok(SourceSetQualifier::FlavorCombination),
            "variant" => Ok(SourceSetQualifier::Variant),
            other => Err(format!(
                "unknown source set qualifier '{}' (expected one of: main, build-type, flavor, flavor-combination, variant)",
                other
            )),
        }
    }
}

/// A resource directory tagged with the source set it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedSourceSet {
    /// Source set name, e.g. "main", "debug", "freeDebug"
    pub name: String,
    pub qualifier: SourceSetQualifier,
    /// The `res/` directory; it does not have to exist
    pub res_dir: PathBuf,
}

impl QualifiedSourceSet {
    pub fn new(name: impl Into<String>, qualifier: SourceSetQualifier, res_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            qualifier,
            res_dir: res_dir.into(),
        }
    }
}
