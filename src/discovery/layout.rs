use crate::error::CatalogError;
use crate::model::{QualifiedSourceSet, SourceSetQualifier};
use crate::parser::xml::ManifestParser;
use heck::ToLowerCamelCase;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAIN: &str = "main";

/// A build variant: one build type combined with zero or more product
/// flavors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub name: String,
    pub build_type: Option<String>,
    pub product_flavors: Vec<String>,
}

impl VariantSpec {
    /// Build a variant. Without an explicit name it is derived the way
    /// Android names variants (`free`, `arm`, `debug` → `freeArmDebug`).
    pub fn new(name: Option<String>, build_type: Option<String>, product_flavors: Vec<String>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                let parts: Vec<&str> = product_flavors
                    .iter()
                    .map(String::as_str)
                    .chain(build_type.as_deref())
                    .collect();
                if parts.is_empty() {
                    MAIN.to_string()
                } else {
                    lower_camel_join(&parts)
                }
            });

        Self {
            name,
            build_type,
            product_flavors,
        }
    }

    /// The variant with only the main source set
    pub fn main() -> Self {
        Self::new(None, None, Vec::new())
    }

    /// Source set combining all flavors, present with two or more flavors
    pub fn flavor_combination(&self) -> Option<String> {
        if self.product_flavors.len() < 2 {
            return None;
        }
        let parts: Vec<&str> = self.product_flavors.iter().map(String::as_str).collect();
        Some(lower_camel_join(&parts))
    }
}

fn lower_camel_join(parts: &[&str]) -> String {
    parts.join("_").to_lower_camel_case()
}

/// Location of an Android module plus the variant being generated
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub module_dir: PathBuf,
    pub variant: VariantSpec,
    /// Explicit source sets replacing the conventional `src/<name>/res` set
    pub explicit_source_sets: Vec<QualifiedSourceSet>,
}

impl ProjectLayout {
    pub fn new(module_dir: impl Into<PathBuf>, variant: VariantSpec) -> Self {
        Self {
            module_dir: module_dir.into(),
            variant,
            explicit_source_sets: Vec::new(),
        }
    }

    pub fn with_source_sets(mut self, source_sets: Vec<QualifiedSourceSet>) -> Self {
        self.explicit_source_sets = source_sets;
        self
    }

    pub fn source_set_dir(&self, name: &str) -> PathBuf {
        self.module_dir.join("src").join(name)
    }

    /// Names of the conventional source sets contributing to the variant,
    /// lowest precedence first. A name appears once, at its lowest rank.
    fn conventional_names(&self) -> Vec<(String, SourceSetQualifier)> {
        let variant = &self.variant;
        let mut names = vec![(MAIN.to_string(), SourceSetQualifier::Main)];
        if let Some(build_type) = &variant.build_type {
            names.push((build_type.clone(), SourceSetQualifier::BuildType));
        }
        for flavor in &variant.product_flavors {
            names.push((flavor.clone(), SourceSetQualifier::ProductFlavor));
        }
        if let Some(combination) = variant.flavor_combination() {
            names.push((combination, SourceSetQualifier::FlavorCombination));
        }
        names.push((variant.name.clone(), SourceSetQualifier::Variant));

        let mut seen = HashSet::new();
        names.retain(|(name, _)| seen.insert(name.clone()));
        names
    }

    /// Source sets feeding this variant, lowest precedence first
    pub fn source_sets(&self) -> Vec<QualifiedSourceSet> {
        if !self.explicit_source_sets.is_empty() {
            return self.explicit_source_sets.clone();
        }
        self.conventional_names()
            .into_iter()
            .map(|(name, qualifier)| {
                let res_dir = self.source_set_dir(&name).join("res");
                QualifiedSourceSet::new(name, qualifier, res_dir)
            })
            .collect()
    }

    /// Manifests consulted for the package name, highest precedence first:
    /// variant, build type, flavors, main
    pub fn manifest_candidates(&self) -> Vec<PathBuf> {
        let variant = &self.variant;
        let mut names: Vec<&str> = vec![variant.name.as_str()];
        names.extend(variant.build_type.as_deref());
        names.extend(variant.product_flavors.iter().map(String::as_str));
        names.push(MAIN);

        let mut seen = HashSet::new();
        names
            .into_iter()
            .filter(|name| seen.insert(*name))
            .map(|name| self.source_set_dir(name).join("AndroidManifest.xml"))
            .collect()
    }

    /// `<module>/<generated_root>/<variant>/kotlin`
    pub fn output_dir(&self, generated_root: &Path) -> PathBuf {
        self.module_dir
            .join(generated_root)
            .join(&self.variant.name)
            .join("kotlin")
    }
}

/// Resolve the package of the generated code: an explicit namespace wins,
/// then the first manifest declaring a package.
pub fn resolve_package_name(namespace: Option<&str>, layout: &ProjectLayout) -> Result<String, CatalogError> {
    if let Some(namespace) = namespace.map(str::trim).filter(|n| !n.is_empty()) {
        debug!("Using namespace {}", namespace);
        return Ok(namespace.to_string());
    }

    let parser = ManifestParser::new();
    for manifest in layout.manifest_candidates() {
        if let Some(package) = parser.read_package(&manifest)? {
            debug!("Using package {} from {}", package, manifest.display());
            return Ok(package);
        }
    }

    Err(CatalogError::MissingPackageName {
        variant: layout.variant.name.clone(),
    })
}
