//! Kotlin accessor generation.
//!
//! Each resource type group of the catalog becomes one Kotlin file. The
//! accessor shapes come from the resource table; nothing here branches on
//! the resource type.

mod kotlin;
mod sanitize;

pub use kotlin::{KotlinWriter, GENERATED_HEADER};
pub use sanitize::{escape_keyword, r_field_name, sanitize_identifier, SanitizedName};

use crate::error::GenerationError;
use crate::merge::{CanonicalCatalog, GenerationUnit};
use crate::model::ResourceType;
use heck::ToUpperCamelCase;
use kotlin::Accessor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Inputs of a generation run besides the catalog
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub package_name: String,
    pub variant_name: String,
    pub generate_resources_extensions: bool,
    pub generate_compose_extensions: bool,
    pub skip_types: Vec<ResourceType>,
}

impl GenerationOptions {
    pub fn new(package_name: impl Into<String>, variant_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            variant_name: variant_name.into(),
            generate_resources_extensions: true,
            generate_compose_extensions: false,
            skip_types: Vec::new(),
        }
    }
}

/// Text of one generated Kotlin file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Path below the output root (`com/example/Strings.kt`)
    pub relative_path: PathBuf,
    pub resource_type: ResourceType,
    #[serde(skip)]
    pub contents: String,
    pub resources_accessors: usize,
    pub compose_accessors: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub files: usize,
    pub resources_accessors: usize,
    pub compose_accessors: usize,
    /// Type groups dropped because of generation errors
    pub failed_groups: usize,
}

/// Result of a generation run. Files of healthy type groups are present
/// even when other groups failed.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub files: Vec<GeneratedFile>,
    pub errors: Vec<GenerationError>,
    pub stats: GenerationStats,
}

impl Generation {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Codegen {
    options: GenerationOptions,
}

impl Codegen {
    pub fn new(options: GenerationOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, catalog: &CanonicalCatalog) -> Generation {
        let mut generation = Generation::default();

        if !self.options.generate_resources_extensions && !self.options.generate_compose_extensions {
            info!("Both accessor families are disabled; nothing to generate");
            return generation;
        }

        for unit in catalog.groups(&self.options.package_name) {
            match self.generate_unit(&unit) {
                Ok(Some(file)) => {
                    generation.stats.files += 1;
                    generation.stats.resources_accessors += file.resources_accessors;
                    generation.stats.compose_accessors += file.compose_accessors;
                    generation.files.push(file);
                }
                Ok(None) => {}
                Err(errors) => {
                    for error in &errors {
                        warn!("{}", error);
                    }
                    generation.stats.failed_groups += 1;
                    generation.errors.extend(errors);
                }
            }
        }

        info!(
            "Generated {} files ({} resources accessors, {} compose accessors)",
            generation.stats.files, generation.stats.resources_accessors, generation.stats.compose_accessors
        );

        generation
    }

    /// Generate the file of one type group; `None` when it has no accessor
    /// to emit
    pub fn generate_unit(&self, unit: &GenerationUnit<'_>) -> Result<Option<GeneratedFile>, Vec<GenerationError>> {
        let resource_type = unit.resource_type;
        if self.options.skip_types.contains(&resource_type) {
            debug!("Skipping {} by configuration", resource_type);
            return Ok(None);
        }

        let spec = resource_type.spec();
        let resources = Some(&spec.resources).filter(|_| self.options.generate_resources_extensions);
        let compose = spec.compose.as_ref().filter(|_| self.options.generate_compose_extensions);
        if (resources.is_none() && compose.is_none()) || unit.entries.is_empty() {
            return Ok(None);
        }

        let names = sanitize_unit(unit)?;

        let mut accessors = Vec::new();
        let mut resources_accessors = 0;
        let mut compose_accessors = 0;
        for (declaration, name) in unit.entries.iter().copied().zip(names) {
            if let Some(shape) = resources {
                accessors.push(Accessor {
                    declaration,
                    name: name.clone(),
                    shape,
                });
                resources_accessors += 1;
            }
            if let Some(shape) = compose {
                accessors.push(Accessor {
                    declaration,
                    name,
                    shape,
                });
                compose_accessors += 1;
            }
        }

        let jvm_name = format!("{}{}", spec.container, self.options.variant_name.to_upper_camel_case());
        let contents = kotlin::render_file(unit.package_name, &jvm_name, resource_type, &accessors);

        let mut relative_path: PathBuf = unit.package_name.split('.').collect();
        relative_path.push(format!("{}.kt", spec.container));

        debug!(
            "{}: {} entries -> {}",
            resource_type,
            unit.entries.len(),
            relative_path.display()
        );

        Ok(Some(GeneratedFile {
            relative_path,
            resource_type,
            contents,
            resources_accessors,
            compose_accessors,
        }))
    }
}

/// Sanitized names of every entry, or all the problems of the unit
fn sanitize_unit(unit: &GenerationUnit<'_>) -> Result<Vec<SanitizedName>, Vec<GenerationError>> {
    let mut errors = Vec::new();
    let mut names = Vec::with_capacity(unit.entries.len());
    let mut by_accessor: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for declaration in &unit.entries {
        match sanitize_identifier(&declaration.key) {
            Ok(name) => {
                by_accessor
                    .entry(name.accessor.clone())
                    .or_default()
                    .push(declaration.name().to_string());
                names.push(name);
            }
            Err(e) => errors.push(e),
        }
    }

    for (identifier, names) in by_accessor {
        if names.len() > 1 {
            errors.push(GenerationError::IdentifierCollision {
                resource_type: unit.resource_type,
                identifier,
                names,
            });
        }
    }

    if errors.is_empty() {
        Ok(names)
    } else {
        Err(errors)
    }
}
