//! Reconciles the declarations of all source sets into one catalog per
//! variant.

use crate::error::MergeCollision;
use crate::model::{QualifiedSourceSet, ResourceDeclaration, ResourceKey, ResourceType};
use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The merged view of all declarations of one build variant, keyed and
/// ordered by resource type name then resource name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalCatalog {
    entries: BTreeMap<ResourceKey, ResourceDeclaration>,
}

impl CanonicalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&ResourceDeclaration> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ResourceKey, ResourceDeclaration> {
        self.entries.iter()
    }

    /// Number of entries per resource type
    pub fn counts(&self) -> BTreeMap<ResourceType, usize> {
        let mut counts = BTreeMap::new();
        for key in self.entries.keys() {
            *counts.entry(key.resource_type).or_insert(0) += 1;
        }
        counts
    }

    /// Work items for the generator, one per resource type present
    pub fn groups<'a>(&'a self, package_name: &'a str) -> Vec<GenerationUnit<'a>> {
        let mut units: Vec<GenerationUnit<'a>> = Vec::new();
        for (key, declaration) in &self.entries {
            match units.last_mut() {
                Some(unit) if unit.resource_type == key.resource_type => unit.entries.push(declaration),
                _ => units.push(GenerationUnit {
                    package_name,
                    resource_type: key.resource_type,
                    entries: vec![declaration],
                }),
            }
        }
        units
    }

    fn insert(&mut self, declaration: ResourceDeclaration) -> Option<ResourceDeclaration> {
        match self.entries.entry(declaration.key.clone()) {
            Entry::Occupied(mut slot) => Some(slot.insert(declaration)),
            Entry::Vacant(slot) => {
                slot.insert(declaration);
                None
            }
        }
    }
}

impl<'a> IntoIterator for &'a CanonicalCatalog {
    type Item = (&'a ResourceKey, &'a ResourceDeclaration);
    type IntoIter = btree_map::Iter<'a, ResourceKey, ResourceDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Declarations of one resource type, in key order
#[derive(Debug, Clone)]
pub struct GenerationUnit<'a> {
    pub package_name: &'a str,
    pub resource_type: ResourceType,
    pub entries: Vec<&'a ResourceDeclaration>,
}

/// Catalog plus the same-rank collisions found while building it
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    pub catalog: CanonicalCatalog,
    pub collisions: Vec<MergeCollision>,
}

/// Applies source-set precedence: inputs are visited by ascending
/// qualifier rank and a later declaration of a key replaces an earlier one.
/// Inputs of equal rank keep their given order.
pub struct Merger;

impl Merger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(&self, mut inputs: Vec<(QualifiedSourceSet, Vec<ResourceDeclaration>)>) -> MergeResult {
        inputs.sort_by_key(|(source_set, _)| source_set.qualifier.rank());

        let mut result = MergeResult::default();

        for (source_set, declarations) in inputs {
            debug!(
                "Merging {} declarations from '{}' ({})",
                declarations.len(),
                source_set.name,
                source_set.qualifier
            );

            for declaration in declarations {
                let winner = declaration.source_set.clone();
                let qualifier = declaration.qualifier;
                let key = declaration.key.clone();

                let Some(previous) = result.catalog.insert(declaration) else {
                    continue;
                };
                // Overrides inside one source set (values-fr, values) are expected
                if previous.qualifier == qualifier && previous.source_set != winner {
                    warn!(
                        "{} is declared by {} source sets '{}' and '{}'; using '{}'",
                        key, qualifier, previous.source_set, winner, winner
                    );
                    result.collisions.push(MergeCollision {
                        key,
                        qualifier,
                        winner,
                        overridden: previous.source_set,
                    });
                }
            }
        }

        debug!("Canonical catalog holds {} resources", result.catalog.len());
        result
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
