//! catalog-codegen - Type-safe Kotlin accessors for Android resources
//!
//! Reads the res directories of the source sets feeding one build variant
//! and generates Kotlin extension accessors for every declared resource.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Discovery** - Derive qualified source sets and snapshot their res directories
//! 2. **Parsing** - Read values files and id-declaring XML into declarations
//! 3. **Merging** - Apply source-set precedence into one canonical catalog
//! 4. **Generation** - Render one Kotlin file per resource type
//! 5. **Emission** - Write the files to the variant's output directory

pub mod codegen;
pub mod config;
pub mod discovery;
pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use codegen::{Codegen, GeneratedFile, Generation, GenerationOptions};
pub use config::Config;
pub use discovery::{resolve_package_name, ProjectLayout, ResDirSnapshot, VariantSpec};
pub use error::{CatalogError, Diagnostics, GenerationError, ParseError};
pub use merge::{CanonicalCatalog, GenerationUnit, Merger};
pub use model::{QualifiedSourceSet, ResourceDeclaration, ResourceKey, ResourceType, ResourceValue, SourceSetQualifier};
pub use parser::ResourceParser;
pub use pipeline::{Pipeline, PipelineOutput};
pub use sink::{DirectorySink, EmissionSink, MemorySink};
pub use report::{ReportFormat, Reporter};
