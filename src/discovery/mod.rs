//! Locating resource inputs: res-directory snapshots and the Android
//! module layout that turns a variant into qualified source sets

mod layout;
mod snapshot;

pub use layout::{resolve_package_name, ProjectLayout, VariantSpec};
pub use snapshot::{ParsedFiles, ResDirSnapshot, ResourceFile, ResourceFileKind};
