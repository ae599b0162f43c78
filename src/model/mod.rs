mod declaration;
mod qualifier;
mod resource_type;

pub use declaration::{FormatArg, FormatKind, ResourceDeclaration, ResourceKey, ResourceValue};
pub use qualifier::{QualifiedSourceSet, SourceSetQualifier};
pub use resource_type::{AccessorKind, AccessorShape, ResourceType, ResourceTypeSpec, RESOURCE_TYPES};
