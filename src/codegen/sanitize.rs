use crate::error::GenerationError;
use crate::model::ResourceKey;
use heck::ToLowerCamelCase;

/// Kotlin hard keywords; identifiers spelled like one need backticks
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in", "interface", "is",
    "null", "object", "package", "return", "super", "this", "throw", "true", "try", "typealias", "typeof",
    "val", "var", "when", "while",
];

/// Names derived from one resource name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    /// Field of the `R` class (`app_name.v2` → `app_name_v2`)
    pub field: String,
    /// Accessor identifier, ready to paste into Kotlin source
    pub accessor: String,
}

/// Field name aapt gives a resource: every character that cannot appear in
/// a Java identifier becomes `_`
pub fn r_field_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Derive the accessor identifier for a resource
pub fn sanitize_identifier(key: &ResourceKey) -> Result<SanitizedName, GenerationError> {
    let field = r_field_name(&key.name);
    let mut accessor = field.to_lower_camel_case();

    if accessor.is_empty() {
        return Err(GenerationError::EmptyIdentifier { key: key.clone() });
    }
    if accessor.starts_with(|c: char| c.is_ascii_digit()) {
        accessor.insert(0, '_');
    }

    Ok(SanitizedName {
        field,
        accessor: escape_keyword(accessor),
    })
}

pub fn escape_keyword(identifier: String) -> String {
    if KOTLIN_KEYWORDS.contains(&identifier.as_str()) {
        format!("`{}`", identifier)
    } else {
        identifier
    }
}
