//! Recognized resource types and the table that drives code generation.
//!
//! Every type has exactly one row in [`RESOURCE_TYPES`]. The row says where
//! declarations come from (value tags, file folder), which `R` class holds
//! the id, and how each accessor family is shaped. Adding a type means adding
//! a variant and a row; the parser and generator only read the table.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    String,
    Plurals,
    StringArray,
    IntArray,
    TypedArray,
    Color,
    Dimen,
    Integer,
    Bool,
    Drawable,
    Mipmap,
    Layout,
    Id,
    Style,
    Attr,
    Anim,
    Animator,
    Interpolator,
    Transition,
    Menu,
    Navigation,
    Font,
    Raw,
    Xml,
}

/// Whether an accessor is emitted as a function or a read-only property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Function,
    Property,
}

/// Shape of one generated accessor.
///
/// `call` is a Kotlin expression template: `{id}` expands to the `R`
/// reference and `{args}` to the trailing argument list (empty or
/// `, arg1, arg2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorShape {
    pub kind: AccessorKind,
    pub return_type: &'static str,
    pub call: &'static str,
    /// Lines placed directly above the declaration
    pub annotations: &'static [&'static str],
    pub imports: &'static [&'static str],
    /// Leading `quantity: Int` parameter
    pub quantity: bool,
    /// Format arguments of the value become parameters
    pub format_args: bool,
}

impl AccessorShape {
    const fn function(return_type: &'static str, call: &'static str, imports: &'static [&'static str]) -> Self {
        Self {
            kind: AccessorKind::Function,
            return_type,
            call,
            annotations: CONTEXT,
            imports,
            quantity: false,
            format_args: false,
        }
    }

    const fn id_property() -> Self {
        Self {
            kind: AccessorKind::Property,
            return_type: "Int",
            call: "{id}",
            annotations: &[],
            imports: &[],
            quantity: false,
            format_args: false,
        }
    }

    const fn composable(return_type: &'static str, call: &'static str, imports: &'static [&'static str]) -> Self {
        Self {
            kind: AccessorKind::Function,
            return_type,
            call,
            annotations: READ_ONLY_COMPOSABLE,
            imports,
            quantity: false,
            format_args: false,
        }
    }

    const fn with_annotations(mut self, annotations: &'static [&'static str]) -> Self {
        self.annotations = annotations;
        self
    }

    const fn with_quantity(mut self) -> Self {
        self.quantity = true;
        self
    }

    const fn with_format_args(mut self) -> Self {
        self.format_args = true;
        self
    }
}

/// One row of the resource table
#[derive(Debug, Clone, Copy)]
pub struct ResourceTypeSpec {
    pub resource_type: ResourceType,
    /// Canonical type name, also the `type` attribute of `<item>`
    pub name: &'static str,
    /// Nested class of `R` holding the ids
    pub r_class: &'static str,
    /// Marker object the accessors extend
    pub container: &'static str,
    /// Elements of a `values/` file declaring this type
    pub value_tags: &'static [&'static str],
    /// Resource folder (without qualifiers) whose files declare this type
    pub folder: Option<&'static str>,
    /// XML files in `folder` are compiled markup that may create `@+id`s.
    /// Raw files are copied verbatim and never read.
    pub compiled_xml: bool,
    pub resources: AccessorShape,
    pub compose: Option<AccessorShape>,
}

const CONTEXT: &[&str] = &["context(Context)"];
const COLOR_CONTEXT: &[&str] = &["context(Context)", "@ColorInt"];
const READ_ONLY_COMPOSABLE: &[&str] = &["@Composable", "@ReadOnlyComposable"];
const COMPOSABLE: &[&str] = &["@Composable"];

const CONTEXT_IMPORT: &str = "android.content.Context";
const COMPOSABLE_IMPORT: &str = "androidx.compose.runtime.Composable";
const READ_ONLY_IMPORT: &str = "androidx.compose.runtime.ReadOnlyComposable";

pub static RESOURCE_TYPES: [ResourceTypeSpec; 24] = [
    ResourceTypeSpec {
        resource_type: ResourceType::String,
        name: "string",
        r_class: "string",
        container: "Strings",
        value_tags: &["string"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("String", "getString({id}{args})", &[CONTEXT_IMPORT]).with_format_args(),
        compose: Some(
            AccessorShape::composable(
                "String",
                "stringResource({id}{args})",
                &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.stringResource"],
            )
            .with_format_args(),
        ),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Plurals,
        name: "plurals",
        r_class: "plurals",
        container: "Plurals",
        value_tags: &["plurals"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function(
            "String",
            "resources.getQuantityString({id}, quantity{args})",
            &[CONTEXT_IMPORT],
        )
        .with_quantity()
        .with_format_args(),
        compose: Some(
            AccessorShape::composable(
                "String",
                "pluralStringResource({id}, quantity{args})",
                &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.pluralStringResource"],
            )
            .with_quantity()
            .with_format_args(),
        ),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::StringArray,
        name: "string-array",
        r_class: "array",
        container: "StringArrays",
        value_tags: &["string-array"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("Array<String>", "resources.getStringArray({id})", &[CONTEXT_IMPORT]),
        compose: Some(AccessorShape::composable(
            "Array<String>",
            "stringArrayResource({id})",
            &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.stringArrayResource"],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::IntArray,
        name: "integer-array",
        r_class: "array",
        container: "IntArrays",
        value_tags: &["integer-array"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("IntArray", "resources.getIntArray({id})", &[CONTEXT_IMPORT]),
        compose: Some(AccessorShape::composable(
            "IntArray",
            "integerArrayResource({id})",
            &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.integerArrayResource"],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::TypedArray,
        name: "array",
        r_class: "array",
        container: "TypedArrays",
        value_tags: &["array"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function(
            "TypedArray",
            "resources.obtainTypedArray({id})",
            &[CONTEXT_IMPORT, "android.content.res.TypedArray"],
        ),
        compose: None,
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Color,
        name: "color",
        r_class: "color",
        container: "Colors",
        value_tags: &["color"],
        folder: Some("color"),
        compiled_xml: true,
        resources: AccessorShape::function(
            "Int",
            "getColor({id})",
            &[CONTEXT_IMPORT, "androidx.annotation.ColorInt"],
        )
        .with_annotations(COLOR_CONTEXT),
        compose: Some(AccessorShape::composable(
            "Color",
            "colorResource({id})",
            &[
                COMPOSABLE_IMPORT,
                READ_ONLY_IMPORT,
                "androidx.compose.ui.graphics.Color",
                "androidx.compose.ui.res.colorResource",
            ],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Dimen,
        name: "dimen",
        r_class: "dimen",
        container: "Dimens",
        value_tags: &["dimen"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("Float", "resources.getDimension({id})", &[CONTEXT_IMPORT]),
        compose: Some(AccessorShape::composable(
            "Dp",
            "dimensionResource({id})",
            &[
                COMPOSABLE_IMPORT,
                READ_ONLY_IMPORT,
                "androidx.compose.ui.res.dimensionResource",
                "androidx.compose.ui.unit.Dp",
            ],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Integer,
        name: "integer",
        r_class: "integer",
        container: "Integers",
        value_tags: &["integer"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("Int", "resources.getInteger({id})", &[CONTEXT_IMPORT]),
        compose: Some(AccessorShape::composable(
            "Int",
            "integerResource({id})",
            &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.integerResource"],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Bool,
        name: "bool",
        r_class: "bool",
        container: "Bools",
        value_tags: &["bool"],
        folder: None,
        compiled_xml: false,
        resources: AccessorShape::function("Boolean", "resources.getBoolean({id})", &[CONTEXT_IMPORT]),
        compose: Some(AccessorShape::composable(
            "Boolean",
            "booleanResource({id})",
            &[COMPOSABLE_IMPORT, READ_ONLY_IMPORT, "androidx.compose.ui.res.booleanResource"],
        )),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Drawable,
        name: "drawable",
        r_class: "drawable",
        container: "Drawables",
        value_tags: &["drawable"],
        folder: Some("drawable"),
        compiled_xml: true,
        resources: AccessorShape::function(
            "Drawable?",
            "getDrawable({id})",
            &[CONTEXT_IMPORT, "android.graphics.drawable.Drawable"],
        ),
        compose: Some(
            AccessorShape::composable(
                "Painter",
                "painterResource({id})",
                &[
                    COMPOSABLE_IMPORT,
                    "androidx.compose.ui.graphics.painter.Painter",
                    "androidx.compose.ui.res.painterResource",
                ],
            )
            .with_annotations(COMPOSABLE),
        ),
    },
    ResourceTypeSpec {
        resource_type: ResourceType::Mipmap,
        name: "mipmap",
        r_class: "mipmap",
        container: "Mipmaps",
        value_tags: &[],
        folder: Some("mipmap"),
        compiled_xml: true,
        resources: AccessorShape::function(
            "Drawable?",
            "getDrawable({id})",
            &[CONTEXT_IMPORT, "android.graphics.drawable.Drawable"],
        ),
        compose: Some(
            AccessorShape::composable(
                "Painter",
                "painterResource({id})",
                &[
                    COMPOSABLE_IMPORT,
                    "androidx.compose.ui.graphics.painter.Painter",
                    "androidx.compose.ui.res.painterResource",
                ],
            )
            .with_annotations(COMPOSABLE),
        ),
    },
    id_only(ResourceType::Layout, "layout", "Layouts", Some("layout")),
    id_only(ResourceType::Id, "id", "Ids", None),
    id_only(ResourceType::Style, "style", "Styles", None),
    id_only(ResourceType::Attr, "attr", "Attrs", None),
    id_only(ResourceType::Anim, "anim", "Anims", Some("anim")),
    id_only(ResourceType::Animator, "animator", "Animators", Some("animator")),
    id_only(ResourceType::Interpolator, "interpolator", "Interpolators", Some("interpolator")),
    id_only(ResourceType::Transition, "transition", "Transitions", Some("transition")),
    id_only(ResourceType::Menu, "menu", "Menus", Some("menu")),
    id_only(ResourceType::Navigation, "navigation", "Navigations", Some("navigation")),
    id_only(ResourceType::Font, "font", "Fonts", Some("font")),
    ResourceTypeSpec {
        resource_type: ResourceType::Raw,
        name: "raw",
        r_class: "raw",
        container: "Raws",
        value_tags: &[],
        folder: Some("raw"),
        compiled_xml: false,
        resources: AccessorShape::function(
            "InputStream",
            "resources.openRawResource({id})",
            &[CONTEXT_IMPORT, "java.io.InputStream"],
        ),
        compose: None,
    },
    id_only(ResourceType::Xml, "xml", "Xmls", Some("xml")),
];

/// Row for a type whose natural representation is the id itself
const fn id_only(
    resource_type: ResourceType,
    name: &'static str,
    container: &'static str,
    folder: Option<&'static str>,
) -> ResourceTypeSpec {
    // Styles and attrs are declared in values files under their own tag
    let value_tags: &'static [&'static str] = match resource_type {
        ResourceType::Style => &["style"],
        ResourceType::Attr => &["attr"],
        _ => &[],
    };
    ResourceTypeSpec {
        resource_type,
        name,
        r_class: name,
        container,
        value_tags,
        folder,
        compiled_xml: folder.is_some(),
        resources: AccessorShape::id_property(),
        compose: None,
    }
}

impl ResourceType {
    pub fn spec(self) -> &'static ResourceTypeSpec {
        &RESOURCE_TYPES[self as usize]
    }

    pub fn all() -> impl Iterator<Item = ResourceType> {
        RESOURCE_TYPES.iter().map(|spec| spec.resource_type)
    }

    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    pub fn r_class(self) -> &'static str {
        self.spec().r_class
    }

    pub fn container(self) -> &'static str {
        self.spec().container
    }

    /// Type declared by an element of a `values/` file
    pub fn from_value_tag(tag: &str) -> Option<Self> {
        RESOURCE_TYPES
            .iter()
            .find(|spec| spec.value_tags.contains(&tag))
            .map(|spec| spec.resource_type)
    }

    /// Type named by the `type` attribute of `<item>`
    pub fn from_name(name: &str) -> Option<Self> {
        RESOURCE_TYPES
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.resource_type)
    }

    /// Type declared by files in a resource folder, ignoring configuration
    /// qualifiers (`drawable-hdpi` → drawable)
    pub fn from_folder(folder: &str) -> Option<Self> {
        let base = folder.split('-').next().unwrap_or(folder);
        RESOURCE_TYPES
            .iter()
            .find(|spec| spec.folder == Some(base))
            .map(|spec| spec.resource_type)
    }

    pub fn supports_compose(self) -> bool {
        self.spec().compose.is_some()
    }
}

// Types order by canonical name so generated output sorts lexicographically
impl Ord for ResourceType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ResourceType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
