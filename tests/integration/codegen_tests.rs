//! Generated Kotlin for catalogs built through the public API

use catalog_codegen::codegen::{sanitize_identifier, GenerationOptions, GENERATED_HEADER};
use catalog_codegen::model::FormatArg;
use catalog_codegen::parser::extract_format_args;
use catalog_codegen::{
    CanonicalCatalog, Codegen, GenerationError, Merger, QualifiedSourceSet, ResourceDeclaration, ResourceKey,
    ResourceType, ResourceValue, SourceSetQualifier,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn declaration(resource_type: ResourceType, name: &str, value: ResourceValue) -> ResourceDeclaration {
    let format_args: Vec<FormatArg> = match &value {
        ResourceValue::Text(text) if resource_type == ResourceType::String => extract_format_args(text),
        _ => Vec::new(),
    };
    ResourceDeclaration {
        key: ResourceKey::new(resource_type, name),
        value,
        format_args,
        qualifier: SourceSetQualifier::Main,
        source_set: "main".to_string(),
        source_file: PathBuf::from("src/main/res/values/values.xml"),
        line: 1,
    }
}

fn text(value: &str) -> ResourceValue {
    ResourceValue::Text(value.to_string())
}

fn catalog(declarations: Vec<ResourceDeclaration>) -> CanonicalCatalog {
    let main = QualifiedSourceSet::new("main", SourceSetQualifier::Main, "src/main/res");
    Merger::new().merge(vec![(main, declarations)]).catalog
}

fn options(resources: bool, compose: bool) -> GenerationOptions {
    let mut options = GenerationOptions::new("com.example.app", "freeDebug");
    options.generate_resources_extensions = resources;
    options.generate_compose_extensions = compose;
    options
}

fn file_for<'a>(files: &'a [catalog_codegen::GeneratedFile], resource_type: ResourceType) -> &'a str {
    &files
        .iter()
        .find(|f| f.resource_type == resource_type)
        .unwrap_or_else(|| panic!("no file for {resource_type}"))
        .contents
}

#[test]
fn test_strings_file_layout() {
    let catalog = catalog(vec![
        declaration(ResourceType::String, "welcome_message", text("Hello %1$s!")),
        declaration(ResourceType::String, "app_name", text("Demo")),
    ]);
    let generation = Codegen::new(options(true, true)).generate(&catalog);
    let strings = file_for(&generation.files, ResourceType::String);

    let expected = format!(
        r#"{GENERATED_HEADER}
@file:JvmName("StringsFreeDebug")

package com.example.app

import android.content.Context
import androidx.compose.runtime.Composable
import androidx.compose.runtime.ReadOnlyComposable
import androidx.compose.ui.res.stringResource

object Strings

/** Demo */
context(Context)
fun Strings.appName(): String = getString(R.string.app_name)

/** Demo */
@Composable
@ReadOnlyComposable
fun Strings.appName(): String = stringResource(R.string.app_name)

/** Hello %1$s! */
context(Context)
fun Strings.welcomeMessage(arg1: Any): String = getString(R.string.welcome_message, arg1)

/** Hello %1$s! */
@Composable
@ReadOnlyComposable
fun Strings.welcomeMessage(arg1: Any): String = stringResource(R.string.welcome_message, arg1)
"#
    );
    assert_eq!(strings, expected);
}

#[test]
fn test_compose_subset() {
    let mut quantities = BTreeMap::new();
    quantities.insert("other".to_string(), "%d items".to_string());

    let catalog = catalog(vec![
        declaration(ResourceType::Color, "accent", text("#FF00FF")),
        declaration(ResourceType::Dimen, "margin", text("16dp")),
        declaration(ResourceType::Drawable, "ic_logo", ResourceValue::File(PathBuf::from("ic_logo.xml"))),
        declaration(ResourceType::Plurals, "items", ResourceValue::Quantities(quantities)),
        declaration(ResourceType::Layout, "activity_main", ResourceValue::File(PathBuf::from("activity_main.xml"))),
        declaration(ResourceType::TypedArray, "icons", ResourceValue::Items(vec!["@drawable/a".to_string()])),
    ]);
    let generation = Codegen::new(options(false, true)).generate(&catalog);

    let types: Vec<_> = generation.files.iter().map(|f| f.resource_type).collect();
    assert_eq!(
        types,
        vec![ResourceType::Color, ResourceType::Dimen, ResourceType::Drawable, ResourceType::Plurals]
    );
    assert_eq!(generation.stats.compose_accessors, 4);

    assert!(file_for(&generation.files, ResourceType::Color)
        .contains("fun Colors.accent(): Color = colorResource(R.color.accent)"));
    assert!(file_for(&generation.files, ResourceType::Dimen)
        .contains("fun Dimens.margin(): Dp = dimensionResource(R.dimen.margin)"));
    let drawables = file_for(&generation.files, ResourceType::Drawable);
    assert!(drawables.contains("@Composable\nfun Drawables.icLogo(): Painter = painterResource(R.drawable.ic_logo)"));
    assert!(!drawables.contains("@ReadOnlyComposable"));
}

#[test]
fn test_resources_accessors_for_every_type() {
    let catalog = catalog(vec![
        declaration(ResourceType::Color, "accent", text("#FF00FF")),
        declaration(ResourceType::Bool, "is_tablet", text("false")),
        declaration(ResourceType::Integer, "max_items", text("10")),
        declaration(ResourceType::Style, "Theme.App", ResourceValue::Empty),
        declaration(ResourceType::Id, "title", ResourceValue::Empty),
        declaration(ResourceType::Raw, "intro", ResourceValue::File(PathBuf::from("intro.mp3"))),
        declaration(ResourceType::StringArray, "planets", ResourceValue::Items(vec!["Mercury".to_string()])),
    ]);
    let generation = Codegen::new(options(true, false)).generate(&catalog);
    assert_eq!(generation.stats.resources_accessors, 7);

    assert!(file_for(&generation.files, ResourceType::Color)
        .contains("context(Context)\n@ColorInt\nfun Colors.accent(): Int = getColor(R.color.accent)"));
    assert!(file_for(&generation.files, ResourceType::Bool)
        .contains("fun Bools.isTablet(): Boolean = resources.getBoolean(R.bool.is_tablet)"));
    assert!(file_for(&generation.files, ResourceType::Style)
        .contains("val Styles.themeApp: Int\n    get() = R.style.Theme_App"));
    assert!(file_for(&generation.files, ResourceType::Id).contains("val Ids.title: Int\n    get() = R.id.title"));
    assert!(file_for(&generation.files, ResourceType::Raw)
        .contains("fun Raws.intro(): InputStream = resources.openRawResource(R.raw.intro)"));
    assert!(file_for(&generation.files, ResourceType::StringArray)
        .contains("fun StringArrays.planets(): Array<String> = resources.getStringArray(R.array.planets)"));
}

#[test]
fn test_both_flags_false_emits_nothing() {
    let catalog = catalog(vec![
        declaration(ResourceType::String, "a", text("A")),
        declaration(ResourceType::Color, "b", text("#000")),
    ]);
    let generation = Codegen::new(options(false, false)).generate(&catalog);
    assert!(generation.files.is_empty());
    assert!(generation.errors.is_empty());
    assert_eq!(generation.stats.resources_accessors + generation.stats.compose_accessors, 0);
}

#[test]
fn test_sanitization_is_deterministic() {
    let key = ResourceKey::new(ResourceType::String, "app_name.v2");
    let first = sanitize_identifier(&key).expect("valid identifier");
    for _ in 0..10 {
        assert_eq!(sanitize_identifier(&key).expect("valid identifier"), first);
    }
    assert_eq!(first.accessor, "appNameV2");
}

#[test]
fn test_collision_names_both_resources() {
    let catalog = catalog(vec![
        declaration(ResourceType::String, "foo_bar", text("a")),
        declaration(ResourceType::String, "foo.bar", text("b")),
        declaration(ResourceType::Dimen, "gap", text("4dp")),
    ]);
    let generation = Codegen::new(options(true, false)).generate(&catalog);

    assert_eq!(generation.files.len(), 1);
    assert_eq!(generation.stats.failed_groups, 1);
    match &generation.errors[..] {
        [GenerationError::IdentifierCollision { identifier, names, .. }] => {
            assert_eq!(identifier, "fooBar");
            assert_eq!(names, &vec!["foo.bar".to_string(), "foo_bar".to_string()]);
        }
        other => panic!("unexpected errors: {other:?}"),
    }
}

#[test]
fn test_empty_identifier_fails_its_group() {
    let catalog = catalog(vec![
        declaration(ResourceType::Integer, "__", text("1")),
        declaration(ResourceType::Integer, "count", text("2")),
    ]);
    let generation = Codegen::new(options(true, false)).generate(&catalog);
    assert!(generation.files.is_empty());
    assert!(matches!(
        &generation.errors[..],
        [GenerationError::EmptyIdentifier { key }] if key.name == "__"
    ));
}
