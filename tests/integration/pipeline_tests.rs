//! End-to-end pipeline tests over on-disk Android module layouts

use catalog_codegen::codegen::GenerationOptions;
use catalog_codegen::discovery::{ProjectLayout, VariantSpec};
use catalog_codegen::pipeline::{emit, Pipeline};
use catalog_codegen::sink::{DirectorySink, MemorySink};
use catalog_codegen::{
    CatalogError, Config, QualifiedSourceSet, ResourceKey, ResourceType, ResourceValue, SourceSetQualifier,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("Failed to create directories");
    fs::write(path, contents).expect("Failed to write file");
}

/// main declares app_name; debug overrides it and adds a color
fn demo_module() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let module = temp_dir.path();
    write(
        module,
        "src/main/res/values/strings.xml",
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Demo</string>
</resources>"#,
    );
    write(
        module,
        "src/debug/res/values/values.xml",
        r##"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Demo (Debug)</string>
    <color name="accent">#FF00FF</color>
</resources>"##,
    );
    temp_dir
}

fn debug_layout(module: &Path) -> ProjectLayout {
    ProjectLayout::new(module, VariantSpec::new(None, Some("debug".to_string()), Vec::new()))
}

#[test]
fn test_debug_variant_end_to_end() {
    let temp_dir = demo_module();
    let layout = debug_layout(temp_dir.path());
    let options = GenerationOptions::new("com.example.demo", "debug");

    let output = Pipeline::new(Config::default())
        .run(&layout.source_sets(), &options)
        .expect("pipeline should succeed");

    assert_eq!(output.catalog.len(), 2);
    let app_name = output
        .catalog
        .get(&ResourceKey::new(ResourceType::String, "app_name"))
        .expect("app_name is in the catalog");
    assert_eq!(app_name.value, ResourceValue::Text("Demo (Debug)".to_string()));
    assert_eq!(app_name.source_set, "debug");
    let accent = output
        .catalog
        .get(&ResourceKey::new(ResourceType::Color, "accent"))
        .expect("accent is in the catalog");
    assert_eq!(accent.value, ResourceValue::Text("#FF00FF".to_string()));

    let generation = &output.generation;
    assert!(generation.is_success());
    assert_eq!(generation.stats.resources_accessors, 2);
    assert_eq!(generation.stats.compose_accessors, 0);
    let types: Vec<_> = generation.files.iter().map(|f| f.resource_type).collect();
    assert_eq!(types, vec![ResourceType::Color, ResourceType::String]);

    let strings = &generation.files[1].contents;
    assert!(strings.contains("package com.example.demo\n"));
    assert!(strings.contains("/** Demo (Debug) */"));
    assert!(strings.contains("fun Strings.appName(): String = getString(R.string.app_name)"));

    let output_dir = layout.output_dir(&Config::default().output_dir);
    let summary = emit(generation, &mut DirectorySink::new(&output_dir)).expect("emission should succeed");
    assert_eq!(summary.written, 2);
    assert!(output_dir.join("com/example/demo/Colors.kt").is_file());
    assert!(temp_dir
        .path()
        .join("build/generated/catalog/debug/kotlin/com/example/demo/Strings.kt")
        .is_file());
}

#[test]
fn test_generation_is_idempotent() {
    let temp_dir = demo_module();
    let layout = debug_layout(temp_dir.path());
    let mut options = GenerationOptions::new("com.example.demo", "debug");
    options.generate_compose_extensions = true;

    let pipeline = Pipeline::new(Config::default());
    let first = pipeline.run(&layout.source_sets(), &options).expect("first run");
    let second = pipeline.run(&layout.source_sets(), &options).expect("second run");

    let mut first_sink = MemorySink::new();
    let mut second_sink = MemorySink::new();
    emit(&first.generation, &mut first_sink).expect("emit first");
    emit(&second.generation, &mut second_sink).expect("emit second");
    assert_eq!(first_sink.files(), second_sink.files());

    // Rewriting the same output leaves files untouched
    let output_dir = layout.output_dir(Path::new("build/generated/catalog"));
    emit(&first.generation, &mut DirectorySink::new(&output_dir)).expect("first write");
    let summary = emit(&second.generation, &mut DirectorySink::new(&output_dir)).expect("second write");
    assert_eq!(summary.written, 0);
    assert_eq!(summary.unchanged, 2);
    assert!(summary.pruned.is_empty());
}

#[test]
fn test_flavor_overrides_main() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let module = temp_dir.path();
    write(
        module,
        "src/main/res/values/strings.xml",
        r#"<resources><string name="title">Main</string><string name="shared">Shared</string></resources>"#,
    );
    write(
        module,
        "src/free/res/values/strings.xml",
        r#"<resources><string name="title">Free</string></resources>"#,
    );

    let layout = ProjectLayout::new(
        module,
        VariantSpec::new(None, Some("release".to_string()), vec!["free".to_string()]),
    );
    assert_eq!(layout.variant.name, "freeRelease");

    let output = Pipeline::new(Config::default())
        .run(&layout.source_sets(), &GenerationOptions::new("com.example", "freeRelease"))
        .expect("pipeline should succeed");

    let title = output
        .catalog
        .get(&ResourceKey::new(ResourceType::String, "title"))
        .expect("title is in the catalog");
    assert_eq!(title.value, ResourceValue::Text("Free".to_string()));
    assert_eq!(title.qualifier, SourceSetQualifier::ProductFlavor);
    assert!(output
        .catalog
        .get(&ResourceKey::new(ResourceType::String, "shared"))
        .is_some());
}

#[test]
fn test_absent_source_set_equals_empty_one() {
    let temp_dir = demo_module();
    let module = temp_dir.path();
    let options = GenerationOptions::new("com.example.demo", "debug");

    let layout = ProjectLayout::new(
        module,
        VariantSpec::new(None, Some("debug".to_string()), vec!["paid".to_string()]),
    );
    let without = Pipeline::new(Config::default())
        .run(&layout.source_sets(), &options)
        .expect("absent flavor dir");

    fs::create_dir_all(module.join("src/paid/res/values")).expect("create empty flavor dir");
    let with_empty = Pipeline::new(Config::default())
        .run(&layout.source_sets(), &options)
        .expect("empty flavor dir");

    assert_eq!(without.catalog, with_empty.catalog);
}

#[test]
fn test_file_resources_and_ids() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let res = temp_dir.path().join("res");
    write(
        &res,
        "layout/activity_main.xml",
        r#"<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android">
    <TextView android:id="@+id/title" />
</LinearLayout>"#,
    );
    write(&res, "layout-land/activity_main.xml", r#"<FrameLayout/>"#);
    write(&res, "drawable-hdpi/ic_logo.png", "png");
    write(&res, "drawable/ic_logo.xml", r#"<vector/>"#);
    write(&res, "raw/intro.mp3", "mp3");

    let source_sets = vec![QualifiedSourceSet::new("main", SourceSetQualifier::Main, &res)];
    let output = Pipeline::new(Config::default())
        .run(&source_sets, &GenerationOptions::new("com.example", "main"))
        .expect("pipeline should succeed");

    let keys: Vec<String> = output.catalog.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(
        keys,
        vec!["drawable:ic_logo", "id:title", "layout:activity_main", "raw:intro"]
    );

    // The unqualified folder is the last writer inside a source set
    let layout = output
        .catalog
        .get(&ResourceKey::new(ResourceType::Layout, "activity_main"))
        .expect("layout is in the catalog");
    assert!(layout.source_file.ends_with("layout/activity_main.xml"));
}

#[test]
fn test_raw_xml_is_copied_not_parsed() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let res = temp_dir.path().join("res");
    write(&res, "raw/notes.xml", "just some text, not markup & stuff");
    write(&res, "values/strings.xml", r#"<resources><string name="title">Title</string></resources>"#);

    let source_sets = vec![QualifiedSourceSet::new("main", SourceSetQualifier::Main, &res)];
    let output = Pipeline::new(Config::default())
        .run(&source_sets, &GenerationOptions::new("com.example", "main"))
        .expect("raw files are never parsed");

    let keys: Vec<String> = output.catalog.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(keys, vec!["raw:notes", "string:title"]);

    let raws = output
        .generation
        .files
        .iter()
        .find(|f| f.resource_type == ResourceType::Raw)
        .expect("raw accessors generated");
    assert!(raws.contents.contains("fun Raws.notes(): InputStream = resources.openRawResource(R.raw.notes)"));
}

#[test]
fn test_skipped_entries_are_reported_not_fatal() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let res = temp_dir.path().join("res");
    write(
        &res,
        "values/attrs.xml",
        r#"<resources>
    <declare-styleable name="Chip"><attr name="chipColor" format="color"/></declare-styleable>
    <string>nameless</string>
    <integer name="max_items">10</integer>
</resources>"#,
    );

    let source_sets = vec![QualifiedSourceSet::new("main", SourceSetQualifier::Main, &res)];
    let output = Pipeline::new(Config::default())
        .run(&source_sets, &GenerationOptions::new("com.example", "main"))
        .expect("pipeline should succeed");

    assert_eq!(output.catalog.len(), 1);
    assert_eq!(output.diagnostics.skipped.len(), 2);
}

#[test]
fn test_malformed_file_fails_with_location() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let res = temp_dir.path().join("res");
    write(&res, "values/ok.xml", r#"<resources><bool name="enabled">true</bool></resources>"#);
    write(&res, "values/broken.xml", "<resources>\n  <string name=\"a\">A</strin>\n</resources>");

    let source_sets = vec![QualifiedSourceSet::new("main", SourceSetQualifier::Main, &res)];
    let err = Pipeline::new(Config::default())
        .run(&source_sets, &GenerationOptions::new("com.example", "main"))
        .expect_err("broken markup must fail");

    match err {
        CatalogError::MalformedResources { errors } => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].path.ends_with("values/broken.xml"));
            assert_eq!(errors[0].line, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_same_rank_collision_is_a_warning() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let module = temp_dir.path();
    write(module, "free/values/colors.xml", r##"<resources><color name="brand">#111111</color></resources>"##);
    write(module, "arm/values/colors.xml", r##"<resources><color name="brand">#222222</color></resources>"##);

    let source_sets = vec![
        QualifiedSourceSet::new("free", SourceSetQualifier::ProductFlavor, module.join("free")),
        QualifiedSourceSet::new("arm", SourceSetQualifier::ProductFlavor, module.join("arm")),
    ];
    let output = Pipeline::new(Config::default())
        .run(&source_sets, &GenerationOptions::new("com.example", "freeArmDebug"))
        .expect("collisions are not fatal");

    assert_eq!(output.diagnostics.collisions.len(), 1);
    let brand = output
        .catalog
        .get(&ResourceKey::new(ResourceType::Color, "brand"))
        .expect("brand is in the catalog");
    assert_eq!(brand.value, ResourceValue::Text("#222222".to_string()));
}
