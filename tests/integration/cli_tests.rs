//! CLI integration tests
//!
//! These tests run the binary against temporary Android modules.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("Failed to create directories");
    fs::write(path, contents).expect("Failed to write file");
}

fn catalog_codegen() -> Command {
    Command::cargo_bin("catalog-codegen").expect("binary is built")
}

/// Module with a manifest, a main and a debug source set
fn module() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write(
        root,
        "src/main/AndroidManifest.xml",
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.demo"/>"#,
    );
    write(
        root,
        "src/main/res/values/strings.xml",
        r#"<resources><string name="app_name">Demo</string></resources>"#,
    );
    write(
        root,
        "src/debug/res/values/colors.xml",
        r##"<resources><color name="accent">#FF00FF</color></resources>"##,
    );
    temp_dir
}

#[test]
fn test_cli_help() {
    catalog_codegen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog-codegen"))
        .stdout(predicate::str::contains("--compose"))
        .stdout(predicate::str::contains("--build-type"));
}

#[test]
fn test_cli_version() {
    catalog_codegen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog-codegen"));
}

#[test]
fn test_generates_into_variant_directory() {
    let temp_dir = module();
    let root = temp_dir.path();

    catalog_codegen()
        .arg(root)
        .args(["--build-type", "debug", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Variant"));

    let output = root.join("build/generated/catalog/debug/kotlin/com/example/demo");
    let strings = fs::read_to_string(output.join("Strings.kt")).expect("Strings.kt written");
    assert!(strings.contains("fun Strings.appName(): String = getString(R.string.app_name)"));
    assert!(output.join("Colors.kt").is_file());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = module();
    let root = temp_dir.path();

    catalog_codegen()
        .arg(root)
        .args(["--build-type", "debug", "--dry-run", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert!(!root.join("build").exists());
}

#[test]
fn test_json_report() {
    let temp_dir = module();
    let root = temp_dir.path();
    let report = root.join("report.json");

    catalog_codegen()
        .arg(root)
        .args(["--build-type", "debug", "--compose", "--format", "json", "--quiet"])
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).expect("report written")).expect("valid JSON");
    assert_eq!(json["variant"], "debug");
    assert_eq!(json["package"], "com.example.demo");
    assert_eq!(json["resources"], 2);
    assert_eq!(json["stats"]["resources_accessors"], 2);
    assert_eq!(json["stats"]["compose_accessors"], 2);
}

#[test]
fn test_missing_package_fails() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        temp_dir.path(),
        "src/main/res/values/strings.xml",
        r#"<resources><string name="a">A</string></resources>"#,
    );

    catalog_codegen()
        .arg(temp_dir.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing package name"));
}

#[test]
fn test_explicit_source_sets_and_package() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write(root, "base/values/strings.xml", r#"<resources><string name="title">Base</string></resources>"#);
    write(root, "paid/values/strings.xml", r#"<resources><string name="title">Paid</string></resources>"#);

    catalog_codegen()
        .arg(root)
        .arg("--res")
        .arg(format!("main:main={}", root.join("base").display()))
        .arg("--res")
        .arg(format!("flavor:paid={}", root.join("paid").display()))
        .args(["--variant", "paid", "--package", "com.example.paid", "--dry-run", "--format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"package\": \"com.example.paid\""))
        .stdout(predicate::str::contains("com/example/paid/Strings.kt"));
}

#[test]
fn test_generation_error_exits_non_zero() {
    let temp_dir = module();
    let root = temp_dir.path();
    write(
        root,
        "src/main/res/values/dupes.xml",
        r#"<resources><string name="foo_bar">a</string><string name="foo.bar">b</string></resources>"#,
    );

    catalog_codegen()
        .arg(root)
        .args(["--build-type", "debug", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fooBar"));

    // The healthy group is still written
    assert!(root
        .join("build/generated/catalog/debug/kotlin/com/example/demo/Colors.kt")
        .is_file());
}

#[test]
fn test_no_resources_flag() {
    let temp_dir = module();
    let root = temp_dir.path();

    catalog_codegen()
        .arg(root)
        .args(["--build-type", "debug", "--no-resources", "--quiet"])
        .assert()
        .success();

    assert!(!root.join("build/generated/catalog/debug/kotlin/com/example/demo/Strings.kt").exists());
}
