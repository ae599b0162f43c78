use super::sanitize::SanitizedName;
use crate::model::{AccessorKind, AccessorShape, ResourceDeclaration, ResourceType};
use std::collections::BTreeSet;

/// First line of every generated file; marks files the sink may prune
pub const GENERATED_HEADER: &str = "// Generated by catalog-codegen. Do not edit.";

const INDENT: &str = "    ";

/// One accessor to render
pub struct Accessor<'a> {
    pub declaration: &'a ResourceDeclaration,
    pub name: SanitizedName,
    pub shape: &'a AccessorShape,
}

/// Line-oriented builder for Kotlin source
#[derive(Debug, Default)]
pub struct KotlinWriter {
    out: String,
}

impl KotlinWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn indented(&mut self, text: &str) {
        self.out.push_str(INDENT);
        self.line(text);
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Render the file for one resource type.
///
/// `jvm_name` keeps the facade classes of different variants apart.
pub fn render_file(package_name: &str, jvm_name: &str, resource_type: ResourceType, accessors: &[Accessor<'_>]) -> String {
    let container = resource_type.container();
    let imports: BTreeSet<&str> = accessors
        .iter()
        .flat_map(|a| a.shape.imports.iter().copied())
        .collect();

    let mut w = KotlinWriter::new();
    w.line(GENERATED_HEADER);
    w.line(&format!("@file:JvmName(\"{}\")", jvm_name));
    w.blank();
    w.line(&format!("package {}", package_name));
    if !imports.is_empty() {
        w.blank();
        for import in &imports {
            w.line(&format!("import {}", import));
        }
    }
    w.blank();
    w.line(&format!("object {}", container));

    for accessor in accessors {
        w.blank();
        render_accessor(&mut w, container, accessor);
    }

    w.finish()
}

fn render_accessor(w: &mut KotlinWriter, container: &str, accessor: &Accessor<'_>) {
    let declaration = accessor.declaration;
    let shape = accessor.shape;

    if let Some(summary) = declaration.value.summary() {
        w.line(&format!("/** {} */", kdoc(summary)));
    }
    for annotation in shape.annotations {
        w.line(annotation);
    }

    let id = format!("R.{}.{}", declaration.resource_type().r_class(), accessor.name.field);
    let (params, args) = parameters(shape, declaration);
    let call = shape.call.replace("{id}", &id).replace("{args}", &args);

    match shape.kind {
        AccessorKind::Function => w.line(&format!(
            "fun {}.{}({}): {} = {}",
            container, accessor.name.accessor, params, shape.return_type, call
        )),
        AccessorKind::Property => {
            w.line(&format!("val {}.{}: {}", container, accessor.name.accessor, shape.return_type));
            w.indented(&format!("get() = {}", call));
        }
    }
}

/// Parameter list and the trailing call arguments derived from it
fn parameters(shape: &AccessorShape, declaration: &ResourceDeclaration) -> (String, String) {
    let mut params = Vec::new();
    if shape.quantity {
        params.push("quantity: Int".to_string());
    }

    let mut args = String::new();
    if shape.format_args {
        for arg in &declaration.format_args {
            params.push(format!("arg{}: {}", arg.position, arg.kind.kotlin_type()));
            args.push_str(&format!(", arg{}", arg.position));
        }
    }

    (params.join(", "), args)
}

/// Single-line KDoc text that cannot close the comment early
fn kdoc(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*&#47;")
        .replace("/*", "&#47;*")
}
