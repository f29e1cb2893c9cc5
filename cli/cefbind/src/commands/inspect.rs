//! `cefbind inspect`: dump field descriptors as JSON.

use std::path::Path;

use anyhow::{Context, Result};
use cefbind_core::{BindingDeclaration, Field};
use serde::Serialize;

#[derive(Serialize)]
struct StructView<'a> {
    name: &'a str,
    host_name: &'a str,
    class_equivalent: bool,
    fields: Vec<Field<'a>>,
}

pub fn run(path: &Path, struct_name: Option<&str>) -> Result<()> {
    let decl = super::load_declaration(path)?;
    super::require_struct(&decl, struct_name)?;
    println!("{}", describe(&decl, struct_name)?);
    Ok(())
}

/// Pretty-printed JSON array of the selected structs and their fields.
pub fn describe(decl: &BindingDeclaration, struct_name: Option<&str>) -> Result<String> {
    let naming = decl.naming();
    let registry = decl.registry(&naming)?;

    let mut views = Vec::new();
    for s in decl
        .structs
        .iter()
        .filter(|s| struct_name.map_or(true, |n| s.name == n))
    {
        let fields = s
            .build_fields(&registry, &decl.generator, &naming)
            .with_context(|| format!("building fields of {}", s.name))?;
        let host_name = registry
            .struct_def(&s.name)
            .map(|d| d.host_name.as_str())
            .unwrap_or_default();
        views.push(StructView {
            name: &s.name,
            host_name,
            class_equivalent: s.class_equivalent,
            fields,
        });
    }

    serde_json::to_string_pretty(&views).context("serializing field descriptors")
}
