//! `cefbind emit`: print generated host source for a declaration.

use std::path::Path;

use anyhow::{Context, Result};
use cefbind_core::GeneratorConfig;
use cefbind_emit::{FieldFragments, StructFragments};

/// Generate bindings for every struct (or just `struct_name`) and print them.
pub fn run(path: &Path, struct_name: Option<&str>) -> Result<()> {
    let decl = super::load_declaration(path)?;
    super::require_struct(&decl, struct_name)?;

    let structs = cefbind_emit::generate(&decl)
        .with_context(|| format!("generating bindings for {}", path.display()))?;
    let selected: Vec<StructFragments> = structs
        .into_iter()
        .filter(|s| struct_name.map_or(true, |n| s.name == n))
        .collect();

    print!("{}", render(&selected, &decl.generator));
    Ok(())
}

/// Assemble fragments into one host source listing.
///
/// Trampolines go in the cgo preamble ahead of the native import. Methods
/// and conversion functions follow, grouped by struct.
pub fn render(structs: &[StructFragments], config: &GeneratorConfig) -> String {
    let mut text = String::new();
    let fields = || structs.iter().flat_map(|s| s.fields.iter());

    let trampolines: Vec<&str> = fields()
        .map(|f| f.trampoline.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    if !trampolines.is_empty() {
        text.push_str("/*\n");
        for t in trampolines {
            text.push_str(t);
            text.push('\n');
        }
        text.push_str("*/\n");
    }
    text.push_str(&format!("import \"{}\"\n", config.native_package));
    if fields().any(|f| f.needs_unsafe) {
        text.push_str("import \"unsafe\"\n");
    }

    for s in structs {
        text.push_str(&format!("\n// {} wraps {}.\n", s.host_name, s.name));
        for f in s.fields.iter().filter(|f| f.function_ptr) {
            text.push('\n');
            text.push_str(&method(s, f));
        }
        let data: Vec<&FieldFragments> = s.fields.iter().filter(|f| !f.function_ptr).collect();
        if !data.is_empty() {
            text.push('\n');
            text.push_str(&conversions(s, &data, config));
        }
    }
    text
}

fn indent(body: &str) -> String {
    body.lines().map(|l| format!("\t{l}\n")).collect()
}

fn method(s: &StructFragments, f: &FieldFragments) -> String {
    let ret = if f.return_type.is_empty() {
        String::new()
    } else {
        format!(" {}", f.return_type)
    };
    format!(
        "func (d *{}) {}({}){ret} {{\n{}}}\n",
        s.host_name,
        f.host_name,
        f.parameter_list,
        indent(&f.call)
    )
}

fn conversions(s: &StructFragments, data: &[&FieldFragments], config: &GeneratorConfig) -> String {
    let native = config.native(&s.name);
    let to: String = data.iter().map(|f| f.to_native.as_str()).collect::<Vec<_>>().join("\n");
    let from: String = data.iter().map(|f| f.from_native.as_str()).collect::<Vec<_>>().join("\n");
    format!(
        "func (d *{host}) toNative(native *{native}) *{native} {{\n{}\treturn native\n}}\n\n\
         func (d *{host}) fromNative(native *{native}) {{\n{}}}\n",
        indent(&to),
        indent(&from),
        host = s.host_name,
    )
}
