//! `cefbind check`: validate a declaration without printing any source.

use std::path::Path;

use anyhow::{Context, Result};
use cefbind_core::BindingDeclaration;

/// Counts gathered from a successful generation pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub structs: usize,
    pub enums: usize,
    pub fields: usize,
    pub function_ptrs: usize,
    pub skipped: usize,
    pub needs_unsafe: usize,
}

pub fn run(path: &Path) -> Result<()> {
    let decl = super::load_declaration(path)?;
    let summary = summarize(&decl).with_context(|| format!("checking {}", path.display()))?;
    println!(
        "{}: {} structs, {} enums, {} fields ({} function pointers, {} skipped, {} need unsafe)",
        path.display(),
        summary.structs,
        summary.enums,
        summary.fields,
        summary.function_ptrs,
        summary.skipped,
        summary.needs_unsafe,
    );
    Ok(())
}

/// Run the full generation pass and count what it produced.
pub fn summarize(decl: &BindingDeclaration) -> Result<CheckSummary> {
    let structs = cefbind_emit::generate(decl)?;
    let fields = || structs.iter().flat_map(|s| s.fields.iter());
    Ok(CheckSummary {
        structs: structs.len(),
        enums: decl.enums.len(),
        fields: fields().count(),
        function_ptrs: fields().filter(|f| f.function_ptr).count(),
        skipped: structs.iter().map(|s| s.skipped).sum(),
        needs_unsafe: fields().filter(|f| f.needs_unsafe).count(),
    })
}
